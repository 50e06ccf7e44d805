//! In-memory view state for UI frontends.
//!
//! A pure reducer over the catalog as a client sees it: the full drill
//! list, the category-filtered view derived from it, and the last batch
//! of generated drills. No I/O happens here; callers feed it actions as
//! API responses arrive.

use crate::models::Drill;

/// Category value that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone)]
pub struct CatalogState {
    pub drills: Vec<Drill>,
    pub filtered_drills: Vec<Drill>,
    pub selected_category: String,
    pub generated_workouts: Vec<Drill>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            drills: Vec::new(),
            filtered_drills: Vec::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            generated_workouts: Vec::new(),
            is_loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum CatalogAction {
    SetDrills(Vec<Drill>),
    SetCategory(String),
    SetGeneratedWorkouts(Vec<Drill>),
    AddDrill(Drill),
    ClearGeneratedWorkouts,
    SetLoading(bool),
    SetError(Option<String>),
}

/// Apply one action, producing the next state.
pub fn reduce(state: CatalogState, action: CatalogAction) -> CatalogState {
    match action {
        CatalogAction::SetDrills(drills) => {
            let filtered_drills = filter_by_category(&drills, &state.selected_category);
            CatalogState {
                drills,
                filtered_drills,
                ..state
            }
        }
        CatalogAction::SetCategory(category) => {
            let filtered_drills = filter_by_category(&state.drills, &category);
            CatalogState {
                selected_category: category,
                filtered_drills,
                ..state
            }
        }
        CatalogAction::SetGeneratedWorkouts(generated_workouts) => CatalogState {
            generated_workouts,
            ..state
        },
        CatalogAction::AddDrill(drill) => {
            let mut drills = state.drills;
            drills.push(drill);
            let filtered_drills = filter_by_category(&drills, &state.selected_category);
            CatalogState {
                drills,
                filtered_drills,
                ..state
            }
        }
        CatalogAction::ClearGeneratedWorkouts => CatalogState {
            generated_workouts: Vec::new(),
            ..state
        },
        CatalogAction::SetLoading(is_loading) => CatalogState { is_loading, ..state },
        CatalogAction::SetError(error) => CatalogState { error, ..state },
    }
}

fn filter_by_category(drills: &[Drill], category: &str) -> Vec<Drill> {
    if category == ALL_CATEGORIES {
        drills.to_vec()
    } else {
        drills
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect()
    }
}
