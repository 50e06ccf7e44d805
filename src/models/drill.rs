use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::error::FieldErrors;

/// Catalog categories a drill may belong to.
pub const CATEGORIES: &[&str] = &[
    "Upper Body",
    "Lower Body",
    "Max Speed",
    "Endurance",
    "Plyometrics",
];

/// Catalog difficulty ratings. Workout generation uses its own
/// three-level scale, see [`super::WorkoutDifficulty`].
pub const DRILL_DIFFICULTIES: &[&str] = &["Easy", "Medium", "Hard"];

const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromSqliteRow for Drill {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            category: row.get("category")?,
            difficulty: row.get("difficulty")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Incoming create body. Every field is optional so missing values are
/// reported as field-keyed validation errors instead of a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateDrillRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

/// Validated field values for a new drill.
#[derive(Debug, Clone)]
pub struct NewDrill {
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
}

impl CreateDrillRequest {
    pub fn validate(&self) -> Result<NewDrill, FieldErrors> {
        let mut errors = FieldErrors::new();

        // Missing fields are reported together, before content checks.
        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("category", &self.category),
            ("difficulty", &self.difficulty),
        ] {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                errors.insert(field.to_string(), vec![format!("{field} is required")]);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let name = self.name.as_deref().unwrap_or_default().trim().to_string();
        let description = self
            .description
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        let category = self
            .category
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        let difficulty = self
            .difficulty
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();

        check_name(&name, &mut errors);
        check_description(&description, &mut errors);
        check_category(&category, &mut errors);
        check_difficulty(&difficulty, &mut errors);

        if errors.is_empty() {
            Ok(NewDrill {
                name,
                description,
                category,
                difficulty,
            })
        } else {
            Err(errors)
        }
    }
}

/// Incoming partial-update body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDrillRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

/// Validated subset of drill fields to merge into an existing record.
#[derive(Debug, Clone, Default)]
pub struct DrillPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

impl DrillPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
    }
}

impl UpdateDrillRequest {
    pub fn validate(&self) -> Result<DrillPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut patch = DrillPatch::default();

        if let Some(name) = self.name.as_deref() {
            let name = name.trim();
            if name.is_empty() {
                errors.insert(
                    "name".to_string(),
                    vec!["Please provide a name for the drill".to_string()],
                );
            } else {
                check_name(name, &mut errors);
                patch.name = Some(name.to_string());
            }
        }
        if let Some(description) = self.description.as_deref() {
            let description = description.trim();
            if description.is_empty() {
                errors.insert(
                    "description".to_string(),
                    vec!["Please provide a description for the drill".to_string()],
                );
            } else {
                check_description(description, &mut errors);
                patch.description = Some(description.to_string());
            }
        }
        if let Some(category) = self.category.as_deref() {
            let category = category.trim();
            if category.is_empty() {
                errors.insert(
                    "category".to_string(),
                    vec!["Please specify the category".to_string()],
                );
            } else {
                check_category(category, &mut errors);
                patch.category = Some(category.to_string());
            }
        }
        if let Some(difficulty) = self.difficulty.as_deref() {
            let difficulty = difficulty.trim();
            if difficulty.is_empty() {
                errors.insert(
                    "difficulty".to_string(),
                    vec!["Please specify the difficulty level".to_string()],
                );
            } else {
                check_difficulty(difficulty, &mut errors);
                patch.difficulty = Some(difficulty.to_string());
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

fn check_name(name: &str, errors: &mut FieldErrors) {
    if name.chars().count() > NAME_MAX_CHARS {
        errors.insert(
            "name".to_string(),
            vec![format!(
                "Name cannot be more than {NAME_MAX_CHARS} characters"
            )],
        );
    }
}

fn check_description(description: &str, errors: &mut FieldErrors) {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.insert(
            "description".to_string(),
            vec![format!(
                "Description cannot be more than {DESCRIPTION_MAX_CHARS} characters"
            )],
        );
    }
}

fn check_category(category: &str, errors: &mut FieldErrors) {
    if !CATEGORIES.contains(&category) {
        errors.insert(
            "category".to_string(),
            vec![format!("{category} is not a valid category")],
        );
    }
}

fn check_difficulty(difficulty: &str, errors: &mut FieldErrors) {
    if !DRILL_DIFFICULTIES.contains(&difficulty) {
        errors.insert(
            "difficulty".to_string(),
            vec![format!("{difficulty} is not a valid difficulty level")],
        );
    }
}
