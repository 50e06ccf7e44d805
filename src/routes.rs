use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{drills, health, history, templates, workouts};

pub fn create_router(
    drills_state: drills::DrillsState,
    workouts_state: workouts::WorkoutsState,
    templates_state: templates::TemplatesState,
    history_state: history::HistoryState,
) -> Router {
    let api = Router::new()
        // Drill catalog
        .route("/drills", get(drills::list).post(drills::create))
        .route(
            "/drills/{id}",
            get(drills::get_by_id)
                .patch(drills::update)
                .delete(drills::delete),
        )
        .with_state(drills_state)
        // Workout generation
        .route("/workouts", get(workouts::list_types).post(workouts::generate))
        .route("/workouts/generate", post(workouts::generate_simple))
        .with_state(workouts_state)
        // Generation templates
        .route(
            "/workouts/templates",
            get(templates::list).post(templates::create),
        )
        .with_state(templates_state)
        // Generation history
        .route(
            "/workouts/history",
            get(history::list).patch(history::update),
        )
        .with_state(history_state);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
}
