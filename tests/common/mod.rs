use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;

use drilldeck::db::{create_memory_pool, DbPool};
use drilldeck::handlers::{drills, history, templates, workouts};
use drilldeck::migrations::run_migrations_for_tests;
use drilldeck::models::{Drill, NewDrill, NewTemplate, WorkoutTemplate};
use drilldeck::repositories::{DrillRepository, HistoryRepository, TemplateRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let drill_repo = DrillRepository::new(pool.clone());
    let template_repo = TemplateRepository::new(pool.clone());
    let history_repo = HistoryRepository::new(pool.clone());

    drilldeck::routes::create_router(
        drills::DrillsState {
            drill_repo: drill_repo.clone(),
        },
        workouts::WorkoutsState {
            drill_repo,
            template_repo: template_repo.clone(),
            history_repo: history_repo.clone(),
        },
        templates::TemplatesState { template_repo },
        history::HistoryState { history_repo },
    )
}

// Test data creation helpers

#[allow(dead_code)]
pub async fn create_test_drill(
    pool: &DbPool,
    name: &str,
    category: &str,
    difficulty: &str,
) -> Drill {
    DrillRepository::new(pool.clone())
        .create(NewDrill {
            name: name.to_string(),
            description: format!("{name} description"),
            category: category.to_string(),
            difficulty: difficulty.to_string(),
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_template(
    pool: &DbPool,
    name: &str,
    workout_type: &str,
    difficulty: &str,
    drill_count: i64,
) -> WorkoutTemplate {
    TemplateRepository::new(pool.clone())
        .create(NewTemplate {
            name: name.to_string(),
            description: format!("{name} description"),
            workout_type: workout_type.to_string(),
            difficulty: difficulty.to_string(),
            drill_count,
            target_duration: 30,
            filters: None,
            is_public: true,
        })
        .await
        .unwrap()
}

// Request/response helpers

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
