use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Pagination, UpdateHistoryRequest, WorkoutHistoryWithDrills};
use crate::repositories::HistoryRepository;

#[derive(Clone)]
pub struct HistoryState {
    pub history_repo: HistoryRepository,
}

#[derive(Debug, Deserialize)]
pub struct ListHistoryQuery {
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub difficulty: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub workouts: Vec<WorkoutHistoryWithDrills>,
    pub pagination: Pagination,
}

pub async fn list(
    State(state): State<HistoryState>,
    Query(query): Query<ListHistoryQuery>,
) -> Result<Json<HistoryPage>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).max(1);

    let (workouts, total) = state
        .history_repo
        .find_page(query.workout_type, query.difficulty, page, limit)
        .await?;

    Ok(Json(HistoryPage {
        workouts,
        pagination: Pagination::new(total, page, limit),
    }))
}

pub async fn update(
    State(state): State<HistoryState>,
    Json(body): Json<UpdateHistoryRequest>,
) -> Result<Json<WorkoutHistoryWithDrills>> {
    let workout_id = body
        .workout_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Workout ID is required".to_string()))?;

    if let Some(rating) = body.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
    }

    if body.duration.is_none() && body.rating.is_none() && body.notes.is_none() {
        return Err(AppError::BadRequest(
            "At least one of duration, rating or notes is required".to_string(),
        ));
    }

    let workout = state
        .history_repo
        .update(workout_id, body.duration, body.rating, body.notes.clone())
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    Ok(Json(workout))
}
