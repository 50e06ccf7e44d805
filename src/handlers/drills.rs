use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CreateDrillRequest, Drill, UpdateDrillRequest};
use crate::repositories::DrillRepository;

#[derive(Clone)]
pub struct DrillsState {
    pub drill_repo: DrillRepository,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDrillsQuery {
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

pub async fn list(
    State(state): State<DrillsState>,
    Query(query): Query<ListDrillsQuery>,
) -> Result<Json<Vec<Drill>>> {
    let drills = state
        .drill_repo
        .find(
            query.category,
            query.sort_by.unwrap_or_else(|| "category".to_string()),
            query.order.unwrap_or_else(|| "asc".to_string()),
        )
        .await?;
    Ok(Json(drills))
}

pub async fn create(
    State(state): State<DrillsState>,
    Json(body): Json<CreateDrillRequest>,
) -> Result<(StatusCode, Json<Drill>)> {
    let new = body.validate().map_err(AppError::Validation)?;
    let drill = state.drill_repo.create(new).await?;
    Ok((StatusCode::CREATED, Json(drill)))
}

pub async fn get_by_id(
    State(state): State<DrillsState>,
    Path(id): Path<String>,
) -> Result<Json<Drill>> {
    validate_drill_id(&id)?;
    let drill = state
        .drill_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Drill not found".to_string()))?;
    Ok(Json(drill))
}

pub async fn update(
    State(state): State<DrillsState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateDrillRequest>,
) -> Result<Json<Drill>> {
    validate_drill_id(&id)?;
    let patch = body.validate().map_err(AppError::Validation)?;
    let drill = state
        .drill_repo
        .update(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Drill not found".to_string()))?;
    Ok(Json(drill))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDrillResponse {
    pub message: String,
    pub id: String,
    pub deleted_drill: Drill,
}

pub async fn delete(
    State(state): State<DrillsState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteDrillResponse>> {
    validate_drill_id(&id)?;
    let drill = state
        .drill_repo
        .delete(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Drill not found".to_string()))?;
    Ok(Json(DeleteDrillResponse {
        message: "Drill deleted successfully".to_string(),
        id,
        deleted_drill: drill,
    }))
}

/// Id-addressed routes reject malformed ids before touching storage.
fn validate_drill_id(id: &str) -> Result<()> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest("Invalid drill ID format".to_string()))?;
    Ok(())
}
