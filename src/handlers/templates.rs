use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{CreateTemplateRequest, Pagination, WorkoutTemplate};
use crate::repositories::TemplateRepository;

#[derive(Clone)]
pub struct TemplatesState {
    pub template_repo: TemplateRepository,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTemplatesQuery {
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub difficulty: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesPage {
    pub templates: Vec<WorkoutTemplate>,
    pub pagination: Pagination,
}

pub async fn list(
    State(state): State<TemplatesState>,
    Query(query): Query<ListTemplatesQuery>,
) -> Result<Json<TemplatesPage>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).max(1);

    let (templates, total) = state
        .template_repo
        .find_page(
            query.workout_type,
            query.difficulty,
            query.sort_by.unwrap_or_else(|| "usageCount".to_string()),
            query.order.unwrap_or_else(|| "desc".to_string()),
            page,
            limit,
        )
        .await?;

    Ok(Json(TemplatesPage {
        templates,
        pagination: Pagination::new(total, page, limit),
    }))
}

pub async fn create(
    State(state): State<TemplatesState>,
    Json(body): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<WorkoutTemplate>)> {
    let new = body.validate().map_err(AppError::Validation)?;
    let template = state.template_repo.create(new).await?;
    Ok((StatusCode::CREATED, Json(template)))
}
