use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::generator::{self, TimingOverrides};
use crate::models::{
    Drill, GenerateWorkoutRequest, GeneratedWorkout, SimpleGenerateRequest, WorkoutDifficulty,
    WorkoutStyle, WorkoutTemplate, WorkoutType,
};
use crate::repositories::{DrillRepository, HistoryRepository, TemplateRepository};

#[derive(Clone)]
pub struct WorkoutsState {
    pub drill_repo: DrillRepository,
    pub template_repo: TemplateRepository,
    pub history_repo: HistoryRepository,
}

/// POST /api/workouts — the full generation path: validate, resolve an
/// optional template, sample matching drills, structure by style, and
/// record the result in history.
pub async fn generate(
    State(state): State<WorkoutsState>,
    Json(body): Json<GenerateWorkoutRequest>,
) -> Result<Json<GeneratedWorkout>> {
    let mut workout_type = match body.workout_type.as_deref().and_then(WorkoutType::parse) {
        Some(t) => t,
        None => {
            return Err(AppError::validation(
                "type",
                format!(
                    "Type must be one of: {}",
                    WorkoutType::ALL.map(|t| t.as_str()).join(", ")
                ),
            ))
        }
    };

    let mut count = match body.count {
        Some(count) if count >= 1 => count,
        _ => {
            return Err(AppError::validation(
                "count",
                "Count must be a positive number",
            ))
        }
    };

    let style = match body.workout_style.as_deref() {
        Some(raw) => Some(WorkoutStyle::parse(raw).ok_or_else(|| {
            AppError::validation(
                "workoutStyle",
                format!(
                    "Style must be one of: {}",
                    WorkoutStyle::ALL.map(|s| s.as_str()).join(", ")
                ),
            )
        })?),
        None => None,
    };

    let mut difficulty = body.difficulty.clone();

    // Template settings take precedence over client-supplied options.
    // The usage bump is not atomic with the history insert below; a
    // failure in between leaves the counter ahead by one.
    if let Some(template_id) = body.template_id.as_deref() {
        let template = state
            .template_repo
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Template not found".to_string()))?;

        workout_type = WorkoutType::parse(&template.workout_type).ok_or_else(|| {
            AppError::Internal(format!(
                "Template {} has unknown type {}",
                template.id, template.workout_type
            ))
        })?;
        count = template.drill_count;
        difficulty = Some(template.difficulty.clone());

        state.template_repo.increment_usage(template_id).await?;
    }

    let filter = generator::catalog_filter(workout_type, difficulty.as_deref());
    let matching = state.drill_repo.find_matching(filter).await?;
    let drills = {
        let mut rng = rand::thread_rng();
        generator::sample(matching, count as usize, &mut rng)
    };

    if drills.is_empty() {
        return Err(AppError::NotFound(
            "No matching drills found for the specified criteria".to_string(),
        ));
    }

    let timing = TimingOverrides {
        sets_per_exercise: body.sets_per_exercise,
        time_per_exercise: body.time_per_exercise,
        rest_between_sets: body.rest_between_sets,
    };
    let mut structure = generator::base_structure(drills.clone(), timing);
    generator::apply_style(&mut structure, style);

    let drill_ids = drills.iter().map(|d| d.id.clone()).collect();
    let record = state
        .history_repo
        .create(
            workout_type.as_str(),
            drill_ids,
            difficulty.as_deref().unwrap_or("Intermediate"),
            style.map(|s| s.as_str()),
        )
        .await?;

    Ok(Json(GeneratedWorkout {
        workout_type: workout_type.as_str().to_string(),
        style: style.map(|s| s.as_str().to_string()),
        difficulty,
        drill_count: drills.len(),
        workout_id: record.id,
        structure,
        drills,
    }))
}

/// POST /api/workouts/generate — the simple path: a bare random sample
/// filtered only by category, no styling, no history.
pub async fn generate_simple(
    State(state): State<WorkoutsState>,
    Json(body): Json<SimpleGenerateRequest>,
) -> Result<Json<Vec<Drill>>> {
    let count = body.count.unwrap_or(5).max(0) as usize;

    let matching = state
        .drill_repo
        .find(body.category, "category".to_string(), "asc".to_string())
        .await?;
    let drills = {
        let mut rng = rand::thread_rng();
        generator::sample(matching, count, &mut rng)
    };

    if drills.is_empty() {
        return Err(AppError::NotFound(
            "No drills found for the specified category".to_string(),
        ));
    }

    Ok(Json(drills))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkoutsQuery {
    pub include_templates: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCount {
    pub difficulty: &'static str,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTypeSummary {
    #[serde(rename = "type")]
    pub workout_type: &'static str,
    pub total_drills: i64,
    pub by_difficulty: Vec<DifficultyCount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTypesResponse {
    pub workout_types: Vec<WorkoutTypeSummary>,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_templates: Option<Vec<WorkoutTemplate>>,
}

/// GET /api/workouts — drill availability per workout type and
/// difficulty, optionally with the most-used public templates.
pub async fn list_types(
    State(state): State<WorkoutsState>,
    Query(query): Query<ListWorkoutsQuery>,
) -> Result<Json<WorkoutTypesResponse>> {
    let mut workout_types = Vec::with_capacity(WorkoutType::ALL.len());
    let mut total = 0;

    for workout_type in WorkoutType::ALL {
        let mut by_difficulty = Vec::with_capacity(WorkoutDifficulty::ALL.len());
        let mut total_drills = 0;
        for difficulty in WorkoutDifficulty::ALL {
            let count = state
                .drill_repo
                .count_by(workout_type.as_str(), difficulty.catalog_equivalent())
                .await?;
            total_drills += count;
            by_difficulty.push(DifficultyCount {
                difficulty: difficulty.as_str(),
                count,
            });
        }
        total += total_drills;
        workout_types.push(WorkoutTypeSummary {
            workout_type: workout_type.as_str(),
            total_drills,
            by_difficulty,
        });
    }

    let popular_templates = if query.include_templates.as_deref() == Some("true") {
        Some(state.template_repo.find_popular(10).await?)
    } else {
        None
    };

    Ok(Json(WorkoutTypesResponse {
        workout_types,
        total,
        popular_templates,
    }))
}
