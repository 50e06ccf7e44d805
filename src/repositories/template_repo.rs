use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, NewTemplate, WorkoutTemplate};

#[derive(Clone)]
pub struct TemplateRepository {
    pool: DbPool,
}

impl TemplateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewTemplate) -> Result<WorkoutTemplate> {
        let now = Utc::now();
        let template = WorkoutTemplate {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            workout_type: new.workout_type,
            difficulty: new.difficulty,
            drill_count: new.drill_count,
            target_duration: new.target_duration,
            filters: new.filters,
            is_public: new.is_public,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        };
        let filters_json = template
            .filters
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let template_clone = template.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            let result = conn.execute(
                "INSERT INTO workout_templates
                     (id, name, description, type, difficulty, drill_count, target_duration,
                      filters, is_public, usage_count, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    template_clone.id,
                    template_clone.name,
                    template_clone.description,
                    template_clone.workout_type,
                    template_clone.difficulty,
                    template_clone.drill_count,
                    template_clone.target_duration,
                    filters_json,
                    template_clone.is_public,
                    template_clone.usage_count,
                    template_clone.created_at.to_rfc3339(),
                    template_clone.updated_at.to_rfc3339(),
                ],
            );
            match result {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(err, ref msg))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation
                        && msg
                            .as_deref()
                            .map_or(false, |m| m.contains("workout_templates.name")) =>
                {
                    Err(AppError::Duplicate {
                        field: "name".to_string(),
                        message: "Template name must be unique".to_string(),
                    })
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(template)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<WorkoutTemplate>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workout_templates WHERE id = ?")?;
            let result = stmt.query_row([&id], WorkoutTemplate::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Public templates, optionally narrowed by type/difficulty, with a
    /// whitelisted sort column. Returns the page plus the total count.
    pub async fn find_page(
        &self,
        workout_type: Option<String>,
        difficulty: Option<String>,
        sort_by: String,
        order: String,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<WorkoutTemplate>, i64)> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;

            let mut conditions = vec!["is_public = 1".to_string()];
            let mut params: Vec<String> = Vec::new();
            if let Some(t) = workout_type {
                conditions.push("type = ?".to_string());
                params.push(t);
            }
            if let Some(d) = difficulty {
                conditions.push("difficulty = ?".to_string());
                params.push(d);
            }
            let where_clause = conditions.join(" AND ");

            let total = conn.query_row(
                &format!("SELECT COUNT(*) FROM workout_templates WHERE {where_clause}"),
                rusqlite::params_from_iter(params.iter()),
                |row| row.get(0),
            )?;

            let column = match sort_by.as_str() {
                "name" => "name",
                "difficulty" => "difficulty",
                "drillCount" => "drill_count",
                "targetDuration" => "target_duration",
                "createdAt" => "created_at",
                _ => "usage_count",
            };
            let direction = if order.eq_ignore_ascii_case("asc") {
                "ASC"
            } else {
                "DESC"
            };
            let offset = (page - 1) * limit;

            let sql = format!(
                "SELECT * FROM workout_templates WHERE {where_clause}
                 ORDER BY {column} {direction} LIMIT {limit} OFFSET {offset}"
            );
            let mut stmt = conn.prepare(&sql)?;
            let templates = stmt
                .query_map(
                    rusqlite::params_from_iter(params),
                    WorkoutTemplate::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok((templates, total))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Most-used public templates, for the workout-types listing.
    pub async fn find_popular(&self, limit: i64) -> Result<Vec<WorkoutTemplate>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sql = format!(
                "SELECT * FROM workout_templates WHERE is_public = 1
                 ORDER BY usage_count DESC LIMIT {limit}"
            );
            let mut stmt = conn.prepare(&sql)?;
            let templates = stmt
                .query_map([], WorkoutTemplate::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(templates)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Bump the usage counter. Not transactional with the history
    /// insert that usually follows; a failure in between leaves the
    /// counter ahead by one.
    pub async fn increment_usage(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE workout_templates SET usage_count = usage_count + 1 WHERE id = ?",
                [&id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
