use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::generator::CatalogFilter;
use crate::models::{Drill, DrillPatch, FromSqliteRow, NewDrill};

#[derive(Clone)]
pub struct DrillRepository {
    pool: DbPool,
}

impl DrillRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewDrill) -> Result<Drill> {
        let now = Utc::now();
        let drill = Drill {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            category: new.category,
            difficulty: new.difficulty,
            created_at: now,
            updated_at: now,
        };
        let drill_clone = drill.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO drills (id, name, description, category, difficulty, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    drill_clone.id,
                    drill_clone.name,
                    drill_clone.description,
                    drill_clone.category,
                    drill_clone.difficulty,
                    drill_clone.created_at.to_rfc3339(),
                    drill_clone.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(drill)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Drill>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM drills WHERE id = ?")?;
            let result = stmt.query_row([&id], Drill::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Catalog listing: optional category filter ("All" disables it),
    /// whitelisted sort column, asc/desc direction.
    pub async fn find(
        &self,
        category: Option<String>,
        sort_by: String,
        order: String,
    ) -> Result<Vec<Drill>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;

            let column = match sort_by.as_str() {
                "name" => "name",
                "difficulty" => "difficulty",
                "createdAt" => "created_at",
                _ => "category",
            };
            let direction = if order.eq_ignore_ascii_case("desc") {
                "DESC"
            } else {
                "ASC"
            };

            let (sql, params) = match category.as_deref() {
                Some(c) if c != "All" => (
                    format!("SELECT * FROM drills WHERE category = ? ORDER BY {column} {direction}"),
                    vec![c.to_string()],
                ),
                _ => (
                    format!("SELECT * FROM drills ORDER BY {column} {direction}"),
                    Vec::new(),
                ),
            };

            let mut stmt = conn.prepare(&sql)?;
            let drills = stmt
                .query_map(rusqlite::params_from_iter(params), Drill::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(drills)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Candidate pool for the workout generator.
    pub async fn find_matching(&self, filter: CatalogFilter) -> Result<Vec<Drill>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            // Drills carry no intensity rating, so an intensity
            // constraint can never match.
            if filter.intensity.is_some() {
                return Ok(Vec::new());
            }

            let conn = pool.get()?;

            let mut conditions = Vec::new();
            let mut params: Vec<String> = Vec::new();
            if let Some(categories) = &filter.categories {
                let placeholders = vec!["?"; categories.len()].join(", ");
                conditions.push(format!("category IN ({placeholders})"));
                params.extend(categories.iter().map(|c| c.to_string()));
            }
            if let Some(difficulty) = &filter.difficulty {
                conditions.push("difficulty = ?".to_string());
                params.push(difficulty.clone());
            }

            let mut sql = String::from("SELECT * FROM drills");
            if !conditions.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&conditions.join(" AND "));
            }

            let mut stmt = conn.prepare(&sql)?;
            let drills = stmt
                .query_map(rusqlite::params_from_iter(params), Drill::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(drills)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count_by(&self, category: &str, difficulty: &str) -> Result<i64> {
        let pool = self.pool.clone();
        let category = category.to_string();
        let difficulty = difficulty.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count = conn.query_row(
                "SELECT COUNT(*) FROM drills WHERE category = ? AND difficulty = ?",
                [&category, &difficulty],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Merge a validated patch into an existing drill. Returns the
    /// updated record, or None when the id is unknown.
    pub async fn update(&self, id: &str, patch: DrillPatch) -> Result<Option<Drill>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;

            let mut assignments = Vec::new();
            let mut params: Vec<String> = Vec::new();
            if let Some(name) = patch.name {
                assignments.push("name = ?");
                params.push(name);
            }
            if let Some(description) = patch.description {
                assignments.push("description = ?");
                params.push(description);
            }
            if let Some(category) = patch.category {
                assignments.push("category = ?");
                params.push(category);
            }
            if let Some(difficulty) = patch.difficulty {
                assignments.push("difficulty = ?");
                params.push(difficulty);
            }
            assignments.push("updated_at = ?");
            params.push(Utc::now().to_rfc3339());
            params.push(id.clone());

            let sql = format!(
                "UPDATE drills SET {} WHERE id = ?",
                assignments.join(", ")
            );
            let rows = conn.execute(&sql, rusqlite::params_from_iter(params))?;
            if rows == 0 {
                return Ok(None);
            }

            let mut stmt = conn.prepare("SELECT * FROM drills WHERE id = ?")?;
            let drill = stmt.query_row([&id], Drill::from_row).optional()?;
            Ok(drill)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete by id, returning the removed record.
    pub async fn delete(&self, id: &str) -> Result<Option<Drill>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM drills WHERE id = ?")?;
            let drill = stmt.query_row([&id], Drill::from_row).optional()?;

            let Some(drill) = drill else {
                return Ok(None);
            };
            conn.execute("DELETE FROM drills WHERE id = ?", [&id])?;
            Ok(Some(drill))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
