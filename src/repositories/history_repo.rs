use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Drill, FromSqliteRow, WorkoutHistory, WorkoutHistoryWithDrills};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: DbPool,
}

impl HistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record a generation event. Drill ids are stored in draw order;
    /// duration and rating start at 0 until the client reports back.
    pub async fn create(
        &self,
        workout_type: &str,
        drill_ids: Vec<String>,
        difficulty: &str,
        style: Option<&str>,
    ) -> Result<WorkoutHistory> {
        let record = WorkoutHistory {
            id: Uuid::new_v4().to_string(),
            workout_type: workout_type.to_string(),
            difficulty: difficulty.to_string(),
            completed_at: Utc::now(),
            duration: 0,
            rating: 0,
            notes: None,
            style: style.map(|s| s.to_string()),
        };
        let record_clone = record.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO workout_history
                     (id, type, difficulty, completed_at, duration, rating, notes, style)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    record_clone.id,
                    record_clone.workout_type,
                    record_clone.difficulty,
                    record_clone.completed_at.to_rfc3339(),
                    record_clone.duration,
                    record_clone.rating,
                    record_clone.notes,
                    record_clone.style,
                ],
            )?;
            for (position, drill_id) in drill_ids.iter().enumerate() {
                tx.execute(
                    "INSERT INTO workout_history_drills (history_id, drill_id, position)
                     VALUES (?, ?, ?)",
                    rusqlite::params![record_clone.id, drill_id, position as i64],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(record)
    }

    /// Newest-first page of history records with drills expanded.
    pub async fn find_page(
        &self,
        workout_type: Option<String>,
        difficulty: Option<String>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<WorkoutHistoryWithDrills>, i64)> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;

            let mut conditions = Vec::new();
            let mut params: Vec<String> = Vec::new();
            if let Some(t) = workout_type {
                conditions.push("type = ?");
                params.push(t);
            }
            if let Some(d) = difficulty {
                conditions.push("difficulty = ?");
                params.push(d);
            }
            let where_clause = if conditions.is_empty() {
                String::new()
            } else {
                format!(" WHERE {}", conditions.join(" AND "))
            };

            let total = conn.query_row(
                &format!("SELECT COUNT(*) FROM workout_history{where_clause}"),
                rusqlite::params_from_iter(params.iter()),
                |row| row.get(0),
            )?;

            let offset = (page - 1) * limit;
            let sql = format!(
                "SELECT * FROM workout_history{where_clause}
                 ORDER BY completed_at DESC LIMIT {limit} OFFSET {offset}"
            );
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(
                    rusqlite::params_from_iter(params),
                    WorkoutHistory::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut workouts = Vec::with_capacity(records.len());
            for record in records {
                let drills = drills_for(&conn, &record.id)?;
                workouts.push(WorkoutHistoryWithDrills { record, drills });
            }

            Ok((workouts, total))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Apply the provided subset of {duration, rating, notes}. Returns
    /// the updated record with drills, or None when the id is unknown.
    pub async fn update(
        &self,
        workout_id: &str,
        duration: Option<i64>,
        rating: Option<i64>,
        notes: Option<String>,
    ) -> Result<Option<WorkoutHistoryWithDrills>> {
        let pool = self.pool.clone();
        let workout_id = workout_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;

            let mut assignments = Vec::new();
            let mut params: Vec<rusqlite::types::Value> = Vec::new();
            if let Some(duration) = duration {
                assignments.push("duration = ?");
                params.push(duration.into());
            }
            if let Some(rating) = rating {
                assignments.push("rating = ?");
                params.push(rating.into());
            }
            if let Some(notes) = notes {
                assignments.push("notes = ?");
                params.push(notes.into());
            }
            params.push(workout_id.clone().into());

            let sql = format!(
                "UPDATE workout_history SET {} WHERE id = ?",
                assignments.join(", ")
            );
            let rows = conn.execute(&sql, rusqlite::params_from_iter(params))?;
            if rows == 0 {
                return Ok(None);
            }

            let record = conn
                .query_row(
                    "SELECT * FROM workout_history WHERE id = ?",
                    [&workout_id],
                    WorkoutHistory::from_row,
                )
                .optional()?;
            let Some(record) = record else {
                return Ok(None);
            };
            let drills = drills_for(&conn, &record.id)?;
            Ok(Some(WorkoutHistoryWithDrills { record, drills }))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

/// Expand a history record's drill references in stored order.
/// The inner join silently drops references to deleted drills.
fn drills_for(conn: &Connection, history_id: &str) -> rusqlite::Result<Vec<Drill>> {
    let mut stmt = conn.prepare(
        "SELECT d.* FROM workout_history_drills hd
         JOIN drills d ON d.id = hd.drill_id
         WHERE hd.history_id = ?
         ORDER BY hd.position",
    )?;
    let drills = stmt
        .query_map([history_id], Drill::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>();
    drills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;
    use crate::models::NewDrill;
    use crate::repositories::DrillRepository;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    async fn seed_drill(pool: &DbPool, name: &str) -> Drill {
        DrillRepository::new(pool.clone())
            .create(NewDrill {
                name: name.to_string(),
                description: format!("{name} description"),
                category: "Upper Body".to_string(),
                difficulty: "Medium".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_starts_unrated() {
        let pool = setup_test_db();
        let repo = HistoryRepository::new(pool.clone());
        let drill = seed_drill(&pool, "Push Ups").await;

        let record = repo
            .create("Upper Body", vec![drill.id], "Intermediate", Some("HIIT"))
            .await
            .unwrap();

        assert_eq!(record.duration, 0);
        assert_eq!(record.rating, 0);
        assert_eq!(record.style.as_deref(), Some("HIIT"));
    }

    #[tokio::test]
    async fn test_find_page_expands_drills_in_draw_order() {
        let pool = setup_test_db();
        let repo = HistoryRepository::new(pool.clone());
        let first = seed_drill(&pool, "Pull Ups").await;
        let second = seed_drill(&pool, "Push Ups").await;

        repo.create(
            "Upper Body",
            vec![second.id.clone(), first.id.clone()],
            "Intermediate",
            None,
        )
        .await
        .unwrap();

        let (workouts, total) = repo.find_page(None, None, 1, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(workouts[0].drills.len(), 2);
        assert_eq!(workouts[0].drills[0].name, "Push Ups");
        assert_eq!(workouts[0].drills[1].name, "Pull Ups");
    }

    #[tokio::test]
    async fn test_find_page_filters_by_type_and_difficulty() {
        let pool = setup_test_db();
        let repo = HistoryRepository::new(pool.clone());
        let drill = seed_drill(&pool, "Push Ups").await;

        repo.create("Upper Body", vec![drill.id.clone()], "Beginner", None)
            .await
            .unwrap();
        repo.create("Lower Body", vec![drill.id], "Advanced", None)
            .await
            .unwrap();

        let (workouts, total) = repo
            .find_page(Some("Upper Body".to_string()), None, 1, 10)
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(workouts[0].record.workout_type, "Upper Body");

        let (_, total) = repo
            .find_page(None, Some("Advanced".to_string()), 1, 10)
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_dangling_drill_reference_is_skipped() {
        let pool = setup_test_db();
        let repo = HistoryRepository::new(pool.clone());
        let drill_repo = DrillRepository::new(pool.clone());
        let keep = seed_drill(&pool, "Push Ups").await;
        let gone = seed_drill(&pool, "Pull Ups").await;

        repo.create(
            "Upper Body",
            vec![keep.id.clone(), gone.id.clone()],
            "Intermediate",
            None,
        )
        .await
        .unwrap();
        drill_repo.delete(&gone.id).await.unwrap();

        let (workouts, _) = repo.find_page(None, None, 1, 10).await.unwrap();
        assert_eq!(workouts[0].drills.len(), 1);
        assert_eq!(workouts[0].drills[0].name, "Push Ups");
    }

    #[tokio::test]
    async fn test_update_applies_partial_fields() {
        let pool = setup_test_db();
        let repo = HistoryRepository::new(pool.clone());
        let drill = seed_drill(&pool, "Push Ups").await;
        let record = repo
            .create("Upper Body", vec![drill.id], "Intermediate", None)
            .await
            .unwrap();

        let updated = repo
            .update(&record.id, Some(25), None, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.record.duration, 25);
        assert_eq!(updated.record.rating, 0);

        let updated = repo
            .update(&record.id, None, Some(4), Some("Solid session".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.record.duration, 25);
        assert_eq!(updated.record.rating, 4);
        assert_eq!(updated.record.notes.as_deref(), Some("Solid session"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let repo = HistoryRepository::new(setup_test_db());
        let updated = repo.update("nonexistent", Some(10), None, None).await.unwrap();
        assert!(updated.is_none());
    }
}
