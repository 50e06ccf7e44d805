use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{Drill, FromSqliteRow};

/// A persisted generation event, annotated post-hoc with
/// duration/rating/notes. Duration and rating stay 0 until the client
/// reports back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutHistory {
    pub id: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub difficulty: String,
    pub completed_at: DateTime<Utc>,
    pub duration: i64,
    pub rating: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl FromSqliteRow for WorkoutHistory {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_type: row.get("type")?,
            difficulty: row.get("difficulty")?,
            completed_at: row.get("completed_at")?,
            duration: row.get("duration")?,
            rating: row.get("rating")?,
            notes: row.get("notes")?,
            style: row.get("style")?,
        })
    }
}

/// History record with its drill references expanded inline, in draw
/// order. Drills deleted since generation are simply absent.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutHistoryWithDrills {
    #[serde(flatten)]
    pub record: WorkoutHistory,
    pub drills: Vec<Drill>,
}

/// Body of the history PATCH endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistoryRequest {
    pub workout_id: Option<String>,
    pub duration: Option<i64>,
    pub rating: Option<i64>,
    pub notes: Option<String>,
}
