use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::workout::{WorkoutDifficulty, WorkoutType};
use super::FromSqliteRow;
use crate::error::FieldErrors;

/// Intensity levels accepted in template filters.
pub const INTENSITIES: &[&str] = &["Low", "Medium", "High"];

/// A named, reusable generation preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub difficulty: String,
    pub drill_count: i64,
    pub target_duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<TemplateFilters>,
    pub is_public: bool,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional drill-selection constraints stored with a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
}

impl FromSqliteRow for WorkoutTemplate {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        // Filters are stored as a JSON blob alongside the scalar columns.
        let filters: Option<String> = row.get("filters")?;
        let filters = match filters {
            Some(raw) => Some(serde_json::from_str(&raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?),
            None => None,
        };

        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            workout_type: row.get("type")?,
            difficulty: row.get("difficulty")?,
            drill_count: row.get("drill_count")?,
            target_duration: row.get("target_duration")?,
            filters,
            is_public: row.get("is_public")?,
            usage_count: row.get("usage_count")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Incoming create body, validated into [`NewTemplate`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub difficulty: Option<String>,
    pub drill_count: Option<i64>,
    pub target_duration: Option<i64>,
    pub filters: Option<TemplateFilters>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    pub workout_type: String,
    pub difficulty: String,
    pub drill_count: i64,
    pub target_duration: i64,
    pub filters: Option<TemplateFilters>,
    pub is_public: bool,
}

impl CreateTemplateRequest {
    pub fn validate(&self) -> Result<NewTemplate, FieldErrors> {
        let mut errors = FieldErrors::new();

        for (field, missing) in [
            ("name", self.name.as_deref().map_or(true, |v| v.trim().is_empty())),
            (
                "description",
                self.description
                    .as_deref()
                    .map_or(true, |v| v.trim().is_empty()),
            ),
            (
                "type",
                self.workout_type
                    .as_deref()
                    .map_or(true, |v| v.trim().is_empty()),
            ),
            (
                "difficulty",
                self.difficulty
                    .as_deref()
                    .map_or(true, |v| v.trim().is_empty()),
            ),
            ("drillCount", self.drill_count.is_none()),
            ("targetDuration", self.target_duration.is_none()),
        ] {
            if missing {
                errors.insert(field.to_string(), vec![format!("{field} is required")]);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let workout_type = self
            .workout_type
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if WorkoutType::parse(&workout_type).is_none() {
            errors.insert(
                "type".to_string(),
                vec![format!("{workout_type} is not a valid type")],
            );
        }

        let difficulty = self
            .difficulty
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if WorkoutDifficulty::parse(&difficulty).is_none() {
            errors.insert(
                "difficulty".to_string(),
                vec![format!("{difficulty} is not a valid difficulty")],
            );
        }

        let drill_count = self.drill_count.unwrap_or_default();
        if drill_count < 1 {
            errors.insert(
                "drillCount".to_string(),
                vec!["drillCount must be at least 1".to_string()],
            );
        }

        if let Some(filters) = &self.filters {
            if let Some(intensity) = filters.intensity.as_deref() {
                if !INTENSITIES.contains(&intensity) {
                    errors.insert(
                        "filters.intensity".to_string(),
                        vec![format!("{intensity} is not a valid intensity")],
                    );
                }
            }
            if let Some(levels) = &filters.difficulty {
                for level in levels {
                    if WorkoutDifficulty::parse(level).is_none() {
                        errors
                            .entry("filters.difficulty".to_string())
                            .or_default()
                            .push(format!("{level} is not a valid difficulty"));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(NewTemplate {
                name: self.name.as_deref().unwrap_or_default().trim().to_string(),
                description: self
                    .description
                    .as_deref()
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                workout_type,
                difficulty,
                drill_count,
                target_duration: self.target_duration.unwrap_or_default(),
                filters: self.filters.clone(),
                is_public: self.is_public.unwrap_or(true),
            })
        } else {
            Err(errors)
        }
    }
}
