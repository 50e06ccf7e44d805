use serde::{Deserialize, Serialize};

use super::Drill;

/// The five workout types a generation request may ask for. The names
/// deliberately mirror the drill categories, but the two sets are
/// related through [`crate::generator::catalog_filter`], not equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutType {
    #[serde(rename = "Upper Body")]
    UpperBody,
    #[serde(rename = "Lower Body")]
    LowerBody,
    #[serde(rename = "Max Speed")]
    MaxSpeed,
    Endurance,
    Plyometrics,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::UpperBody,
        WorkoutType::LowerBody,
        WorkoutType::MaxSpeed,
        WorkoutType::Endurance,
        WorkoutType::Plyometrics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::UpperBody => "Upper Body",
            WorkoutType::LowerBody => "Lower Body",
            WorkoutType::MaxSpeed => "Max Speed",
            WorkoutType::Endurance => "Endurance",
            WorkoutType::Plyometrics => "Plyometrics",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Difficulty scale used by workouts, templates and history. Distinct
/// from the catalog's Easy/Medium/Hard; `catalog_equivalent` is the
/// canonical bridge between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl WorkoutDifficulty {
    pub const ALL: [WorkoutDifficulty; 3] = [
        WorkoutDifficulty::Beginner,
        WorkoutDifficulty::Intermediate,
        WorkoutDifficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutDifficulty::Beginner => "Beginner",
            WorkoutDifficulty::Intermediate => "Intermediate",
            WorkoutDifficulty::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }

    /// The drill-catalog difficulty this workout level maps to.
    pub fn catalog_equivalent(&self) -> &'static str {
        match self {
            WorkoutDifficulty::Beginner => "Easy",
            WorkoutDifficulty::Intermediate => "Medium",
            WorkoutDifficulty::Advanced => "Hard",
        }
    }
}

/// Structuring style applied on top of the sampled drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutStyle {
    Circuit,
    #[serde(rename = "HIIT")]
    Hiit,
    Strength,
    Endurance,
    Flexibility,
}

impl WorkoutStyle {
    pub const ALL: [WorkoutStyle; 5] = [
        WorkoutStyle::Circuit,
        WorkoutStyle::Hiit,
        WorkoutStyle::Strength,
        WorkoutStyle::Endurance,
        WorkoutStyle::Flexibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStyle::Circuit => "Circuit",
            WorkoutStyle::Hiit => "HIIT",
            WorkoutStyle::Strength => "Strength",
            WorkoutStyle::Endurance => "Endurance",
            WorkoutStyle::Flexibility => "Flexibility",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == s)
    }
}

/// One drill inside a generated workout, with its timing prescription.
/// Style-specific fields stay absent unless the style sets them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePrescription {
    pub drill: Drill,
    pub sets: u32,
    pub time_per_set: u32,
    pub rest_after: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps_per_set: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStructure {
    pub exercises: Vec<ExercisePrescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_between_rounds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_between_circuits: Option<u32>,
}

/// Response body of the full generation endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWorkout {
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    pub drill_count: usize,
    pub workout_id: String,
    pub structure: WorkoutStructure,
    pub drills: Vec<Drill>,
}

/// Body of the full generation endpoint. Everything is optional at the
/// decode layer; the handler validates and reports field-keyed errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWorkoutRequest {
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub count: Option<i64>,
    pub difficulty: Option<String>,
    pub template_id: Option<String>,
    pub workout_style: Option<String>,
    pub preferred_equipment: Option<Vec<String>>,
    pub intensity: Option<String>,
    pub rest_between_sets: Option<u32>,
    pub sets_per_exercise: Option<u32>,
    pub time_per_exercise: Option<u32>,
}

/// Body of the simple generation endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SimpleGenerateRequest {
    pub category: Option<String>,
    pub count: Option<i64>,
}
