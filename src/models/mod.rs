pub mod drill;
pub mod history;
pub mod pagination;
pub mod template;
pub mod workout;

use rusqlite::Row;

/// Row mapping for rusqlite queries.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

pub use drill::{
    CreateDrillRequest, Drill, DrillPatch, NewDrill, UpdateDrillRequest, CATEGORIES,
    DRILL_DIFFICULTIES,
};
pub use history::{UpdateHistoryRequest, WorkoutHistory, WorkoutHistoryWithDrills};
pub use pagination::Pagination;
pub use template::{CreateTemplateRequest, NewTemplate, TemplateFilters, WorkoutTemplate};
pub use workout::{
    ExercisePrescription, GenerateWorkoutRequest, GeneratedWorkout, SimpleGenerateRequest,
    WorkoutDifficulty, WorkoutStructure, WorkoutStyle, WorkoutType,
};
