//! Workout assembly: maps a workout type onto a catalog filter, draws a
//! uniform random sample of matching drills, and shapes the sample into
//! a structured plan according to the requested style.

use rand::Rng;

use crate::models::{
    Drill, ExercisePrescription, WorkoutDifficulty, WorkoutStructure, WorkoutStyle, WorkoutType,
};

/// Constraints the generator places on the drill catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Acceptable category names, matched verbatim. None means any.
    pub categories: Option<Vec<&'static str>>,
    /// Catalog difficulty ("Easy"/"Medium"/"Hard"), or an unrecognized
    /// value passed through verbatim, which matches no drills.
    pub difficulty: Option<String>,
    /// Drills carry no intensity rating, so a set intensity constraint
    /// matches nothing. Kept because the Endurance type asks for it.
    pub intensity: Option<&'static str>,
}

/// Map a workout type (and optional workout difficulty) onto the
/// catalog filter used to collect candidate drills.
pub fn catalog_filter(workout_type: WorkoutType, difficulty: Option<&str>) -> CatalogFilter {
    let (categories, intensity) = match workout_type {
        WorkoutType::UpperBody => (Some(vec!["Push", "Pull", "Upper Body"]), None),
        WorkoutType::LowerBody => (Some(vec!["Legs", "Lower Body"]), None),
        WorkoutType::MaxSpeed => (Some(vec!["Speed", "Agility"]), None),
        WorkoutType::Endurance => (None, Some("High")),
        WorkoutType::Plyometrics => (Some(vec!["Plyometrics", "Jump Training"]), None),
    };

    CatalogFilter {
        categories,
        difficulty: difficulty.map(|d| {
            WorkoutDifficulty::parse(d)
                .map(|level| level.catalog_equivalent().to_string())
                .unwrap_or_else(|| d.to_string())
        }),
        intensity,
    }
}

/// Uniform random sample without replacement, at most `count` items,
/// in draw order. Partial Fisher-Yates over the candidate pool.
pub fn sample<T, R: Rng>(mut pool: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    let take = count.min(pool.len());
    for i in 0..take {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

/// Per-exercise timing knobs the caller may override.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingOverrides {
    pub sets_per_exercise: Option<u32>,
    pub time_per_exercise: Option<u32>,
    pub rest_between_sets: Option<u32>,
}

/// One exercise entry per sampled drill, preserving draw order.
pub fn base_structure(drills: Vec<Drill>, timing: TimingOverrides) -> WorkoutStructure {
    let exercises = drills
        .into_iter()
        .map(|drill| ExercisePrescription {
            drill,
            sets: timing.sets_per_exercise.unwrap_or(3),
            time_per_set: timing.time_per_exercise.unwrap_or(45),
            rest_after: timing.rest_between_sets.unwrap_or(30),
            reps_per_set: None,
            work_time: None,
            rest_time: None,
            hold_time: None,
            repetitions: None,
        })
        .collect();

    WorkoutStructure {
        exercises,
        rounds: None,
        rest_between_rounds: None,
        circuits: None,
        rest_between_circuits: None,
    }
}

/// Fixed structuring rules for one style. A `None` leaves the base
/// value in place.
struct StyleRules {
    sets: Option<u32>,
    reps_per_set: Option<u32>,
    rest_after: Option<u32>,
    work_time: Option<u32>,
    rest_time: Option<u32>,
    hold_time: Option<u32>,
    repetitions: Option<u32>,
    rounds: Option<u32>,
    rest_between_rounds: Option<u32>,
    circuits: Option<u32>,
    rest_between_circuits: Option<u32>,
}

const NO_RULES: StyleRules = StyleRules {
    sets: None,
    reps_per_set: None,
    rest_after: None,
    work_time: None,
    rest_time: None,
    hold_time: None,
    repetitions: None,
    rounds: None,
    rest_between_rounds: None,
    circuits: None,
    rest_between_circuits: None,
};

fn rules_for(style: WorkoutStyle) -> StyleRules {
    match style {
        WorkoutStyle::Circuit => StyleRules {
            rounds: Some(3),
            rest_between_rounds: Some(60),
            ..NO_RULES
        },
        WorkoutStyle::Hiit => StyleRules {
            work_time: Some(30),
            rest_time: Some(15),
            rounds: Some(4),
            rest_between_rounds: Some(90),
            ..NO_RULES
        },
        WorkoutStyle::Strength => StyleRules {
            sets: Some(4),
            reps_per_set: Some(8),
            rest_after: Some(90),
            ..NO_RULES
        },
        WorkoutStyle::Endurance => StyleRules {
            sets: Some(3),
            reps_per_set: Some(15),
            rest_after: Some(45),
            circuits: Some(2),
            rest_between_circuits: Some(120),
            ..NO_RULES
        },
        WorkoutStyle::Flexibility => StyleRules {
            hold_time: Some(30),
            repetitions: Some(3),
            rest_after: Some(20),
            ..NO_RULES
        },
    }
}

/// Apply a style's rules on top of the base structure. No style leaves
/// the base untouched.
pub fn apply_style(structure: &mut WorkoutStructure, style: Option<WorkoutStyle>) {
    let Some(style) = style else { return };
    let rules = rules_for(style);

    for exercise in &mut structure.exercises {
        if let Some(sets) = rules.sets {
            exercise.sets = sets;
        }
        if let Some(rest_after) = rules.rest_after {
            exercise.rest_after = rest_after;
        }
        exercise.reps_per_set = rules.reps_per_set.or(exercise.reps_per_set);
        exercise.work_time = rules.work_time.or(exercise.work_time);
        exercise.rest_time = rules.rest_time.or(exercise.rest_time);
        exercise.hold_time = rules.hold_time.or(exercise.hold_time);
        exercise.repetitions = rules.repetitions.or(exercise.repetitions);
    }

    structure.rounds = rules.rounds;
    structure.rest_between_rounds = rules.rest_between_rounds;
    structure.circuits = rules.circuits;
    structure.rest_between_circuits = rules.rest_between_circuits;
}
