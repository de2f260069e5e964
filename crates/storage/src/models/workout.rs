use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{Difficulty, TargetMuscle};

pub const DEFAULT_SETS: f64 = 3.0;
pub const DEFAULT_REPS: f64 = 10.0;
pub const DEFAULT_WEIGHT: f64 = 0.0;

/// One exercise inside a workout. Stored embedded in the workout document;
/// `exercise_id` is not checked against the exercises table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub exercise_id: Uuid,
    #[validate(range(min = 1.0, message = "Sets must be at least 1"))]
    pub sets: f64,
    #[validate(range(min = 1.0, message = "Reps must be at least 1"))]
    pub reps: f64,
    /// In pounds
    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Planned length in minutes
    pub duration: f64,
    #[schema(value_type = Vec<WorkoutExercise>)]
    pub exercises: Json<Vec<WorkoutExercise>>,
    pub difficulty: Difficulty,
    pub target_muscles: Vec<TargetMuscle>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    pub const ENTITY: &'static str = "Workout";
}

/// Reduced view used when progress logs are listed with their workout expanded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub id: Uuid,
    pub name: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewWorkout {
    #[validate(length(min = 1, message = "Workout name is required"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 1.0, message = "Duration must be at least 1 minute"))]
    pub duration: f64,
    #[validate(nested)]
    pub exercises: Vec<WorkoutExercise>,
    pub difficulty: Difficulty,
    pub target_muscles: Vec<TargetMuscle>,
    pub is_active: bool,
}

impl From<&Workout> for NewWorkout {
    fn from(workout: &Workout) -> Self {
        Self {
            name: workout.name.clone(),
            description: workout.description.clone(),
            duration: workout.duration,
            exercises: workout.exercises.0.clone(),
            difficulty: workout.difficulty,
            target_muscles: workout.target_muscles.clone(),
            is_active: workout.is_active,
        }
    }
}

/// Drop repeated muscles, keeping the first occurrence of each.
pub fn dedup_target_muscles(muscles: Vec<TargetMuscle>) -> Vec<TargetMuscle> {
    let mut unique = Vec::with_capacity(muscles.len());
    for muscle in muscles {
        if !unique.contains(&muscle) {
            unique.push(muscle);
        }
    }
    unique
}
