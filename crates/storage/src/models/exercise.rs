use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{Category, Difficulty, Equipment, MuscleGroup};

pub const DEFAULT_CALORIES_PER_MINUTE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub difficulty: Difficulty,
    pub instructions: String,
    pub calories_per_minute: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    pub const ENTITY: &'static str = "Exercise";
}

/// Reduced view used when workouts are listed with their exercises expanded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSummary {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
}

/// A complete exercise document as it is about to be written.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewExercise {
    #[validate(length(min = 1, message = "Exercise name is required"))]
    pub name: String,
    pub category: Category,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub difficulty: Difficulty,
    pub instructions: String,
    #[validate(range(min = 0.0, message = "Calories per minute cannot be negative"))]
    pub calories_per_minute: f64,
}

impl From<&Exercise> for NewExercise {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name.clone(),
            category: exercise.category,
            muscle_group: exercise.muscle_group,
            equipment: exercise.equipment,
            difficulty: exercise.difficulty,
            instructions: exercise.instructions.clone(),
            calories_per_minute: exercise.calories_per_minute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squat() -> NewExercise {
        NewExercise {
            name: "Squats".to_string(),
            category: Category::Strength,
            muscle_group: MuscleGroup::Legs,
            equipment: Equipment::Barbell,
            difficulty: Difficulty::Intermediate,
            instructions: String::new(),
            calories_per_minute: 10.0,
        }
    }

    #[test]
    fn test_valid_exercise_passes() {
        assert!(squat().validate().is_ok());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let exercise = NewExercise {
            name: String::new(),
            ..squat()
        };
        let errors = exercise.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_negative_calories_are_rejected() {
        let exercise = NewExercise {
            calories_per_minute: -1.0,
            ..squat()
        };
        let errors = exercise.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("calories_per_minute"));
    }

    #[test]
    fn test_zero_calories_are_allowed() {
        let exercise = NewExercise {
            calories_per_minute: 0.0,
            ..squat()
        };
        assert!(exercise.validate().is_ok());
    }
}
