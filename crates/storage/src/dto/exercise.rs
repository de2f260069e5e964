use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::ValidationErrors;

use super::common::{empty_string_as_none, require};
use crate::models::{
    Category, Difficulty, Equipment, Exercise, MuscleGroup, NewExercise,
    exercise::DEFAULT_CALORIES_PER_MINUTE,
};

/// Request payload for creating a new exercise
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExerciseRequest {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub muscle_group: Option<MuscleGroup>,
    /// Defaults to `Bodyweight`
    pub equipment: Option<Equipment>,
    /// Defaults to `Beginner`
    pub difficulty: Option<Difficulty>,
    pub instructions: Option<String>,
    /// Defaults to 5
    pub calories_per_minute: Option<f64>,
}

impl CreateExerciseRequest {
    /// Check required fields and fill in defaults for the rest
    pub fn into_document(self) -> Result<NewExercise, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = require(&mut errors, "name", self.name, "Exercise name is required");
        let category = require(&mut errors, "category", self.category, "Category is required");
        let muscle_group = require(
            &mut errors,
            "muscleGroup",
            self.muscle_group,
            "Muscle group is required",
        );

        let (Some(name), Some(category), Some(muscle_group)) = (name, category, muscle_group)
        else {
            return Err(errors);
        };

        Ok(NewExercise {
            name: name.trim().to_string(),
            category,
            muscle_group,
            equipment: self.equipment.unwrap_or_default(),
            difficulty: self.difficulty.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
            calories_per_minute: self
                .calories_per_minute
                .unwrap_or(DEFAULT_CALORIES_PER_MINUTE),
        })
    }
}

/// Request payload for updating an existing exercise
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExerciseRequest {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment: Option<Equipment>,
    pub difficulty: Option<Difficulty>,
    pub instructions: Option<String>,
    pub calories_per_minute: Option<f64>,
}

impl UpdateExerciseRequest {
    /// Overlay the supplied fields on the stored exercise
    pub fn merge_into(&self, existing: &Exercise) -> NewExercise {
        let mut merged = NewExercise::from(existing);

        if let Some(name) = &self.name {
            merged.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(muscle_group) = self.muscle_group {
            merged.muscle_group = muscle_group;
        }
        if let Some(equipment) = self.equipment {
            merged.equipment = equipment;
        }
        if let Some(difficulty) = self.difficulty {
            merged.difficulty = difficulty;
        }
        if let Some(instructions) = &self.instructions {
            merged.instructions = instructions.clone();
        }
        if let Some(calories) = self.calories_per_minute {
            merged.calories_per_minute = calories;
        }

        merged
    }
}

/// Equality filters for listing exercises
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExerciseFilter {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub muscle_group: Option<MuscleGroup>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub difficulty: Option<Difficulty>,
}
