use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::ValidationErrors;

use super::common::{empty_string_as_none, require};
use crate::models::{
    Difficulty, NewWorkout, TargetMuscle, Workout, WorkoutExercise,
    workout::{DEFAULT_REPS, DEFAULT_SETS, DEFAULT_WEIGHT, dedup_target_muscles},
};

/// One exercise entry as supplied by clients; omitted numbers take defaults
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseRequest {
    pub exercise_id: Uuid,
    /// Defaults to 3
    pub sets: Option<f64>,
    /// Defaults to 10
    pub reps: Option<f64>,
    /// Defaults to 0
    pub weight: Option<f64>,
}

impl From<&WorkoutExerciseRequest> for WorkoutExercise {
    fn from(entry: &WorkoutExerciseRequest) -> Self {
        Self {
            exercise_id: entry.exercise_id,
            sets: entry.sets.unwrap_or(DEFAULT_SETS),
            reps: entry.reps.unwrap_or(DEFAULT_REPS),
            weight: entry.weight.unwrap_or(DEFAULT_WEIGHT),
        }
    }
}

/// Request payload for creating a new workout
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Planned length in minutes
    pub duration: Option<f64>,
    pub exercises: Option<Vec<WorkoutExerciseRequest>>,
    pub difficulty: Option<Difficulty>,
    pub target_muscles: Option<Vec<TargetMuscle>>,
    pub is_active: Option<bool>,
}

impl CreateWorkoutRequest {
    pub fn into_document(self) -> Result<NewWorkout, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = require(&mut errors, "name", self.name, "Workout name is required");
        let duration = require(&mut errors, "duration", self.duration, "Duration is required");

        let (Some(name), Some(duration)) = (name, duration) else {
            return Err(errors);
        };

        Ok(NewWorkout {
            name: name.trim().to_string(),
            description: self.description.unwrap_or_default(),
            duration,
            exercises: self
                .exercises
                .unwrap_or_default()
                .iter()
                .map(WorkoutExercise::from)
                .collect(),
            difficulty: self.difficulty.unwrap_or_default(),
            target_muscles: dedup_target_muscles(self.target_muscles.unwrap_or_default()),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Request payload for updating an existing workout.
/// A supplied `exercises` list replaces the stored one entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<f64>,
    pub exercises: Option<Vec<WorkoutExerciseRequest>>,
    pub difficulty: Option<Difficulty>,
    pub target_muscles: Option<Vec<TargetMuscle>>,
    pub is_active: Option<bool>,
}

impl UpdateWorkoutRequest {
    pub fn merge_into(&self, existing: &Workout) -> NewWorkout {
        let mut merged = NewWorkout::from(existing);

        if let Some(name) = &self.name {
            merged.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(duration) = self.duration {
            merged.duration = duration;
        }
        if let Some(exercises) = &self.exercises {
            merged.exercises = exercises.iter().map(WorkoutExercise::from).collect();
        }
        if let Some(difficulty) = self.difficulty {
            merged.difficulty = difficulty;
        }
        if let Some(target_muscles) = &self.target_muscles {
            merged.target_muscles = dedup_target_muscles(target_muscles.clone());
        }
        if let Some(is_active) = self.is_active {
            merged.is_active = is_active;
        }

        merged
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkoutFilter {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub difficulty: Option<Difficulty>,
    /// Only the literal `true` selects active workouts; any other value selects inactive ones
    #[serde(default, deserialize_with = "flag_is_true")]
    pub is_active: Option<bool>,
}

fn flag_is_true<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|raw| raw == "true"))
}

/// Workout entry with its exercise reference expanded to `E`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedWorkoutExercise<E> {
    pub exercise_id: Uuid,
    /// `None` when the referenced exercise no longer exists
    pub exercise: Option<E>,
    pub sets: f64,
    pub reps: f64,
    pub weight: f64,
}

/// Workout with every exercise reference expanded to `E`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedWorkout<E> {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: f64,
    pub exercises: Vec<PopulatedWorkoutExercise<E>>,
    pub difficulty: Difficulty,
    pub target_muscles: Vec<TargetMuscle>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<E: Clone> PopulatedWorkout<E> {
    pub fn assemble(workout: Workout, exercises: &HashMap<Uuid, E>) -> Self {
        let entries = workout
            .exercises
            .0
            .into_iter()
            .map(|entry| PopulatedWorkoutExercise {
                exercise: exercises.get(&entry.exercise_id).cloned(),
                exercise_id: entry.exercise_id,
                sets: entry.sets,
                reps: entry.reps,
                weight: entry.weight,
            })
            .collect();

        Self {
            id: workout.id,
            name: workout.name,
            description: workout.description,
            duration: workout.duration,
            exercises: entries,
            difficulty: workout.difficulty,
            target_muscles: workout.target_muscles,
            is_active: workout.is_active,
            created_at: workout.created_at,
            updated_at: workout.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sqlx::types::Json;

    use super::*;
    use crate::models::{Category, ExerciseSummary};

    fn stored_workout(exercises: Vec<WorkoutExercise>) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            name: "Upper Body Strength".to_string(),
            description: "Intense upper body workout".to_string(),
            duration: 60.0,
            exercises: Json(exercises),
            difficulty: Difficulty::Intermediate,
            target_muscles: vec![TargetMuscle::Chest, TargetMuscle::Back],
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_applies_entry_defaults() {
        let exercise_id = Uuid::new_v4();
        let req: CreateWorkoutRequest = serde_json::from_value(json!({
            "name": " Quick Cardio ",
            "duration": 30,
            "exercises": [{"exerciseId": exercise_id}],
            "targetMuscles": ["Full Body", "Full Body"]
        }))
        .unwrap();

        let doc = req.into_document().unwrap();
        assert_eq!(doc.name, "Quick Cardio");
        assert_eq!(doc.description, "");
        assert_eq!(doc.difficulty, Difficulty::Beginner);
        assert!(doc.is_active);
        assert_eq!(doc.target_muscles, vec![TargetMuscle::FullBody]);
        assert_eq!(
            doc.exercises,
            vec![WorkoutExercise {
                exercise_id,
                sets: 3.0,
                reps: 10.0,
                weight: 0.0,
            }]
        );
    }

    #[test]
    fn test_create_accepts_fractional_numbers() {
        let req: CreateWorkoutRequest = serde_json::from_value(json!({
            "name": "Stretch",
            "duration": 45.5,
            "exercises": [{"exerciseId": Uuid::new_v4(), "sets": 2.5, "reps": 7.5}]
        }))
        .unwrap();

        let doc = req.into_document().unwrap();
        assert_eq!(doc.duration, 45.5);
        assert_eq!(doc.exercises[0].sets, 2.5);
        assert_eq!(doc.exercises[0].reps, 7.5);
    }

    #[test]
    fn test_create_requires_name_and_duration() {
        let errors = CreateWorkoutRequest::default().into_document().unwrap_err();
        let message = crate::error::describe_validation_errors(&errors);
        assert_eq!(
            message,
            "duration: Duration is required; name: Workout name is required"
        );
    }

    #[test]
    fn test_entry_without_exercise_id_fails_to_deserialize() {
        let result: Result<CreateWorkoutRequest, _> = serde_json::from_value(json!({
            "name": "Leg Day",
            "duration": 50,
            "exercises": [{"sets": 5}]
        }));
        assert!(result.unwrap_err().to_string().contains("exerciseId"));
    }

    #[test]
    fn test_merge_replaces_exercise_list() {
        let existing = stored_workout(vec![WorkoutExercise {
            exercise_id: Uuid::new_v4(),
            sets: 4.0,
            reps: 8.0,
            weight: 135.0,
        }]);
        let replacement = Uuid::new_v4();
        let patch = UpdateWorkoutRequest {
            exercises: Some(vec![WorkoutExerciseRequest {
                exercise_id: replacement,
                sets: Some(2.0),
                reps: None,
                weight: None,
            }]),
            ..Default::default()
        };

        let merged = patch.merge_into(&existing);
        assert_eq!(merged.exercises.len(), 1);
        assert_eq!(merged.exercises[0].exercise_id, replacement);
        assert_eq!(merged.exercises[0].sets, 2.0);
        assert_eq!(merged.exercises[0].reps, 10.0);
        assert_eq!(merged.name, existing.name);
        assert_eq!(merged.target_muscles, existing.target_muscles);
    }

    #[test]
    fn test_merge_can_deactivate() {
        let patch = UpdateWorkoutRequest {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(!patch.merge_into(&stored_workout(vec![])).is_active);
    }

    #[test]
    fn test_is_active_only_true_for_literal_true() {
        let cases = [("true", Some(true)), ("false", Some(false)), ("1", Some(false)), ("", Some(false))];
        for (raw, expected) in cases {
            let filter: WorkoutFilter = serde_json::from_value(json!({"isActive": raw})).unwrap();
            assert_eq!(filter.is_active, expected, "isActive={raw:?}");
        }

        let filter: WorkoutFilter = serde_json::from_value(json!({})).unwrap();
        assert_eq!(filter.is_active, None);
    }

    #[test]
    fn test_assemble_marks_dangling_references() {
        let known = Uuid::new_v4();
        let dangling = Uuid::new_v4();
        let workout = stored_workout(vec![
            WorkoutExercise {
                exercise_id: known,
                sets: 3.0,
                reps: 10.0,
                weight: 0.0,
            },
            WorkoutExercise {
                exercise_id: dangling,
                sets: 3.0,
                reps: 12.0,
                weight: 20.0,
            },
        ]);
        let lookup = HashMap::from([(
            known,
            ExerciseSummary {
                id: known,
                name: "Push-ups".to_string(),
                category: Category::Strength,
            },
        )]);

        let populated = PopulatedWorkout::assemble(workout, &lookup);
        assert_eq!(populated.exercises[0].exercise.as_ref().map(|e| e.name.as_str()), Some("Push-ups"));
        assert_eq!(populated.exercises[1].exercise, None);
        assert_eq!(populated.exercises[1].exercise_id, dangling);
        assert_eq!(populated.exercises[1].reps, 12.0);

        let value = serde_json::to_value(&populated).unwrap();
        assert!(value["exercises"][1]["exercise"].is_null());
        assert_eq!(value["exercises"][0]["exercise"]["category"], json!("Strength"));
    }
}
