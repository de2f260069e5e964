use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::ValidationErrors;

use super::common::{deserialize_optional_datetime, parse_datetime, require};
use crate::models::{NewProgress, Progress};

/// Request payload for logging a workout session
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgressRequest {
    pub workout_id: Option<Uuid>,
    /// Defaults to the time of the request
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub date: Option<DateTime<Utc>>,
    /// Actual length in minutes, 1 to 300
    pub duration: Option<f64>,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
    /// 1 to 5
    pub rating: Option<i32>,
    pub completed: Option<bool>,
}

impl CreateProgressRequest {
    pub fn into_document(self) -> Result<NewProgress, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let workout_id = require(&mut errors, "workoutId", self.workout_id, "Workout ID is required");
        let duration = require(&mut errors, "duration", self.duration, "Duration is required");
        let rating = require(&mut errors, "rating", self.rating, "Rating is required");

        let (Some(workout_id), Some(duration), Some(rating)) = (workout_id, duration, rating) else {
            return Err(errors);
        };

        Ok(NewProgress {
            workout_id,
            date: self.date.unwrap_or_else(Utc::now),
            duration,
            calories_burned: self.calories_burned.unwrap_or(0.0),
            notes: self.notes.unwrap_or_default(),
            rating,
            completed: self.completed.unwrap_or(true),
        })
    }
}

/// Request payload for updating a progress log
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub workout_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub date: Option<DateTime<Utc>>,
    pub duration: Option<f64>,
    pub calories_burned: Option<f64>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
    pub completed: Option<bool>,
}

impl UpdateProgressRequest {
    pub fn merge_into(&self, existing: &Progress) -> NewProgress {
        let mut merged = NewProgress::from(existing);

        if let Some(workout_id) = self.workout_id {
            merged.workout_id = workout_id;
        }
        if let Some(date) = self.date {
            merged.date = date;
        }
        if let Some(duration) = self.duration {
            merged.duration = duration;
        }
        if let Some(calories) = self.calories_burned {
            merged.calories_burned = calories;
        }
        if let Some(notes) = &self.notes {
            merged.notes = notes.clone();
        }
        if let Some(rating) = self.rating {
            merged.rating = rating;
        }
        if let Some(completed) = self.completed {
            merged.completed = completed;
        }

        merged
    }
}

/// Raw query string for listing progress logs
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProgressQuery {
    /// Only logs for this workout
    pub workout_id: Option<String>,
    /// Inclusive lower bound on the session date
    pub start_date: Option<String>,
    /// Inclusive upper bound on the session date
    pub end_date: Option<String>,
}

/// Parsed filter for listing progress logs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressFilter {
    pub workout_id: Option<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl ProgressQuery {
    pub fn into_filter(self) -> Result<ProgressFilter, String> {
        let workout_id = non_empty(self.workout_id)
            .map(|raw| {
                Uuid::parse_str(&raw).map_err(|_| format!("workoutId `{raw}` is not a valid id"))
            })
            .transpose()?;
        let start_date = non_empty(self.start_date)
            .map(|raw| parse_datetime(&raw).map_err(|e| format!("startDate: {e}")))
            .transpose()?;
        let end_date = non_empty(self.end_date)
            .map(|raw| parse_datetime(&raw).map_err(|e| format!("endDate: {e}")))
            .transpose()?;

        Ok(ProgressFilter {
            workout_id,
            start_date,
            end_date,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Progress log with its workout reference expanded to `W`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedProgress<W> {
    pub id: Uuid,
    pub workout_id: Uuid,
    /// `None` when the referenced workout no longer exists
    pub workout: Option<W>,
    pub date: DateTime<Utc>,
    pub duration: f64,
    pub calories_burned: f64,
    pub notes: String,
    pub rating: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<W: Clone> PopulatedProgress<W> {
    pub fn assemble(progress: Progress, workouts: &HashMap<Uuid, W>) -> Self {
        Self {
            workout: workouts.get(&progress.workout_id).cloned(),
            id: progress.id,
            workout_id: progress.workout_id,
            date: progress.date,
            duration: progress.duration,
            calories_burned: progress.calories_burned,
            notes: progress.notes,
            rating: progress.rating,
            completed: progress.completed,
            created_at: progress.created_at,
            updated_at: progress.updated_at,
        }
    }
}
