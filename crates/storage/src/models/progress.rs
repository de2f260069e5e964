use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const MAX_SESSION_MINUTES: f64 = 300.0;
pub const MAX_NOTES_CHARS: u64 = 500;

/// A logged workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub date: DateTime<Utc>,
    /// Actual length in minutes
    pub duration: f64,
    pub calories_burned: f64,
    pub notes: String,
    pub rating: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    pub const ENTITY: &'static str = "Progress log";
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProgress {
    pub workout_id: Uuid,
    pub date: DateTime<Utc>,
    #[validate(
        range(min = 1.0, message = "Duration must be at least 1 minute"),
        custom(function = "validate_session_minutes")
    )]
    pub duration: f64,
    #[validate(range(min = 0.0, message = "Calories burned cannot be negative"))]
    pub calories_burned: f64,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub completed: bool,
}

fn validate_session_minutes(minutes: f64) -> Result<(), ValidationError> {
    if minutes > MAX_SESSION_MINUTES {
        let mut error = ValidationError::new("range");
        error.message = Some(Cow::Borrowed("Duration cannot exceed 300 minutes"));
        return Err(error);
    }
    Ok(())
}

impl From<&Progress> for NewProgress {
    fn from(progress: &Progress) -> Self {
        Self {
            workout_id: progress.workout_id,
            date: progress.date,
            duration: progress.duration,
            calories_burned: progress.calories_burned,
            notes: progress.notes.clone(),
            rating: progress.rating,
            completed: progress.completed,
        }
    }
}
