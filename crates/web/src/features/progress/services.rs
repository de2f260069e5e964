use sqlx::PgPool;
use storage::{
    dto::{
        common::parse_id,
        progress::{CreateProgressRequest, PopulatedProgress, ProgressFilter, UpdateProgressRequest},
    },
    error::Result,
    models::{Progress, Workout, WorkoutSummary},
    repository::progress::ProgressRepository,
};
use uuid::Uuid;

/// List progress logs, most recent first, with workout name and difficulty
pub async fn list_progress(
    pool: &PgPool,
    filter: &ProgressFilter,
) -> Result<Vec<PopulatedProgress<WorkoutSummary>>> {
    let repo = ProgressRepository::new(pool);
    repo.list_populated(filter).await
}

/// Get a progress log with its workout fully expanded
pub async fn get_progress(pool: &PgPool, id: &str) -> Result<PopulatedProgress<Workout>> {
    let id = parse_id(id, Progress::ENTITY)?;
    let repo = ProgressRepository::new(pool);
    repo.find_by_id_populated(id).await
}

pub async fn create_progress(pool: &PgPool, request: CreateProgressRequest) -> Result<Progress> {
    let document = request.into_document()?;
    let repo = ProgressRepository::new(pool);
    repo.create(&document).await
}

pub async fn update_progress(
    pool: &PgPool,
    id: &str,
    request: &UpdateProgressRequest,
) -> Result<Progress> {
    let id = parse_id(id, Progress::ENTITY)?;
    let repo = ProgressRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn delete_progress(pool: &PgPool, id: &str) -> Result<()> {
    let id = parse_id(id, Progress::ENTITY)?;
    let repo = ProgressRepository::new(pool);
    repo.delete(id).await
}

/// A log whose rating is out of range; creating it must fail validation
pub fn out_of_range_sample() -> CreateProgressRequest {
    CreateProgressRequest {
        workout_id: Some(Uuid::new_v4()),
        duration: Some(30.0),
        rating: Some(10),
        calories_burned: Some(200.0),
        ..Default::default()
    }
}

/// Try to persist [`out_of_range_sample`]
pub async fn attempt_invalid_progress(pool: &PgPool) -> Result<Progress> {
    create_progress(pool, out_of_range_sample()).await
}
