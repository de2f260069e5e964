use sqlx::PgPool;
use storage::{
    dto::{
        common::parse_id,
        workout::{CreateWorkoutRequest, PopulatedWorkout, UpdateWorkoutRequest, WorkoutFilter},
    },
    error::Result,
    models::{Exercise, ExerciseSummary, Workout},
    repository::workout::WorkoutRepository,
};

/// List workouts with exercise names and categories
pub async fn list_workouts(
    pool: &PgPool,
    filter: &WorkoutFilter,
) -> Result<Vec<PopulatedWorkout<ExerciseSummary>>> {
    let repo = WorkoutRepository::new(pool);
    repo.list_populated(filter).await
}

/// Get a workout with its exercises fully expanded
pub async fn get_workout(pool: &PgPool, id: &str) -> Result<PopulatedWorkout<Exercise>> {
    let id = parse_id(id, Workout::ENTITY)?;
    let repo = WorkoutRepository::new(pool);
    repo.find_by_id_populated(id).await
}

pub async fn create_workout(pool: &PgPool, request: CreateWorkoutRequest) -> Result<Workout> {
    let document = request.into_document()?;
    let repo = WorkoutRepository::new(pool);
    repo.create(&document).await
}

pub async fn update_workout(
    pool: &PgPool,
    id: &str,
    request: &UpdateWorkoutRequest,
) -> Result<Workout> {
    let id = parse_id(id, Workout::ENTITY)?;
    let repo = WorkoutRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn delete_workout(pool: &PgPool, id: &str) -> Result<()> {
    let id = parse_id(id, Workout::ENTITY)?;
    let repo = WorkoutRepository::new(pool);
    repo.delete(id).await
}
