use sqlx::PgPool;
use storage::{
    dto::{
        common::parse_id,
        exercise::{CreateExerciseRequest, ExerciseFilter, UpdateExerciseRequest},
    },
    error::Result,
    models::Exercise,
    repository::exercise::ExerciseRepository,
};

/// List exercises matching the filter, sorted by name
pub async fn list_exercises(pool: &PgPool, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
    let repo = ExerciseRepository::new(pool);
    repo.list(filter).await
}

pub async fn get_exercise(pool: &PgPool, id: &str) -> Result<Exercise> {
    let id = parse_id(id, Exercise::ENTITY)?;
    let repo = ExerciseRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new exercise, filling defaults for omitted fields
pub async fn create_exercise(pool: &PgPool, request: CreateExerciseRequest) -> Result<Exercise> {
    let document = request.into_document()?;
    let repo = ExerciseRepository::new(pool);
    repo.create(&document).await
}

/// Update an exercise
pub async fn update_exercise(
    pool: &PgPool,
    id: &str,
    request: &UpdateExerciseRequest,
) -> Result<Exercise> {
    let id = parse_id(id, Exercise::ENTITY)?;
    let repo = ExerciseRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn delete_exercise(pool: &PgPool, id: &str) -> Result<()> {
    let id = parse_id(id, Exercise::ENTITY)?;
    let repo = ExerciseRepository::new(pool);
    repo.delete(id).await
}
