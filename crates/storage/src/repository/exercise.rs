use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use crate::dto::exercise::{ExerciseFilter, UpdateExerciseRequest};
use crate::error::{Result, StorageError};
use crate::models::{Exercise, ExerciseSummary, NewExercise};

/// Repository for Exercise database operations
pub struct ExerciseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ExerciseRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List exercises matching the filter, ordered by name
    pub async fn list(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
        let exercises = list_query(filter)
            .build_query_as::<Exercise>()
            .fetch_all(self.pool)
            .await?;

        Ok(exercises)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exercises")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, name, category, muscle_group, equipment, difficulty,
                   instructions, calories_per_minute, created_at, updated_at
            FROM exercises
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::not_found(Exercise::ENTITY))?;

        Ok(exercise)
    }

    /// Full documents for the given ids; unknown ids are simply absent
    pub async fn find_many(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Exercise>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let exercises = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, name, category, muscle_group, equipment, difficulty,
                   instructions, calories_per_minute, created_at, updated_at
            FROM exercises
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(exercises.into_iter().map(|e| (e.id, e)).collect())
    }

    /// `{id, name, category}` for the given ids; unknown ids are simply absent
    pub async fn find_summaries(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, ExerciseSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let summaries = sqlx::query_as::<_, ExerciseSummary>(
            "SELECT id, name, category FROM exercises WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(summaries.into_iter().map(|s| (s.id, s)).collect())
    }

    pub async fn create(&self, doc: &NewExercise) -> Result<Exercise> {
        doc.validate()?;

        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercises (
                name, category, muscle_group, equipment, difficulty,
                instructions, calories_per_minute
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, category, muscle_group, equipment, difficulty,
                      instructions, calories_per_minute, created_at, updated_at
            "#,
        )
        .bind(&doc.name)
        .bind(doc.category)
        .bind(doc.muscle_group)
        .bind(doc.equipment)
        .bind(doc.difficulty)
        .bind(&doc.instructions)
        .bind(doc.calories_per_minute)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(exercise)
    }

    /// Merge the request into the stored exercise, re-validate, and write it back
    pub async fn update(&self, existing: &Exercise, req: &UpdateExerciseRequest) -> Result<Exercise> {
        let merged = req.merge_into(existing);
        merged.validate()?;

        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            UPDATE exercises
            SET name = $2,
                category = $3,
                muscle_group = $4,
                equipment = $5,
                difficulty = $6,
                instructions = $7,
                calories_per_minute = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, category, muscle_group, equipment, difficulty,
                      instructions, calories_per_minute, created_at, updated_at
            "#,
        )
        .bind(existing.id)
        .bind(&merged.name)
        .bind(merged.category)
        .bind(merged.muscle_group)
        .bind(merged.equipment)
        .bind(merged.difficulty)
        .bind(&merged.instructions)
        .bind(merged.calories_per_minute)
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from_write)?
        .ok_or(StorageError::not_found(Exercise::ENTITY))?;

        Ok(exercise)
    }

    /// Workouts referring to the exercise keep the dangling id
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(Exercise::ENTITY));
        }

        Ok(())
    }
}

fn list_query(filter: &ExerciseFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        r#"
        SELECT id, name, category, muscle_group, equipment, difficulty,
               instructions, calories_per_minute, created_at, updated_at
        FROM exercises
        WHERE 1=1
        "#,
    );

    if let Some(category) = filter.category {
        query.push(" AND category = ");
        query.push_bind(category);
    }

    if let Some(muscle_group) = filter.muscle_group {
        query.push(" AND muscle_group = ");
        query.push_bind(muscle_group);
    }

    if let Some(difficulty) = filter.difficulty {
        query.push(" AND difficulty = ");
        query.push_bind(difficulty);
    }

    // Byte order: uppercase sorts before lowercase regardless of locale
    query.push(r#" ORDER BY name COLLATE "C" ASC"#);
    query
}
