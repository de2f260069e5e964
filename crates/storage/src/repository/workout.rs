use std::collections::HashMap;

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use super::exercise::ExerciseRepository;
use crate::dto::workout::{PopulatedWorkout, UpdateWorkoutRequest, WorkoutFilter};
use crate::error::{Result, StorageError};
use crate::models::{Exercise, ExerciseSummary, NewWorkout, Workout, WorkoutSummary};

/// Repository for Workout database operations
pub struct WorkoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WorkoutRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List workouts matching the filter, ordered by name
    pub async fn list(&self, filter: &WorkoutFilter) -> Result<Vec<Workout>> {
        let workouts = list_query(filter)
            .build_query_as::<Workout>()
            .fetch_all(self.pool)
            .await?;

        Ok(workouts)
    }

    /// List workouts with each exercise expanded to `{id, name, category}`
    pub async fn list_populated(
        &self,
        filter: &WorkoutFilter,
    ) -> Result<Vec<PopulatedWorkout<ExerciseSummary>>> {
        let workouts = self.list(filter).await?;

        let ids = referenced_exercise_ids(&workouts);
        let summaries = ExerciseRepository::new(self.pool)
            .find_summaries(&ids)
            .await?;

        Ok(workouts
            .into_iter()
            .map(|workout| PopulatedWorkout::assemble(workout, &summaries))
            .collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Workout> {
        let workout = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, name, description, duration, exercises, difficulty,
                   target_muscles, is_active, created_at, updated_at
            FROM workouts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::not_found(Workout::ENTITY))?;

        Ok(workout)
    }

    /// Single workout with each exercise expanded to the full document
    pub async fn find_by_id_populated(&self, id: Uuid) -> Result<PopulatedWorkout<Exercise>> {
        let workout = self.find_by_id(id).await?;

        let ids = referenced_exercise_ids(std::slice::from_ref(&workout));
        let exercises = ExerciseRepository::new(self.pool).find_many(&ids).await?;

        Ok(PopulatedWorkout::assemble(workout, &exercises))
    }

    pub async fn find_many(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Workout>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, name, description, duration, exercises, difficulty,
                   target_muscles, is_active, created_at, updated_at
            FROM workouts
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(workouts.into_iter().map(|w| (w.id, w)).collect())
    }

    pub async fn find_summaries(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, WorkoutSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let summaries = sqlx::query_as::<_, WorkoutSummary>(
            "SELECT id, name, difficulty FROM workouts WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(summaries.into_iter().map(|s| (s.id, s)).collect())
    }

    /// Exercise ids are stored as given; they are not checked for existence
    pub async fn create(&self, doc: &NewWorkout) -> Result<Workout> {
        doc.validate()?;

        let workout = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (
                name, description, duration, exercises, difficulty,
                target_muscles, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, duration, exercises, difficulty,
                      target_muscles, is_active, created_at, updated_at
            "#,
        )
        .bind(&doc.name)
        .bind(&doc.description)
        .bind(doc.duration)
        .bind(Json(&doc.exercises))
        .bind(doc.difficulty)
        .bind(doc.target_muscles.as_slice())
        .bind(doc.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(workout)
    }

    pub async fn update(&self, existing: &Workout, req: &UpdateWorkoutRequest) -> Result<Workout> {
        let merged = req.merge_into(existing);
        merged.validate()?;

        let workout = sqlx::query_as::<_, Workout>(
            r#"
            UPDATE workouts
            SET name = $2,
                description = $3,
                duration = $4,
                exercises = $5,
                difficulty = $6,
                target_muscles = $7,
                is_active = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, duration, exercises, difficulty,
                      target_muscles, is_active, created_at, updated_at
            "#,
        )
        .bind(existing.id)
        .bind(&merged.name)
        .bind(&merged.description)
        .bind(merged.duration)
        .bind(Json(&merged.exercises))
        .bind(merged.difficulty)
        .bind(merged.target_muscles.as_slice())
        .bind(merged.is_active)
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from_write)?
        .ok_or(StorageError::not_found(Workout::ENTITY))?;

        Ok(workout)
    }

    /// Progress logs for the workout are left in place
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(Workout::ENTITY));
        }

        Ok(())
    }
}

fn list_query(filter: &WorkoutFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        r#"
        SELECT id, name, description, duration, exercises, difficulty,
               target_muscles, is_active, created_at, updated_at
        FROM workouts
        WHERE 1=1
        "#,
    );

    if let Some(difficulty) = filter.difficulty {
        query.push(" AND difficulty = ");
        query.push_bind(difficulty);
    }

    if let Some(is_active) = filter.is_active {
        query.push(" AND is_active = ");
        query.push_bind(is_active);
    }

    query.push(r#" ORDER BY name COLLATE "C" ASC"#);
    query
}

/// Distinct exercise ids across the workouts, in first-seen order
fn referenced_exercise_ids(workouts: &[Workout]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for entry in workouts.iter().flat_map(|w| w.exercises.0.iter()) {
        if !ids.contains(&entry.exercise_id) {
            ids.push(entry.exercise_id);
        }
    }
    ids
}
