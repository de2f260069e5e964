use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use super::workout::WorkoutRepository;
use crate::dto::progress::{PopulatedProgress, ProgressFilter, UpdateProgressRequest};
use crate::error::{Result, StorageError};
use crate::models::{NewProgress, Progress, Workout, WorkoutSummary};

/// Repository for Progress database operations
pub struct ProgressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProgressRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List logs matching the filter, most recent first
    pub async fn list(&self, filter: &ProgressFilter) -> Result<Vec<Progress>> {
        let logs = list_query(filter)
            .build_query_as::<Progress>()
            .fetch_all(self.pool)
            .await?;

        Ok(logs)
    }

    /// List logs with each workout expanded to `{id, name, difficulty}`
    pub async fn list_populated(
        &self,
        filter: &ProgressFilter,
    ) -> Result<Vec<PopulatedProgress<WorkoutSummary>>> {
        let logs = self.list(filter).await?;

        let mut ids: Vec<Uuid> = logs.iter().map(|log| log.workout_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let summaries = WorkoutRepository::new(self.pool).find_summaries(&ids).await?;

        Ok(logs
            .into_iter()
            .map(|log| PopulatedProgress::assemble(log, &summaries))
            .collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Progress> {
        let log = sqlx::query_as::<_, Progress>(
            r#"
            SELECT id, workout_id, date, duration, calories_burned, notes,
                   rating, completed, created_at, updated_at
            FROM progress
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::not_found(Progress::ENTITY))?;

        Ok(log)
    }

    /// Single log with its workout expanded to the full document
    pub async fn find_by_id_populated(&self, id: Uuid) -> Result<PopulatedProgress<Workout>> {
        let log = self.find_by_id(id).await?;
        let workouts = WorkoutRepository::new(self.pool)
            .find_many(&[log.workout_id])
            .await?;

        Ok(PopulatedProgress::assemble(log, &workouts))
    }

    pub async fn create(&self, doc: &NewProgress) -> Result<Progress> {
        doc.validate()?;

        let log = sqlx::query_as::<_, Progress>(
            r#"
            INSERT INTO progress (
                workout_id, date, duration, calories_burned, notes, rating, completed
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, workout_id, date, duration, calories_burned, notes,
                      rating, completed, created_at, updated_at
            "#,
        )
        .bind(doc.workout_id)
        .bind(doc.date)
        .bind(doc.duration)
        .bind(doc.calories_burned)
        .bind(&doc.notes)
        .bind(doc.rating)
        .bind(doc.completed)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from_write)?;

        Ok(log)
    }

    pub async fn update(&self, existing: &Progress, req: &UpdateProgressRequest) -> Result<Progress> {
        let merged = req.merge_into(existing);
        merged.validate()?;

        let log = sqlx::query_as::<_, Progress>(
            r#"
            UPDATE progress
            SET workout_id = $2,
                date = $3,
                duration = $4,
                calories_burned = $5,
                notes = $6,
                rating = $7,
                completed = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING id, workout_id, date, duration, calories_burned, notes,
                      rating, completed, created_at, updated_at
            "#,
        )
        .bind(existing.id)
        .bind(merged.workout_id)
        .bind(merged.date)
        .bind(merged.duration)
        .bind(merged.calories_burned)
        .bind(&merged.notes)
        .bind(merged.rating)
        .bind(merged.completed)
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from_write)?
        .ok_or(StorageError::not_found(Progress::ENTITY))?;

        Ok(log)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM progress WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(Progress::ENTITY));
        }

        Ok(())
    }
}

fn list_query(filter: &ProgressFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        r#"
        SELECT id, workout_id, date, duration, calories_burned, notes,
               rating, completed, created_at, updated_at
        FROM progress
        WHERE 1=1
        "#,
    );

    if let Some(workout_id) = filter.workout_id {
        query.push(" AND workout_id = ");
        query.push_bind(workout_id);
    }

    if let Some(start_date) = filter.start_date {
        query.push(" AND date >= ");
        query.push_bind(start_date);
    }

    if let Some(end_date) = filter.end_date {
        query.push(" AND date <= ");
        query.push_bind(end_date);
    }

    query.push(" ORDER BY date DESC");
    query
}
