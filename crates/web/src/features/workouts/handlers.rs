use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::ApiResponse,
        workout::{CreateWorkoutRequest, PopulatedWorkout, UpdateWorkoutRequest, WorkoutFilter},
    },
    models::{Exercise, ExerciseSummary, Workout},
};

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/workouts",
    params(WorkoutFilter),
    responses(
        (status = 200, description = "Workouts sorted by name, each exercise expanded to id, name and category", body = [PopulatedWorkout<ExerciseSummary>]),
        (status = 400, description = "Unknown filter value")
    ),
    tag = "workouts"
)]
pub async fn list_workouts(
    State(db): State<Database>,
    filter: Result<Query<WorkoutFilter>, QueryRejection>,
) -> WebResult<Response> {
    let Query(filter) = filter?;
    let workouts = services::list_workouts(db.pool(), &filter).await?;

    Ok(Json(ApiResponse::list(workouts)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout id")
    ),
    responses(
        (status = 200, description = "Workout found, exercises fully expanded", body = PopulatedWorkout<Exercise>),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn get_workout(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    let workout = services::get_workout(db.pool(), &id).await?;

    Ok(Json(ApiResponse::data(workout)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/workouts",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created", body = Workout),
        (status = 400, description = "Validation error")
    ),
    tag = "workouts"
)]
pub async fn create_workout(
    State(db): State<Database>,
    body: Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = body?;
    let workout = services::create_workout(db.pool(), req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(workout))).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout id")
    ),
    request_body = UpdateWorkoutRequest,
    responses(
        (status = 200, description = "Workout updated", body = Workout),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn update_workout(
    State(db): State<Database>,
    Path(id): Path<String>,
    body: Result<Json<UpdateWorkoutRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = body?;
    let workout = services::update_workout(db.pool(), &id, &req).await?;

    Ok(Json(ApiResponse::data(workout)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout id")
    ),
    responses(
        (status = 200, description = "Workout deleted; its progress logs are kept"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn delete_workout(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    services::delete_workout(db.pool(), &id).await?;

    Ok(Json(ApiResponse::message("Workout deleted successfully")).into_response())
}
