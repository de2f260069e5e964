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
        exercise::{CreateExerciseRequest, ExerciseFilter, UpdateExerciseRequest},
    },
    models::Exercise,
};

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/exercises",
    params(ExerciseFilter),
    responses(
        (status = 200, description = "Exercises sorted by name", body = Vec<Exercise>),
        (status = 400, description = "Unknown filter value")
    ),
    tag = "exercises"
)]
pub async fn list_exercises(
    State(db): State<Database>,
    filter: Result<Query<ExerciseFilter>, QueryRejection>,
) -> WebResult<Response> {
    let Query(filter) = filter?;
    let exercises = services::list_exercises(db.pool(), &filter).await?;

    Ok(Json(ApiResponse::list(exercises)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/exercises/{id}",
    params(
        ("id" = String, Path, description = "Exercise id")
    ),
    responses(
        (status = 200, description = "Exercise found", body = Exercise),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn get_exercise(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    let exercise = services::get_exercise(db.pool(), &id).await?;

    Ok(Json(ApiResponse::data(exercise)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/exercises",
    request_body = CreateExerciseRequest,
    responses(
        (status = 201, description = "Exercise created", body = Exercise),
        (status = 400, description = "Validation error")
    ),
    tag = "exercises"
)]
pub async fn create_exercise(
    State(db): State<Database>,
    body: Result<Json<CreateExerciseRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = body?;
    let exercise = services::create_exercise(db.pool(), req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(exercise))).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/exercises/{id}",
    params(
        ("id" = String, Path, description = "Exercise id")
    ),
    request_body = UpdateExerciseRequest,
    responses(
        (status = 200, description = "Exercise updated", body = Exercise),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn update_exercise(
    State(db): State<Database>,
    Path(id): Path<String>,
    body: Result<Json<UpdateExerciseRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = body?;
    let exercise = services::update_exercise(db.pool(), &id, &req).await?;

    Ok(Json(ApiResponse::data(exercise)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/exercises/{id}",
    params(
        ("id" = String, Path, description = "Exercise id")
    ),
    responses(
        (status = 200, description = "Exercise deleted"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn delete_exercise(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    services::delete_exercise(db.pool(), &id).await?;

    Ok(Json(ApiResponse::message("Exercise deleted successfully")).into_response())
}
