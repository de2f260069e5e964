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
        progress::{CreateProgressRequest, PopulatedProgress, ProgressQuery, UpdateProgressRequest},
    },
    error::{StorageError, describe_validation_errors},
    models::{Progress, Workout, WorkoutSummary},
};

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    get,
    path = "/api/progress",
    params(ProgressQuery),
    responses(
        (status = 200, description = "Progress logs, most recent first, each workout expanded to id, name and difficulty", body = [PopulatedProgress<WorkoutSummary>]),
        (status = 400, description = "Malformed workout id or date")
    ),
    tag = "progress"
)]
pub async fn list_progress(
    State(db): State<Database>,
    query: Result<Query<ProgressQuery>, QueryRejection>,
) -> WebResult<Response> {
    let Query(query) = query?;
    let filter = query.into_filter().map_err(WebError::BadRequest)?;
    let logs = services::list_progress(db.pool(), &filter).await?;

    Ok(Json(ApiResponse::list(logs)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/progress/{id}",
    params(
        ("id" = String, Path, description = "Progress log id")
    ),
    responses(
        (status = 200, description = "Progress log found, workout fully expanded", body = PopulatedProgress<Workout>),
        (status = 404, description = "Progress log not found")
    ),
    tag = "progress"
)]
pub async fn get_progress(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    let log = services::get_progress(db.pool(), &id).await?;

    Ok(Json(ApiResponse::data(log)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/progress",
    request_body = CreateProgressRequest,
    responses(
        (status = 201, description = "Progress log created", body = Progress),
        (status = 400, description = "Validation error")
    ),
    tag = "progress"
)]
pub async fn create_progress(
    State(db): State<Database>,
    body: Result<Json<CreateProgressRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = body?;
    let log = services::create_progress(db.pool(), req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(log))).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/progress/{id}",
    params(
        ("id" = String, Path, description = "Progress log id")
    ),
    request_body = UpdateProgressRequest,
    responses(
        (status = 200, description = "Progress log updated", body = Progress),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Progress log not found")
    ),
    tag = "progress"
)]
pub async fn update_progress(
    State(db): State<Database>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProgressRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = body?;
    let log = services::update_progress(db.pool(), &id, &req).await?;

    Ok(Json(ApiResponse::data(log)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/progress/{id}",
    params(
        ("id" = String, Path, description = "Progress log id")
    ),
    responses(
        (status = 200, description = "Progress log deleted"),
        (status = 404, description = "Progress log not found")
    ),
    tag = "progress"
)]
pub async fn delete_progress(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    services::delete_progress(db.pool(), &id).await?;

    Ok(Json(ApiResponse::message("Progress log deleted successfully")).into_response())
}

/// Self-check that an out-of-range rating never reaches the database
#[utoipa::path(
    post,
    path = "/api/progress/test-validation",
    responses(
        (status = 400, description = "Validation rejected the sample log, as expected"),
        (status = 201, description = "The sample log was stored; validation is broken", body = Progress)
    ),
    tag = "progress"
)]
pub async fn test_validation(State(db): State<Database>) -> WebResult<Response> {
    match services::attempt_invalid_progress(db.pool()).await {
        Ok(log) => {
            tracing::warn!(id = %log.id, "Progress log with rating 10 was accepted");
            let body = ApiResponse::data(log)
                .with_message("WARNING: Validation should have prevented this!");
            Ok((StatusCode::CREATED, Json(body)).into_response())
        }
        Err(StorageError::Validation(errors)) => Err(WebError::BadRequest(format!(
            "Validation failed (as expected): {}",
            describe_validation_errors(&errors)
        ))),
        Err(e) => Err(e.into()),
    }
}

/// `test-validation` read as a log id; no log can have it
pub async fn unknown_progress_log() -> WebError {
    StorageError::not_found(Progress::ENTITY).into()
}
