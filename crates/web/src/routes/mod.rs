use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::WebError;
use crate::features::{exercises, progress, workouts};

#[derive(OpenApi)]
#[openapi(
    info(title = "Workout Tracker API", version = "1.0"),
    paths(
        exercises::handlers::list_exercises,
        exercises::handlers::get_exercise,
        exercises::handlers::create_exercise,
        exercises::handlers::update_exercise,
        exercises::handlers::delete_exercise,
        workouts::handlers::list_workouts,
        workouts::handlers::get_workout,
        workouts::handlers::create_workout,
        workouts::handlers::update_workout,
        workouts::handlers::delete_workout,
        progress::handlers::list_progress,
        progress::handlers::get_progress,
        progress::handlers::create_progress,
        progress::handlers::update_progress,
        progress::handlers::delete_progress,
        progress::handlers::test_validation,
    ),
    components(
        schemas(
            storage::dto::exercise::CreateExerciseRequest,
            storage::dto::exercise::UpdateExerciseRequest,
            storage::dto::workout::CreateWorkoutRequest,
            storage::dto::workout::UpdateWorkoutRequest,
            storage::dto::workout::WorkoutExerciseRequest,
            storage::dto::progress::CreateProgressRequest,
            storage::dto::progress::UpdateProgressRequest,
            storage::models::Exercise,
            storage::models::ExerciseSummary,
            storage::models::Workout,
            storage::models::WorkoutExercise,
            storage::models::WorkoutSummary,
            storage::models::Progress,
            storage::models::Category,
            storage::models::MuscleGroup,
            storage::models::Equipment,
            storage::models::Difficulty,
            storage::models::TargetMuscle,
        )
    ),
    tags(
        (name = "exercises", description = "Exercise catalog"),
        (name = "workouts", description = "Workout templates"),
        (name = "progress", description = "Logged workout sessions"),
    )
)]
pub struct ApiDoc;

pub fn router(db: Database) -> Router {
    let api = Router::new()
        .nest("/exercises", exercises::routes::routes())
        .nest("/workouts", workouts::routes::routes())
        .nest("/progress", progress::routes::routes());

    Router::new()
        .route("/", get(root).fallback(route_not_found))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Workout Tracker API",
        "version": "1.0",
        "endpoints": {
            "exercises": "/api/exercises",
            "workouts": "/api/workouts",
            "progress": "/api/progress",
        }
    }))
}

pub(crate) async fn route_not_found() -> WebError {
    WebError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;

    /// Router over a pool that never connects; only requests settled before
    /// any query runs can be exercised.
    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:5432/workout_tracker_test")
            .unwrap();
        router(Database::from_pool(pool))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn error_text(body: &Value) -> &str {
        body["error"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_root_describes_api() {
        let (status, body) = send(get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Workout Tracker API");
        assert_eq!(body["version"], "1.0");
        assert_eq!(body["endpoints"]["workouts"], "/api/workouts");
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let (status, body) = send(get("/api/routines")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(error_text(&body), "Route not found");
    }

    #[tokio::test]
    async fn test_malformed_ids_are_not_found() {
        let (status, body) = send(get("/api/exercises/not-an-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_text(&body), "Exercise not found");

        let (status, body) = send(get("/api/workouts/123")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_text(&body), "Workout not found");

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/progress/abc")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_text(&body), "Progress log not found");
    }

    #[tokio::test]
    async fn test_update_with_malformed_id_is_not_found() {
        let request = json_request(Method::PATCH, "/api/workouts/xyz", json!({"duration": 40}));
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_text(&body), "Workout not found");
    }

    #[tokio::test]
    async fn test_exercise_missing_required_fields() {
        let request = json_request(Method::POST, "/api/exercises", json!({"name": "Burpees"}));
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(
            error_text(&body),
            "Validation failed: category: Category is required; muscleGroup: Muscle group is required"
        );
    }

    #[tokio::test]
    async fn test_exercise_unknown_category_is_rejected() {
        let request = json_request(
            Method::POST,
            "/api/exercises",
            json!({"name": "Sun Salutation", "category": "Yoga", "muscleGroup": "Core"}),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(error_text(&body).contains("Yoga"));
    }

    #[tokio::test]
    async fn test_malformed_json_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/workouts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_workout_requires_name() {
        let request = json_request(Method::POST, "/api/workouts", json!({"duration": 30}));
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_text(&body), "Validation failed: name: Workout name is required");
    }

    #[tokio::test]
    async fn test_workout_entry_with_zero_sets() {
        let request = json_request(
            Method::POST,
            "/api/workouts",
            json!({
                "name": "Leg Day",
                "duration": 50,
                "exercises": [{"exerciseId": uuid::Uuid::new_v4(), "sets": 0}]
            }),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_text(&body).contains("exercises[0].sets: Sets must be at least 1"));
    }

    #[tokio::test]
    async fn test_progress_rating_out_of_range() {
        let request = json_request(
            Method::POST,
            "/api/progress",
            json!({"workoutId": uuid::Uuid::new_v4(), "duration": 30, "rating": 6}),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error_text(&body),
            "Validation failed: rating: Rating must be between 1 and 5"
        );
    }

    #[tokio::test]
    async fn test_progress_duration_above_limit() {
        let request = json_request(
            Method::POST,
            "/api/progress",
            json!({"workoutId": uuid::Uuid::new_v4(), "duration": 301, "rating": 3}),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error_text(&body),
            "Validation failed: duration: Duration cannot exceed 300 minutes"
        );
    }

    #[tokio::test]
    async fn test_progress_duration_below_one_minute() {
        let request = json_request(
            Method::POST,
            "/api/progress",
            json!({"workoutId": uuid::Uuid::new_v4(), "duration": 0.5, "rating": 3}),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error_text(&body),
            "Validation failed: duration: Duration must be at least 1 minute"
        );
    }

    #[tokio::test]
    async fn test_workout_accepts_fractional_duration() {
        // Zero sets keeps the request away from the database
        let request = json_request(
            Method::POST,
            "/api/workouts",
            json!({
                "name": "Stretch",
                "duration": 45.5,
                "exercises": [{"exerciseId": uuid::Uuid::new_v4(), "sets": 0, "reps": 7.5}]
            }),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error_text(&body),
            "Validation failed: exercises[0].sets: Sets must be at least 1"
        );
    }

    #[tokio::test]
    async fn test_validation_self_check_is_rejected() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/progress/test-validation")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(
            error_text(&body),
            "Validation failed (as expected): rating: Rating must be between 1 and 5"
        );
    }

    #[tokio::test]
    async fn test_self_check_path_read_as_log_id() {
        let (status, body) = send(get("/api/progress/test-validation")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(error_text(&body), "Progress log not found");

        let request = json_request(Method::PATCH, "/api/progress/test-validation", json!({"rating": 3}));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_text(&body), "Progress log not found");
    }

    #[tokio::test]
    async fn test_unsupported_method_uses_envelope() {
        let request = json_request(Method::PUT, "/api/exercises/abc", json!({"name": "Dips"}));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(error_text(&body), "Route not found");

        for (method, uri) in [
            (Method::DELETE, "/api/workouts"),
            (Method::PUT, "/api/progress/test-validation"),
            (Method::POST, "/"),
        ] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let (status, body) = send(request).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(error_text(&body), "Route not found", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_progress_query_with_bad_workout_id() {
        let (status, body) = send(get("/api/progress?workoutId=abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_text(&body), "workoutId `abc` is not a valid id");
    }

    #[tokio::test]
    async fn test_progress_query_with_bad_date() {
        let (status, body) = send(get("/api/progress?startDate=yesterday")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_text(&body).starts_with("startDate:"));
    }

    #[tokio::test]
    async fn test_exercise_filter_with_unknown_difficulty() {
        let (status, body) = send(get("/api/exercises?difficulty=Expert")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[test]
    fn test_openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/exercises",
            "/api/exercises/{id}",
            "/api/workouts",
            "/api/workouts/{id}",
            "/api/progress",
            "/api/progress/{id}",
            "/api/progress/test-validation",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_documents_expanded_references() {
        let doc = ApiDoc::openapi().to_json().unwrap();

        assert!(doc.contains("\"exercise\":{"));
        assert!(doc.contains("\"workout\":{"));
    }
}
