use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use crate::routes::route_not_found;

use super::handlers::{
    create_progress, delete_progress, get_progress, list_progress, test_validation,
    unknown_progress_log, update_progress,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_progress).post(create_progress).fallback(route_not_found))
        // Only POST is the self-check; other by-id methods see an id that cannot exist
        .route(
            "/test-validation",
            post(test_validation)
                .get(unknown_progress_log)
                .patch(unknown_progress_log)
                .delete(unknown_progress_log)
                .fallback(route_not_found),
        )
        .route(
            "/:id",
            get(get_progress)
                .patch(update_progress)
                .delete(delete_progress)
                .fallback(route_not_found),
        )
}
