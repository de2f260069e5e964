use axum::{
    Router,
    routing::get,
};
use storage::Database;

use crate::routes::route_not_found;

use super::handlers::{
    create_exercise, delete_exercise, get_exercise, list_exercises, update_exercise,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise).fallback(route_not_found))
        .route(
            "/:id",
            get(get_exercise)
                .patch(update_exercise)
                .delete(delete_exercise)
                .fallback(route_not_found),
        )
}
