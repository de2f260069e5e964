use axum::{
    Router,
    routing::get,
};
use storage::Database;

use crate::routes::route_not_found;

use super::handlers::{
    create_workout, delete_workout, get_workout, list_workouts, update_workout,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout).fallback(route_not_found))
        .route(
            "/:id",
            get(get_workout)
                .patch(update_workout)
                .delete(delete_workout)
                .fallback(route_not_found),
        )
}
