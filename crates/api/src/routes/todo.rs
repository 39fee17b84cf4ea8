//! Route definitions for the `/todos` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::todo;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> upsert
/// GET    /{id}             -> get_by_id
/// PUT    /{id}/complete    -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todo::list).post(todo::upsert))
        .route("/{id}", get(todo::get_by_id))
        .route("/{id}/complete", put(todo::complete))
}
