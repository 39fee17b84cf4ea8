//! Handlers for the `/todos` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use todo_core::todo::{TodoItem, UpsertTodo};
use todo_core::types::DbId;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/todos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TodoItem>>> {
    let items = state.todos.list_all().await?;
    Ok(Json(items))
}

/// POST /api/v1/todos
///
/// Creates when the body has no `id`, merges into the stored item otherwise.
/// Responds 200 in both cases with the persisted item.
pub async fn upsert(
    State(state): State<AppState>,
    payload: Result<Json<UpsertTodo>, JsonRejection>,
) -> AppResult<Json<TodoItem>> {
    let Json(input) = payload?;
    let item = state.todos.upsert(input).await?;
    Ok(Json(item))
}

/// GET /api/v1/todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TodoItem>> {
    let item = state.todos.get(id).await?;
    Ok(Json(item))
}

/// PUT /api/v1/todos/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TodoItem>> {
    let item = state.todos.complete(id).await?;
    Ok(Json(item))
}
