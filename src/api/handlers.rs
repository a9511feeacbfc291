//! HTTP handlers for the todo API.
//!
//! Each handler maps 1:1 to a repository method; no operation spans
//! multiple store interactions, so every request is a single atomic
//! store statement.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use super::dto::{
    HealthResponse, TodoResponse, parse_todo_id, validate_is_complete, validate_title,
};
use super::error::ApiErrorResponse;
use crate::infrastructure::TodoRepository;

/// Shared application dependencies.
///
/// The repository is a trait object so the router can be driven by the
/// Postgres implementation in production and the in-memory one in
/// tests.
#[derive(Clone)]
pub struct AppState {
    /// Todo repository for persistence.
    pub repository: Arc<dyn TodoRepository + Send + Sync>,
}

impl AppState {
    /// Creates a new `AppState` over the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn TodoRepository + Send + Sync>) -> Self {
        Self { repository }
    }
}

/// `GET /api/health`
///
/// Issues a trivial round-trip against the store and reports
/// healthy/unhealthy accordingly.
///
/// # Errors
///
/// Returns 500 when the store is unreachable.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiErrorResponse> {
    state.repository.ping().await?;
    Ok(Json(HealthResponse { ok: true }))
}

/// `GET /api/todos`
///
/// Returns all todos, newest first.
///
/// # Errors
///
/// Returns 500 on storage failure.
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoResponse>>, ApiErrorResponse> {
    let todos = state.repository.list().await?;
    Ok(Json(todos.iter().map(TodoResponse::from).collect()))
}

/// `POST /api/todos`
///
/// Creates a todo from `{"title": string}` and returns the full created
/// row with 201.
///
/// # Errors
///
/// Returns 400 when the title is missing, not a string, or blank after
/// trimming; 500 on storage failure. No row is inserted on 400.
pub async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiErrorResponse> {
    let title = validate_title(&body)?;
    let todo = state.repository.insert(&title).await?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// `PATCH /api/todos/{id}`
///
/// Updates only the completion flag from `{"isComplete": bool}` and
/// returns the full updated row.
///
/// # Errors
///
/// Returns 400 for a malformed id or non-boolean flag, 404 when no row
/// matches, 500 on storage failure.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<TodoResponse>, ApiErrorResponse> {
    let id = parse_todo_id(&id)?;
    let is_complete = validate_is_complete(&body)?;

    match state.repository.set_complete(id, is_complete).await? {
        Some(todo) => Ok(Json(todo.into())),
        None => Err(ApiErrorResponse::not_found("Todo not found")),
    }
}

/// `DELETE /api/todos/{id}`
///
/// Removes the matching row permanently and returns 204 with no body.
///
/// # Errors
///
/// Returns 400 for a malformed id, 404 when no row matches, 500 on
/// storage failure.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_todo_id(&id)?;

    if state.repository.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiErrorResponse::not_found("Todo not found"))
    }
}
