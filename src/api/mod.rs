//! API module: route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;

pub use dto::{HealthResponse, TodoResponse};
pub use error::{ApiError, ApiErrorResponse, ValidationError};
pub use handlers::{AppState, create_todo, delete_todo, health_check, list_todos, update_todo};

use axum::Router;
use axum::routing::{get, patch};

/// Builds the application router under the `/api` base path.
///
/// Layering (CORS, request tracing) is applied by the server binary;
/// tests drive this router directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", patch(update_todo).delete(delete_todo))
        .with_state(state)
}
