//! Repository trait for the todo relation.
//!
//! Every API operation maps to exactly one method here, and every method
//! performs exactly one store read or mutation, so no transactions are
//! needed anywhere.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Todo;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone)]
pub enum RepositoryError {
    /// Store unreachable or query failure.
    #[error("database error: {0}")]
    DatabaseError(String),
}

/// Persistence operations over the todo relation.
///
/// Held as `Arc<dyn TodoRepository + Send + Sync>` in the application
/// state: opened once at process start, injected into every handler,
/// closed on shutdown.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Lists all todos, newest first (`created_at` descending, ties
    /// broken by `id` descending).
    async fn list(&self) -> Result<Vec<Todo>, RepositoryError>;

    /// Inserts a todo with the given (already trimmed) title and returns
    /// the full created row with store-assigned `id` and `created_at`.
    async fn insert(&self, title: &str) -> Result<Todo, RepositoryError>;

    /// Updates only the completion flag of the matching row.
    ///
    /// Returns `Ok(None)` when no row matches the id; no mutation occurs
    /// in that case.
    async fn set_complete(
        &self,
        id: i64,
        is_complete: bool,
    ) -> Result<Option<Todo>, RepositoryError>;

    /// Removes the matching row permanently.
    ///
    /// Returns `Ok(false)` when no row matched.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Issues a trivial round-trip against the store.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
