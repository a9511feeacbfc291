//! In-memory repository implementation.
//!
//! Backs the integration tests so the full router can be exercised
//! without a running `PostgreSQL` instance. Mirrors the Postgres
//! semantics: monotonic ids, newest-first listing, hard deletes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::Todo;
use crate::infrastructure::{RepositoryError, TodoRepository};

#[derive(Debug, Default)]
struct Store {
    todos: Vec<Todo>,
    next_id: i64,
}

/// In-memory implementation of [`TodoRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    store: Arc<RwLock<Store>>,
    /// When set, every operation fails as if the store were unreachable.
    failing: Arc<AtomicBool>,
}

impl InMemoryTodoRepository {
    /// Creates a new empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with a database error.
    ///
    /// Used by tests to exercise the 500 paths without a real outage.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::DatabaseError(
                "simulated store outage".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, RepositoryError> {
        self.check_available()?;

        let store = self.store.read().await;
        let mut todos = store.todos.clone();
        // Ties in created_at resolved by id, matching the SQL ORDER BY.
        todos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(todos)
    }

    async fn insert(&self, title: &str) -> Result<Todo, RepositoryError> {
        self.check_available()?;

        let mut store = self.store.write().await;
        store.next_id += 1;
        let todo = Todo::new(store.next_id, title.to_string(), false, Utc::now());
        store.todos.push(todo.clone());
        Ok(todo)
    }

    async fn set_complete(
        &self,
        id: i64,
        is_complete: bool,
    ) -> Result<Option<Todo>, RepositoryError> {
        self.check_available()?;

        let mut store = self.store.write().await;
        Ok(store.todos.iter_mut().find(|todo| todo.id == id).map(|todo| {
            todo.is_complete = is_complete;
            todo.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        self.check_available()?;

        let mut store = self.store.write().await;
        let before = store.todos.len();
        store.todos.retain(|todo| todo.id != id);
        Ok(store.todos.len() < before)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}
