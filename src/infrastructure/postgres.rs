//! `PostgreSQL` repository implementation.
//!
//! Uses `sqlx` with a connection pool. Rows carry the snake_case storage
//! names (`is_complete`, `created_at`); the camelCase wire mapping lives
//! in the API DTO layer.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE todos (
//!     id          BIGSERIAL PRIMARY KEY,
//!     title       TEXT NOT NULL,
//!     is_complete BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::domain::Todo;
use crate::infrastructure::{RepositoryError, TodoRepository};

/// Columns selected on every read path.
const TODO_COLUMNS: &str = "id, title, is_complete, created_at";

/// One row of the `todos` relation.
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    is_complete: bool,
    created_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            is_complete: row.is_complete,
            created_at: row.created_at,
        }
    }
}

/// Connects a `PostgreSQL` pool for the given connection URL.
///
/// # Errors
///
/// Returns `RepositoryError::DatabaseError` if the pool cannot be
/// established.
pub async fn connect_pool(database_url: &str) -> Result<PgPool, RepositoryError> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|error| RepositoryError::DatabaseError(error.to_string()))
}

/// `PostgreSQL` implementation of [`TodoRepository`].
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    /// Connection pool for `PostgreSQL`.
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `todos` table if it does not exist yet.
    ///
    /// Idempotent; run once at process start.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if the DDL fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id          BIGSERIAL PRIMARY KEY,
                title       TEXT NOT NULL,
                is_complete BOOLEAN NOT NULL DEFAULT FALSE,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|error| RepositoryError::DatabaseError(error.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, RepositoryError> {
        let rows: Vec<TodoRow> = sqlx::query_as(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| RepositoryError::DatabaseError(error.to_string()))?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn insert(&self, title: &str) -> Result<Todo, RepositoryError> {
        let row: TodoRow = sqlx::query_as(&format!(
            "INSERT INTO todos (title) VALUES ($1) RETURNING {TODO_COLUMNS}"
        ))
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| RepositoryError::DatabaseError(error.to_string()))?;

        Ok(row.into())
    }

    async fn set_complete(
        &self,
        id: i64,
        is_complete: bool,
    ) -> Result<Option<Todo>, RepositoryError> {
        let row: Option<TodoRow> = sqlx::query_as(&format!(
            "UPDATE todos SET is_complete = $1 WHERE id = $2 RETURNING {TODO_COLUMNS}"
        ))
        .bind(is_complete)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| RepositoryError::DatabaseError(error.to_string()))?;

        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|error| RepositoryError::DatabaseError(error.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|error| RepositoryError::DatabaseError(error.to_string()))?;

        Ok(())
    }
}
