//! HTTP access to the todo API.
//!
//! Every non-success response is reduced to a display message: the
//! body's `message` field when present, a generic fallback otherwise.
//! No retries, timeouts, or cancellation; a failure surfaces
//! immediately as an error the view model can show.

use std::env;

use reqwest::{Response, StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::api::dto::TodoResponse;
use crate::api::error::ApiError;
use crate::domain::Todo;

/// Default API base URL, matching the server's default listen port.
const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Message shown when a failure carries no usable message of its own.
const GENERIC_FAILURE: &str = "Request failed";

/// Errors surfaced to the view model.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{0}")]
    Api(String),
    /// The request never completed (connection refused, DNS, ...).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the todo API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL (trailing slash ignored).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from `TODO_API_BASE_URL`, defaulting to the
    /// local server address.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("TODO_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Fetches all todos, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or non-success status.
    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self
            .http
            .get(format!("{}/todos", self.base_url))
            .send()
            .await?;
        let todos: Vec<TodoResponse> = check(response).await?.json().await?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }

    /// Creates a todo and returns the server-assigned row.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or non-success status.
    pub async fn create(&self, title: &str) -> Result<Todo, ClientError> {
        let response = self
            .http
            .post(format!("{}/todos", self.base_url))
            .json(&json!({ "title": title }))
            .send()
            .await?;
        let todo: TodoResponse = check(response).await?.json().await?;
        Ok(todo.into())
    }

    /// Sets the completion flag and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or non-success status.
    pub async fn set_complete(&self, id: i64, is_complete: bool) -> Result<Todo, ClientError> {
        let response = self
            .http
            .patch(format!("{}/todos/{id}", self.base_url))
            .json(&json!({ "isComplete": is_complete }))
            .send()
            .await?;
        let todo: TodoResponse = check(response).await?.json().await?;
        Ok(todo.into())
    }

    /// Deletes a todo; the 204 success carries no body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or non-success status.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/todos/{id}", self.base_url))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Queries the liveness endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` when the server reports unhealthy or is
    /// unreachable.
    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Passes through success responses and turns everything else into the
/// failure's message text.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ApiError>()
        .await
        .ok()
        .map(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| failure_for(status));

    Err(ClientError::Api(message))
}

fn failure_for(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{GENERIC_FAILURE}: {reason}"),
        None => GENERIC_FAILURE.to_string(),
    }
}
