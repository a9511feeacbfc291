//! Data Transfer Objects and request validation.
//!
//! Request bodies arrive as raw JSON values so a missing or wrongly
//! typed field is a 400 validation error, not an extractor rejection
//! with a different status. The response DTO applies the snake_case to
//! camelCase wire mapping (`is_complete` -> `isComplete`,
//! `created_at` -> `createdAt`) on every read path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ValidationError;
use crate::domain::{Todo, normalize_title};

/// Wire representation of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    /// Store-assigned identifier.
    pub id: i64,
    /// Trimmed title.
    pub title: String,
    /// Completion flag.
    pub is_complete: bool,
    /// Insertion timestamp (RFC 3339).
    pub created_at: DateTime<Utc>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            is_complete: todo.is_complete,
            created_at: todo.created_at,
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}

impl From<TodoResponse> for Todo {
    fn from(response: TodoResponse) -> Self {
        Self {
            id: response.id,
            title: response.title,
            is_complete: response.is_complete,
            created_at: response.created_at,
        }
    }
}

/// Health check response body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthResponse {
    /// True when the store round-trip succeeded.
    pub ok: bool,
}

/// Extracts and validates `title` from a create request body.
///
/// The field must be present, a JSON string, and non-empty after
/// trimming; the returned value is the trimmed title.
///
/// # Errors
///
/// Returns a `ValidationError` identifying `title` as required.
pub fn validate_title(body: &Value) -> Result<String, ValidationError> {
    body.get("title")
        .and_then(Value::as_str)
        .and_then(normalize_title)
        .ok_or_else(|| ValidationError::new("title is required"))
}

/// Extracts and validates `isComplete` from a toggle request body.
///
/// The field must be strictly a JSON boolean; `"true"` is rejected.
///
/// # Errors
///
/// Returns a `ValidationError` when the field is missing or not boolean.
pub fn validate_is_complete(body: &Value) -> Result<bool, ValidationError> {
    body.get("isComplete")
        .and_then(Value::as_bool)
        .ok_or_else(|| ValidationError::new("isComplete must be boolean"))
}

/// Parses a path identifier into a todo id.
///
/// The identifier must be a well-formed positive integer; negative and
/// zero ids are rejected here rather than forwarded to the store as a
/// guaranteed miss.
///
/// # Errors
///
/// Returns a `ValidationError` for anything that is not a positive
/// integer.
pub fn parse_todo_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| ValidationError::new("Invalid id parameter"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_validate_title_trims() {
        let body = json!({"title": "  Buy milk  "});
        assert_eq!(validate_title(&body).unwrap(), "Buy milk");
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"title": ""}))]
    #[case(json!({"title": "   "}))]
    #[case(json!({"title": 42}))]
    #[case(json!({"title": null}))]
    #[case(json!({"title": ["Buy milk"]}))]
    fn test_validate_title_rejects(#[case] body: Value) {
        let error = validate_title(&body).unwrap_err();
        assert_eq!(error.message, "title is required");
    }

    #[rstest]
    #[case(json!({"isComplete": true}), true)]
    #[case(json!({"isComplete": false}), false)]
    fn test_validate_is_complete_accepts_booleans(#[case] body: Value, #[case] expected: bool) {
        assert_eq!(validate_is_complete(&body).unwrap(), expected);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"isComplete": "true"}))]
    #[case(json!({"isComplete": 1}))]
    #[case(json!({"isComplete": null}))]
    fn test_validate_is_complete_rejects_non_booleans(#[case] body: Value) {
        let error = validate_is_complete(&body).unwrap_err();
        assert_eq!(error.message, "isComplete must be boolean");
    }

    #[rstest]
    fn test_parse_todo_id_accepts_positive_integers() {
        assert_eq!(parse_todo_id("17").unwrap(), 17);
        assert_eq!(parse_todo_id("1").unwrap(), 1);
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("-3")]
    #[case("0")]
    fn test_parse_todo_id_rejects(#[case] raw: &str) {
        let error = parse_todo_id(raw).unwrap_err();
        assert_eq!(error.message, "Invalid id parameter");
    }

    #[rstest]
    fn test_todo_response_wire_shape_is_camel_case() {
        let todo = Todo::new(
            7,
            "Buy milk".to_string(),
            false,
            "2024-01-01T00:00:00Z".parse().unwrap(),
        );
        let value = serde_json::to_value(TodoResponse::from(&todo)).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["title"], "Buy milk");
        assert_eq!(value["isComplete"], false);
        assert!(value["createdAt"].is_string());
        assert!(value.get("is_complete").is_none());
        assert!(value.get("created_at").is_none());
    }
}
