//! Todo domain model.

use chrono::{DateTime, Utc};

/// A single tracked todo item.
///
/// `id` and `created_at` are assigned by the store at insertion and never
/// change afterwards. `title` is immutable after creation; `is_complete`
/// is the only mutable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    /// Store-assigned surrogate key, unique for the row's lifetime.
    pub id: i64,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Completion flag, false at creation.
    pub is_complete: bool,
    /// Store-assigned insertion timestamp.
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a todo with store-assigned values already known.
    #[must_use]
    pub const fn new(id: i64, title: String, is_complete: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            is_complete,
            created_at,
        }
    }
}

/// Normalizes a raw title to its stored form.
///
/// Returns the trimmed title, or `None` when nothing remains after
/// trimming. Both the API validation and the client's creation form go
/// through this, so "valid title" means the same thing on both sides.
#[must_use]
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
