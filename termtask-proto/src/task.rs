//! The task entity and its JSON representation.
//!
//! Defines [`Task`] as it travels over the wire. The backend the original
//! service runs on stores the completed flag in an integer column, so list
//! and mutation responses may carry `0`/`1` where a JSON bool is expected;
//! deserialization normalizes either encoding to a strict Rust `bool`.

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum allowed task title length in code points.
pub const MAX_TASK_TITLE_LENGTH: usize = 100;

/// Unique identifier for a task within a list.
///
/// Server-assigned when a task is created against the live API;
/// client-assigned (from a counter above the sample-id range) when created
/// against the offline sample store. Ids are never reused after deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a `TaskId` from a raw integer value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the list.
    pub id: TaskId,
    /// Display text. Non-empty, at most [`MAX_TASK_TITLE_LENGTH`] code
    /// points, immutable after creation.
    pub title: String,
    /// Completion flag. Accepts `true`/`false` as well as `0`/`1` on the
    /// wire; always serialized as a JSON bool.
    #[serde(deserialize_with = "completed_flag")]
    pub completed: bool,
}

impl Task {
    /// Creates a task with the given id and title, not completed.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Errors produced by [`validate_title`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TitleError {
    /// Title is empty or whitespace-only.
    #[error("task title cannot be empty")]
    Empty,
    /// Title exceeds the maximum length.
    #[error("task title too long (max {MAX_TASK_TITLE_LENGTH} characters)")]
    TooLong,
}

/// Validates a task title at creation time.
///
/// A title is valid when it contains at least one non-whitespace character
/// and no more than [`MAX_TASK_TITLE_LENGTH`] code points.
///
/// # Errors
///
/// Returns [`TitleError::Empty`] for empty or whitespace-only input, and
/// [`TitleError::TooLong`] when the input exceeds the maximum length.
pub fn validate_title(title: &str) -> Result<(), TitleError> {
    if title.trim().is_empty() {
        return Err(TitleError::Empty);
    }
    if title.chars().count() > MAX_TASK_TITLE_LENGTH {
        return Err(TitleError::TooLong);
    }
    Ok(())
}

/// Deserializes a completed flag from either a JSON bool or an integer.
///
/// Integer zero is `false`; any other integer is `true`.
fn completed_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}
