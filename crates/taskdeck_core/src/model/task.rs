//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, persistence and views.
//! - Own the "non-empty text" rule applied at creation and edit.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is never blank for tasks created through `Task::new`.
//! - Serialized shape is `{"id": string, "text": string, "completed": bool}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failure for task text input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    /// Text is empty or whitespace-only.
    #[error("task text must not be blank")]
    BlankText,
}

/// One unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable ID used as the sole lookup key.
    pub id: TaskId,
    /// User-supplied text, stored as given.
    pub text: String,
    /// Completion flag, `false` at creation.
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task with a generated stable ID.
    ///
    /// # Errors
    /// - Returns `BlankText` when `text` is empty or whitespace-only.
    pub fn new(text: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), text)
    }

    /// Creates an incomplete task with a caller-provided stable ID.
    ///
    /// Used by tests and import paths where identity already exists.
    ///
    /// # Errors
    /// - Returns `BlankText` when `text` is empty or whitespace-only.
    pub fn with_id(id: TaskId, text: impl Into<String>) -> Result<Self, TaskValidationError> {
        let text = text.into();
        validate_text(&text)?;
        Ok(Self {
            id,
            text,
            completed: false,
        })
    }
}

/// Checks the single validation rule for task text.
pub fn validate_text(text: &str) -> Result<(), TaskValidationError> {
    if is_blank(text) {
        return Err(TaskValidationError::BlankText);
    }
    Ok(())
}

/// Returns whether `text` would be rejected as task text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
