//! Error types for onboarding, storage and submission

use std::time::Duration;

/// Rejected write or navigation on a form session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Form is submitting, input is locked")]
    Busy,

    #[error("Form session already finished")]
    Finished,

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Question {id} is not the current question ({current})")]
    NotCurrent { id: String, current: String },

    #[error("Invalid value for question {id}: {reason}")]
    InvalidValue { id: String, reason: String },

    #[error("Nothing to submit in state {0}")]
    NotSubmittable(String),
}

/// Answer to the current question does not pass its rule.
///
/// The message is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Submission endpoint failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Submission timed out after {0:?}")]
    Timeout(Duration),
}

/// Durable key-value storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Preferences store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Answer set is incomplete: {0}")]
    Incomplete(String),

    #[error("Store used before load()")]
    NotLoaded,
}
