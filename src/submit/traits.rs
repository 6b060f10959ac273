//! Trait abstraction for the submission endpoint to enable mocking in tests

use crate::error::SubmitError;
use crate::state::AnswerSet;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Acknowledgement returned by a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Where completed answers are sent before they are stored locally
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit the answer set; success or failure, never partial
    async fn submit(&self, answers: &AnswerSet) -> Result<SubmissionReceipt, SubmitError>;
}
