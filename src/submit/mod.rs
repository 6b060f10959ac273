//! Submission endpoint for completed onboarding answers

mod simulated;
mod traits;

pub use simulated::SimulatedSubmitter;
pub use traits::{SubmissionReceipt, Submitter};

#[cfg(test)]
pub use traits::MockSubmitter;

use crate::error::SubmitError;
use crate::state::AnswerSet;
use std::time::Duration;

/// Send `answers`, failing with [`SubmitError::Timeout`] if the endpoint
/// does not answer within `timeout`
pub async fn send_with_timeout<S: Submitter + ?Sized>(
    submitter: &S,
    answers: &AnswerSet,
    timeout: Duration,
) -> Result<SubmissionReceipt, SubmitError> {
    match tokio::time::timeout(timeout, submitter.submit(answers)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Submission timed out after {timeout:?}");
            Err(SubmitError::Timeout(timeout))
        }
    }
}
