//! Stand-in endpoint: waits, then accepts (or rejects) every submission

use super::traits::{SubmissionReceipt, Submitter};
use crate::error::SubmitError;
use crate::state::AnswerSet;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    fail: bool,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration, fail: bool) -> Self {
        Self { delay, fail }
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, answers: &AnswerSet) -> Result<SubmissionReceipt, SubmitError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(SubmitError::Rejected("simulated failure".to_string()));
        }
        let receipt = SubmissionReceipt::new();
        tracing::debug!(
            "Simulated endpoint accepted {} answers as {}",
            answers.len(),
            receipt.id
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_secs(1), false);
        let started = tokio::time::Instant::now();
        let receipt = submitter.submit(&AnswerSet::new()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(!receipt.id.is_nil());
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_failure() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(5), true);
        let result = submitter.submit(&AnswerSet::new()).await;
        assert!(matches!(result, Err(SubmitError::Rejected(_))));
    }
}
