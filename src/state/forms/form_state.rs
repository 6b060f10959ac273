//! Multi-step form session: step sequencing, validation and submission lifecycle

use super::answers::AnswerSet;
use super::field::{AnswerValue, Question};
use super::questionnaire::{validate_answer, Questionnaire};
use crate::error::{FormError, SubmitError, ValidationError};
use crate::store::{PreferencesStore, Storage};
use crate::submit::{send_with_timeout, SubmissionReceipt, Submitter};
use std::sync::Arc;
use std::time::Duration;

pub const SUBMIT_FAILED: &str =
    "There was an error submitting your preferences. Please try again.";

/// Submission status of a form session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Outcome of [`FormController::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given position
    Moved(usize),
    /// Current answer failed validation; position unchanged
    Invalid(ValidationError),
    /// Last question passed; lifecycle is now `Submitting` and the
    /// snapshot must be sent, then handed to `finish_submit`
    Submit(AnswerSet),
    /// Ignored because the session is submitting or finished
    Ignored,
}

/// Position, answers and lifecycle of one pass through the questionnaire
#[derive(Debug, Clone)]
pub struct FormController {
    questionnaire: Arc<Questionnaire>,
    position: usize,
    answers: AnswerSet,
    lifecycle: Lifecycle,
    error: Option<String>,
}

impl FormController {
    pub fn new(questionnaire: Arc<Questionnaire>) -> Self {
        Self {
            questionnaire,
            position: 0,
            answers: AnswerSet::new(),
            lifecycle: Lifecycle::Idle,
            error: None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Message to show under the current question, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn current_question(&self) -> &Question {
        // Position stays inside 0..len and the questionnaire is never empty
        &self.questionnaire.questions()[self.position]
    }

    pub fn current_answer(&self) -> Option<&AnswerValue> {
        self.answers.get(&self.current_question().id)
    }

    pub fn is_first_step(&self) -> bool {
        self.position == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.position + 1 == self.questionnaire.len()
    }

    /// Input is locked while a submission is in flight or after success
    pub fn is_locked(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Submitting | Lifecycle::Succeeded)
    }

    /// (1-based step, total steps, rounded percent complete)
    pub fn progress(&self) -> (usize, usize, u16) {
        let step = self.position + 1;
        let total = self.questionnaire.len();
        let percent = ((step as f64 / total as f64) * 100.0).round() as u16;
        (step, total, percent)
    }

    /// Store `value` for the current question. Validation is deferred to `advance`.
    pub fn answer(&mut self, id: &str, value: AnswerValue) -> Result<(), FormError> {
        self.ensure_editable()?;

        let question = self
            .questionnaire
            .find(id)
            .ok_or_else(|| FormError::UnknownQuestion(id.to_string()))?;
        let current = self.current_question();
        if question.id != current.id {
            return Err(FormError::NotCurrent {
                id: id.to_string(),
                current: current.id.clone(),
            });
        }
        question
            .accepts(&value)
            .map_err(|reason| FormError::InvalidValue {
                id: id.to_string(),
                reason,
            })?;

        self.answers.insert(id, value);
        self.error = None;
        Ok(())
    }

    /// Check the current answer without touching state
    pub fn validate_current(&self) -> Result<(), ValidationError> {
        validate_answer(self.current_question(), self.current_answer())
    }

    /// Move forward one step, or start submission from the last step
    pub fn advance(&mut self) -> Advance {
        if self.is_locked() {
            tracing::debug!("advance ignored while {}", self.lifecycle);
            return Advance::Ignored;
        }

        if let Err(err) = self.validate_current() {
            self.error = Some(err.message.clone());
            return Advance::Invalid(err);
        }

        if self.is_last_step() {
            return match self.begin_submit() {
                Ok(snapshot) => Advance::Submit(snapshot),
                Err(_) => Advance::Ignored,
            };
        }

        self.position += 1;
        self.error = None;
        Advance::Moved(self.position)
    }

    /// Move back one step, floored at the first question
    pub fn retreat(&mut self) -> Result<usize, FormError> {
        if self.lifecycle == Lifecycle::Submitting {
            return Err(FormError::Busy);
        }
        if self.position > 0 {
            self.position -= 1;
            self.error = None;
        }
        Ok(self.position)
    }

    /// `Idle`/`Failed` → `Submitting`; returns the answers to send
    pub fn begin_submit(&mut self) -> Result<AnswerSet, FormError> {
        match self.lifecycle {
            Lifecycle::Idle | Lifecycle::Failed => {
                self.lifecycle = Lifecycle::Submitting;
                self.error = None;
                tracing::info!("Submitting {} answers", self.answers.len());
                Ok(self.answers.clone())
            }
            other => Err(FormError::NotSubmittable(other.to_string())),
        }
    }

    /// Apply the submission result. On success the answers go to the store.
    pub fn finish_submit<K: Storage>(
        &mut self,
        result: Result<SubmissionReceipt, SubmitError>,
        store: &mut PreferencesStore<K>,
    ) -> Lifecycle {
        if self.lifecycle != Lifecycle::Submitting {
            tracing::warn!("Submission result arrived in state {}", self.lifecycle);
            return self.lifecycle;
        }

        let outcome = result.map_err(|e| e.to_string()).and_then(|receipt| {
            store
                .complete(self.answers.clone())
                .map(|()| receipt)
                .map_err(|e| e.to_string())
        });

        match outcome {
            Ok(receipt) => {
                tracing::info!("Preferences submitted (receipt {})", receipt.id);
                self.lifecycle = Lifecycle::Succeeded;
                self.error = None;
            }
            Err(reason) => {
                tracing::warn!("Preferences submission failed: {reason}");
                self.lifecycle = Lifecycle::Failed;
                self.error = Some(SUBMIT_FAILED.to_string());
            }
        }
        self.lifecycle
    }

    /// Run the whole submission: begin, send with a bounded timeout, finish
    pub async fn submit<S, K>(
        &mut self,
        submitter: &S,
        store: &mut PreferencesStore<K>,
        timeout: Duration,
    ) -> Result<Lifecycle, FormError>
    where
        S: Submitter + ?Sized,
        K: Storage,
    {
        let snapshot = self.begin_submit()?;
        let result = send_with_timeout(submitter, &snapshot, timeout).await;
        Ok(self.finish_submit(result, store))
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        match self.lifecycle {
            Lifecycle::Submitting => Err(FormError::Busy),
            Lifecycle::Succeeded => Err(FormError::Finished),
            Lifecycle::Idle | Lifecycle::Failed => Ok(()),
        }
    }
}
