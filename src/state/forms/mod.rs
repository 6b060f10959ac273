//! Onboarding form domain layer
//!
//! Questions, answers and the step-by-step form session that collects them.

mod answers;
mod field;
mod form_state;
mod questionnaire;

pub use answers::AnswerSet;
pub use field::{AnswerValue, ChoiceOption, InputKind, Question};
pub use form_state::{Advance, FormController, Lifecycle};
pub use questionnaire::{Questionnaire, SOUND_TRACKS};

#[cfg(test)]
pub(crate) use questionnaire::complete_answers;
