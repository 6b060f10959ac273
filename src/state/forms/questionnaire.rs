//! The ordered question sequence and per-question validation rules

use super::answers::AnswerSet;
use super::field::{AnswerValue, InputKind, Question};
use crate::error::ValidationError;

pub const SELECT_OPTION: &str = "Please select an option for this question.";
pub const SELECT_AT_LEAST_ONE: &str = "Please select at least one option for this question.";
pub const CHOOSE_LEVEL: &str = "Please choose a level for this question.";
pub const ENTER_VALUE: &str = "Please enter a value for this question.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Sound tracks offered during onboarding and on the settings dashboard
pub const SOUND_TRACKS: &[(&str, &str)] = &[
    ("tone", "Tone Sound"),
    ("chime", "Chime Sound"),
    ("click", "Click Sound"),
    ("beep", "Beep Sound"),
    ("musical", "Musical Sound"),
    ("nature", "Nature Sound"),
    ("voice_alert", "Voice Alert"),
    ("harmonic", "Harmonic Sound"),
];

/// Check one answer against its question's required flag and kind rule.
///
/// Pure: the caller decides what to do with the failure.
pub fn validate_answer(
    question: &Question,
    value: Option<&AnswerValue>,
) -> Result<(), ValidationError> {
    let unset = value.is_none_or(AnswerValue::is_empty);

    if question.required && unset {
        let message = match question.kind {
            InputKind::SingleChoice(_) => SELECT_OPTION,
            InputKind::MultiChoice(_) => SELECT_AT_LEAST_ONE,
            InputKind::Range { .. } => CHOOSE_LEVEL,
            InputKind::Text { .. } | InputKind::Email { .. } => ENTER_VALUE,
        };
        return Err(ValidationError::new(message));
    }

    if let (InputKind::Email { .. }, Some(value)) = (&question.kind, value) {
        let text = value.as_text();
        if !text.is_empty() && !text.contains('@') {
            return Err(ValidationError::new(INVALID_EMAIL));
        }
    }

    Ok(())
}

/// Ordered, immutable list of questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    /// Build from a non-empty list with unique ids
    pub fn new(questions: Vec<Question>) -> anyhow::Result<Self> {
        if questions.is_empty() {
            anyhow::bail!("Questionnaire needs at least one question");
        }
        for (i, q) in questions.iter().enumerate() {
            if questions[..i].iter().any(|prev| prev.id == q.id) {
                anyhow::bail!("Duplicate question id: {}", q.id);
            }
        }
        Ok(Self { questions })
    }

    /// The EarEye feedback preferences questionnaire
    pub fn eareye() -> Self {
        Self {
            questions: vec![
                Question::text(
                    "feedback_objects",
                    "What object types do you want feedback from?",
                    "e.g., cars, dogs, bins, people, bicycles",
                    false,
                ),
                Question::multi_choice(
                    "ignore_objects",
                    "What object types do you want to ignore?",
                    &[
                        ("cars", "Cars"),
                        ("people", "People"),
                        ("bicycles", "Bicycles"),
                        ("animals", "Animals"),
                        ("static", "Static objects"),
                    ],
                    false,
                ),
                Question::single_choice(
                    "sound_type",
                    "What kind of sound do you prefer?",
                    &[
                        ("musical", "Musical"),
                        ("whistle", "Whistle"),
                        ("beep", "Beep"),
                    ],
                    true,
                ),
                Question::range(
                    "audio_level",
                    "How loud should the feedback be?",
                    &["Low", "Medium", "High"],
                    true,
                ),
                Question::range(
                    "feedback_frequency",
                    "How often do you want sound feedback?",
                    &["Minimal", "Occasional", "Frequent"],
                    true,
                ),
                Question::multi_choice(
                    "sound_tracks",
                    "Which sound tracks do you like?",
                    SOUND_TRACKS,
                    true,
                ),
                Question::email(
                    "email",
                    "What's your email address?",
                    "your@email.com",
                    true,
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Check that every answer fits its question and every required one is set
    pub fn check_complete(&self, answers: &AnswerSet) -> Result<(), String> {
        for (id, value) in answers.iter() {
            let question = self
                .find(id)
                .ok_or_else(|| format!("unknown question {id}"))?;
            question
                .accepts(value)
                .map_err(|reason| format!("{id}: {reason}"))?;
        }
        for question in &self.questions {
            validate_answer(question, answers.get(&question.id))
                .map_err(|e| format!("{}: {}", question.id, e))?;
        }
        Ok(())
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::eareye()
    }
}

/// A fully valid answer set for the EarEye questionnaire
#[cfg(test)]
pub(crate) fn complete_answers() -> AnswerSet {
    use std::collections::BTreeSet;

    let mut answers = AnswerSet::new();
    answers.insert("sound_type", AnswerValue::Choice("beep".into()));
    answers.insert("audio_level", AnswerValue::Level(2));
    answers.insert("feedback_frequency", AnswerValue::Level(0));
    answers.insert(
        "sound_tracks",
        AnswerValue::Choices(BTreeSet::from(["chime".to_string()])),
    );
    answers.insert("email", AnswerValue::Text("me@example.com".into()));
    answers
}
