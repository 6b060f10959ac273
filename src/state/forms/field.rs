//! Question and answer value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One selectable option of a choice question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// How a question is answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text { placeholder: String },
    Email { placeholder: String },
    SingleChoice(Vec<ChoiceOption>),
    MultiChoice(Vec<ChoiceOption>),
    /// Bounded integer scale, one label per step from `min` to `max`
    Range { min: u8, max: u8, labels: Vec<String> },
}

impl InputKind {
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            InputKind::SingleChoice(options) | InputKind::MultiChoice(options) => options,
            _ => &[],
        }
    }

    pub fn is_text_entry(&self) -> bool {
        matches!(self, InputKind::Text { .. } | InputKind::Email { .. })
    }

    fn has_option(&self, value: &str) -> bool {
        self.options().iter().any(|o| o.value == value)
    }
}

/// A single onboarding question. Immutable once the questionnaire is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: InputKind,
    pub required: bool,
}

impl Question {
    /// Create a free text question
    pub fn text(id: &str, prompt: &str, placeholder: &str, required: bool) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: InputKind::Text {
                placeholder: placeholder.to_string(),
            },
            required,
        }
    }

    /// Create an email question
    pub fn email(id: &str, prompt: &str, placeholder: &str, required: bool) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: InputKind::Email {
                placeholder: placeholder.to_string(),
            },
            required,
        }
    }

    /// Create a single-choice question from `(value, label)` pairs
    pub fn single_choice(id: &str, prompt: &str, options: &[(&str, &str)], required: bool) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: InputKind::SingleChoice(to_options(options)),
            required,
        }
    }

    /// Create a multi-choice question from `(value, label)` pairs
    pub fn multi_choice(id: &str, prompt: &str, options: &[(&str, &str)], required: bool) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: InputKind::MultiChoice(to_options(options)),
            required,
        }
    }

    /// Create a range question over `0..labels.len()`
    pub fn range(id: &str, prompt: &str, labels: &[&str], required: bool) -> Self {
        let max = labels.len().saturating_sub(1).min(u8::MAX as usize) as u8;
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: InputKind::Range {
                min: 0,
                max,
                labels: labels.iter().map(|l| l.to_string()).collect(),
            },
            required,
        }
    }

    /// Check that `value` has the shape this question accepts.
    ///
    /// Emptiness is not checked here; that happens when the step is validated.
    pub fn accepts(&self, value: &AnswerValue) -> Result<(), String> {
        match (&self.kind, value) {
            (InputKind::Text { .. } | InputKind::Email { .. }, AnswerValue::Text(_)) => Ok(()),
            (InputKind::SingleChoice(_), AnswerValue::Choice(choice)) => {
                if choice.is_empty() || self.kind.has_option(choice) {
                    Ok(())
                } else {
                    Err(format!("'{choice}' is not one of the options"))
                }
            }
            (InputKind::MultiChoice(_), AnswerValue::Choices(choices)) => {
                match choices.iter().find(|c| !self.kind.has_option(c)) {
                    Some(bad) => Err(format!("'{bad}' is not one of the options")),
                    None => Ok(()),
                }
            }
            (InputKind::Range { min, max, .. }, AnswerValue::Level(level)) => {
                if (*min..=*max).contains(level) {
                    Ok(())
                } else {
                    Err(format!("level {level} is outside {min}..={max}"))
                }
            }
            (kind, value) => Err(format!(
                "{} answer does not fit a {} question",
                value.kind_name(),
                kind_name(kind)
            )),
        }
    }

    /// Label for a stored level, if this is a range question
    pub fn level_label(&self, level: u8) -> Option<&str> {
        match &self.kind {
            InputKind::Range { min, labels, .. } => level
                .checked_sub(*min)
                .and_then(|i| labels.get(i as usize))
                .map(String::as_str),
            _ => None,
        }
    }
}

fn to_options(options: &[(&str, &str)]) -> Vec<ChoiceOption> {
    options
        .iter()
        .map(|(value, label)| ChoiceOption::new(value, label))
        .collect()
}

fn kind_name(kind: &InputKind) -> &'static str {
    match kind {
        InputKind::Text { .. } => "text",
        InputKind::Email { .. } => "email",
        InputKind::SingleChoice(_) => "single-choice",
        InputKind::MultiChoice(_) => "multi-choice",
        InputKind::Range { .. } => "range",
    }
}

/// Answer value; its shape follows the question's input kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    Text(String),
    Choice(String),
    Choices(BTreeSet<String>),
    Level(u8),
}

impl AnswerValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnswerValue::Text(_) => "text",
            AnswerValue::Choice(_) => "choice",
            AnswerValue::Choices(_) => "choices",
            AnswerValue::Level(_) => "level",
        }
    }

    /// Whether the value counts as unset for a required question
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s.is_empty(),
            AnswerValue::Choices(set) => set.is_empty(),
            AnswerValue::Level(_) => false,
        }
    }

    /// Get the text value (returns empty string for other shapes)
    pub fn as_text(&self) -> &str {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s,
            _ => "",
        }
    }

    pub fn as_level(&self) -> Option<u8> {
        match self {
            AnswerValue::Level(level) => Some(*level),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&BTreeSet<String>> {
        match self {
            AnswerValue::Choices(set) => Some(set),
            _ => None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s.clone(),
            AnswerValue::Choices(set) => set.iter().cloned().collect::<Vec<_>>().join(", "),
            AnswerValue::Level(level) => level.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sound_type() -> Question {
        Question::single_choice(
            "sound_type",
            "What kind of sound do you prefer?",
            &[("musical", "Musical"), ("beep", "Beep")],
            true,
        )
    }

    mod accepts {
        use super::*;

        #[test]
        fn test_text_accepts_text() {
            let q = Question::text("notes", "Notes", "", false);
            assert!(q.accepts(&AnswerValue::Text("anything".into())).is_ok());
        }

        #[test]
        fn test_email_rejects_level() {
            let q = Question::email("email", "Email", "you@example.com", true);
            let err = q.accepts(&AnswerValue::Level(1)).unwrap_err();
            assert!(err.contains("email"));
        }

        #[test]
        fn test_single_choice_rejects_unknown_option() {
            let err = sound_type()
                .accepts(&AnswerValue::Choice("trumpet".into()))
                .unwrap_err();
            assert!(err.contains("trumpet"));
        }

        #[test]
        fn test_single_choice_accepts_clearing() {
            assert!(sound_type().accepts(&AnswerValue::Choice(String::new())).is_ok());
        }

        #[test]
        fn test_multi_choice_checks_every_member() {
            let q = Question::multi_choice("tracks", "Tracks", &[("tone", "Tone")], true);
            let ok: BTreeSet<String> = ["tone".to_string()].into();
            let bad: BTreeSet<String> = ["tone".to_string(), "horn".to_string()].into();
            assert!(q.accepts(&AnswerValue::Choices(ok)).is_ok());
            assert!(q.accepts(&AnswerValue::Choices(bad)).is_err());
        }

        #[test]
        fn test_range_bounds() {
            let q = Question::range("volume", "Volume", &["Low", "Medium", "High"], true);
            assert!(q.accepts(&AnswerValue::Level(0)).is_ok());
            assert!(q.accepts(&AnswerValue::Level(2)).is_ok());
            assert!(q.accepts(&AnswerValue::Level(3)).is_err());
        }
    }

    mod answer_value {
        use super::*;

        #[test]
        fn test_is_empty() {
            assert!(AnswerValue::Text(String::new()).is_empty());
            assert!(!AnswerValue::Text("  ".into()).is_empty());
            assert!(AnswerValue::Choice(String::new()).is_empty());
            assert!(AnswerValue::Choices(BTreeSet::new()).is_empty());
            assert!(!AnswerValue::Level(0).is_empty());
        }

        #[test]
        fn test_serialized_shape_is_tagged() {
            let json = serde_json::to_string(&AnswerValue::Choice("beep".into())).unwrap();
            assert_eq!(json, r#"{"choice":"beep"}"#);
        }

        #[test]
        fn test_display_value_joins_choices() {
            let set: BTreeSet<String> = ["b".to_string(), "a".to_string()].into();
            assert_eq!(AnswerValue::Choices(set).display_value(), "a, b");
        }
    }

    #[test]
    fn test_level_label() {
        let q = Question::range("volume", "Volume", &["Low", "Medium", "High"], true);
        assert_eq!(q.level_label(1), Some("Medium"));
        assert_eq!(q.level_label(9), None);
        assert_eq!(sound_type().level_label(0), None);
    }
}
