//! Accumulated answers of a form session

use super::field::AnswerValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Question id → answer value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.0.insert(id.into(), value);
    }

    pub fn remove(&mut self, id: &str) -> Option<AnswerValue> {
        self.0.remove(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    /// Text of a text/email/single-choice answer, empty if unset
    pub fn text(&self, id: &str) -> &str {
        self.get(id).map(AnswerValue::as_text).unwrap_or("")
    }

    pub fn level(&self, id: &str) -> Option<u8> {
        self.get(id).and_then(AnswerValue::as_level)
    }

    /// Members of a multi-choice answer, in sorted order
    pub fn choices(&self, id: &str) -> Vec<&str> {
        self.get(id)
            .and_then(AnswerValue::as_choices)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn test_serializes_as_plain_object() {
        let mut answers = AnswerSet::new();
        answers.insert("audio_level", AnswerValue::Level(2));
        answers.insert("email", AnswerValue::Text("a@b.c".into()));

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"audio_level":{"level":2},"email":{"text":"a@b.c"}}"#);
    }

    #[test]
    fn test_accessors() {
        let tracks: BTreeSet<String> = ["tone".to_string(), "chime".to_string()].into();
        let answers: AnswerSet = [
            ("sound_type".to_string(), AnswerValue::Choice("beep".into())),
            ("sound_tracks".to_string(), AnswerValue::Choices(tracks)),
            ("audio_level".to_string(), AnswerValue::Level(1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(answers.text("sound_type"), "beep");
        assert_eq!(answers.text("missing"), "");
        assert_eq!(answers.level("audio_level"), Some(1));
        assert_eq!(answers.level("sound_type"), None);
        assert_eq!(answers.choices("sound_tracks"), vec!["chime", "tone"]);
        assert!(answers.choices("audio_level").is_empty());
    }

    #[test]
    fn test_deserialize_rejects_untagged_values() {
        let result: Result<AnswerSet, _> = serde_json::from_str(r#"{"email":"a@b.c"}"#);
        assert!(result.is_err());
    }
}
