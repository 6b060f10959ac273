//! Preferences store: whether onboarding is done and what was chosen
//!
//! The completion record lives in two storage entries: the JSON answer set
//! under [`FORM_DATA_KEY`] and the string `"true"` under [`COMPLETED_KEY`].

use super::storage::Storage;
use crate::error::StoreError;
use crate::state::{AnswerSet, Questionnaire};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub const FORM_DATA_KEY: &str = "eareye_form_data";
pub const COMPLETED_KEY: &str = "eareye_form_completed";

const LEVEL_NAMES: [&str; 3] = ["Low", "Medium", "High"];

/// Lifecycle of the store itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreState {
    #[default]
    Uninitialized,
    Loading,
    NotCompleted,
    Completed,
}

/// Single source of truth for onboarding completion
#[derive(Debug)]
pub struct PreferencesStore<K: Storage> {
    storage: K,
    questionnaire: Arc<Questionnaire>,
    state: StoreState,
    answers: Option<AnswerSet>,
}

impl<K: Storage> PreferencesStore<K> {
    pub fn new(storage: K, questionnaire: Arc<Questionnaire>) -> Self {
        Self {
            storage,
            questionnaire,
            state: StoreState::Uninitialized,
            answers: None,
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == StoreState::Completed
    }

    pub fn answers(&self) -> Option<&AnswerSet> {
        self.answers.as_ref()
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Read the completion record from storage.
    ///
    /// A corrupt record is treated as absent and removed from storage.
    pub fn load(&mut self) -> StoreState {
        self.state = StoreState::Loading;
        self.answers = None;

        let data = self.storage.get(FORM_DATA_KEY);
        let completed = self.storage.get(COMPLETED_KEY).as_deref() == Some("true");

        let Some(data) = data.filter(|_| completed) else {
            tracing::debug!("No completed onboarding record");
            self.state = StoreState::NotCompleted;
            return self.state;
        };

        match self.parse_record(&data) {
            Ok(answers) => {
                tracing::info!("Loaded onboarding record with {} answers", answers.len());
                self.answers = Some(answers);
                self.state = StoreState::Completed;
            }
            Err(reason) => {
                tracing::warn!("Discarding corrupt onboarding record: {reason}");
                if let Err(e) = self.clear_storage() {
                    tracing::warn!("Failed to clear corrupt onboarding record: {e}");
                }
                self.state = StoreState::NotCompleted;
            }
        }
        self.state
    }

    /// Mark onboarding done with `answers` and persist the record
    pub fn complete(&mut self, answers: AnswerSet) -> Result<(), StoreError> {
        if matches!(self.state, StoreState::Uninitialized | StoreState::Loading) {
            return Err(StoreError::NotLoaded);
        }
        self.questionnaire
            .check_complete(&answers)
            .map_err(StoreError::Incomplete)?;

        let json = serde_json::to_string(&answers).map_err(crate::error::StorageError::from)?;
        self.storage.set(FORM_DATA_KEY, &json)?;
        self.storage.set(COMPLETED_KEY, "true")?;

        self.answers = Some(answers);
        self.state = StoreState::Completed;
        tracing::info!("Onboarding completed");
        if let Some(summary) = self.observe() {
            tracing::info!("{summary}");
        }
        Ok(())
    }

    /// Forget the answers in memory and in storage
    ///
    /// Memory is only cleared once storage is, so a failed write leaves the
    /// store still completed.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.clear_storage()?;
        self.answers = None;
        self.state = StoreState::NotCompleted;
        tracing::info!("Onboarding record reset");
        Ok(())
    }

    /// Summarize the current answers without changing anything
    pub fn observe(&self) -> Option<ChoicesSummary> {
        self.answers
            .as_ref()
            .map(|answers| ChoicesSummary::from_answers(answers, Utc::now()))
    }

    fn parse_record(&self, data: &str) -> Result<AnswerSet, String> {
        let answers: AnswerSet = serde_json::from_str(data).map_err(|e| e.to_string())?;
        self.questionnaire.check_complete(&answers)?;
        Ok(answers)
    }

    fn clear_storage(&mut self) -> Result<(), StoreError> {
        self.storage.remove_all(&[COMPLETED_KEY, FORM_DATA_KEY])?;
        Ok(())
    }
}

/// Human-readable snapshot of the stored choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicesSummary {
    pub audio_level: Option<&'static str>,
    pub frequency_level: Option<&'static str>,
    pub sound_type: String,
    pub no_feedback_from: Vec<String>,
    pub sound_tracks: Vec<String>,
    pub taken_at: DateTime<Utc>,
}

impl ChoicesSummary {
    pub fn from_answers(answers: &AnswerSet, taken_at: DateTime<Utc>) -> Self {
        let level_name = |id: &str| {
            answers
                .level(id)
                .and_then(|level| LEVEL_NAMES.get(level as usize).copied())
        };
        let owned = |id: &str| {
            answers
                .choices(id)
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        Self {
            audio_level: level_name("audio_level"),
            frequency_level: level_name("feedback_frequency"),
            sound_type: answers.text("sound_type").to_string(),
            no_feedback_from: owned("ignore_objects"),
            sound_tracks: owned("sound_tracks"),
            taken_at,
        }
    }
}

impl std::fmt::Display for ChoicesSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ignored = if self.no_feedback_from.is_empty() {
            "None selected".to_string()
        } else {
            self.no_feedback_from.join(", ")
        };
        write!(
            f,
            "EarEye choices: audio level={}, frequency level={}, sound type={}, \
             no feedback from={}, sound tracks=[{}], at {}",
            self.audio_level.unwrap_or("-"),
            self.frequency_level.unwrap_or("-"),
            self.sound_type,
            ignored,
            self.sound_tracks.join(", "),
            self.taken_at.to_rfc3339(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{complete_answers, AnswerValue};
    use crate::store::{FileStorage, MemoryStorage};
    use std::collections::BTreeSet;

    fn questionnaire() -> Arc<Questionnaire> {
        Arc::new(Questionnaire::eareye())
    }

    fn memory_store() -> PreferencesStore<MemoryStorage> {
        PreferencesStore::new(MemoryStorage::default(), questionnaire())
    }

    fn store_with(entries: &[(&str, &str)]) -> PreferencesStore<MemoryStorage> {
        let mut storage = MemoryStorage::default();
        for (key, value) in entries {
            storage.set(key, value).unwrap();
        }
        PreferencesStore::new(storage, questionnaire())
    }

    /// Every kind of answer filled in
    fn rich_answers() -> AnswerSet {
        let mut answers = complete_answers();
        answers.insert("feedback_objects", AnswerValue::Text("cars, dogs".into()));
        answers.insert(
            "ignore_objects",
            AnswerValue::Choices(BTreeSet::from(["static".to_string(), "animals".to_string()])),
        );
        answers
    }

    mod load {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_uninitialized() {
            assert_eq!(memory_store().state(), StoreState::Uninitialized);
        }

        #[test]
        fn test_empty_storage_is_not_completed() {
            let mut store = memory_store();
            assert_eq!(store.load(), StoreState::NotCompleted);
            assert_eq!(store.answers(), None);
        }

        #[test]
        fn test_data_without_flag_is_not_completed() {
            let json = serde_json::to_string(&complete_answers()).unwrap();
            let mut store = store_with(&[(FORM_DATA_KEY, &json)]);
            assert_eq!(store.load(), StoreState::NotCompleted);
            // Left alone: it is not corrupt, just unfinished
            assert!(store.storage().get(FORM_DATA_KEY).is_some());
        }

        #[test]
        fn test_malformed_json_is_cleared() {
            let mut store = store_with(&[(FORM_DATA_KEY, "{oops"), (COMPLETED_KEY, "true")]);
            assert_eq!(store.load(), StoreState::NotCompleted);
            assert_eq!(store.answers(), None);
            assert_eq!(store.storage().get(FORM_DATA_KEY), None);
            assert_eq!(store.storage().get(COMPLETED_KEY), None);
        }

        #[test]
        fn test_incomplete_record_is_cleared() {
            let mut answers = complete_answers();
            answers.remove("email");
            let json = serde_json::to_string(&answers).unwrap();
            let mut store = store_with(&[(FORM_DATA_KEY, &json), (COMPLETED_KEY, "true")]);

            assert_eq!(store.load(), StoreState::NotCompleted);
            assert_eq!(store.storage().get(FORM_DATA_KEY), None);
        }

        #[test]
        fn test_valid_record_is_completed() {
            let json = serde_json::to_string(&complete_answers()).unwrap();
            let mut store = store_with(&[(FORM_DATA_KEY, &json), (COMPLETED_KEY, "true")]);
            assert_eq!(store.load(), StoreState::Completed);
            assert_eq!(store.answers(), Some(&complete_answers()));
        }
    }

    mod complete {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_marks_completed_and_persists() {
            let mut store = memory_store();
            store.load();
            store.complete(complete_answers()).unwrap();

            assert!(store.is_completed());
            assert_eq!(store.storage().get(COMPLETED_KEY), Some("true".to_string()));
            assert!(store.storage().get(FORM_DATA_KEY).is_some());
        }

        #[test]
        fn test_is_idempotent() {
            let mut store = memory_store();
            store.load();
            store.complete(complete_answers()).unwrap();
            let data = store.storage().get(FORM_DATA_KEY);
            store.complete(complete_answers()).unwrap();

            assert_eq!(store.state(), StoreState::Completed);
            assert_eq!(store.answers(), Some(&complete_answers()));
            assert_eq!(store.storage().get(FORM_DATA_KEY), data);
        }

        #[test]
        fn test_rejects_incomplete_answers() {
            let mut store = memory_store();
            store.load();
            let result = store.complete(AnswerSet::new());
            assert!(matches!(result, Err(StoreError::Incomplete(_))));
            assert!(!store.is_completed());
            assert_eq!(store.storage().get(COMPLETED_KEY), None);
        }

        #[test]
        fn test_requires_load_first() {
            let mut store = memory_store();
            let result = store.complete(complete_answers());
            assert!(matches!(result, Err(StoreError::NotLoaded)));
            assert_eq!(store.state(), StoreState::Uninitialized);
            assert_eq!(store.storage().get(COMPLETED_KEY), None);
        }

        #[test]
        fn test_round_trip_through_file() {
            let dir = tempfile::tempdir().unwrap();
            let answers = rich_answers();

            let mut store = PreferencesStore::new(FileStorage::open_in(dir.path()), questionnaire());
            store.load();
            store.complete(answers.clone()).unwrap();

            let mut reloaded =
                PreferencesStore::new(FileStorage::open_in(dir.path()), questionnaire());
            assert_eq!(reloaded.load(), StoreState::Completed);
            assert_eq!(reloaded.answers(), Some(&answers));
        }
    }

    mod reset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reset_then_load_is_not_completed() {
            let mut store = memory_store();
            store.load();
            store.complete(complete_answers()).unwrap();

            store.reset().unwrap();
            assert_eq!(store.state(), StoreState::NotCompleted);

            assert_eq!(store.load(), StoreState::NotCompleted);
            assert_eq!(store.answers(), None);
        }

        #[test]
        fn test_failed_reset_keeps_record() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = PreferencesStore::new(FileStorage::open_in(dir.path()), questionnaire());
            store.load();
            store.complete(complete_answers()).unwrap();

            // A directory in place of the file makes the write fail
            let path = store.storage().path().to_path_buf();
            std::fs::remove_file(&path).unwrap();
            std::fs::create_dir(&path).unwrap();

            assert!(matches!(store.reset(), Err(StoreError::Storage(_))));
            assert!(store.is_completed());
            assert_eq!(store.answers(), Some(&complete_answers()));
            assert_eq!(store.load(), StoreState::Completed);
        }

        #[test]
        fn test_reset_clears_file() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = PreferencesStore::new(FileStorage::open_in(dir.path()), questionnaire());
            store.load();
            store.complete(complete_answers()).unwrap();
            store.reset().unwrap();

            let mut reloaded =
                PreferencesStore::new(FileStorage::open_in(dir.path()), questionnaire());
            assert_eq!(reloaded.load(), StoreState::NotCompleted);
        }
    }

    mod observe {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_none_before_completion() {
            let mut store = memory_store();
            store.load();
            assert_eq!(store.observe(), None);
        }

        #[test]
        fn test_summary_does_not_mutate() {
            let mut store = memory_store();
            store.load();
            store.complete(rich_answers()).unwrap();

            let summary = store.observe().unwrap();

            assert_eq!(summary.audio_level, Some("High"));
            assert_eq!(summary.frequency_level, Some("Low"));
            assert_eq!(summary.sound_type, "beep");
            assert_eq!(summary.no_feedback_from, vec!["animals", "static"]);
            assert_eq!(summary.sound_tracks, vec!["chime"]);
            assert_eq!(store.answers(), Some(&rich_answers()));
            assert_eq!(store.state(), StoreState::Completed);
        }

        #[test]
        fn test_display_mentions_empty_ignore_list() {
            let summary = ChoicesSummary::from_answers(&complete_answers(), Utc::now());
            let text = summary.to_string();
            assert!(text.contains("no feedback from=None selected"));
            assert!(text.contains("audio level=High"));
        }
    }
}
