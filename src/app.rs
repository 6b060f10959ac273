//! Application state and core logic

use crate::config::AppConfig;
use crate::error::SubmitError;
use crate::state::{
    Advance, AnswerValue, AppState, FormController, InputKind, Lifecycle, PendingReset,
    Questionnaire, SettingsState, SplashState, View,
};
use crate::store::{FileStorage, PreferencesStore};
use crate::submit::{send_with_timeout, SimulatedSubmitter, SubmissionReceipt};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;

type SubmissionResult = Result<SubmissionReceipt, SubmitError>;

const SETTINGS_SAVED: &str = "Settings saved";

/// Fallback storage directory when the platform has no data dir
const FALLBACK_DATA_DIR: &str = ".eareye";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Onboarding session for the current pass through the form
    pub form: FormController,
    /// Completion record, loaded once at startup
    pub store: PreferencesStore<FileStorage>,
    /// Highlighted option on choice questions
    pub option_cursor: usize,
    /// Landing screen animation state
    pub splash_state: Option<SplashState>,
    config: AppConfig,
    questionnaire: Arc<Questionnaire>,
    submitter: Arc<SimulatedSubmitter>,
    /// Result of the in-flight submission, if any
    pending_submission: Option<oneshot::Receiver<SubmissionResult>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance and load the completion record
    pub fn new(config: AppConfig) -> Result<Self> {
        let data_dir = config
            .data_dir()
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR));
        let questionnaire = Arc::new(Questionnaire::eareye());
        let mut store =
            PreferencesStore::new(FileStorage::open_in(&data_dir), Arc::clone(&questionnaire));
        store.load();
        tracing::debug!(
            "Preferences in {} are {:?}",
            store.storage().path().display(),
            store.state()
        );

        let submitter = Arc::new(SimulatedSubmitter::new(
            config.submit_delay(),
            config.simulate_failure(),
        ));

        Ok(Self {
            state: AppState::default(),
            form: FormController::new(Arc::clone(&questionnaire)),
            store,
            option_cursor: 0,
            splash_state: Some(SplashState::new()),
            config,
            questionnaire,
            submitter,
            pending_submission: None,
            quit: false,
        })
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether keystrokes go into a text answer
    pub fn is_typing(&self) -> bool {
        self.state.current_view == View::Onboarding
            && self.form.current_question().kind.is_text_entry()
    }

    /// Advance time-driven state: splash animation, submission result, success delay
    pub fn tick(&mut self, terminal_height: u16) {
        if let Some(ref mut splash) = self.splash_state {
            splash.update(terminal_height);
            if splash.is_complete() {
                self.leave_splash();
            }
        }

        self.poll_submission();

        if let Some(shown_at) = self.state.submitted_at {
            if shown_at.elapsed() >= self.config.success_display() {
                self.finish_session();
            }
        }
    }

    /// Handle a key press for the current view
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.pending_reset.is_some() {
            self.handle_reset_dialog_key(key);
            return Ok(());
        }

        self.state.status_message = None;

        match self.state.current_view {
            View::Splash => {
                if let Some(ref mut splash) = self.splash_state {
                    splash.skip();
                }
                self.leave_splash();
            }
            View::Onboarding => self.handle_onboarding_key(key),
            View::Submitted => {
                if key.code == KeyCode::Enter {
                    self.finish_session();
                }
            }
            View::Settings => self.handle_settings_key(key),
        }
        Ok(())
    }

    fn leave_splash(&mut self) {
        self.splash_state = None;
        if self.store.is_completed() {
            self.enter_settings();
        } else {
            self.state.current_view = View::Onboarding;
        }
    }

    fn enter_settings(&mut self) {
        let answers = self.store.answers().cloned().unwrap_or_default();
        self.state.settings = SettingsState::from_answers(&answers);
        self.state.current_view = AppState::route_for(self.store.is_completed());
        if let Some(summary) = self.store.observe() {
            tracing::info!("{summary}");
        }
    }

    /// Discard the finished form session and move on
    fn finish_session(&mut self) {
        self.state.submitted_at = None;
        self.form = FormController::new(Arc::clone(&self.questionnaire));
        self.option_cursor = 0;
        self.enter_settings();
    }

    fn handle_onboarding_key(&mut self, key: KeyEvent) {
        if self.form.lifecycle() == Lifecycle::Submitting {
            return;
        }

        match key.code {
            KeyCode::Enter => self.advance(),
            KeyCode::Esc => {
                if self.form.retreat().is_ok() {
                    self.option_cursor = 0;
                }
            }
            KeyCode::Char('q') if !self.is_typing() => self.quit = true,
            KeyCode::Up => self.move_option_cursor(false),
            KeyCode::Down => self.move_option_cursor(true),
            _ => self.edit_current_answer(key),
        }
    }

    fn advance(&mut self) {
        match self.form.advance() {
            Advance::Moved(position) => {
                tracing::debug!("Moved to question {}", position + 1);
                self.option_cursor = 0;
            }
            Advance::Invalid(err) => tracing::debug!("Step rejected: {err}"),
            Advance::Submit(snapshot) => self.spawn_submission(snapshot),
            Advance::Ignored => {}
        }
    }

    /// Run the submission on a task so the view keeps drawing the submitting state
    fn spawn_submission(&mut self, snapshot: crate::state::AnswerSet) {
        let (tx, rx) = oneshot::channel();
        let submitter = Arc::clone(&self.submitter);
        let timeout = self.config.submit_timeout();
        tokio::spawn(async move {
            let result = send_with_timeout(submitter.as_ref(), &snapshot, timeout).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(result);
        });
        self.pending_submission = Some(rx);
    }

    fn poll_submission(&mut self) {
        let Some(rx) = self.pending_submission.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(SubmitError::Rejected(
                "submission task ended without a result".to_string(),
            )),
        };
        self.pending_submission = None;

        if self.form.finish_submit(result, &mut self.store) == Lifecycle::Succeeded {
            self.state.current_view = View::Submitted;
            self.state.submitted_at = Some(Instant::now());
        }
    }

    fn option_count(&self) -> usize {
        self.form.current_question().kind.options().len()
    }

    fn move_option_cursor(&mut self, down: bool) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        self.option_cursor = if down {
            (self.option_cursor + 1) % count
        } else {
            (self.option_cursor + count - 1) % count
        };
    }

    /// Turn a key into a new value for the current question
    fn edit_current_answer(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        let question = self.form.current_question();
        let current = self.form.current_answer();

        let value = match (&question.kind, key.code) {
            (InputKind::Text { .. } | InputKind::Email { .. }, KeyCode::Char(c)) => {
                let mut text = current.map(|v| v.as_text().to_string()).unwrap_or_default();
                text.push(c);
                Some(AnswerValue::Text(text))
            }
            (InputKind::Text { .. } | InputKind::Email { .. }, KeyCode::Backspace) => {
                let mut text = current.map(|v| v.as_text().to_string()).unwrap_or_default();
                text.pop();
                Some(AnswerValue::Text(text))
            }
            (InputKind::SingleChoice(options), KeyCode::Char(' ')) => options
                .get(self.option_cursor)
                .map(|o| AnswerValue::Choice(o.value.clone())),
            (InputKind::MultiChoice(options), KeyCode::Char(' ')) => {
                options.get(self.option_cursor).map(|o| {
                    let mut set = current
                        .and_then(AnswerValue::as_choices)
                        .cloned()
                        .unwrap_or_else(BTreeSet::new);
                    if !set.remove(&o.value) {
                        set.insert(o.value.clone());
                    }
                    AnswerValue::Choices(set)
                })
            }
            (InputKind::Range { min, max, .. }, KeyCode::Left | KeyCode::Right) => {
                let level = match (current.and_then(AnswerValue::as_level), key.code) {
                    (None, _) => *min,
                    (Some(level), KeyCode::Right) => level.saturating_add(1).min(*max),
                    (Some(level), _) => level.saturating_sub(1).max(*min),
                };
                Some(AnswerValue::Level(level))
            }
            _ => None,
        };

        if let Some(value) = value {
            let id = question.id.clone();
            if let Err(e) = self.form.answer(&id, value) {
                tracing::debug!("Answer not stored: {e}");
            }
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        let settings = &mut self.state.settings;
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => settings.switch_tab(),
            KeyCode::Up => settings.prev_row(),
            KeyCode::Down => settings.next_row(),
            KeyCode::Left => settings.adjust(false),
            KeyCode::Right => settings.adjust(true),
            KeyCode::Char('s') => self.save_settings(),
            KeyCode::Char('r') => self.state.pending_reset = Some(PendingReset::default()),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Record the dashboard adjustments and confirm in the status bar
    fn save_settings(&mut self) {
        tracing::info!("Saving settings: {}", self.state.settings);
        self.state.status_message = Some(SETTINGS_SAVED.to_string());
    }

    fn handle_reset_dialog_key(&mut self, key: KeyEvent) {
        let Some(ref mut pending) = self.state.pending_reset else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                pending.selected_option = !pending.selected_option;
            }
            KeyCode::Enter => {
                let confirmed = pending.selected_option;
                self.state.pending_reset = None;
                if confirmed {
                    self.reset_onboarding();
                }
            }
            KeyCode::Esc => self.state.pending_reset = None,
            _ => {}
        }
    }

    /// Forget the stored preferences and start the form again
    fn reset_onboarding(&mut self) {
        if let Err(e) = self.store.reset() {
            tracing::warn!("Failed to reset preferences: {e}");
            self.state.status_message = Some(format!("Reset failed: {e}"));
            return;
        }
        self.form = FormController::new(Arc::clone(&self.questionnaire));
        self.option_cursor = 0;
        self.state.settings = SettingsState::default();
        self.state.current_view = View::Onboarding;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_config(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            data_dir: Some(dir.to_path_buf()),
            submit_delay_ms: Some(0),
            success_display_ms: Some(0),
            ..Default::default()
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    /// Drive the whole questionnaire from the keyboard, ending on submission
    fn answer_everything(app: &mut App) {
        type_text(app, "cars");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Char(' '))).unwrap(); // ignore cars
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Char(' '))).unwrap(); // whistle
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap(); // low
        app.handle_key(key(KeyCode::Right)).unwrap(); // medium
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Left)).unwrap(); // minimal
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Char(' '))).unwrap(); // tone
        app.handle_key(key(KeyCode::Enter)).unwrap();
        type_text(app, "me@example.com");
        app.handle_key(key(KeyCode::Enter)).unwrap();
    }

    async fn wait_for_submission(app: &mut App) {
        for _ in 0..200 {
            app.tick(24);
            if app.pending_submission.is_none() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("submission did not finish");
    }

    #[test]
    fn test_any_key_leaves_splash_for_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(test_config(dir.path())).unwrap();
        assert!(app.in_splash());

        app.handle_key(key(KeyCode::Char('x'))).unwrap();

        assert_eq!(app.state.current_view, View::Onboarding);
        assert!(app.splash_state.is_none());
    }

    #[test]
    fn test_q_types_into_text_questions() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(test_config(dir.path())).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        type_text(&mut app, "quiet");

        assert!(!app.should_quit());
        assert_eq!(app.form.answers().text("feedback_objects"), "quiet");
    }

    #[test]
    fn test_required_choice_blocks_enter() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(test_config(dir.path())).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap(); // leave splash
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.form.position(), 2);
        assert!(app.form.error().is_some());
    }

    #[tokio::test]
    async fn test_full_onboarding_persists_and_routes_to_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(test_config(dir.path())).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap(); // leave splash

        answer_everything(&mut app);
        assert_eq!(app.form.lifecycle(), Lifecycle::Submitting);
        wait_for_submission(&mut app).await;

        assert!(app.store.is_completed());
        let answers = app.store.answers().unwrap().clone();
        assert_eq!(answers.text("sound_type"), "whistle");
        assert_eq!(answers.level("audio_level"), Some(1));
        assert_eq!(answers.choices("ignore_objects"), vec!["cars"]);

        app.tick(24);
        assert_eq!(app.state.current_view, View::Settings);
        assert_eq!(app.state.settings.volume, 75);
        assert_eq!(app.state.settings.frequency, 25);

        let mut reopened = App::new(test_config(dir.path())).unwrap();
        assert!(reopened.store.is_completed());
        reopened.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(reopened.state.current_view, View::Settings);
    }

    #[tokio::test]
    async fn test_failed_submission_stays_on_form() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            simulate_failure: Some(true),
            ..test_config(dir.path())
        };
        let mut app = App::new(config).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        answer_everything(&mut app);
        wait_for_submission(&mut app).await;

        assert_eq!(app.form.lifecycle(), Lifecycle::Failed);
        assert_eq!(app.state.current_view, View::Onboarding);
        assert_eq!(app.form.answers().text("email"), "me@example.com");
        assert!(!app.store.is_completed());
    }

    #[tokio::test]
    async fn test_reset_from_settings_returns_to_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(test_config(dir.path())).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        answer_everything(&mut app);
        wait_for_submission(&mut app).await;
        app.tick(24);

        app.handle_key(key(KeyCode::Char('r'))).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.state.current_view, View::Onboarding);
        assert!(!app.store.is_completed());
        assert_eq!(app.form.position(), 0);
        assert!(!App::new(test_config(dir.path())).unwrap().store.is_completed());
    }

    #[tokio::test]
    async fn test_save_settings_confirms_in_status_bar() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(test_config(dir.path())).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        answer_everything(&mut app);
        wait_for_submission(&mut app).await;
        app.tick(24);

        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Char('s'))).unwrap();

        assert_eq!(app.state.status_message.as_deref(), Some(SETTINGS_SAVED));
        assert_eq!(app.state.settings.volume, 80);
        assert_eq!(app.state.current_view, View::Settings);

        app.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.state.status_message, None);
    }

    #[tokio::test]
    async fn test_reset_dialog_cancel_keeps_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(test_config(dir.path())).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        answer_everything(&mut app);
        wait_for_submission(&mut app).await;
        app.tick(24);

        app.handle_key(key(KeyCode::Char('r'))).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.state.current_view, View::Settings);
        assert!(app.store.is_completed());
    }
}
