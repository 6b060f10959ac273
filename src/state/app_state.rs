//! Application state definitions

use super::settings_state::SettingsState;
use std::time::Instant;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Landing screen with logo animation
    #[default]
    Splash,
    /// Multi-step preferences form
    Onboarding,
    /// "Thank you" screen after a successful submission
    Submitted,
    /// Settings dashboard for users who finished onboarding
    Settings,
}

/// Pending "redo onboarding" confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingReset {
    /// true = Reset highlighted, false = Cancel highlighted
    pub selected_option: bool,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub settings: SettingsState,
    pub pending_reset: Option<PendingReset>,
    /// When the success screen was first shown
    pub submitted_at: Option<Instant>,
    /// One-line message for the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Route between the form and the dashboard from the completion flag
    pub fn route_for(completed: bool) -> View {
        if completed {
            View::Settings
        } else {
            View::Onboarding
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_splash() {
        assert_eq!(AppState::default().current_view, View::Splash);
    }

    #[test]
    fn test_route_for_completion_flag() {
        assert_eq!(AppState::route_for(true), View::Settings);
        assert_eq!(AppState::route_for(false), View::Onboarding);
    }

    #[test]
    fn test_pending_reset_defaults_to_cancel() {
        assert!(!PendingReset::default().selected_option);
    }
}
