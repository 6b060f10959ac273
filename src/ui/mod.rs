//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod settings;
mod splash;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if let (View::Splash, Some(splash_state)) = (&app.state.current_view, &app.splash_state) {
        splash::draw(frame, area, splash_state);
        return;
    }

    let main_area = layout::create_layout(area);

    match &app.state.current_view {
        View::Splash => {}
        View::Onboarding => forms::draw_onboarding(frame, main_area, app),
        View::Submitted => {
            forms::draw_onboarding(frame, main_area, app);
            components::render_success_dialog(frame);
        }
        View::Settings => settings::draw(frame, main_area, app),
    }

    if let Some(pending) = &app.state.pending_reset {
        components::render_reset_dialog(frame, pending);
    }

    layout::draw_status_bar(frame, app);
}
