//! Landing screen animation state

use std::time::{Duration, Instant};

/// Animation phase for the landing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    /// Static logo and tagline
    Display,
    /// Logo animating upward
    ScrollUp,
    /// Animation finished
    Complete,
}

/// Landing screen animation state
#[derive(Debug)]
pub struct SplashState {
    pub start_time: Instant,
    pub phase: SplashPhase,
    /// Current vertical offset (for scroll animation)
    pub scroll_offset: f32,
}

impl SplashState {
    /// How long the logo holds before scrolling away
    const DISPLAY_DURATION: Duration = Duration::from_millis(1500);
    const ANIMATION_DURATION: Duration = Duration::from_millis(700);

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase: SplashPhase::Display,
            scroll_offset: 0.0,
        }
    }

    /// Update animation state based on elapsed time
    pub fn update(&mut self, terminal_height: u16) {
        self.update_at(self.start_time.elapsed(), terminal_height);
    }

    fn update_at(&mut self, elapsed: Duration, terminal_height: u16) {
        if elapsed < Self::DISPLAY_DURATION {
            self.phase = SplashPhase::Display;
            self.scroll_offset = 0.0;
        } else if elapsed < Self::DISPLAY_DURATION + Self::ANIMATION_DURATION {
            self.phase = SplashPhase::ScrollUp;
            let animation_elapsed = elapsed - Self::DISPLAY_DURATION;
            let progress = animation_elapsed.as_secs_f32() / Self::ANIMATION_DURATION.as_secs_f32();
            // Cubic ease-out
            let eased = simple_easing::cubic_out(progress);
            self.scroll_offset = eased * (terminal_height as f32);
        } else {
            self.phase = SplashPhase::Complete;
        }
    }

    /// Skip to completion (user pressed a key)
    pub fn skip(&mut self) {
        self.phase = SplashPhase::Complete;
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SplashPhase::Complete
    }
}

impl Default for SplashState {
    fn default() -> Self {
        Self::new()
    }
}
