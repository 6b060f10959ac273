//! Settings dashboard state derived from the stored answers

use super::forms::{AnswerSet, SOUND_TRACKS};

/// Slider step for volume and frequency
const SLIDER_STEP: u8 = 5;

/// Object categories that can be given their own sound
const OBJECT_CATEGORIES: [(&str, usize); 3] = [("Cars", 0), ("People", 1), ("Static objects", 2)];

/// Map a 0–2 audio level to a volume percentage
pub fn volume_percent(level: Option<u8>) -> u8 {
    match level {
        Some(0) => 25,
        Some(1) => 75,
        Some(2) => 100,
        _ => 75,
    }
}

/// Map a 0–2 frequency level to a feedback frequency percentage
pub fn frequency_percent(level: Option<u8>) -> u8 {
    match level {
        Some(0) => 25,
        Some(1) => 50,
        Some(2) => 100,
        _ => 50,
    }
}

/// Dashboard tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Sound,
    Objects,
}

impl SettingsTab {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Sound => Self::Objects,
            Self::Objects => Self::Sound,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sound => "Sound Settings",
            Self::Objects => "Object Categories",
        }
    }
}

/// Sound assigned to one object category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSound {
    pub category: &'static str,
    pub track_index: usize,
}

impl ObjectSound {
    pub fn track_label(&self) -> &'static str {
        SOUND_TRACKS[self.track_index % SOUND_TRACKS.len()].1
    }
}

/// Local, unsaved adjustments on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    pub tab: SettingsTab,
    /// 0..=100
    pub volume: u8,
    /// 0..=100
    pub frequency: u8,
    /// Selected row within the current tab
    pub selected_row: usize,
    pub object_sounds: Vec<ObjectSound>,
    pub sound_type: String,
    pub track_count: usize,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::from_answers(&AnswerSet::new())
    }
}

impl SettingsState {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self {
            tab: SettingsTab::default(),
            volume: volume_percent(answers.level("audio_level")),
            frequency: frequency_percent(answers.level("feedback_frequency")),
            selected_row: 0,
            object_sounds: OBJECT_CATEGORIES
                .iter()
                .map(|&(category, track_index)| ObjectSound {
                    category,
                    track_index,
                })
                .collect(),
            sound_type: answers.text("sound_type").to_string(),
            track_count: answers.choices("sound_tracks").len(),
        }
    }

    fn row_count(&self) -> usize {
        match self.tab {
            SettingsTab::Sound => 2,
            SettingsTab::Objects => self.object_sounds.len(),
        }
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.toggle();
        self.selected_row = 0;
    }

    pub fn next_row(&mut self) {
        self.selected_row = (self.selected_row + 1) % self.row_count();
    }

    pub fn prev_row(&mut self) {
        let count = self.row_count();
        self.selected_row = (self.selected_row + count - 1) % count;
    }

    /// Nudge the selected control; `forward` raises sliders / picks the next track
    pub fn adjust(&mut self, forward: bool) {
        match self.tab {
            SettingsTab::Sound => {
                let slider = if self.selected_row == 0 {
                    &mut self.volume
                } else {
                    &mut self.frequency
                };
                *slider = if forward {
                    slider.saturating_add(SLIDER_STEP).min(100)
                } else {
                    slider.saturating_sub(SLIDER_STEP)
                };
            }
            SettingsTab::Objects => {
                if let Some(object) = self.object_sounds.get_mut(self.selected_row) {
                    let len = SOUND_TRACKS.len();
                    object.track_index = if forward {
                        (object.track_index + 1) % len
                    } else {
                        (object.track_index + len - 1) % len
                    };
                }
            }
        }
    }
}

impl std::fmt::Display for SettingsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "volume={}%, frequency={}%, object sounds:",
            self.volume, self.frequency
        )?;
        for (i, object) in self.object_sounds.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{}={}", object.category, object.track_label())?;
        }
        Ok(())
    }
}
