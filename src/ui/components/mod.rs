//! Reusable UI components

mod dialog;

pub use dialog::{render_reset_dialog, render_success_dialog};
