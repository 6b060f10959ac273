//! Application state module

mod app_state;
mod forms;
mod settings_state;
mod splash_state;

pub use app_state::*;
pub use forms::*;
pub use settings_state::*;
pub use splash_state::*;
