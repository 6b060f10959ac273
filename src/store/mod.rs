//! Durable storage and the onboarding completion record

mod preferences;
mod storage;

pub use preferences::PreferencesStore;
pub use storage::{FileStorage, Storage};

#[cfg(test)]
pub use storage::MemoryStorage;
