//! String key-value storage that survives restarts

use crate::error::StorageError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Synchronous key-value storage, single reader and writer
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Remove every key in `keys`; either all go or none do
    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// In-memory storage, lost on exit
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object file.
///
/// Every mutation rewrites the whole file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// File name used inside the data directory
    pub const FILE_NAME: &'static str = "storage.json";

    /// Open `<dir>/storage.json`, starting empty if it is missing or unreadable
    pub fn open_in(dir: &Path) -> Self {
        Self::open(dir.join(Self::FILE_NAME))
    }

    /// Open the file at `path`, starting empty if it is missing or unreadable
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Ignoring malformed storage file {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Cannot read storage file {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk and only then make them current
    fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content)?;
        self.entries = entries;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value.to_string());
        self.commit(entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.remove_all(&[key])
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        if !keys.iter().any(|key| self.entries.contains_key(*key)) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        for key in keys {
            entries.remove(*key);
        }
        self.commit(entries)
    }
}
