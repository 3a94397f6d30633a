//! Live key-value store persisted as a JSON object on disk.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::KeyValueStore;

/// Durable per-app preferences file.
///
/// The file holds a flat JSON object of string keys to string values. A
/// missing file reads as an empty store. Writes within one process are
/// serialized; concurrent processes race with last-write-wins.
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, Box<dyn Error + Send + Sync>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {e}", self.path.display()).into())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let _guard = self.lock.lock().map_err(|e| e.to_string())?;
        Ok(self.load()?.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let _guard = self.lock.lock().map_err(|e| e.to_string())?;
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}
