//! Persistence of the building list.
//!
//! Buildings are stored as a JSON array under a single key of a simple key-value
//! store. The [`BuildingRepository`] trait is what the screens talk to, so both the
//! timer and the city screen share one injected repository.

use crate::constants::BUILDINGS_KEY;
use crate::types::BuildingRecord;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Errors raised by key-value stores and repositories.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// Stored data could not be parsed or serialized
    #[error("malformed building data: {0}")]
    Parse(#[from] serde_json::Error),
    /// The store refused the operation
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, used in tests and when no storage directory is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(&['/', '\\'][..]) || key.starts_with('.') {
            return Err(StorageError::Backend(format!("invalid key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Replace atomically: readers see either the old or the new list.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Load/save access to the persisted building list.
pub trait BuildingRepository {
    /// Reads all building records. A missing list is an empty list.
    fn load(&self) -> Result<Vec<BuildingRecord>, StorageError>;
    /// Replaces the stored list with `records`.
    fn save(&mut self, records: &[BuildingRecord]) -> Result<(), StorageError>;
}

/// Repository storing the list as a JSON array under [`BUILDINGS_KEY`].
#[derive(Debug, Default, Clone)]
pub struct KeyValueRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueRepository<S> {
    /// Wraps a key-value store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> BuildingRepository for KeyValueRepository<S> {
    fn load(&self) -> Result<Vec<BuildingRecord>, StorageError> {
        match self.store.get(BUILDINGS_KEY)? {
            Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
            _ => Ok(Vec::new()),
        }
    }

    fn save(&mut self, records: &[BuildingRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records)?;
        self.store.set(BUILDINGS_KEY, &json)
    }
}

/// Loads the building list, substituting an empty list when the load fails.
pub fn load_or_empty(repository: &dyn BuildingRepository) -> Vec<BuildingRecord> {
    match repository.load() {
        Ok(records) => records,
        Err(err) => {
            log::error!("Failed to load buildings: {err}");
            Vec::new()
        }
    }
}
