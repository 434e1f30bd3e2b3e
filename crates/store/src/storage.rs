//! The persistence port: a key-value byte store.
//!
//! Both domain stores persist a full JSON snapshot under a fixed key on
//! every mutation. The port is injected at construction, which is what
//! makes the in-memory fake usable in tests.
//!
//! Two implementations:
//! - `MemoryStore`: a `Mutex<HashMap>` fake for tests and ephemeral runs
//! - `FileStore`: one file per key under a root directory

use crate::error::StorageError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key under which the catalog snapshot is persisted (a JSON array).
pub const CATALOG_KEY: &str = "movies:data";

/// Key under which the preference map is persisted (a JSON object with
/// stringified movie ids).
pub const RATINGS_KEY: &str = "movieRatings";

/// Best-effort key-value byte storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cells: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, for seeding test fixtures.
    pub fn with_entry(key: &str, value: &[u8]) -> Self {
        let store = Self::new();
        store
            .set(key, value)
            .expect("memory store writes cannot fail");
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let cells = self
            .cells
            .lock()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        Ok(cells.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut cells = self
            .cells
            .lock()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        cells.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Filesystem-backed store: each key maps to one file under `root`.
///
/// The root directory is created lazily on first write, so constructing a
/// `FileStore` never touches the disk.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys like "movies:data" are not portable file names; squash
        // anything outside [A-Za-z0-9_-] to '-'.
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
