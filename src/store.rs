//! [`KeyValueStore`] implementations.
//!
//! - [`MemoryStore`]: lives as long as the value; for tests and the simulator
//! - [`JsonFileStore`]: slots kept in a small JSON file, e.g.
//!
//! ```json
//! {
//!   "0": false
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::host::KeyValueStore;
use crate::Error;

/// Volatile in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<u32, bool>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_bool(&self, key: u32) -> Result<Option<bool>, Error> {
        Ok(self.slots.get(&key).copied())
    }

    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), Error> {
        self.slots.insert(key, value);
        Ok(())
    }
}

/// Store persisted as a JSON object mapping slot numbers to booleans.
///
/// The whole file is rewritten on every write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    slots: BTreeMap<u32, bool>,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing file is treated as an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let slots = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                Error::Storage(format!("Corrupt store '{}': {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to read store '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::debug!("Opened store {} with {} slots", path.display(), slots.len());
        Ok(Self { path, slots })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(&self.slots)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json).map_err(|e| {
            Error::Storage(format!("Failed to write store '{}': {}", tmp.display(), e))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            Error::Storage(format!(
                "Failed to replace store '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn read_bool(&self, key: u32) -> Result<Option<bool>, Error> {
        Ok(self.slots.get(&key).copied())
    }

    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), Error> {
        let previous = self.slots.insert(key, value);
        if let Err(e) = self.flush() {
            // Keep memory consistent with what is on disk
            match previous {
                Some(v) => self.slots.insert(key, v),
                None => self.slots.remove(&key),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read_bool(0).unwrap(), None);
        store.write_bool(0, true).unwrap();
        assert_eq!(store.read_bool(0).unwrap(), Some(true));
        store.write_bool(0, false).unwrap();
        assert_eq!(store.read_bool(0).unwrap(), Some(false));
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.read_bool(0).unwrap(), None);
    }

    #[test]
    fn test_json_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.write_bool(0, false).unwrap();
        store.write_bool(3, true).unwrap();
        drop(store);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.read_bool(0).unwrap(), Some(false));
        assert_eq!(store.read_bool(3).unwrap(), Some(true));
        assert_eq!(store.read_bool(1).unwrap(), None);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"0\": false"));
    }

    #[test]
    fn test_json_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_json_store_write_failure_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("settings.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.write_bool(0, true).is_err());
        assert_eq!(store.read_bool(0).unwrap(), None);
    }
}
