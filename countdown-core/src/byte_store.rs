//! Key-value byte storage backing the event store.
//!
//! The event store only ever needs to read and overwrite a single blob under
//! a fixed key, so the storage contract is deliberately small.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{CountdownError, CountdownResult};

/// An opaque get/set-by-key byte store.
pub trait ByteStore {
    fn get(&self, key: &str) -> CountdownResult<Option<Vec<u8>>>;

    /// Store `bytes` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, bytes: &[u8]) -> CountdownResult<()>;

    fn remove(&mut self, key: &str) -> CountdownResult<()>;
}

/// In-process byte store.
#[derive(Debug, Default, Clone)]
pub struct MemoryByteStore {
    entries: HashMap<String, Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryByteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail, as an unreadable disk would.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent `set` fail, as a full or read-only disk would.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ByteStore for MemoryByteStore {
    fn get(&self, key: &str) -> CountdownResult<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(CountdownError::Io(std::io::Error::other(format!(
                "read of '{}' rejected",
                key
            ))));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> CountdownResult<()> {
        if self.fail_writes {
            return Err(CountdownError::Persist(format!("write to '{}' rejected", key)));
        }
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CountdownResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Byte store keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileByteStore {
    dir: PathBuf,
}

impl FileByteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileByteStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> CountdownResult<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\']);
        if !valid {
            return Err(CountdownError::Config(format!("Invalid store key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl ByteStore for FileByteStore {
    fn get(&self, key: &str) -> CountdownResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;

        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> CountdownResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write to a sibling and rename so readers never see a partial blob
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, bytes)?;
        std::fs::rename(&temp, &path)?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CountdownResult<()> {
        let path = self.path_for(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryByteStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", b"one").unwrap();
        store.set("k", b"two").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_failing_writes_keep_old_value() {
        let mut store = MemoryByteStore::new();
        store.set("k", b"old").unwrap();
        store.fail_writes(true);

        assert!(matches!(
            store.set("k", b"new"),
            Err(CountdownError::Persist(_))
        ));
        assert_eq!(store.get("k").unwrap(), Some(b"old".to_vec()));
    }

    #[test]
    fn test_memory_store_failing_reads() {
        let mut store = MemoryByteStore::new();
        store.set("k", b"kept").unwrap();
        store.fail_reads(true);
        assert!(matches!(store.get("k"), Err(CountdownError::Io(_))));

        store.fail_reads(false);
        assert_eq!(store.get("k").unwrap(), Some(b"kept".to_vec()));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileByteStore::new(dir.path().join("nested"));

        assert_eq!(store.get("SavedEvents").unwrap(), None);

        store.set("SavedEvents", b"[]").unwrap();
        assert_eq!(store.get("SavedEvents").unwrap(), Some(b"[]".to_vec()));
        assert!(dir.path().join("nested/SavedEvents.json").exists());
        assert!(!dir.path().join("nested/SavedEvents.json.tmp").exists());

        store.remove("SavedEvents").unwrap();
        assert_eq!(store.get("SavedEvents").unwrap(), None);
        // Removing twice is fine
        store.remove("SavedEvents").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileByteStore::new(dir.path());

        assert!(store.set("../escape", b"x").is_err());
        assert!(store.get("").is_err());
        assert!(store.get("..").is_err());
    }
}
