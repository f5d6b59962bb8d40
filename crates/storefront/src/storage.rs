//! Session storage port.
//!
//! The auth token and the user profile are persisted in a small key-value
//! store, the client-side equivalent of browser local storage. State logic
//! only sees the [`SessionStore`] trait, so the backing store can be swapped
//! for an in-memory map (tests, throwaway sessions) or a file on disk (CLI).

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use thiserror::Error;

/// Well-known session keys.
pub mod keys {
    /// Opaque auth token returned by `/auth/login`.
    pub const TOKEN: &str = "token";

    /// JSON-serialized profile of the logged-in user.
    pub const USER: &str = "user";
}

/// Errors from a session store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing file could not be encoded or decoded.
    #[error("Storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A previous writer panicked while holding the lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Key-value storage for session data.
pub trait SessionStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// Session store persisted as a JSON object in a file.
///
/// The file is read once at [`FileStore::open`] and rewritten after every
/// mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened session file");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Write then rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        // Memory only changes once the file has the new contents.
        let mut next = entries.clone();
        apply(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get(keys::TOKEN).is_none());

        store.set(keys::TOKEN, "abc").unwrap();
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("abc"));

        store.remove(keys::TOKEN).unwrap();
        assert!(store.get(keys::TOKEN).is_none());
        // Removing again is fine.
        store.remove(keys::TOKEN).unwrap();
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("session.json")).unwrap();
        assert!(store.get(keys::USER).is_none());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.set(keys::TOKEN, "tok-1").unwrap();
        store.set(keys::USER, r#"{"id":1,"username":"pao"}"#).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::TOKEN).as_deref(), Some("tok-1"));
        assert_eq!(
            reopened.get(keys::USER).as_deref(),
            Some(r#"{"id":1,"username":"pao"}"#)
        );

        reopened.remove(keys::TOKEN).unwrap();
        let again = FileStore::open(&path).unwrap();
        assert!(again.get(keys::TOKEN).is_none());
        assert!(again.get(keys::USER).is_some());
    }

    #[test]
    fn test_file_store_failed_write_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        let store = FileStore::open(blocker.join("session.json")).unwrap();
        store.set(keys::USER, "pao").unwrap();

        // A regular file where the parent directory should be
        fs::remove_dir_all(&blocker).unwrap();
        fs::write(&blocker, "").unwrap();

        assert!(matches!(
            store.set(keys::TOKEN, "tok"),
            Err(StorageError::Io(_))
        ));
        assert!(store.get(keys::TOKEN).is_none());

        assert!(store.remove(keys::USER).is_err());
        assert_eq!(store.get(keys::USER).as_deref(), Some("pao"));
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Encoding(_))
        ));
    }
}
