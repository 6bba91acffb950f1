//! Durable key-value slots
//!
//! The cart persists one UTF-8 blob under one namespaced key. Backends:
//! - [`MemoryStore`]: shared in-process map, optionally capacity-limited
//! - [`FileStore`]: one JSON file per key under a directory

use crate::error::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A persistent string-to-string store
///
/// Methods take `&self`; backends that mutate use interior mutability so a
/// single handle can be shared by several cart instances.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if never written
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`
    ///
    /// # Errors
    /// Returns error if the write is rejected or fails
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`; absent keys are not an error
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store, cloneable handle to a shared map
///
/// Clones see each other's writes, so two carts built on clones behave like
/// two browser tabs on one origin: last writer wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create empty, unbounded store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total bytes of keys plus values
    #[inline]
    #[must_use]
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Create store pre-seeded with one entry
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.lock().insert(key.into(), value.into());
        store
    }

    /// Total bytes of keys plus values
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.inner
            .lock()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.inner.lock();
        if let Some(limit) = self.quota {
            let others: usize = guard
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.lock().remove(key);
        Ok(())
    }
}

/// File-backed store: `<dir>/<key>.json`
///
/// Each write goes to its own uniquely named temp file in the same directory
/// and is renamed into place, so a reader never sees a half-written blob and
/// concurrent writers do not share a temp path. The last rename wins. The
/// directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path holding `key`
    ///
    /// # Errors
    /// Returns error unless `key` is non-empty ASCII alphanumerics, `.`, `_` or `-`
    /// and does not start with `.`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::io_error(&self.dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| StorageError::io_error(&self.dir, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| StorageError::io_error(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| StorageError::io_error(&path, e.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "from a").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("from a"));
    }

    #[test]
    fn memory_store_quota_rejects_oversized_write() {
        let store = MemoryStore::new().with_quota(10);
        store.set("k", "12345").unwrap();

        let err = store.set("k", "0123456789").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 11, limit: 10 }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn memory_store_quota_counts_replaced_value_once() {
        let store = MemoryStore::new().with_quota(6);
        store.set("k", "12345").unwrap();
        store.set("k", "abcde").unwrap();
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("moda-optic-cart").unwrap(), None);
        store.set("moda-optic-cart", "[]").unwrap();
        assert_eq!(store.get("moda-optic-cart").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/moda-optic-cart.json").exists());
        let leftovers = std::fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(leftovers, 1);

        store.remove("moda-optic-cart").unwrap();
        assert_eq!(store.get("moda-optic-cart").unwrap(), None);
    }

    #[test]
    fn file_store_instances_write_through_separate_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let writers: Vec<_> = (0..8)
            .map(|i| {
                let store = FileStore::new(dir.path());
                std::thread::spawn(move || {
                    for round in 0..25 {
                        store
                            .set("moda-optic-cart", &format!("[\"writer {i} round {round}\"]"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let store = FileStore::new(dir.path());
        let text = store.get("moda-optic-cart").unwrap().unwrap();
        let parsed: Vec<String> = serde_json::from_str(&text).unwrap();
        assert!(parsed[0].ends_with("round 24"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let store = FileStore::new("unused");
        for key in ["", "../escape", "a/b", ".hidden", "sp ace"] {
            assert!(
                matches!(store.path_for(key), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
