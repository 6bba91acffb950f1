//! Testing utilities for the optic cart workspace
//!
//! Shared fixtures, failing storage backends and store constructors.

#![allow(missing_docs)]

use optic_cart::{
    CartConfig, CartStore, KeyValueStore, MemoryStore, ProductInfo, RecordingSink, StorageError,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const CART_KEY: &str = "moda-optic-cart";

pub fn glasses_x() -> ProductInfo {
    ProductInfo::new("Glasses X", "100 rub").with_image("https://cdn.example/glasses-x.png")
}

pub fn glasses_y() -> ProductInfo {
    ProductInfo::new("Glasses Y", "200 rub").with_original_price("250 rub")
}

pub type TestStore<S = MemoryStore> = CartStore<S, RecordingSink>;

/// Store on `storage` with a recording sink and default config
pub fn open_recording<S: KeyValueStore>(storage: S) -> TestStore<S> {
    CartStore::with_parts(storage, RecordingSink::new(), CartConfig::new())
}

/// Fresh in-memory store with a recording sink
pub fn memory_store() -> TestStore {
    open_recording(MemoryStore::new())
}

/// Memory store whose default cart slot already holds `blob`
pub fn seeded_storage(blob: &str) -> MemoryStore {
    MemoryStore::with_entry(CART_KEY, blob)
}

/// Backend where every operation fails as if storage were disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}

/// Memory backend whose writes can be switched off mid-test
///
/// Reads always work, so hydration succeeds while persistence can be made
/// to fail on demand. Successful writes are recorded in order.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: Arc<AtomicBool>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::QuotaExceeded {
                needed: key.len() + value.len(),
                limit: 0,
            });
        }
        self.inner.set(key, value)?;
        self.writes.lock().push(value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
