// Path: crates/api/src/mock/mod.rs

//! In-memory implementations of every seam, for tests and offline development.

mod backend;
mod chain;

pub use backend::{BackendCall, MockBackend};
pub use chain::{MockContractBridge, MockProvider, MockWalletConnector};

use crate::storage::{LocalStorage, StorageKey};
use async_trait::async_trait;
use learnchain_types::error::StorageError;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-memory [`LocalStorage`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<StorageKey, String>>,
    read_only: AtomicBool,
}

impl MemoryStorage {
    pub fn with_token(token: &str) -> Self {
        let storage = Self::default();
        lock(&storage.entries).insert(StorageKey::Token, token.to_string());
        storage
    }

    /// Makes every later `set` fail, as a full or read-only disk would.
    pub fn refuse_writes(self) -> Self {
        self.read_only.store(true, Ordering::SeqCst);
        self
    }

    pub fn snapshot(&self, key: StorageKey) -> Option<String> {
        lock(&self.entries).get(&key).cloned()
    }
}

#[async_trait]
impl LocalStorage for MemoryStorage {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(&key).cloned())
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", key.as_str()),
            )));
        }
        lock(&self.entries).insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        lock(&self.entries).remove(&key);
        Ok(())
    }
}
