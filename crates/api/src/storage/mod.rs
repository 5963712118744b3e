// Path: crates/api/src/storage/mod.rs

//! Device-local key/value storage. Holds the auth token and the pending-enrollment ledger;
//! the session itself is memory-only.

use async_trait::async_trait;
use learnchain_types::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The fixed keys the client persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Bearer token issued at login.
    Token,
    /// Payments confirmed on chain whose backend enrollment write has not succeeded yet.
    PendingEnrollments,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Token => "token",
            StorageKey::PendingEnrollments => "pendingEnrollments",
        }
    }
}

#[async_trait]
pub trait LocalStorage: Send + Sync {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}

/// Reads a JSON-encoded value.
pub async fn get_json<T: DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: StorageKey,
) -> Result<Option<T>, StorageError> {
    match storage.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Writes a value as JSON.
pub async fn set_json<T: Serialize + Sync>(
    storage: &dyn LocalStorage,
    key: StorageKey,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw).await
}
