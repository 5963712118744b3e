// Path: crates/client/src/storage.rs

use async_trait::async_trait;
use learnchain_api::{LocalStorage, StorageKey};
use learnchain_types::error::StorageError;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// [`LocalStorage`] backed by a single JSON object on disk.
///
/// Each write rewrites the whole file through a temporary sibling and a rename, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl LocalStorage for FileStorage {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let _held = self.guard.lock().await;
        Ok(self.read_all().await?.remove(key.as_str()))
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let _held = self.guard.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.as_str().to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        let _held = self.guard.lock().await;
        let mut entries = self.read_all().await?;
        if entries.remove(key.as_str()).is_some() {
            self.write_all(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get(StorageKey::Token).await.unwrap(), None);
        storage.set(StorageKey::Token, "abc").await.unwrap();
        storage
            .set(StorageKey::PendingEnrollments, "[]")
            .await
            .unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get(StorageKey::Token).await.unwrap().as_deref(),
            Some("abc")
        );

        reopened.remove(StorageKey::Token).await.unwrap();
        assert_eq!(storage.get(StorageKey::Token).await.unwrap(), None);
        assert_eq!(
            storage
                .get(StorageKey::PendingEnrollments)
                .await
                .unwrap()
                .as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get(StorageKey::Token).await,
            Err(StorageError::Encoding(_))
        ));
    }
}
