//! JSON file store
//!
//! One pretty-printed JSON document per key, laid out by
//! [`CacheKey::relative_path`] so entries can be inspected and deleted by hand.
//! Writes land in a uniquely named temp file first and are renamed over the
//! target, so readers never observe a partial document and concurrent writers
//! to the same key resolve last-write-wins.

use super::{CacheEntry, KeyedStore};
use crate::error::{Result, StorageError};
use crate::key::CacheKey;
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Directories are created lazily on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    async fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
        let temp = path.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));

        let mut file = fs::File::create(&temp)
            .await
            .map_err(|e| StorageError::io(&temp, e))?;
        file.write_all(data)
            .await
            .map_err(|e| StorageError::io(&temp, e))?;
        file.sync_all()
            .await
            .map_err(|e| StorageError::io(&temp, e))?;
        drop(file);

        if let Err(e) = fs::rename(&temp, path).await {
            if let Err(cleanup) = fs::remove_file(&temp).await {
                warn!("Failed to remove temp file {:?}: {}", temp, cleanup);
            }
            return Err(StorageError::io(path, e));
        }

        Ok(())
    }
}

#[async_trait]
impl KeyedStore for FileStore {
    async fn read(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        let path = self.path_for(key);

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        let entry: CacheEntry = serde_json::from_slice(&data)?;
        if entry.key != *key {
            return Err(StorageError::KeyMismatch {
                path,
                expected: key.clone(),
                found: entry.key,
            });
        }

        Ok(Some(entry))
    }

    async fn write(&self, key: &CacheKey, payload: Value) -> Result<CacheEntry> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }

        let entry = CacheEntry::new(key.clone(), payload);
        let data = serde_json::to_vec_pretty(&entry)?;
        Self::write_atomically(&path, &data).await?;

        debug!("Wrote cache entry {} to {:?}", key, path);
        Ok(entry)
    }

    async fn remove(&self, key: &CacheKey) -> Result<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.root.display())
    }
}
