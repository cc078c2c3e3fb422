//! JSON file storage backend
//!
//! The whole map is rewritten on every mutation. Writes go to a sibling
//! temp file that is renamed over the target, so a crash never leaves a
//! half-written file behind.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use super::store::{SessionStore, StoreError};

/// Store backed by a single JSON object on disk
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// In-memory copy of the file; the lock also serializes writers
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing contents if the file exists
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened session store {:?} ({} keys)", path, items.len());

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        items.insert(key.to_string(), value.to_string());
        self.persist(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().await;
        if items.remove(key).is_some() {
            self.persist(&items).await?;
        }
        Ok(())
    }
}
