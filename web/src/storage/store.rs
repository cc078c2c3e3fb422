//! SessionStore trait definition

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key/value storage, the server-side counterpart of browser local storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` when the key was never set or was removed
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite a value
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value; removing a missing key is not an error
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;

    async fn contains_key(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_item(key).await?.is_some())
    }
}
