//! Durable key-value storage for client state.
//!
//! The stores persist whole JSON snapshots under fixed string keys, the way a
//! browser client uses `localStorage`. Two backends are provided:
//!
//! - [`MemoryStorage`] - process-local map; clones share contents, so a second
//!   store built on a clone behaves like a restarted client
//! - [`FileStorage`] - one file per key under a directory
//!
//! Values are always rewritten wholesale; there are no partial updates and no
//! schema version field.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys for persisted client state.
pub mod keys {
    /// Key holding the serialized cart line sequence.
    pub const CART: &str = "authenticCart";

    /// Key holding the serialized signed-in identity.
    pub const IDENTITY: &str = "authenticUser";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be used at all (disabled, poisoned, quota).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored value is not valid JSON for the expected type.
    #[error("malformed value under {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A persistent string key-value store scoped to one client.
///
/// Implementations must be safe to share between the cart and session stores.
pub trait DurableStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl dyn DurableStorage {
    /// Read and deserialize a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Json` if the stored text does not parse as `T`,
    /// or any backend error from [`DurableStorage::get_item`].
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Json {
                key: key.to_owned(),
                source,
            })
    }

    /// Serialize a value to JSON and store it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Json` if serialization fails, or any backend
    /// error from [`DurableStorage::set_item`].
    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Json {
            key: key.to_owned(),
            source,
        })?;
        self.set_item(key, &raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_json_helpers() {
        let storage: Arc<dyn DurableStorage> = Arc::new(MemoryStorage::new());
        storage.save_json("numbers", &[1, 2, 3]).unwrap();

        let loaded: Option<Vec<u32>> = storage.load_json("numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));

        let missing: Option<Vec<u32>> = storage.load_json("other").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_load_json_reports_malformed_value() {
        let storage: Arc<dyn DurableStorage> = Arc::new(MemoryStorage::new());
        storage.set_item(keys::CART, "{not json").unwrap();

        let err = storage.load_json::<Vec<u32>>(keys::CART).unwrap_err();
        assert!(matches!(err, StorageError::Json { ref key, .. } if key == keys::CART));
    }
}
