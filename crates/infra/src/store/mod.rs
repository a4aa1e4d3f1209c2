//! Durable state for the two persisted collections.
//!
//! A [`StateStore`] is an opaque key → bytes capability: it loads and saves a
//! whole collection at once. Encoding lives in [`load_json`] / [`save_json`]
//! so every backend persists the same human-readable format.

mod in_memory;
mod json_file;

pub use in_memory::InMemoryStateStore;
pub use json_file::JsonFileStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key under which the product ledger is persisted.
pub const PRODUCTS_KEY: &str = "products";
/// Key under which the movement log is persisted.
pub const MOVEMENTS_KEY: &str = "movements";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-collection load/save capability.
pub trait StateStore: Send + Sync {
    /// Load the bytes saved under `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace whatever is saved under `key`.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

impl<S> StateStore for Arc<S>
where
    S: StateStore + ?Sized,
{
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).save(key, bytes)
    }
}

/// Load and decode a collection; a missing key yields `T::default()`.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
    S: StateStore + ?Sized,
{
    match store.load(key)? {
        None => Ok(T::default()),
        Some(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(T::default()),
        Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        }),
    }
}

/// Encode a collection as pretty-printed JSON and save it in full.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: StateStore + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &bytes)?;
    tracing::debug!(key, bytes = bytes.len(), "collection saved");
    Ok(())
}
