use std::collections::HashMap;
use std::sync::RwLock;

use super::{StateStore, StoreError};

/// In-memory state store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    inner: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with saved content.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for InMemoryStateStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned(key))?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned(key))?;
        map.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

fn poisoned(key: &str) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source: std::io::Error::other("state store lock poisoned"),
    }
}
