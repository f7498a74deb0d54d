//! In-memory storage adapter.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{CartStorage, StorageError};

/// Process-local key-value slots.
///
/// Clones share the same slots, so a test can keep a handle and inspect what
/// the cart store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with one slot already filled.
    #[must_use]
    pub fn with_item(key: &str, value: impl Into<String>) -> Self {
        let items = HashMap::from([(key.to_string(), value.into())]);
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    /// Raw value under `key`.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().await.get(key).cloned()
    }
}

impl CartStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}
