//! In-memory backend for tests and throwaway servers.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BlobStore, StoreKey};
use crate::error::WeekmeetResult;

/// Process-local blob map. Contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: StoreKey) -> WeekmeetResult<Option<String>> {
        Ok(self.blobs.read().await.get(&key).cloned())
    }

    async fn set(&self, key: StoreKey, value: String) -> WeekmeetResult<()> {
        self.blobs.write().await.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_keys_read_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(StoreKey::Roster).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set(StoreKey::Calendar, "{}".into()).await.unwrap();
        assert_eq!(
            store.get(StoreKey::Calendar).await.unwrap().as_deref(),
            Some("{}")
        );
    }

    #[tokio::test]
    async fn set_replaces_the_previous_blob() {
        let store = MemoryStore::new();
        store.set(StoreKey::Roster, "[]".into()).await.unwrap();
        store.set(StoreKey::Roster, "[1]".into()).await.unwrap();
        assert_eq!(
            store.get(StoreKey::Roster).await.unwrap().as_deref(),
            Some("[1]")
        );
    }
}
