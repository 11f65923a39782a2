//! Blob persistence: one get/set capability over two logical keys.
//!
//! The roster and the calendar each persist as a single JSON blob. Backends
//! only move strings; all merging happens in the stores above them, which
//! is what makes the backends interchangeable.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{StoreBackend, WeekmeetConfig};
use crate::error::{WeekmeetError, WeekmeetResult};

pub mod file;
pub mod memory;
pub mod redis;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use redis::RedisStore;

/// The two blobs weekmeet persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Roster,
    Calendar,
}

impl StoreKey {
    /// Stable storage key, shared by every backend.
    pub fn storage_key(self) -> &'static str {
        match self {
            StoreKey::Roster => "weekmeet:users",
            StoreKey::Calendar => "weekmeet:calendar",
        }
    }
}

/// Uniform async get/set over string blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a blob. An absent key is `None`, not an error.
    async fn get(&self, key: StoreKey) -> WeekmeetResult<Option<String>>;

    /// Store a blob, replacing any previous value.
    async fn set(&self, key: StoreKey, value: String) -> WeekmeetResult<()>;
}

/// Open the backend named by `config`.
///
/// A backend that is missing settings or unreachable fails here with a
/// configuration error, so bad deployments surface at startup instead of
/// on the first request.
pub async fn open_store(config: &WeekmeetConfig) -> WeekmeetResult<Arc<dyn BlobStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                WeekmeetError::Config("backend = \"redis\" requires redis_url".into())
            })?;
            Ok(Arc::new(RedisStore::connect(url).await?))
        }
        StoreBackend::File => Ok(Arc::new(FileStore::new(config.data_path())?)),
    }
}
