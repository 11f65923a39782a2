//! Redis backend over a bb8 connection pool.

use async_trait::async_trait;
use bb8_redis::{RedisConnectionManager, bb8, redis::AsyncCommands};

use super::{BlobStore, StoreKey};
use crate::error::{WeekmeetError, WeekmeetResult};

/// Shared-infrastructure backend: several server processes can point at the
/// same Redis and see each other's writes. Whole-blob writes race as last
/// write wins, same as every other backend.
pub struct RedisStore {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl RedisStore {
    /// Build a pool against `url` and check out one connection so an
    /// unreachable Redis fails at startup instead of on the first request.
    pub async fn connect(url: &str) -> WeekmeetResult<Self> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|e| WeekmeetError::Config(format!("Invalid redis_url: {e}")))?;

        let pool = bb8::Pool::builder()
            .build(manager)
            .await
            .map_err(|e| WeekmeetError::Config(format!("Could not build redis pool: {e}")))?;

        pool.get()
            .await
            .map_err(|e| WeekmeetError::Config(format!("Could not reach redis: {e}")))?;

        Ok(RedisStore { pool })
    }
}

#[async_trait]
impl BlobStore for RedisStore {
    async fn get(&self, key: StoreKey) -> WeekmeetResult<Option<String>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| WeekmeetError::Store(e.to_string()))?;

        conn.get(key.storage_key())
            .await
            .map_err(|e| WeekmeetError::Store(e.to_string()))
    }

    async fn set(&self, key: StoreKey, value: String) -> WeekmeetResult<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| WeekmeetError::Store(e.to_string()))?;

        conn.set(key.storage_key(), value)
            .await
            .map_err(|e| WeekmeetError::Store(e.to_string()))
    }
}
