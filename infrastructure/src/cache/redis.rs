//! Redis-backed cache store
//!
//! A connection is opened per call, bounded by the connect timeout, so an
//! unreachable server degrades each request to a miss instead of stalling
//! startup.

use async_trait::async_trait;
use ensemble_application::{CacheError, CacheStore};
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use std::time::Duration;
use tracing::trace;

pub struct RedisCacheStore {
    client: Client,
    connect_timeout: Duration,
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

impl RedisCacheStore {
    /// Create a store for `url` (e.g. `redis://127.0.0.1:6379`).
    ///
    /// Only the URL is checked here; no connection is made.
    pub fn new(url: &str, connect_timeout: Duration) -> Result<Self, CacheError> {
        let client = Client::open(url)
            .map_err(|e| CacheError::Unavailable(format!("Invalid Redis URL: {}", e)))?;
        Ok(Self {
            client,
            connect_timeout,
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        match tokio::time::timeout(
            self.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(CacheError::Unavailable(format!(
                "Failed to get Redis connection: {}",
                e
            ))),
            Err(_) => Err(CacheError::Unavailable(format!(
                "Redis connection timed out after {:?}",
                self.connect_timeout
            ))),
        }
    }
}

/// Redis rejects `EX 0`; sub-second TTLs round up to one second.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::Backend(format!("Redis GET failed: {}", e)))?;
        trace!("Redis GET hit={}", value.is_some());
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_secs(ttl))
            .await
            .map_err(|e| CacheError::Backend(format!("Redis SET failed: {}", e)))
    }
}
