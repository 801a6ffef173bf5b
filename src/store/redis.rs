//! Shared attempt counter backed by Redis.
//!
//! INCR + first-hit EXPIRE gives the fixed window anchored at the first
//! attempt; the counter is atomic across every instance of the service,
//! which is what makes the submission limit correct under concurrency
//! and multi-instance deployment.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;

use crate::store::{RateStore, StoreError, WindowHit};

#[derive(Clone)]
pub struct RedisRateStore {
    conn: ConnectionManager,
}

impl RedisRateStore {
    /// Connect to the shared counter store.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| StoreError::Counter(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| StoreError::Counter(e.to_string()))?;

        tracing::info!("Connected to shared rate-limit counter store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl RateStore for RedisRateStore {
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowHit, StoreError> {
        let mut conn = self.conn.clone();

        let count: i64 = redis::cmd("INCR")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Counter(e.to_string()))?;

        // First attempt in the window anchors its expiry.
        if count == 1 {
            let _: i64 = redis::cmd("EXPIRE")
                .arg(key)
                .arg(window.as_secs())
                .query_async(&mut conn)
                .await
                .map_err(|e| StoreError::Counter(e.to_string()))?;
        }

        let ttl: i64 = redis::cmd("TTL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Counter(e.to_string()))?;

        Ok(WindowHit {
            count: count.max(0) as u64,
            reset_in_secs: ttl.max(0) as u64,
        })
    }
}
