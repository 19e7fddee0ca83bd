//! Redis-backed key-value store for multi-instance deployments.
//!
//! Values are plain strings. `set_with_ttl` uses `SET key value EX secs`
//! so a value is never written without an expiry. Counters use INCR and
//! EXPIRE as two separate commands.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::ports::{KeyValueStore, StoreError};

/// Redis store over a multiplexed async connection.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    conn: MultiplexedConnection,
}

impl RedisKeyValueStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Opens a connection to `url` and wraps it.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(to_store_error)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(to_store_error)?;
        Ok(Self::new(conn))
    }
}

/// Redis expiries are whole seconds; anything shorter rounds up to one.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn to_store_error(e: redis::RedisError) -> StoreError {
    if e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout() || e.is_io_error() {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::OperationFailed(e.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(to_store_error)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_secs(ttl))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(to_store_error)
    }

    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.incr(key, 1_i64).await.map_err(to_store_error)?;
        u64::try_from(count).map_err(|_| StoreError::NotAnInteger(key.to_string()))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.expire::<_, ()>(key, ttl_secs(ttl) as i64)
            .await
            .map_err(to_store_error)
    }
}

impl std::fmt::Debug for RedisKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKeyValueStore").finish_non_exhaustive()
    }
}
