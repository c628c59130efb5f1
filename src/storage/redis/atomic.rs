//! Redis atomic operations and server utilities
//!
//! Counters plus a few server-level commands.

use super::store::RedisStore;
use crate::utils::error::Result;
use redis::AsyncCommands;

impl RedisStore {
    /// Increment key value by delta; a missing key starts at 0
    pub async fn increment(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        let new_value: i64 = conn.incr(self.key(key), delta).await?;
        Ok(new_value)
    }

    /// Decrement a key by a delta value
    pub async fn decrement(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        let new_value: i64 = conn.decr(self.key(key), delta).await?;
        Ok(new_value)
    }

    /// Increment a key holding a float
    pub async fn increment_float(&self, key: &str, delta: f64) -> Result<f64> {
        let mut conn = self.get_connection().await?;
        let new_value: f64 = conn.incr(self.key(key), delta).await?;
        Ok(new_value)
    }

    /// Get Redis info
    pub async fn info(&self) -> Result<String> {
        let mut conn = self.get_connection().await?;
        let info: String = redis::cmd("INFO").query_async(&mut conn).await?;
        Ok(info)
    }

    /// Flush the current logical database (use with caution)
    pub async fn flush_db(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }
}
