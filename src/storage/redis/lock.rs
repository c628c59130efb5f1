//! Lock operations
//!
//! A lock is a key holding a caller-chosen token, taken with `SET NX PX`.
//! Release and extend only act when the stored token still matches, so a
//! holder whose lock expired cannot free or prolong someone else's.

use super::store::RedisStore;
use crate::utils::error::Result;
use redis::{AsyncCommands, Script};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

static RELEASE_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
  return redis.call('DEL', KEYS[1])
end
return 0
"#,
    )
});

static EXTEND_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
  return redis.call('PEXPIRE', KEYS[1], ARGV[2])
end
return 0
"#,
    )
});

/// Lock TTL in milliseconds, at least 1
fn ttl_millis(ttl: Duration) -> u64 {
    (ttl.as_millis() as u64).max(1)
}

impl RedisStore {
    /// Try to take a lock; returns false if someone else holds it
    pub async fn lock_take(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(self.key(key))
            .arg(token)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await?;

        let taken = reply.is_some();
        debug!("Lock {} take: {}", key, taken);
        Ok(taken)
    }

    /// Release a lock held with `token`; returns false if it was not held
    pub async fn lock_release(&self, key: &str, token: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let released: i64 = RELEASE_SCRIPT
            .key(self.key(key))
            .arg(token)
            .invoke_async(&mut conn)
            .await?;

        debug!("Lock {} release: {}", key, released > 0);
        Ok(released > 0)
    }

    /// Reset the TTL of a lock held with `token`
    pub async fn lock_extend(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let extended: i64 = EXTEND_SCRIPT
            .key(self.key(key))
            .arg(token)
            .arg(ttl_millis(ttl))
            .invoke_async(&mut conn)
            .await?;
        Ok(extended > 0)
    }

    /// Token currently holding the lock, if any
    pub async fn lock_query(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let token: Option<String> = conn.get(self.key(key)).await?;
        Ok(token)
    }
}
