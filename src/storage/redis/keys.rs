//! Key operations
//!
//! Deletion, existence, expiry and namespace scans.

use super::store::RedisStore;
use crate::utils::error::{Result, StoreError};
use redis::AsyncCommands;

/// Keys requested per SCAN round trip
const SCAN_COUNT: usize = 100;

impl RedisStore {
    /// Delete a key; returns whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let removed: usize = conn.del(self.key(key)).await?;
        Ok(removed > 0)
    }

    /// Delete several keys; returns how many existed
    pub async fn delete_many<K: AsRef<str>>(&self, keys: &[K]) -> Result<usize> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_connection().await?;
        let removed: usize = conn.del(self.prefix.apply_all(keys)).await?;
        Ok(removed)
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let exists: bool = conn.exists(self.key(key)).await?;
        Ok(exists)
    }

    /// Set expiration time in seconds; returns false if the key is missing
    pub async fn expire(&self, key: &str, ttl: u64) -> Result<bool> {
        let seconds = i64::try_from(ttl)
            .map_err(|_| StoreError::Config(format!("Expiry of {} seconds is out of range", ttl)))?;
        let mut conn = self.get_connection().await?;
        let set: bool = conn.expire(self.key(key), seconds).await?;
        Ok(set)
    }

    /// Remove the expiration of a key
    pub async fn persist(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let removed: bool = conn.persist(self.key(key)).await?;
        Ok(removed)
    }

    /// Time to live in seconds; -1 without expiry, -2 when missing
    pub async fn ttl(&self, key: &str) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        let ttl: i64 = conn.ttl(self.key(key)).await?;
        Ok(ttl)
    }

    /// Rename a key inside the namespace
    pub async fn rename(&self, key: &str, new_key: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.rename(self.key(key), self.key(new_key)).await?;
        Ok(())
    }

    /// Type of the value stored at a key (`none` when missing)
    pub async fn key_type(&self, key: &str) -> Result<String> {
        let mut conn = self.get_connection().await?;
        let kind: String = redis::cmd("TYPE")
            .arg(self.key(key))
            .query_async(&mut conn)
            .await?;
        Ok(kind)
    }

    /// Keys in the namespace matching a glob pattern, prefix stripped
    ///
    /// Uses SCAN, so the server is never blocked on a full keyspace walk.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let pattern = self.prefix.apply_pattern(pattern);
        let mut cursor: u64 = 0;
        let mut found = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await?;

            found.extend(
                batch
                    .iter()
                    .filter_map(|k| self.prefix.strip_exact(k))
                    .map(str::to_string),
            );

            if next == 0 {
                break;
            }
            cursor = next;
        }

        found.sort();
        found.dedup();
        Ok(found)
    }
}
