//! String operations
//!
//! Raw string values plus JSON-encoded variants. A missing key reads as `None`.

use super::store::{RedisStore, decode_opt, encode};
use crate::utils::error::Result;
use redis::AsyncCommands;
use serde::Serialize;
use serde::de::DeserializeOwned;

impl RedisStore {
    /// Get a raw string value
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    /// Set a raw string value with optional TTL in seconds
    pub async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let key = self.key(key);

        if let Some(ttl_seconds) = ttl {
            let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        } else {
            let _: () = conn.set(key, value).await?;
        }
        Ok(())
    }

    /// Get a JSON-encoded value
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        decode_opt(self.get(key).await?)
    }

    /// Store a value as JSON with optional TTL in seconds
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<u64>,
    ) -> Result<()> {
        let encoded = encode(value)?;
        self.set(key, &encoded, ttl).await
    }

    /// Set only if the key does not exist; returns whether it was set
    pub async fn set_nx(&self, key: &str, value: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let set: bool = conn.set_nx(self.key(key), value).await?;
        Ok(set)
    }

    /// Set a new value and return the previous one
    pub async fn get_set(&self, key: &str, value: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let previous: Option<String> = conn.getset(self.key(key), value).await?;
        Ok(previous)
    }

    /// Append to a string value; returns the new length
    pub async fn append(&self, key: &str, value: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let len: usize = conn.append(self.key(key), value).await?;
        Ok(len)
    }

    /// Length of a string value, 0 when missing
    pub async fn str_len(&self, key: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let len: usize = conn.strlen(self.key(key)).await?;
        Ok(len)
    }
}
