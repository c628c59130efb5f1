//! Batch string operations
//!
//! Multi-key reads and writes. Writes go through an atomic pipeline so a TTL
//! can be applied per key.

use super::store::{RedisStore, decode_opt, encode};
use crate::utils::error::Result;
use redis::AsyncCommands;
use serde::Serialize;
use serde::de::DeserializeOwned;

impl RedisStore {
    /// Get multiple keys at once; missing keys are `None`
    pub async fn mget<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<Option<String>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;
        let keys = self.prefix.apply_all(keys);
        // redis-rs sends GET for a single key, whose nil reply would decode as an empty Vec
        let values: Vec<Option<String>> = if keys.len() == 1 {
            vec![conn.get(&keys[0]).await?]
        } else {
            conn.mget(&keys).await?
        };
        Ok(values)
    }

    /// Get multiple JSON-encoded values
    pub async fn mget_json<K, T>(&self, keys: &[K]) -> Result<Vec<Option<T>>>
    where
        K: AsRef<str>,
        T: DeserializeOwned,
    {
        self.mget(keys).await?.into_iter().map(decode_opt).collect()
    }

    /// Set multiple key-value pairs with optional TTL in seconds
    pub async fn mset<K, V>(&self, pairs: &[(K, V)], ttl: Option<u64>) -> Result<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if pairs.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_connection().await?;
        let mut pipe = redis::pipe();
        pipe.atomic();

        for (key, value) in pairs {
            let key = self.key(key.as_ref());
            if let Some(ttl_seconds) = ttl {
                pipe.set_ex(key, value.as_ref(), ttl_seconds);
            } else {
                pipe.set(key, value.as_ref());
            }
        }

        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    /// Store multiple values as JSON with optional TTL in seconds
    pub async fn mset_json<K, T>(&self, pairs: &[(K, T)], ttl: Option<u64>) -> Result<()>
    where
        K: AsRef<str>,
        T: Serialize,
    {
        let encoded = pairs
            .iter()
            .map(|(key, value)| Ok((key.as_ref().to_string(), encode(value)?)))
            .collect::<Result<Vec<(String, String)>>>()?;
        self.mset(&encoded, ttl).await
    }
}
