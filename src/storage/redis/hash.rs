//! Redis Hash operations

use super::store::{RedisStore, decode, decode_opt, encode};
use crate::utils::error::Result;
use redis::AsyncCommands;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

impl RedisStore {
    /// Set hash field value; returns true when the field is new
    pub async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let added: usize = conn.hset(self.key(key), field, value).await?;
        Ok(added > 0)
    }

    /// Set a hash field to a JSON-encoded value
    pub async fn hash_set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        field: &str,
        value: &T,
    ) -> Result<bool> {
        self.hash_set(key, field, &encode(value)?).await
    }

    /// Set several hash fields at once
    pub async fn hash_set_multiple<F, V>(&self, key: &str, entries: &[(F, V)]) -> Result<()>
    where
        F: AsRef<str>,
        V: AsRef<str>,
    {
        if entries.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_connection().await?;
        let entries: Vec<(&str, &str)> = entries
            .iter()
            .map(|(f, v)| (f.as_ref(), v.as_ref()))
            .collect();
        let _: () = conn.hset_multiple(self.key(key), &entries[..]).await?;
        Ok(())
    }

    /// Get hash field value
    pub async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.hget(self.key(key), field).await?;
        Ok(value)
    }

    /// Get and decode a JSON hash field
    pub async fn hash_get_json<T: DeserializeOwned>(
        &self,
        key: &str,
        field: &str,
    ) -> Result<Option<T>> {
        decode_opt(self.hash_get(key, field).await?)
    }

    /// Get all hash fields and values
    pub async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.get_connection().await?;
        let hash: HashMap<String, String> = conn.hgetall(self.key(key)).await?;
        Ok(hash)
    }

    /// Get all hash fields, decoding every value as JSON
    pub async fn hash_get_all_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<HashMap<String, T>> {
        self.hash_get_all(key)
            .await?
            .into_iter()
            .map(|(field, raw)| Ok((field, decode(&raw)?)))
            .collect()
    }

    /// Delete hash field; returns whether it existed
    pub async fn hash_delete(&self, key: &str, field: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let removed: usize = conn.hdel(self.key(key), field).await?;
        Ok(removed > 0)
    }

    /// Check if a hash field exists
    pub async fn hash_exists(&self, key: &str, field: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let exists: bool = conn.hexists(self.key(key), field).await?;
        Ok(exists)
    }

    /// All field names of a hash
    pub async fn hash_keys(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let fields: Vec<String> = conn.hkeys(self.key(key)).await?;
        Ok(fields)
    }

    /// All values of a hash
    pub async fn hash_values(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let values: Vec<String> = conn.hvals(self.key(key)).await?;
        Ok(values)
    }

    /// Number of fields in a hash
    pub async fn hash_length(&self, key: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let len: usize = conn.hlen(self.key(key)).await?;
        Ok(len)
    }

    /// Increment an integer hash field
    pub async fn hash_increment(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        let new_value: i64 = conn.hincr(self.key(key), field, delta).await?;
        Ok(new_value)
    }
}
