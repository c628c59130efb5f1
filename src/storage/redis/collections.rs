//! Redis list operations
//!
//! Push/pop from either end, ranges and trimming, with JSON variants.

use super::store::{RedisStore, decode_all, decode_opt, encode};
use crate::utils::error::Result;
use redis::AsyncCommands;
use serde::Serialize;
use serde::de::DeserializeOwned;

impl RedisStore {
    /// Push value to the head of a list; returns the new length
    pub async fn list_left_push(&self, key: &str, value: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let len: usize = conn.lpush(self.key(key), value).await?;
        Ok(len)
    }

    /// Push value to the tail of a list; returns the new length
    pub async fn list_right_push(&self, key: &str, value: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let len: usize = conn.rpush(self.key(key), value).await?;
        Ok(len)
    }

    /// Push a JSON-encoded value to the head of a list
    pub async fn list_left_push_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<usize> {
        self.list_left_push(key, &encode(value)?).await
    }

    /// Push a JSON-encoded value to the tail of a list
    pub async fn list_right_push_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<usize> {
        self.list_right_push(key, &encode(value)?).await
    }

    /// Pop value from the head of a list
    pub async fn list_left_pop(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.lpop(self.key(key), None).await?;
        Ok(value)
    }

    /// Pop value from the tail of a list
    pub async fn list_right_pop(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.rpop(self.key(key), None).await?;
        Ok(value)
    }

    /// Pop and decode a JSON value from the head of a list
    pub async fn list_left_pop_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        decode_opt(self.list_left_pop(key).await?)
    }

    /// Pop and decode a JSON value from the tail of a list
    pub async fn list_right_pop_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        decode_opt(self.list_right_pop(key).await?)
    }

    /// Get list range; `stop` is inclusive and may be negative
    pub async fn list_range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let values: Vec<String> = conn.lrange(self.key(key), start, stop).await?;
        Ok(values)
    }

    /// Get and decode a list range of JSON values
    pub async fn list_range_json<T: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<T>> {
        decode_all(self.list_range(key, start, stop).await?)
    }

    /// Get list length
    pub async fn list_length(&self, key: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let len: usize = conn.llen(self.key(key)).await?;
        Ok(len)
    }

    /// Remove occurrences of `value`; see LREM for the meaning of `count`
    pub async fn list_remove(&self, key: &str, count: isize, value: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let removed: usize = conn.lrem(self.key(key), count, value).await?;
        Ok(removed)
    }

    /// Keep only the elements in `start..=stop`
    pub async fn list_trim(&self, key: &str, start: isize, stop: isize) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.ltrim(self.key(key), start, stop).await?;
        Ok(())
    }
}
