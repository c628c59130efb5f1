//! Redis Sorted Set operations

use super::store::{RedisStore, decode_all, encode};
use crate::utils::error::Result;
use redis::AsyncCommands;
use serde::Serialize;
use serde::de::DeserializeOwned;

impl RedisStore {
    /// Add member to sorted set with score; returns true when the member is new
    pub async fn sorted_set_add(&self, key: &str, member: &str, score: f64) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let added: usize = conn.zadd(self.key(key), member, score).await?;
        Ok(added > 0)
    }

    /// Add a JSON-encoded member with score
    pub async fn sorted_set_add_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        member: &T,
        score: f64,
    ) -> Result<bool> {
        self.sorted_set_add(key, &encode(member)?, score).await
    }

    /// Remove a member from a sorted set; returns whether it was present
    pub async fn sorted_set_remove(&self, key: &str, member: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let removed: usize = conn.zrem(self.key(key), member).await?;
        Ok(removed > 0)
    }

    /// Members by rank, lowest score first; `stop` is inclusive
    pub async fn sorted_set_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let members: Vec<String> = conn.zrange(self.key(key), start, stop).await?;
        Ok(members)
    }

    /// Members by rank together with their scores
    pub async fn sorted_set_range_with_scores(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(String, f64)>> {
        let mut conn = self.get_connection().await?;
        let members: Vec<(String, f64)> =
            conn.zrange_withscores(self.key(key), start, stop).await?;
        Ok(members)
    }

    /// Members whose score lies in `min..=max`
    pub async fn sorted_set_range_by_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let members: Vec<String> = conn.zrangebyscore(self.key(key), min, max).await?;
        Ok(members)
    }

    /// Members by rank, decoded from JSON
    pub async fn sorted_set_range_json<T: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<T>> {
        decode_all(self.sorted_set_range(key, start, stop).await?)
    }

    /// Score of a member
    pub async fn sorted_set_score(&self, key: &str, member: &str) -> Result<Option<f64>> {
        let mut conn = self.get_connection().await?;
        let score: Option<f64> = conn.zscore(self.key(key), member).await?;
        Ok(score)
    }

    /// Add `delta` to a member's score, creating it if needed
    pub async fn sorted_set_increment(&self, key: &str, member: &str, delta: f64) -> Result<f64> {
        let mut conn = self.get_connection().await?;
        let score: f64 = conn.zincr(self.key(key), member, delta).await?;
        Ok(score)
    }

    /// Number of members
    pub async fn sorted_set_length(&self, key: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let len: usize = conn.zcard(self.key(key)).await?;
        Ok(len)
    }

    /// Zero-based rank of a member, lowest score first
    pub async fn sorted_set_rank(&self, key: &str, member: &str) -> Result<Option<usize>> {
        let mut conn = self.get_connection().await?;
        let rank: Option<usize> = conn.zrank(self.key(key), member).await?;
        Ok(rank)
    }
}
