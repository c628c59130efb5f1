//! Redis store facade and core connection access
//!
//! Every operation group is an `impl RedisStore` block in its own module. They
//! all obtain a handle from the guard, prefix keys and forward to the client
//! library.

use super::connection::{RedisConnector, RedisHandle};
use super::guard::{ConnectionGuard, GuardStats};
use super::prefix::KeyPrefix;
use crate::config::RedisSettings;
use crate::utils::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Key-prefixing, JSON-encoding facade over a guarded Redis connection
#[derive(Debug, Clone)]
pub struct RedisStore {
    pub(crate) guard: ConnectionGuard<RedisConnector>,
    pub(crate) prefix: KeyPrefix,
}

impl RedisStore {
    /// Create a store; the connection is opened on first use
    ///
    /// Fails outside a tokio runtime.
    pub fn new(settings: &RedisSettings) -> Result<Self> {
        settings.check()?;
        info!("Creating Redis store for {}", settings.sanitized_url());

        let connector = RedisConnector::new(settings)?;
        Ok(Self {
            guard: ConnectionGuard::new(connector)?,
            prefix: KeyPrefix::new(&settings.key_prefix),
        })
    }

    /// Create a store and verify the server answers
    pub async fn connect(settings: &RedisSettings) -> Result<Self> {
        let store = Self::new(settings)?;
        store.health_check().await?;
        Ok(store)
    }

    /// A store on another logical database with the same settings otherwise
    pub fn with_database(&self, database: i64) -> Result<Self> {
        Self::new(&self.settings().with_database(database))
    }

    /// Settings the store connects with
    pub fn settings(&self) -> &RedisSettings {
        self.guard.connector().settings()
    }

    /// Namespace applied to keys and channels
    pub fn prefix(&self) -> &KeyPrefix {
        &self.prefix
    }

    /// Connection guard backing this store
    pub fn guard(&self) -> &ConnectionGuard<RedisConnector> {
        &self.guard
    }

    /// Connect counters of the guard
    pub fn stats(&self) -> GuardStats {
        self.guard.stats()
    }

    /// Get the live connection, reconnecting if needed
    pub async fn get_connection(&self) -> Result<RedisHandle> {
        Ok(self.guard.get_connection().await?)
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing Redis health check");
        self.ping().await?;
        debug!("Redis health check passed");
        Ok(())
    }

    /// Send PING and return the reply
    pub async fn ping(&self) -> Result<String> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong)
    }

    /// Release the connection and stop the guard
    pub async fn close(&self) {
        info!("Closing Redis store");
        self.guard.shutdown().await;
    }

    pub(crate) fn key(&self, key: &str) -> String {
        self.prefix.apply(key)
    }
}

pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub(crate) fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn decode_opt<T: DeserializeOwned>(raw: Option<String>) -> Result<Option<T>> {
    raw.map(|r| decode(&r)).transpose()
}

pub(crate) fn decode_all<T: DeserializeOwned>(raw: Vec<String>) -> Result<Vec<T>> {
    raw.iter().map(|r| decode(r)).collect()
}
