//! Configuration management for the facade
//!
//! Settings are read from a YAML file or from `REDIS_*` environment variables.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, StoreError};
use std::path::Path;
use tracing::{debug, info};

impl RedisSettings {
    /// Load settings from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading Redis settings from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let settings: RedisSettings = serde_yaml::from_str(&content)?;

        settings.check()?;
        debug!("Redis settings loaded successfully");
        Ok(settings)
    }

    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading Redis settings from environment variables");
        let settings = Self::from_lookup(|key| std::env::var(key).ok())?;
        settings.check()?;
        Ok(settings)
    }

    /// Build settings from an arbitrary key lookup, starting from defaults
    ///
    /// Recognized keys: `REDIS_HOST`, `REDIS_PORT`, `REDIS_USERNAME`,
    /// `REDIS_PASSWORD`, `REDIS_CLIENT_NAME`, `REDIS_DATABASE`,
    /// `REDIS_CONNECT_TIMEOUT`, `REDIS_KEY_PREFIX`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(host) = lookup("REDIS_HOST") {
            settings.host = host;
        }
        if let Some(port) = lookup("REDIS_PORT") {
            settings.port = port
                .parse()
                .map_err(|e| StoreError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Some(username) = lookup("REDIS_USERNAME") {
            settings.username = Some(username);
        }
        if let Some(password) = lookup("REDIS_PASSWORD") {
            settings.password = Some(password);
        }
        if let Some(name) = lookup("REDIS_CLIENT_NAME") {
            settings.client_name = Some(name);
        }
        if let Some(database) = lookup("REDIS_DATABASE") {
            settings.database = database
                .parse()
                .map_err(|e| StoreError::Config(format!("Invalid database index: {}", e)))?;
        }
        if let Some(timeout) = lookup("REDIS_CONNECT_TIMEOUT") {
            settings.connect_timeout = timeout
                .parse()
                .map_err(|e| StoreError::Config(format!("Invalid connect timeout: {}", e)))?;
        }
        if let Some(prefix) = lookup("REDIS_KEY_PREFIX") {
            settings.key_prefix = prefix;
        }

        Ok(settings)
    }

    /// Validate, converting the failure into a config error
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| StoreError::Config(format!("Redis settings error: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
