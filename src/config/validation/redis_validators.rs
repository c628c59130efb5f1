//! Redis settings validators
//!
//! Only values the client library cannot represent are rejected here.

use super::trait_def::Validate;
use crate::config::models::RedisSettings;
use tracing::debug;

impl Validate for RedisSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating Redis settings");

        if self.host.trim().is_empty() {
            return Err("Redis host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Redis port must be greater than 0".to_string());
        }

        if self.database < 0 {
            return Err(format!(
                "Redis database index cannot be negative, got {}",
                self.database
            ));
        }

        if self.connect_timeout == 0 {
            return Err("Redis connect timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
