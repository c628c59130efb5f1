//! Redis connection settings

use super::{default_connect_timeout, default_database, default_host, default_port};
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static settings consumed by the connection guard
///
/// These are opaque to the facade; anything the client library can express
/// is passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisSettings {
    /// Server host name or address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// ACL user name
    #[serde(default)]
    pub username: Option<String>,
    /// Password
    #[serde(default)]
    pub password: Option<String>,
    /// Name announced with `CLIENT SETNAME` after connecting
    #[serde(default)]
    pub client_name: Option<String>,
    /// Default logical database
    #[serde(default = "default_database")]
    pub database: i64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Namespace prepended to every key and channel
    #[serde(default)]
    pub key_prefix: String,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            client_name: None,
            database: default_database(),
            connect_timeout: default_connect_timeout(),
            key_prefix: String::new(),
        }
    }
}

impl RedisSettings {
    /// Settings for `host:port` with everything else defaulted
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Same settings on another logical database
    pub fn with_database(&self, database: i64) -> Self {
        Self {
            database,
            ..self.clone()
        }
    }

    /// Connect timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Connection parameters for the client library
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.database,
                username: self.username.clone(),
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }

    /// Target rendered as a URL for logging, password masked
    pub fn sanitized_url(&self) -> String {
        let raw = format!("redis://{}:{}/{}", self.host, self.port, self.database);
        match url::Url::parse(&raw) {
            Ok(mut parsed) => {
                if let Some(username) = &self.username {
                    let _ = parsed.set_username(username);
                }
                if self.password.is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            }
            Err(_) => "invalid_url".to_string(),
        }
    }
}
