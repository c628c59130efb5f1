//! Configuration models

pub mod settings;

pub use settings::RedisSettings;

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    6379
}

pub fn default_database() -> i64 {
    0
}

pub fn default_connect_timeout() -> u64 {
    5
}
