//! Common test utilities for redis-facade

pub mod fixtures;

use redis_facade::{RedisSettings, RedisStore};
use std::sync::atomic::{AtomicU32, Ordering};

pub use fixtures::Order;

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

static NEXT_NAMESPACE: AtomicU32 = AtomicU32::new(0);

/// A prefix no other test in this run uses
pub fn unique_prefix(name: &str) -> String {
    let n = NEXT_NAMESPACE.fetch_add(1, Ordering::Relaxed);
    format!("facade-test:{}:{}:{}:", std::process::id(), name, n)
}

/// Settings for the live test server
pub fn live_settings(name: &str) -> RedisSettings {
    let host = std::env::var("REDIS_TEST_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("REDIS_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(6379);

    RedisSettings {
        password: std::env::var("REDIS_TEST_PASSWORD").ok(),
        client_name: Some("redis-facade-tests".to_string()),
        key_prefix: unique_prefix(name),
        ..RedisSettings::new(host, port)
    }
}

/// A connected store in its own namespace
pub async fn live_store(name: &str) -> RedisStore {
    RedisStore::connect(&live_settings(name))
        .await
        .expect("Redis test server must be reachable")
}

/// Remove everything the test wrote
pub async fn cleanup(store: &RedisStore) {
    let keys = store.keys("*").await.unwrap_or_default();
    let _ = store.delete_many(&keys).await;
    store.close().await;
}
