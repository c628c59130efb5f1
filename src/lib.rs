//! # redis-facade
//!
//! A thin convenience layer over the `redis` crate.
//!
//! ## Features
//!
//! - **Key namespacing**: every key and channel gets a fixed prefix
//! - **JSON values**: `*_json` variants serialize with `serde_json`
//! - **Self-healing connection**: a supervisor task connects lazily and
//!   reconnects when the connection is found broken, returning a typed error
//!   when it cannot
//! - **Operation groups**: strings, lists, hashes, sorted sets, keys,
//!   pub/sub, locks and Lua scripts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redis_facade::{RedisSettings, RedisStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = RedisSettings {
//!         key_prefix: "app:".to_string(),
//!         ..RedisSettings::new("127.0.0.1", 6379)
//!     };
//!     let store = RedisStore::new(&settings)?;
//!
//!     store.set_json("user:1", &vec!["admin", "ops"], Some(60)).await?;
//!     let roles: Option<Vec<String>> = store.get_json("user:1").await?;
//!     println!("roles: {:?}", roles);
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::RedisSettings;
pub use storage::redis::{
    ConnectError, ConnectionGuard, Connector, GuardStats, KeyPrefix, ManagedConnection, Message,
    RedisConnector, RedisHandle, RedisStore, Subscription,
};
pub use utils::error::{Result, StoreError};
