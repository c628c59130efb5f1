//! Redis storage implementation
//!
//! This module provides a guarded Redis connection and the facade operations
//! built on it.
//!
//! ## Module Structure
//!
//! - `guard` - Lazy connect / reactive reconnect supervisor
//! - `connection` - Redis connector and liveness-tracking handle
//! - `store` - The `RedisStore` facade and core connection access
//! - `prefix` - Key namespacing
//! - `cache` - String operations (get, set, JSON values)
//! - `batch` - Batch operations (mget, mset)
//! - `atomic` - Counters and server utilities
//! - `collections` - List operations
//! - `hash` - Hash operations
//! - `sorted_set` - Sorted Set operations
//! - `keys` - Key operations (delete, expire, ttl, scan)
//! - `pubsub` - Pub/Sub operations
//! - `lock` - Token-based locks
//! - `script` - Lua scripting
//! - `tests` - Module tests

// Module declarations
mod atomic;
mod batch;
mod cache;
mod collections;
mod connection;
mod guard;
mod hash;
mod keys;
mod lock;
mod prefix;
mod pubsub;
mod script;
mod sorted_set;
mod store;

// Re-export public types
pub use connection::{RedisConnector, RedisHandle};
pub use guard::{ConnectError, ConnectionGuard, Connector, GuardStats, ManagedConnection};
pub use prefix::KeyPrefix;
pub use pubsub::{Message, Subscription};
pub use store::RedisStore;
