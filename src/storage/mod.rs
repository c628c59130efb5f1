//! Storage layer
//!
//! This module provides the Redis facade and its connection guard.

/// Redis facade module
pub mod redis;

pub use self::redis::{RedisStore, Subscription};
