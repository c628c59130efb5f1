//! End-to-end tests for redis-facade
//!
//! These tests run every operation group against a real Redis server.
//! Run with: REDIS_TEST_HOST=127.0.0.1 cargo test -- --ignored
//!
//! Environment variables:
//! - REDIS_TEST_HOST: Server host (required)
//! - REDIS_TEST_PORT: Server port, default 6379
//! - REDIS_TEST_PASSWORD: Password, if the server needs one
//!
//! Each test writes under its own key prefix and removes its keys afterwards.

pub mod collections;
pub mod keys;
