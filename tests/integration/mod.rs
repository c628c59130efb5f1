//! Integration tests for redis-facade
//!
//! These tests run without a Redis server.
