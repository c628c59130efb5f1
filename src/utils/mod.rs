//! Utility modules for the facade
//!
//! - **error**: Crate-wide error type and result alias
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{Result, StoreError};
pub use logging::LogFormat;
