//! Configuration validation

mod redis_validators;
mod trait_def;

pub use trait_def::Validate;
