//! Validation trait definition

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
