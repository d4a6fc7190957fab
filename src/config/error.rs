//! Configuration error types.

use thiserror::Error;

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from semantic configuration validation.
#[derive(Debug, Clone, Error)]
#[error("Invalid configuration for '{field}': {reason}")]
pub struct ConfigValidationError {
    pub field: String,
    pub reason: String,
}

impl ConfigValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
