//! Error handling for the engine
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate.
//!
//! The control surface itself (run/stop/reset/toggle/insert) never returns
//! errors: invalid input and no-op conflicts degrade to "nothing happened".
//! The variants here cover the infrastructure around the engine:
//! configuration files and channel plumbing.

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EngineError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::Config("missing speed".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing speed");
    }

    #[test]
    fn test_error_with_context() {
        let err = EngineError::Channel("disconnected".to_string());
        let with_ctx = err.with_context("Failed to publish snapshot");
        assert!(with_ctx.to_string().contains("Failed to publish snapshot"));
    }
}
