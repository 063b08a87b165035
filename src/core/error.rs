//! Error handling for the modgen generation library.
//!
//! This module defines the main error type `Error` used for failures that abort
//! a generation run, along with a convenient `Result` type alias. Recoverable
//! problems (unknown template names, bad declarations, unwritable resources) are
//! not errors in this sense; they are collected as
//! [`Diagnostic`](crate::core::diagnostics::Diagnostic)s instead.
//!
//! # Examples
//!
//! ```
//! use modgen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("namespace is required"))
//! }
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for modgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for modgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_config_creation() {
        let error = Error::config("Invalid configuration");
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_error_template_creation() {
        let error = Error::template("Built-in template missing");
        assert!(matches!(error, Error::Template(_)));
        assert_eq!(
            error.to_string(),
            "Template error: Built-in template missing"
        );
    }

    #[test]
    fn test_error_from_str_and_string() {
        let error: Error = "Test error message".into();
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: Test error message");

        let error: Error = "Test string error".to_string().into();
        assert_eq!(error.to_string(), "Configuration error: Test string error");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("I/O error"));
        assert!(error.to_string().contains("File not found"));
    }

    #[test]
    fn test_error_from_toml_error() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let error: Error = parsed.unwrap_err().into();
        assert!(matches!(error, Error::Toml(_)));
        assert!(error.to_string().starts_with("TOML parsing error"));
    }

    #[test]
    fn test_error_from_serde_json_error() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid json");
        let error: Error = json_result.unwrap_err().into();
        assert!(matches!(error, Error::Json(_)));
        assert!(error.to_string().contains("JSON parsing error"));
    }
}
