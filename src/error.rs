//! Error types for stores, configuration and theme parsing.
//!
//! The resolver itself never fails: every degradation falls back to a safe
//! default. These errors surface only from the collaborators that touch the
//! filesystem or parse user input.

use std::path::PathBuf;

use thiserror::Error;

/// A string that is not one of `dark`, `light` or `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme mode '{value}' (expected dark, light or auto)")]
pub struct ParseThemeModeError {
    /// The rejected input.
    pub value: String,
}

/// Error returned when a preference store cannot be read or persisted.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written
    #[error("failed to access preference file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The backing file does not hold a JSON object of strings
    #[error("preference file '{}' is not valid: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned when a configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid JSON for [`Config`](crate::Config)
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseThemeModeError {
            value: "purple".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("purple"));
        assert!(msg.contains("dark, light or auto"));
    }

    #[test]
    fn test_store_error_mentions_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/prefs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/prefs.json"));
        assert!(msg.contains("denied"));
    }
}
