//! Error types for dualstore
//!
//! The structure analyzer and the storage selectors are infallible; errors
//! only arise at the edges (parsing uploads, talking to stores, reading
//! configuration and files).

use thiserror::Error;

/// The main error type for dualstore
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Parsing Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    // ============================================================================
    // Store Errors
    // ============================================================================
    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Record '{id}' not found")]
    RecordNotFound { id: String },

    // ============================================================================
    // Merge Errors
    // ============================================================================
    #[error("Invalid merge strategy: {name}")]
    InvalidMergeStrategy { name: String },

    #[error("Record '{id}' is not a JSON file")]
    NotJson { id: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    /// Create a not-JSON error
    pub fn not_json(id: impl Into<String>) -> Self {
        Self::NotJson { id: id.into() }
    }
}

/// Result type alias for dualstore
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("bad value");
        assert_eq!(err.to_string(), "Configuration error: bad value");

        let err = Error::not_found("rel-3");
        assert_eq!(err.to_string(), "Record 'rel-3' not found");

        let err = Error::InvalidMergeStrategy {
            name: "zip".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid merge strategy: zip");
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::store("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Store error: inner"));
    }
}
