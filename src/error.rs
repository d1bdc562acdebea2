//! Error types for ecosystem discovery and integration.

use std::path::PathBuf;

/// Errors that can occur while scanning or integrating an ecosystem.
///
/// Discovery itself recovers from almost everything locally; these
/// variants surface from the cleaner, the validator and the integrator's
/// input handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required location could not be determined.
    #[error("not found: {0}")]
    NotFound(String),

    /// The path is invalid or inaccessible.
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input was well-formed JSON but not the expected document.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Walking a directory tree failed.
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A specialized Result type for ecosystem operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_not_found() {
        let err = Error::NotFound("home directory".to_string());
        assert_eq!(err.to_string(), "not found: home directory");
    }

    #[test]
    fn error_display_invalid_input() {
        let err = Error::InvalidInput("expected an object".to_string());
        assert_eq!(err.to_string(), "invalid input: expected an object");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }
}
