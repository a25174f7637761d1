//! Error types for the BECU conversion pipeline.
//!
//! The pipeline itself never fails on bad row data. Errors only exist at the
//! edges:
//!
//! - [`ReadError`] - the input could not be turned into text
//! - [`UploadError`] - the HTTP boundary rejected the submission
//! - [`ConfigError`] - the server configuration is invalid
//! - [`ServerError`] - top-level error returned by the HTTP handlers
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;

use axum::http::StatusCode;
use thiserror::Error;

// =============================================================================
// Read Errors
// =============================================================================

/// Errors while acquiring the text of an input file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to read file from disk.
    #[error("Cannot read file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes could not be decoded as text.
    #[error("Failed to decode file as {encoding}")]
    Encoding { encoding: String },
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Submissions rejected before the pipeline runs.
#[derive(Debug, Error)]
pub enum UploadError {
    /// More than one file in a single request.
    #[error("only one file may be uploaded at a time (received {0})")]
    MultipleFiles(usize),

    /// The request carried no file part.
    #[error("No file provided")]
    NoFile,

    /// The multipart body could not be read.
    #[error("Multipart error: {0}")]
    Multipart(String),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid server configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    /// Host and port do not form a socket address.
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Upload rejected at the boundary.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Uploaded bytes could not be read as text.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Upload(_) => StatusCode::BAD_REQUEST,
            ServerError::Read(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for read operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // UploadError -> ServerError
        let server_err: ServerError = UploadError::MultipleFiles(2).into();
        assert!(server_err.to_string().contains("only one file"));
        assert_eq!(server_err.status(), StatusCode::BAD_REQUEST);

        // ReadError -> ServerError
        let read_err = ReadError::Encoding { encoding: "utf-16".into() };
        let server_err: ServerError = read_err.into();
        assert!(server_err.to_string().contains("utf-16"));
        assert_eq!(server_err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = ReadError::Io {
            path: PathBuf::from("/tmp/missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.csv"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_config_error_format() {
        let err = ConfigError::InvalidValue {
            key: "BECU_PORT",
            value: "abc".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("BECU_PORT"));
        assert!(msg.contains("abc"));
    }
}
