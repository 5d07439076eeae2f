//! Error types for safehaven.
//!
//! This module defines all error types used throughout the safehaven crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for safehaven operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A stored collection could not be decoded or breaks a collection invariant.
    #[error("collection '{key}' is corrupted: {reason}")]
    CorruptCollection {
        /// Key the collection is stored under.
        key: &'static str,
        /// What was wrong with the stored value.
        reason: String,
    },

    // === Record Errors ===
    /// No record in the collection has the requested identifier.
    #[error("no {kind} with id {id}")]
    NotFound {
        /// Kind of record looked up, e.g. "help request".
        kind: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// A help request cannot advance past its final status.
    #[error("help request {id} is already completed")]
    AlreadyCompleted {
        /// Identifier of the request.
        id: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Intake Errors ===
    /// A submitted form field was rejected.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// User-facing description of the problem.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for safehaven operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given form field.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a corrupted collection error.
    #[must_use]
    pub fn corrupt_collection(key: &'static str, reason: impl Into<String>) -> Self {
        Self::CorruptCollection {
            key,
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by the user's input rather than the
    /// environment: a rejected form field, an unknown id or a request that
    /// cannot advance.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::AlreadyCompleted { .. }
        )
    }

    /// Check if this error indicates a stored collection failed to decode.
    #[must_use]
    pub fn is_corrupt_collection(&self) -> bool {
        matches!(self, Self::CorruptCollection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = Error::validation("email", "Please enter a valid email address");
        assert_eq!(
            err.to_string(),
            "invalid email: Please enter a valid email address"
        );
        assert!(err.is_user_error());
        assert!(!err.is_corrupt_collection());
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound {
            kind: "legal request",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "no legal request with id abc");
        assert!(err.is_user_error());
        assert!(!err.is_corrupt_collection());
    }

    #[test]
    fn test_corrupt_collection_display() {
        let err = Error::corrupt_collection("helpRequests", "expected value at line 1");
        let msg = err.to_string();
        assert!(msg.contains("helpRequests"));
        assert!(msg.contains("expected value"));
        assert!(err.is_corrupt_collection());
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "min_phone_length must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("min_phone_length"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
