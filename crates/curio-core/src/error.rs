//! Error types for curio.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using curio's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for curio operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Item not found by (uuid, version)
    #[error("Item not found: {uuid} v{version}")]
    ItemNotFound { uuid: Uuid, version: i32 },

    /// Institution not found by its stable unique id
    #[error("Institution not found: {0}")]
    InstitutionNotFound(i64),

    /// Request payload failed validation; `field` tags the offending input
    #[error("Validation failed on '{field}': {message}")]
    Validation { field: String, message: String },

    /// Search operation failed
    #[error("Search error: {0}")]
    Search(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a validation error for a named request field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("hierarchy topic".to_string());
        assert_eq!(err.to_string(), "Not found: hierarchy topic");
    }

    #[test]
    fn test_error_display_item_not_found() {
        let uuid = Uuid::nil();
        let err = Error::ItemNotFound { uuid, version: 3 };
        assert_eq!(err.to_string(), format!("Item not found: {} v3", uuid));
    }

    #[test]
    fn test_error_display_institution_not_found() {
        let err = Error::InstitutionNotFound(42);
        assert_eq!(err.to_string(), "Institution not found: 42");
    }

    #[test]
    fn test_validation_carries_field_tag() {
        let err = Error::validation("date", "cannot parse 'nope'");
        match &err {
            Error::Validation { field, message } => {
                assert_eq!(field, "date");
                assert!(message.contains("nope"));
            }
            _ => panic!("Expected Validation error"),
        }
        assert_eq!(
            err.to_string(),
            "Validation failed on 'date': cannot parse 'nope'"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("CURIO_TIME_ZONE_OFFSET is malformed".to_string());
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
