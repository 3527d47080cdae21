//! Error types and result types for resource store operations.
//!
//! Use [`StoreResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a resource store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The external identifier is not a well-formed store key.
    #[error("Invalid id: {0}")]
    InvalidIdentifier(String),
    /// A resource was handed to the store without an identifier.
    /// The argument is the collection name.
    #[error("Resource has no id for collection {0}")]
    MissingIdentifier(String),
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A document with the given ID already exists in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document {0} already exists in collection {1}")]
    AlreadyExists(String, String),
    /// No document with the given ID exists in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document {0} not found in collection {1}")]
    NotFound(String, String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for resource store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_message() {
        let err = StoreError::InvalidIdentifier("not-an-id".to_string());
        assert_eq!(err.to_string(), "Invalid id: not-an-id");
    }

    #[test]
    fn test_not_found_message() {
        let err = StoreError::NotFound("abc".to_string(), "enrollmentresponses".to_string());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("enrollmentresponses"));
    }

    #[test]
    fn test_serde_json_error_converts_to_serialization() {
        let err: StoreError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
