//! Error and result types for record store operations.
//!
//! Use [`RecordStoreResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use std::time::Duration;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a record store.
///
/// Every error is terminal for the single operation that raised it; none of them
/// invalidate the shared backend handle for subsequent calls.
#[derive(Error, Debug)]
pub enum RecordStoreError {
    /// A required configuration field is missing or has the wrong type.
    #[error("Config error: {0}")]
    Config(String),
    /// The store session could not be established within the startup timeout.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A mutating action was invoked on a record without a valid string `uuid` field.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    /// An action name outside {create, delete, update} was supplied.
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),
    /// A filter document failed to serialize or deserialize.
    #[error("Query error: {0}")]
    Query(String),
    /// A matched document's shape is incompatible with the requested target type.
    #[error("Decode error: {0}")]
    Decode(String),
    /// No record matched a must-exist fetch. The argument is the collection name.
    #[error("No record matching filter in collection {0}")]
    NotFound(String),
    /// An operation exceeded the configured deadline.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
    /// An error surfaced as-is from the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for record store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

impl From<SerdeJsonError> for RecordStoreError {
    fn from(err: SerdeJsonError) -> Self {
        RecordStoreError::Query(err.to_string())
    }
}
