//! Record representation and generic encode/decode.
//!
//! A [`Record`] is a mapping from field names to BSON values. Mutating actions
//! key records by the [`UUID_FIELD`] entry, a caller-chosen string identifier
//! distinct from any storage-engine-internal primary key.

use bson::{Bson, Document, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::{RecordStoreError, RecordStoreResult};

/// The field every mutating action uses to target a record.
pub const UUID_FIELD: &str = "uuid";

/// A single stored record: named fields holding arbitrary BSON values.
///
/// # Example
///
/// ```ignore
/// use recordstore_core::record::Record;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Player {
///     uuid: String,
///     name: String,
///     score: f64,
/// }
///
/// let record = Record::from_value(&Player {
///     uuid: Record::new_uuid(),
///     name: "Alice".to_string(),
///     score: 42.0,
/// })?;
/// assert!(record.uuid().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Document,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing BSON document as a record.
    pub fn from_document(fields: Document) -> Self {
        Self { fields }
    }

    /// Serializes any `Serialize` value into a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::InvalidRecord`] if the value does not
    /// serialize to a document (e.g. a bare scalar or sequence).
    pub fn from_value<T: Serialize>(value: &T) -> RecordStoreResult<Self> {
        match serialize_to_bson(value).map_err(|e| RecordStoreError::InvalidRecord(e.to_string()))? {
            Bson::Document(fields) => Ok(Self { fields }),
            other => Err(RecordStoreError::InvalidRecord(format!(
                "record must serialize to a document, got {:?}",
                other.element_type(),
            ))),
        }
    }

    /// Returns the record's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::InvalidRecord`] if the `uuid` field is
    /// missing or not a string.
    pub fn uuid(&self) -> RecordStoreResult<&str> {
        match self.fields.get(UUID_FIELD) {
            Some(Bson::String(id)) => Ok(id),
            Some(other) => Err(RecordStoreError::InvalidRecord(format!(
                "'{UUID_FIELD}' field must be a string, got {:?}",
                other.element_type(),
            ))),
            None => Err(RecordStoreError::InvalidRecord(format!(
                "missing '{UUID_FIELD}' field",
            ))),
        }
    }

    /// Generates a fresh v4 identifier suitable for the `uuid` field.
    pub fn new_uuid() -> String {
        Uuid::new_v4().to_string()
    }

    /// Stamps a freshly generated identifier onto this record, replacing any
    /// existing one, and returns it.
    pub fn assign_new_uuid(&mut self) -> String {
        let id = Self::new_uuid();
        self.fields.insert(UUID_FIELD, id.clone());
        id
    }

    /// Sets a single field on this record.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Bson>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns a reference to the underlying document.
    pub fn as_document(&self) -> &Document {
        &self.fields
    }

    /// Consumes the record, returning the underlying document.
    pub fn into_document(self) -> Document {
        self.fields
    }

    /// Decodes this record into a caller-specified type.
    ///
    /// Decoding is all-or-nothing: either every field required by `T` is
    /// present and compatible, or the whole operation fails.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Decode`] if the record's shape is
    /// incompatible with `T`.
    pub fn decode<T: DeserializeOwned>(self) -> RecordStoreResult<T> {
        deserialize_from_bson(Bson::Document(self.fields))
            .map_err(|e| RecordStoreError::Decode(e.to_string()))
    }
}

impl From<Document> for Record {
    fn from(fields: Document) -> Self {
        Self::from_document(fields)
    }
}
