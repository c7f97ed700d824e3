//! Filter construction and canonical serialization.
//!
//! A [`Filter`] holds the canonical Extended JSON form of a structured query
//! document — the exact text the execution layer parses back into the store's
//! native representation. Three constructor forms are provided, in increasing
//! order of expressiveness:
//!
//! - [`Filter::from_pairs`] - flat alternating key/value sequence
//! - [`Filter::with_operator`] - single-field operator expression
//! - [`Filter::from_document`] - arbitrary nested query document
//!
//! Serialization is deterministic (document field order is preserved) and
//! type-preserving: integers, doubles, booleans, strings, arrays, nested
//! documents and null all round-trip through the canonical text into the same
//! BSON values.
//!
//! # Example
//!
//! ```ignore
//! use recordstore_core::filter::Filter;
//! use bson::doc;
//!
//! let by_uuid = Filter::from_pairs(vec!["uuid".into(), "1".into()])?;
//! let adults = Filter::with_operator("age", "$gt", 25);
//! let complex = Filter::from_document(doc! { "$or": [ { "age": { "$lt": 13 } }, { "guardian": { "$exists": true } } ] });
//! ```

use bson::{Bson, Document};

use crate::error::{RecordStoreError, RecordStoreResult};

/// A structured query expression in canonical serialized form.
///
/// The empty filter (`{}`) matches all records. Operator content is never
/// validated here: an invalid operator such as `"$gt$"` still serializes
/// syntactically, and rejecting it is the store's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    canonical: String,
}

impl Filter {
    /// Creates the match-all filter.
    pub fn empty() -> Self {
        Self::from_document(Document::new())
    }

    /// Builds a filter from a flat sequence of alternating key/value BSON values.
    ///
    /// Each even-positioned value must be a BSON string naming a field; the
    /// following value becomes that field's match value.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Query`] if a key position holds a
    /// non-string value, or if a trailing key has no value to pair with.
    /// Malformed input is never silently dropped.
    pub fn from_pairs<I>(values: I) -> RecordStoreResult<Self>
    where
        I: IntoIterator<Item = Bson>,
    {
        let mut document = Document::new();
        let mut values = values.into_iter();

        while let Some(key) = values.next() {
            let Bson::String(key) = key else {
                return Err(RecordStoreError::Query(format!(
                    "filter key must be a string, got {:?}",
                    key.element_type(),
                )));
            };

            let Some(value) = values.next() else {
                return Err(RecordStoreError::Query(format!(
                    "unpaired trailing filter key '{key}'",
                )));
            };

            document.insert(key, value);
        }

        Ok(Self::from_document(document))
    }

    /// Builds a single-field operator expression `{field: {operator: value}}`.
    ///
    /// The operator string is passed through verbatim; its validity is left to
    /// the execution layer.
    pub fn with_operator(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Bson>,
    ) -> Self {
        let mut expression = Document::new();
        expression.insert(operator.into(), value.into());

        let mut document = Document::new();
        document.insert(field.into(), expression);

        Self::from_document(document)
    }

    /// Builds a filter from an arbitrary structured query document.
    ///
    /// This is the full-expressiveness form: any nested field/operator
    /// expression the underlying store's query language accepts is
    /// representable here.
    pub fn from_document(document: Document) -> Self {
        Self {
            canonical: Bson::Document(document)
                .into_canonical_extjson()
                .to_string(),
        }
    }

    /// Parses an existing canonical Extended JSON string into a filter.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Query`] if the text is not valid canonical
    /// Extended JSON or does not describe a document.
    pub fn from_canonical(text: &str) -> RecordStoreResult<Self> {
        parse_canonical(text)?;

        Ok(Self { canonical: text.to_string() })
    }

    /// Returns the canonical serialized form of this filter.
    pub fn as_canonical(&self) -> &str {
        &self.canonical
    }

    /// Returns true if this is the match-all filter.
    pub fn is_empty(&self) -> bool {
        self.canonical == "{}"
    }

    /// Reconstructs the database-native query document from the canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Query`] if the canonical text fails to
    /// parse back into a document.
    pub fn to_document(&self) -> RecordStoreResult<Document> {
        parse_canonical(&self.canonical)
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical)
    }
}

fn parse_canonical(text: &str) -> RecordStoreResult<Document> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let bson = Bson::try_from(value).map_err(|e| RecordStoreError::Query(e.to_string()))?;

    match bson {
        Bson::Document(document) => Ok(document),
        other => Err(RecordStoreError::Query(format!(
            "filter must be a document, got {:?}",
            other.element_type(),
        ))),
    }
}
