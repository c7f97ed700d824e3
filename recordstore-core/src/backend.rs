//! Storage backend abstraction for the record store.
//!
//! The [`RecordBackend`] trait is the seam between this layer and whatever
//! holds the actual data: a MongoDB deployment, an in-memory map, or anything
//! else that can execute uuid-keyed mutations and filter queries. The store
//! consumes a connected backend handle and never manages transport,
//! authentication, or reconnection itself.
//!
//! Implementations must be safe for concurrent use from multiple tasks; each
//! call is an independent, unordered request, and callers needing
//! read-after-write consistency for the same identifier must serialize their
//! own calls.

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{error::RecordStoreResult, filter::Filter};

/// Abstract interface for record storage backends.
///
/// Each method performs exactly one underlying store call: no retries, and no
/// transactions spanning multiple operations. Errors surface as-is through
/// [`RecordStoreError::Backend`](crate::error::RecordStoreError::Backend) and
/// never invalidate the handle for subsequent calls.
#[async_trait]
pub trait RecordBackend: Send + Sync + Debug {
    /// Inserts `record` into the collection as a new document.
    ///
    /// Duplicate-identifier conflicts are the store's to report; this layer
    /// performs no deduplication.
    async fn insert_record(
        &self,
        db: &str,
        collection: &str,
        record: Document,
    ) -> RecordStoreResult<()>;

    /// Deletes the single document whose `uuid` field equals `uuid`.
    ///
    /// Deleting a non-existent identifier is not an error: the call completes
    /// with zero documents affected.
    async fn delete_record(&self, db: &str, collection: &str, uuid: &str)
        -> RecordStoreResult<()>;

    /// Applies a partial field-set overwrite to the document whose `uuid`
    /// field equals `uuid`.
    ///
    /// Only fields present in `fields` are modified; all other stored fields
    /// are preserved. Updating a non-existent identifier completes without
    /// error.
    async fn update_record(
        &self,
        db: &str,
        collection: &str,
        uuid: &str,
        fields: Document,
    ) -> RecordStoreResult<()>;

    /// Executes `filter` against the collection and returns the matching
    /// documents, up to `limit` when one is given.
    async fn find_records(
        &self,
        db: &str,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> RecordStoreResult<Vec<Document>>;

    /// Cleanly shuts down the backend, releasing held resources.
    ///
    /// The default implementation is a no-op; backends holding external
    /// connections should override it.
    async fn shutdown(self) -> RecordStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait RecordBackendBuilder {
    type Backend: RecordBackend;

    async fn build(self) -> RecordStoreResult<Self::Backend>;
}
