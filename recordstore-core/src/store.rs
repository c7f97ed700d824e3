//! The record store front-end: action execution and result decoding.
//!
//! [`RecordStore`] owns a single connected backend handle, created once at
//! startup and shared by every operation. The handle is safe for concurrent
//! use; lifecycle (build/shutdown) belongs to the caller.

use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::{
    action::Action,
    backend::RecordBackend,
    error::{RecordStoreError, RecordStoreResult},
    filter::Filter,
    record::Record,
};

/// A record store bound to a specific backend implementation.
///
/// # Example
///
/// ```ignore
/// use recordstore_core::{action::Action, filter::Filter, record::Record, store::RecordStore};
///
/// let store = RecordStore::new(backend);
/// store.perform("appdb", "players", Action::Create, record).await?;
///
/// let found: Option<Player> = store
///     .fetch_one(&Filter::from_pairs(vec!["uuid".into(), "1".into()])?, "appdb", "players")
///     .await?;
/// ```
#[derive(Debug)]
pub struct RecordStore<B: RecordBackend> {
    backend: B,
    operation_timeout: Option<Duration>,
}

impl<B: RecordBackend> RecordStore<B> {
    /// Creates a store over a connected backend, with no operation deadline.
    pub fn new(backend: B) -> Self {
        Self { backend, operation_timeout: None }
    }

    /// Bounds every subsequent backend call with a deadline.
    ///
    /// On expiry the operation fails with
    /// [`RecordStoreError::Timeout`]; the backend handle stays usable.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Executes one mutating action against a collection.
    ///
    /// The record's `uuid` field is the mandatory target identifier; it is
    /// extracted before any store call, so an invalid record never reaches
    /// the backend. Exactly one backend call is made per invocation.
    ///
    /// # Errors
    ///
    /// - [`RecordStoreError::InvalidRecord`] if `uuid` is missing or non-string.
    /// - [`RecordStoreError::Backend`] for store-level failures, surfaced as-is.
    pub async fn perform(
        &self,
        db: &str,
        collection: &str,
        action: Action,
        record: Record,
    ) -> RecordStoreResult<()> {
        let uuid = record.uuid()?.to_string();
        debug!(db, collection, action = %action, uuid = %uuid, "performing record action");

        match action {
            Action::Create => {
                self.bounded(self.backend.insert_record(db, collection, record.into_document()))
                    .await
            }
            Action::Delete => {
                self.bounded(self.backend.delete_record(db, collection, &uuid))
                    .await
            }
            Action::Update => {
                self.bounded(self.backend.update_record(db, collection, &uuid, record.into_document()))
                    .await
            }
        }
    }

    /// Executes the filter and decodes at most one matching record.
    ///
    /// "No match" is not an error: the result is `Ok(None)`. Use
    /// [`fetch_one_required`](Self::fetch_one_required) for must-exist
    /// semantics.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Decode`] if the matched document's shape is
    /// incompatible with `T`.
    pub async fn fetch_one<T>(
        &self,
        filter: &Filter,
        db: &str,
        collection: &str,
    ) -> RecordStoreResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let mut documents = self
            .bounded(self.backend.find_records(db, collection, filter, Some(1)))
            .await?;
        debug!(db, collection, filter = %filter, matched = documents.len(), "fetched one");

        match documents.pop() {
            Some(document) => Ok(Some(Record::from_document(document).decode()?)),
            None => Ok(None),
        }
    }

    /// Executes the filter and decodes exactly one matching record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::NotFound`] when nothing matches.
    pub async fn fetch_one_required<T>(
        &self,
        filter: &Filter,
        db: &str,
        collection: &str,
    ) -> RecordStoreResult<T>
    where
        T: DeserializeOwned,
    {
        self.fetch_one(filter, db, collection)
            .await?
            .ok_or_else(|| RecordStoreError::NotFound(collection.to_string()))
    }

    /// Executes the filter and decodes every matching record.
    ///
    /// Each document decodes independently, but the result is all-or-nothing:
    /// one incompatible document fails the whole operation with no partial
    /// result. An empty match set is `Ok(vec![])`.
    pub async fn fetch_many<T>(
        &self,
        filter: &Filter,
        db: &str,
        collection: &str,
    ) -> RecordStoreResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let documents = self
            .bounded(self.backend.find_records(db, collection, filter, None))
            .await?;
        debug!(db, collection, filter = %filter, matched = documents.len(), "fetched many");

        documents
            .into_iter()
            .map(|document| Record::from_document(document).decode())
            .collect()
    }

    /// Shuts down the store, releasing the backend's resources.
    pub async fn shutdown(self) -> RecordStoreResult<()> {
        self.backend.shutdown().await
    }

    async fn bounded<F, T>(&self, operation: F) -> RecordStoreResult<T>
    where
        F: Future<Output = RecordStoreResult<T>>,
    {
        match self.operation_timeout {
            Some(deadline) => tokio::time::timeout(deadline, operation)
                .await
                .map_err(|_| RecordStoreError::Timeout(deadline))?,
            None => operation.await,
        }
    }
}
