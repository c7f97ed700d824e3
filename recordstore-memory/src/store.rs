//! In-memory storage implementation for record stores.
//!
//! Records live in nested HashMaps behind an async-aware read-write lock,
//! keyed by database, collection and the record's `uuid` field.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document};
use mea::rwlock::RwLock;

use recordstore_core::{
    backend::{RecordBackend, RecordBackendBuilder},
    error::{RecordStoreError, RecordStoreResult},
    filter::Filter,
    record::UUID_FIELD,
};

use crate::evaluator::FilterEvaluator;

type RecordMap = HashMap<String, Document>;
type CollectionMap = HashMap<String, RecordMap>;
type DatabaseMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory record storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so
/// clones share the same underlying data across tasks. Queries scan every
/// record in a collection; this is the development and test backend, not a
/// persistence strategy.
///
/// Mutation semantics match what the record layer expects from a real store:
/// inserting a duplicate identifier surfaces a conflict, while deleting or
/// updating a missing identifier completes with nothing affected.
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    store: Arc<RwLock<DatabaseMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self { store: Arc::new(RwLock::new(DatabaseMap::new())) }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }
}

#[async_trait]
impl RecordBackend for InMemoryStore {
    async fn insert_record(
        &self,
        db: &str,
        collection: &str,
        record: Document,
    ) -> RecordStoreResult<()> {
        let uuid = match record.get(UUID_FIELD) {
            Some(Bson::String(uuid)) => uuid.clone(),
            _ => {
                return Err(RecordStoreError::Backend(format!(
                    "stored records must carry a string '{UUID_FIELD}' field",
                )));
            }
        };

        let mut store = self.store.write().await;
        let records = store
            .entry(db.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default();

        if records.contains_key(&uuid) {
            return Err(RecordStoreError::Backend(format!(
                "duplicate record {uuid} in collection {collection}",
            )));
        }

        records.insert(uuid, record);

        Ok(())
    }

    async fn delete_record(
        &self,
        db: &str,
        collection: &str,
        uuid: &str,
    ) -> RecordStoreResult<()> {
        let mut store = self.store.write().await;

        // Missing database, collection or record: zero documents affected.
        if let Some(records) = store
            .get_mut(db)
            .and_then(|collections| collections.get_mut(collection))
        {
            records.remove(uuid);
        }

        Ok(())
    }

    async fn update_record(
        &self,
        db: &str,
        collection: &str,
        uuid: &str,
        fields: Document,
    ) -> RecordStoreResult<()> {
        let mut store = self.store.write().await;

        if let Some(record) = store
            .get_mut(db)
            .and_then(|collections| collections.get_mut(collection))
            .and_then(|records| records.get_mut(uuid))
        {
            // Partial overwrite: untouched fields keep their stored values.
            for (field, value) in fields {
                record.insert(field, value);
            }
        }

        Ok(())
    }

    async fn find_records(
        &self,
        db: &str,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> RecordStoreResult<Vec<Document>> {
        let filter_document = filter.to_document()?;

        let store = self.store.read().await;
        let Some(records) = store
            .get(db)
            .and_then(|collections| collections.get(collection))
        else {
            return Ok(vec![]);
        };

        let mut matched = Vec::new();

        for record in records.values() {
            if FilterEvaluator::matches(record, &filter_document)? {
                matched.push(record.clone());

                if limit.is_some_and(|limit| matched.len() >= limit) {
                    break;
                }
            }
        }

        Ok(matched)
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl RecordBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> RecordStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
