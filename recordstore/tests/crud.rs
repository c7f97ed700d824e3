//! End-to-end behavior of the record store over the in-memory backend.

use std::time::Duration;

use async_trait::async_trait;
use bson::{Document, doc};
use serde::{Deserialize, Serialize};

use recordstore::{
    memory::InMemoryStore,
    prelude::*,
};

const DB: &str = "recordstore_test_db";
const COLLECTION: &str = "recordstore_test_collection";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TestObject {
    uuid: String,
    name: String,
    value: f64,
}

fn test_objects() -> Vec<TestObject> {
    vec![
        TestObject { uuid: "1".to_string(), name: "Object".to_string(), value: 42.0 },
        TestObject { uuid: "2".to_string(), name: "Object".to_string(), value: 37.5 },
        TestObject { uuid: "3".to_string(), name: "Object".to_string(), value: 12.8 },
    ]
}

async fn store_with(objects: &[TestObject]) -> RecordStore<InMemoryStore> {
    let store = RecordStore::new(InMemoryStore::new());

    for object in objects {
        store
            .perform(DB, COLLECTION, Action::Create, Record::from_value(object).unwrap())
            .await
            .unwrap();
    }

    store
}

fn by_uuid(uuid: &str) -> Filter {
    Filter::from_pairs(vec!["uuid".into(), uuid.into()]).unwrap()
}

#[tokio::test]
async fn create_then_fetch_round_trips_the_record() {
    let store = store_with(&test_objects()).await;

    let found: TestObject = store
        .fetch_one_required(&by_uuid("1"), DB, COLLECTION)
        .await
        .unwrap();

    assert_eq!(found, test_objects()[0]);
}

#[tokio::test]
async fn mutations_without_a_uuid_touch_nothing() {
    let store = store_with(&test_objects()).await;
    let invalid = Record::from_document(doc! { "name": "Object", "value": 1.0 });

    for action in [Action::Create, Action::Update, Action::Delete] {
        let result = store.perform(DB, COLLECTION, action, invalid.clone()).await;

        assert!(matches!(result, Err(RecordStoreError::InvalidRecord(_))));
    }

    let all: Vec<TestObject> = store
        .fetch_many(&Filter::empty(), DB, COLLECTION)
        .await
        .unwrap();
    assert_eq!(all.len(), test_objects().len());
}

#[tokio::test]
async fn a_non_string_uuid_is_also_invalid() {
    let store = store_with(&[]).await;
    let invalid = Record::from_document(doc! { "uuid": 1_i32, "name": "Object" });

    let result = store.perform(DB, COLLECTION, Action::Create, invalid).await;

    assert!(matches!(result, Err(RecordStoreError::InvalidRecord(_))));
}

#[tokio::test]
async fn delete_then_fetch_finds_nothing() {
    let store = store_with(&test_objects()).await;

    let mut tombstone = Record::new();
    tombstone.set("uuid", "1");
    store
        .perform(DB, COLLECTION, Action::Delete, tombstone)
        .await
        .unwrap();

    let found: Option<TestObject> = store.fetch_one(&by_uuid("1"), DB, COLLECTION).await.unwrap();
    assert_eq!(found, None);

    // Deleting the same identifier again still succeeds.
    let mut tombstone = Record::new();
    tombstone.set("uuid", "1");
    store
        .perform(DB, COLLECTION, Action::Delete, tombstone)
        .await
        .unwrap();
}

#[tokio::test]
async fn fetch_many_returns_every_match_regardless_of_insertion_order() {
    let mut reversed = test_objects();
    reversed.reverse();
    let store = store_with(&reversed).await;

    let mut found: Vec<TestObject> = store
        .fetch_many(
            &Filter::from_pairs(vec!["name".into(), "Object".into()]).unwrap(),
            DB,
            COLLECTION,
        )
        .await
        .unwrap();
    found.sort_by(|a, b| a.uuid.cmp(&b.uuid));

    assert_eq!(found, test_objects());
}

#[tokio::test]
async fn partial_update_preserves_absent_fields() {
    let store = store_with(&test_objects()).await;

    let mut patch = Record::new();
    patch.set("uuid", "2").set("value", 75.0);
    store
        .perform(DB, COLLECTION, Action::Update, patch)
        .await
        .unwrap();

    let updated: TestObject = store
        .fetch_one_required(&by_uuid("2"), DB, COLLECTION)
        .await
        .unwrap();

    assert_eq!(updated.value, 75.0);
    // The name field was absent from the update payload.
    assert_eq!(updated.name, "Object");
}

#[tokio::test]
async fn updating_an_unknown_uuid_succeeds_without_effect() {
    let store = store_with(&test_objects()).await;

    let mut patch = Record::new();
    patch.set("uuid", "18").set("value", 1.0);
    store
        .perform(DB, COLLECTION, Action::Update, patch)
        .await
        .unwrap();

    let found: Option<TestObject> = store.fetch_one(&by_uuid("18"), DB, COLLECTION).await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn no_match_is_empty_rather_than_an_error() {
    let store = store_with(&test_objects()).await;

    let one: Option<TestObject> = store.fetch_one(&by_uuid("18"), DB, COLLECTION).await.unwrap();
    assert_eq!(one, None);

    let many: Vec<TestObject> = store
        .fetch_many(&by_uuid("18"), DB, COLLECTION)
        .await
        .unwrap();
    assert!(many.is_empty());
}

#[tokio::test]
async fn must_exist_fetch_reports_not_found() {
    let store = store_with(&test_objects()).await;

    let result: RecordStoreResult<TestObject> =
        store.fetch_one_required(&by_uuid("18"), DB, COLLECTION).await;

    assert!(matches!(result, Err(RecordStoreError::NotFound(_))));
}

#[tokio::test]
async fn operator_filters_select_by_comparison() {
    let store = store_with(&test_objects()).await;

    let mut found: Vec<TestObject> = store
        .fetch_many(&Filter::with_operator("value", "$gt", 20.0), DB, COLLECTION)
        .await
        .unwrap();
    found.sort_by(|a, b| a.uuid.cmp(&b.uuid));

    let uuids: Vec<&str> = found.iter().map(|o| o.uuid.as_str()).collect();
    assert_eq!(uuids, ["1", "2"]);
}

#[tokio::test]
async fn one_undecodable_record_fails_the_whole_fetch() {
    let store = store_with(&test_objects()).await;

    store
        .perform(
            DB,
            COLLECTION,
            Action::Create,
            Record::from_document(doc! { "uuid": "4", "name": "Object", "value": "not a number" }),
        )
        .await
        .unwrap();

    let result: RecordStoreResult<Vec<TestObject>> = store
        .fetch_many(
            &Filter::from_pairs(vec!["name".into(), "Object".into()]).unwrap(),
            DB,
            COLLECTION,
        )
        .await;

    assert!(matches!(result, Err(RecordStoreError::Decode(_))));
}

#[tokio::test]
async fn duplicate_create_surfaces_the_store_conflict() {
    let store = store_with(&test_objects()).await;

    let result = store
        .perform(
            DB,
            COLLECTION,
            Action::Create,
            Record::from_value(&test_objects()[0]).unwrap(),
        )
        .await;

    assert!(matches!(result, Err(RecordStoreError::Backend(_))));
}

/// A backend that never completes, for exercising operation deadlines.
#[derive(Debug)]
struct StalledBackend;

#[async_trait]
impl RecordBackend for StalledBackend {
    async fn insert_record(&self, _: &str, _: &str, _: Document) -> RecordStoreResult<()> {
        std::future::pending().await
    }

    async fn delete_record(&self, _: &str, _: &str, _: &str) -> RecordStoreResult<()> {
        std::future::pending().await
    }

    async fn update_record(&self, _: &str, _: &str, _: &str, _: Document) -> RecordStoreResult<()> {
        std::future::pending().await
    }

    async fn find_records(
        &self,
        _: &str,
        _: &str,
        _: &Filter,
        _: Option<usize>,
    ) -> RecordStoreResult<Vec<Document>> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn operation_deadline_bounds_backend_calls() {
    let store =
        RecordStore::new(StalledBackend).with_operation_timeout(Duration::from_millis(20));

    let result: RecordStoreResult<Option<TestObject>> =
        store.fetch_one(&Filter::empty(), DB, COLLECTION).await;

    assert!(matches!(result, Err(RecordStoreError::Timeout(_))));
}
