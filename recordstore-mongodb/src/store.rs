use std::time::Duration;

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, Credential, FindOptions},
};
use tracing::info;

use recordstore_core::{
    backend::{RecordBackend, RecordBackendBuilder},
    config::StoreConfig,
    error::{RecordStoreError, RecordStoreResult},
    filter::Filter,
    record::UUID_FIELD,
};

/// Default bound on session establishment.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

/// MongoDB record storage backend.
///
/// Holds the single shared `mongodb::Client`; the client is safe for
/// concurrent use and is reused by every operation. Database and collection
/// names are per-call parameters.
#[derive(Debug)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Wraps an already-connected client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a builder that connects using the given configuration.
    pub fn builder(config: StoreConfig) -> MongoStoreBuilder {
        MongoStoreBuilder::new(config)
    }

    fn collection(&self, db: &str, collection: &str) -> MongoCollection<Document> {
        self.client.database(db).collection(collection)
    }

    async fn shutdown(self) -> RecordStoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

#[async_trait]
impl RecordBackend for MongoStore {
    async fn insert_record(
        &self,
        db: &str,
        collection: &str,
        record: Document,
    ) -> RecordStoreResult<()> {
        self.collection(db, collection)
            .insert_one(record)
            .await
            .map_err(|e| RecordStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn delete_record(
        &self,
        db: &str,
        collection: &str,
        uuid: &str,
    ) -> RecordStoreResult<()> {
        self.collection(db, collection)
            .delete_one(doc! { UUID_FIELD: uuid })
            .await
            .map_err(|e| RecordStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn update_record(
        &self,
        db: &str,
        collection: &str,
        uuid: &str,
        fields: Document,
    ) -> RecordStoreResult<()> {
        self.collection(db, collection)
            .update_one(doc! { UUID_FIELD: uuid }, doc! { "$set": fields })
            .await
            .map_err(|e| RecordStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn find_records(
        &self,
        db: &str,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> RecordStoreResult<Vec<Document>> {
        let mut options = FindOptions::default();

        if let Some(limit) = limit {
            options.limit = Some(limit as i64);
        }

        Ok(
            self.collection(db, collection)
                .find(filter.to_document()?)
                .with_options(options)
                .await
                .map_err(|e| RecordStoreError::Backend(e.to_string()))?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(|e| RecordStoreError::Backend(e.to_string()))?
                .into_iter()
                .map(strip_native_id)
                .collect()
        )
    }

    async fn shutdown(self) -> RecordStoreResult<()> {
        self.shutdown().await
    }
}

// The server stamps its own `_id` primary key on every stored document; it is
// not part of the caller's record shape.
fn strip_native_id(document: Document) -> Document {
    Document::from_iter(
        document
            .into_iter()
            .filter(|(key, _)| key != "_id")
    )
}

/// Builder that establishes a MongoDB session from a [`StoreConfig`].
pub struct MongoStoreBuilder {
    config: StoreConfig,
    startup_timeout: Duration,
}

impl MongoStoreBuilder {
    pub fn new(config: StoreConfig) -> Self {
        Self { config, startup_timeout: STARTUP_TIMEOUT }
    }

    /// Overrides the default 10 second bound on session establishment.
    pub fn startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    fn connection_uri(&self) -> String {
        format!("mongodb://{}:{}", self.config.host, self.config.port)
    }
}

#[async_trait]
impl RecordBackendBuilder for MongoStoreBuilder {
    type Backend = MongoStore;

    /// Connects and verifies the session with a ping, so connection failures
    /// surface here rather than on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Connection`] if the session cannot be
    /// established within the startup timeout.
    async fn build(self) -> RecordStoreResult<Self::Backend> {
        let mut options = ClientOptions::parse(&self.connection_uri())
            .await
            .map_err(|e| RecordStoreError::Connection(e.to_string()))?;

        options.credential = Some(
            Credential::builder()
                .username(self.config.username.clone())
                .password(self.config.password.clone())
                .build(),
        );
        options.connect_timeout = Some(self.startup_timeout);
        options.server_selection_timeout = Some(self.startup_timeout);

        let client = Client::with_options(options)
            .map_err(|e| RecordStoreError::Connection(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RecordStoreError::Connection(e.to_string()))?;

        info!(host = %self.config.host, port = %self.config.port, "connected to mongodb");

        Ok(MongoStore::new(client))
    }
}
