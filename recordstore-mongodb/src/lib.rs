//! MongoDB backend implementation for recordstore.
//!
//! This crate provides a MongoDB-based implementation of the `RecordBackend`
//! trait: uuid-keyed mutations and canonical-filter queries executed by the
//! MongoDB query engine over a single shared client.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! recordstore = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! The builder consumes a validated [`StoreConfig`](recordstore_core::config::StoreConfig),
//! assembles the connection endpoint from its host and port, and establishes
//! the session within a bounded startup timeout (10 seconds by default).
//!
//! # Example
//!
//! ```ignore
//! use recordstore_core::{backend::RecordBackendBuilder, config::StoreConfig};
//! use recordstore_mongodb::MongoStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoreConfig::from_file("store.config.json")?;
//!     let store = MongoStore::builder(config).build().await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as recordstore_mongodb;

pub mod store;

pub use store::{MongoStore, MongoStoreBuilder};
