//! In-memory record storage backend for recordstore.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `RecordBackend` trait, suitable for development and testing. Records are
//! stored as BSON documents behind async-aware read-write locks, and filters
//! are evaluated against the same canonical query documents the MongoDB
//! backend executes.
//!
//! # Quick Start
//!
//! ```ignore
//! use recordstore::{action::Action, record::Record, store::RecordStore, memory::InMemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Player {
//!     pub uuid: String,
//!     pub name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RecordStore::new(InMemoryStore::new());
//!
//!     let player = Player { uuid: Record::new_uuid(), name: "Alice".to_string() };
//!     store
//!         .perform("appdb", "players", Action::Create, Record::from_value(&player)?)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as recordstore_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
