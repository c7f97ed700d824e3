//! Main recordstore crate providing uuid-keyed record access over document stores.
//!
//! This crate is the primary entry point for users of the recordstore layer.
//! It re-exports the core types from the sub-crates and provides convenient
//! access to the storage backends.
//!
//! # Features
//!
//! - **Filter intents** - Flat key/value pairs, operator expressions and arbitrary
//!   query documents serialized to one deterministic canonical form
//! - **uuid-keyed mutations** - Create, delete and update actions targeting a single
//!   record by its caller-chosen string identifier
//! - **Typed decoding** - Query results decode into any Serde-deserializable type,
//!   with all-or-nothing semantics per record
//! - **Multiple backends** - In-memory storage built in, MongoDB behind the
//!   `mongodb` feature
//!
//! # Quick Start
//!
//! ```ignore
//! use recordstore::{prelude::*, memory::InMemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Player {
//!     pub uuid: String,
//!     pub name: String,
//!     pub score: f64,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = RecordStore::new(InMemoryStore::new());
//!
//!     let player = Player {
//!         uuid: Record::new_uuid(),
//!         name: "Alice".to_string(),
//!         score: 42.0,
//!     };
//!
//!     // Insert the player record
//!     store
//!         .perform("appdb", "players", Action::Create, Record::from_value(&player).unwrap())
//!         .await
//!         .unwrap();
//!
//!     // Query it back by name
//!     let found: Option<Player> = store
//!         .fetch_one(
//!             &Filter::from_pairs(vec!["name".into(), "Alice".into()]).unwrap(),
//!             "appdb",
//!             "players",
//!         )
//!         .await
//!         .unwrap();
//!
//!     println!("Queried player: {:?}", found);
//!
//!     // Shutdown the store
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Connecting to MongoDB
//!
//! With the `mongodb` feature enabled, the same store front-end runs over a
//! real deployment. Configuration is validated field by field before any
//! connection attempt, and session establishment is bounded by a startup
//! timeout:
//!
//! ```ignore
//! use recordstore::{prelude::*, mongodb::MongoStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoreConfig::from_file("store.config.json")?;
//!     let store = RecordStore::new(MongoStore::builder(config).build().await?);
//!
//!     // ... same operations as above ...
//!
//!     store.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires the `mongodb` feature)

pub mod prelude;

pub use recordstore_core::{action, backend, config, error, filter, record, store};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use recordstore_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use recordstore_mongodb::{MongoStore, MongoStoreBuilder};
}
