//! A uuid-keyed record access layer over document database clients.
//!
//! This crate is the core of the recordstore project and provides:
//!
//! - **Filter construction** ([`filter`]) - Key/value and operator filter intents serialized to canonical query documents
//! - **Record model** ([`record`]) - uuid-identified records with generic encode/decode
//! - **Actions** ([`action`]) - The create/delete/update mutation kinds
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Record store** ([`store`]) - Action execution and typed result decoding over a shared backend handle
//! - **Configuration** ([`config`]) - Connection settings with explicit per-field validation
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use recordstore_core::{action::Action, filter::Filter, record::Record, store::RecordStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Player {
//!     pub uuid: String,
//!     pub name: String,
//!     pub score: f64,
//! }
//!
//! let store = RecordStore::new(backend);
//! let player = Player { uuid: Record::new_uuid(), name: "Alice".into(), score: 42.0 };
//!
//! store.perform("appdb", "players", Action::Create, Record::from_value(&player)?).await?;
//!
//! let found: Vec<Player> = store
//!     .fetch_many(&Filter::with_operator("score", "$gt", 10.0), "appdb", "players")
//!     .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as recordstore_core;

pub mod action;
pub mod backend;
pub mod config;
pub mod error;
pub mod filter;
pub mod record;
pub mod store;
