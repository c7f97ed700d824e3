//! Convenient re-exports of commonly used types from recordstore.
//!
//! Import this prelude module to quickly access the most frequently used
//! types without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use recordstore::prelude::*;
//! ```

pub use recordstore_core::{
    action::Action,
    backend::{RecordBackend, RecordBackendBuilder},
    config::StoreConfig,
    error::{RecordStoreError, RecordStoreResult},
    filter::Filter,
    record::{Record, UUID_FIELD},
    store::RecordStore,
};
