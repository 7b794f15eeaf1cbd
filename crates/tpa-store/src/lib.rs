//! TPA Store
//!
//! Owns the persisted collection of training programs:
//! - Validated create / edit / delete over an in-memory ordered list
//! - Whole-collection JSON persistence under one storage key
//! - Rollback of the in-memory list when a write fails
//! - Search, status and type filtering
//!
//! # Example
//!
//! ```rust
//! use tpa_model::ProgramDraft;
//! use tpa_store::{MemoryStorage, ProgramQuery, ProgramStore, StoreConfig};
//!
//! let (mut store, _) = ProgramStore::open(MemoryStorage::new(), &StoreConfig::default()).unwrap();
//!
//! let draft = ProgramDraft::new("AI Basics")
//!     .with_type("technical")
//!     .with_department("IT")
//!     .with_start_date("2025-01-10")
//!     .with_duration(4)
//!     .with_max_participants(20)
//!     .with_program_cost(500_000);
//! let record = store.add(&draft).unwrap();
//!
//! let hits = store.query(&ProgramQuery::new().with_search("ai"));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id(), record.id());
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod query;
pub mod storage;
pub mod store;

// Re-exports
pub use config::StoreConfig;
pub use error::{
    ConfigError, PersistenceError, StorageCorruptionError, StorageError, StoreError,
};
pub use file::FileStorage;
pub use query::{Filter, ProgramQuery};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{LoadOutcome, ProgramStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for store operations
    pub use crate::{
        FileStorage, KeyValueStorage, LoadOutcome, MemoryStorage, ProgramQuery, ProgramStore,
        StoreConfig, StoreError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
