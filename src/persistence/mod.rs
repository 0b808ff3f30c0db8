/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Explicit save/load adapter for the queue engine.
//!
//! The engine never persists anything on its own. The surrounding
//! application takes a [`QueueSnapshot`] at the boundary, hands it to a
//! [`SnapshotStore`], and restores an engine from it on start-up.
//!
//! # Examples
//!
//! ```
//! use turnqueue::persistence::{MemoryStore, SnapshotStore};
//! use turnqueue::{QueueConfig, QueueEngine, SalespersonId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = QueueEngine::new();
//! engine.register_sale(SalespersonId::from("ana"), 1_000);
//!
//! let mut store = MemoryStore::new();
//! store.save(&engine.snapshot()?)?;
//!
//! let restored = QueueEngine::restore(store.load()?.unwrap(), QueueConfig::default())?;
//! assert_eq!(restored.queue(), engine.queue());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod error;
pub mod snapshot;
pub mod store;

pub use error::PersistenceError;
pub use snapshot::{QueueSnapshot, SNAPSHOT_VERSION};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore};
