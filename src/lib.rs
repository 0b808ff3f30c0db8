/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # turnqueue
//!
//! A fair rotation engine for retail sales floors.
//!
//! Every salesperson is ranked by how long ago they last sold: whoever went
//! longest without a sale is served next, and a new sale sends its seller to
//! the back of the line. People who never sold come before everyone who did.
//! The order is recomputed from the sale log on every read, so it is always
//! consistent with the current log.
//!
//! ## Modules
//!
//! - [`queue`]: the synchronous engine, the sale log, the queue builder, the
//!   roster filter and manual reorder
//! - [`sequencer`]: a single-writer event loop that totally orders mutations,
//!   emits journaled events and supports deterministic replay
//! - [`persistence`]: checksummed snapshots and explicit save/load stores
//!
//! ## Example
//!
//! ```
//! use turnqueue::{QueueEngine, Salesperson, SalespersonId};
//!
//! const HOUR: i64 = 3_600_000;
//!
//! let mut engine = QueueEngine::new();
//! engine.add_salesperson(Salesperson::new("a", "Alice"));
//! engine.add_salesperson(Salesperson::new("b", "Bruno"));
//!
//! engine.register_sale(SalespersonId::from("a"), 9 * HOUR);
//! engine.register_sale(SalespersonId::from("b"), 9 * HOUR + 15 * 60_000);
//! engine.register_sale(SalespersonId::from("a"), 9 * HOUR + 30 * 60_000);
//!
//! let order: Vec<String> = engine.queue().iter().map(|e| e.id.to_string()).collect();
//! assert_eq!(order, ["b", "a"]);
//! ```
//!
//! ## Time
//!
//! Timestamps are milliseconds since the Unix epoch. The engine never reads
//! the clock; "today" is the local day of the caller's `now`, using the UTC
//! offset from [`QueueConfig`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for mutations, `trace` for
//! queue builds, `warn` for rejected replays and snapshots). Install a
//! subscriber in the host application to see them.

pub mod persistence;
pub mod queue;
pub mod sequencer;

pub use persistence::{PersistenceError, QueueSnapshot};
pub use queue::{
    ConfigError, HistoryScope, QueueConfig, QueueEngine, QueueEntry, Roster, RosterEntry,
    RosterLookup, Sale, SaleId, Salesperson, SalespersonId, SalespersonUpdate, Timestamp,
};
pub use sequencer::{QueueCommand, Sequencer, SequencerClient, SequencerResult};
