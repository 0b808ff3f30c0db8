/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer module for total ordering of queue mutations.
//!
//! This module provides a single-writer Sequencer that owns a QueueEngine
//! and ensures all mutations are executed in a deterministic, totally-ordered
//! sequence with monotonic sequence numbers. It is the mutual-exclusion
//! boundary to use when several tasks register sales, delete them or reorder
//! the log concurrently.
//!
//! # Architecture
//!
//! - Commands are submitted via an async channel
//! - A single event loop processes commands in order, under the engine's write lock
//! - Each command receives a monotonic sequence number and nanosecond timestamp
//! - Results are returned via oneshot channels
//! - Events are emitted to registered listeners in sequence order
//! - Events can be journaled and replayed into an identical engine
//!
//! # Examples
//!
//! ```no_run
//! use turnqueue::sequencer::{Sequencer, QueueCommand};
//! use turnqueue::{QueueEngine, SalespersonId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sequencer = Sequencer::new(QueueEngine::new());
//!
//! // Register an event listener
//! sequencer.add_listener(|event| {
//!     println!("Event {}: {:?}", event.sequence_num, event.result);
//! });
//!
//! let client = sequencer.client();
//! let handle = sequencer.spawn();
//!
//! let receipt = client
//!     .submit(QueueCommand::RegisterSale {
//!         salesperson_id: SalespersonId::from("ana"),
//!         at: 1_000,
//!     })
//!     .await?;
//! assert!(receipt.is_applied());
//!
//! drop(client);
//! handle.wait().await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod core;
pub mod event;
pub mod journal;
pub mod receipt;
pub mod replay;
pub mod result;

#[cfg(test)]
mod tests;

// Re-export main types
pub use command::QueueCommand;
pub use core::{CommandEnvelope, QueueReader, Sequencer, SequencerClient, SequencerError, SequencerHandle};
pub use event::SequencerEvent;
pub use journal::{InMemoryJournal, Journal};
pub use receipt::SequencerReceipt;
pub use replay::{ReplayEngine, ReplayError};
pub use result::{NoOpReason, SequencerResult};
