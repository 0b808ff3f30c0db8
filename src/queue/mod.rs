/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Queue-ordering engine.
//!
//! Turns a log of timestamped sales and a roster of eligible salespeople into
//! a single deterministic serving order: whoever sold most recently goes to
//! the back, and whoever went longest without a sale is served next.
//!
//! # Architecture
//!
//! - [`EventLog`] stores sales newest first, indexed by id
//! - [`QueueBuilder`] derives the serving order on demand (pull-based)
//! - [`RosterFilter`] narrows it to eligible people active today
//! - [`reorder()`] rewrites the explicit ranking stored on sales
//! - [`QueueEngine`] owns all of the above and exposes the mutation API
//!
//! The engine never reads the clock: every operation that depends on time
//! takes `now` from the caller.

pub mod builder;
pub mod config;
pub mod engine;
pub mod log;
pub mod reorder;
pub mod roster;
pub mod time;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::QueueBuilder;
pub use config::{ConfigError, QueueConfig};
pub use engine::{HistoryScope, QueueEngine};
pub use log::EventLog;
pub use reorder::{clamp_index, reorder};
pub use roster::{FnRoster, Roster, RosterEntry, RosterFilter, RosterLookup, roster_fn};
pub use types::{QueueEntry, Sale, SaleId, Salesperson, SalespersonId, SalespersonUpdate, Timestamp};
