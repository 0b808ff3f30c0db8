/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Deterministic replay engine for event journals.
//!
//! [`ReplayEngine`] reads a sequence of [`SequencerEvent`]s from a [`Journal`]
//! and re-applies each command to a fresh [`QueueEngine`], producing an
//! identical final state. Sale ids are taken from the recorded results, so
//! the replayed log matches the original one sale for sale.
//!
//! # Examples
//!
//! ```no_run
//! use turnqueue::sequencer::journal::{Journal, InMemoryJournal};
//! use turnqueue::sequencer::replay::ReplayEngine;
//! use turnqueue::QueueConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let journal = InMemoryJournal::new();
//! let (engine, last_seq) = ReplayEngine::replay_from(&journal, 0, QueueConfig::default())?;
//! println!("Replayed up to sequence {last_seq}");
//! # Ok(())
//! # }
//! ```

use super::command::QueueCommand;
use super::event::SequencerEvent;
use super::journal::Journal;
use super::result::SequencerResult;
use crate::persistence::QueueSnapshot;
use crate::queue::{QueueConfig, QueueEngine, Sale};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during journal replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The journal contains no events to replay.
    #[error("journal is empty, nothing to replay")]
    EmptyJournal,

    /// The requested starting sequence number exceeds the journal's last entry.
    #[error("invalid from_sequence {from_sequence}: journal last sequence is {last_sequence}")]
    InvalidSequence {
        /// The sequence number requested.
        from_sequence: u64,
        /// The last sequence number in the journal.
        last_sequence: u64,
    },

    /// A gap was detected between expected and found sequence numbers.
    #[error("sequence gap detected: expected {expected}, found {found}")]
    SequenceGap {
        /// The expected next sequence number.
        expected: u64,
        /// The actual sequence number found.
        found: u64,
    },

    /// An event cannot be applied to the replayed state.
    #[error("inconsistent event at sequence {sequence_num}: {reason}")]
    Inconsistent {
        /// The sequence number of the offending event.
        sequence_num: u64,
        /// What went wrong.
        reason: String,
    },
}

/// Stateless replay engine that reconstructs [`QueueEngine`] state from a [`Journal`].
///
/// All methods are associated functions (no `&self` receiver); `ReplayEngine`
/// holds no state itself. Use it as a namespace for replay operations.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Replays all events from `from_sequence` onwards onto a fresh engine.
    ///
    /// Returns the reconstructed engine and the sequence number of the last
    /// event applied. Events whose result was a no-op are skipped.
    ///
    /// # Arguments
    ///
    /// * `journal` - the event source
    /// * `from_sequence` - first sequence number to include (inclusive); pass `0` for full replay
    /// * `config` - configuration for the fresh engine
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    /// - [`ReplayError::Inconsistent`] if an event cannot be re-applied
    pub fn replay_from(
        journal: &impl Journal,
        from_sequence: u64,
        config: QueueConfig,
    ) -> Result<(QueueEngine, u64), ReplayError> {
        Self::replay_from_with_progress(journal, from_sequence, config, |_, _| {})
    }

    /// Replays events with a progress callback invoked after each applied event.
    ///
    /// The callback receives `(events_applied: u64, current_sequence: u64)`.
    ///
    /// # Errors
    ///
    /// Same as [`replay_from`](Self::replay_from).
    pub fn replay_from_with_progress(
        journal: &impl Journal,
        from_sequence: u64,
        config: QueueConfig,
        progress: impl Fn(u64, u64),
    ) -> Result<(QueueEngine, u64), ReplayError> {
        Self::check_bounds(journal, from_sequence)?;

        let mut engine = QueueEngine::with_config(config);
        let mut last_seq = 0u64;
        let mut count = 0u64;

        for event in journal.read_from(from_sequence) {
            Self::apply_event(&mut engine, event)?;
            last_seq = event.sequence_num;
            count = count.saturating_add(1);
            progress(count, last_seq);
        }

        Ok((engine, last_seq))
    }

    /// Returns the events with `from_sequence <= sequence_num <= to_sequence`.
    ///
    /// No engine is constructed; this is a pure slice of the journal.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    pub fn replay_range(
        journal: &impl Journal,
        from_sequence: u64,
        to_sequence: u64,
    ) -> Result<Vec<&SequencerEvent>, ReplayError> {
        Self::check_bounds(journal, from_sequence)?;
        Ok(journal.read_range(from_sequence, to_sequence).collect())
    }

    /// Replays the full journal and compares the result to an expected snapshot.
    ///
    /// Returns `Ok(true)` if the replayed profiles and sales match.
    ///
    /// # Errors
    ///
    /// Same as [`replay_from`](Self::replay_from).
    pub fn verify(journal: &impl Journal, expected: &QueueSnapshot) -> Result<bool, ReplayError> {
        let (engine, _) = Self::replay_from(journal, 0, QueueConfig::default())?;
        Ok(state_matches(&engine, expected))
    }

    fn check_bounds(journal: &impl Journal, from_sequence: u64) -> Result<(), ReplayError> {
        if journal.is_empty() {
            return Err(ReplayError::EmptyJournal);
        }

        if let Some(last_sequence) = journal.last_sequence().filter(|last| from_sequence > *last) {
            return Err(ReplayError::InvalidSequence {
                from_sequence,
                last_sequence,
            });
        }
        Ok(())
    }

    /// Applies a single sequencer event to the given engine.
    ///
    /// No-op events are skipped. Deletes and reorders of sales that are not
    /// in the replayed state are tolerated, as happens when replaying from a
    /// midpoint.
    fn apply_event(engine: &mut QueueEngine, event: &SequencerEvent) -> Result<(), ReplayError> {
        if event.result.is_noop() {
            return Ok(());
        }

        match (&event.command, &event.result) {
            (
                QueueCommand::RegisterSale { salesperson_id, at },
                SequencerResult::SaleRegistered { sale_id, .. },
            ) => {
                let sale = Sale::new(*sale_id, salesperson_id.clone(), *at);
                if !engine.insert_sale(sale) {
                    return Err(inconsistent(event, format!("sale {sale_id} already replayed")));
                }
            }
            (QueueCommand::DeleteSale { sale_id }, SequencerResult::SaleDeleted { .. }) => {
                engine.delete_sale(sale_id);
            }
            (
                QueueCommand::Reorder {
                    sale_id,
                    new_index,
                    at,
                },
                SequencerResult::Reordered { .. },
            ) => {
                engine.reorder(sale_id, *new_index, *at);
            }
            (QueueCommand::ClearAll, SequencerResult::Cleared { .. }) => {
                engine.clear_all();
            }
            (QueueCommand::AddSalesperson(profile), SequencerResult::SalespersonAdded { .. }) => {
                engine.add_salesperson(profile.clone());
            }
            (QueueCommand::EnsureSalesperson(profile), SequencerResult::SalespersonAdded { .. }) => {
                engine.ensure_salesperson(profile.clone());
            }
            (QueueCommand::EnsureSalesperson(_), SequencerResult::SalespersonPresent { profile }) => {
                // Replays from a midpoint may not have seen the original registration.
                engine.ensure_salesperson(profile.clone());
            }
            (QueueCommand::UpdateSalesperson { id, update }, SequencerResult::SalespersonUpdated { .. }) => {
                engine.update_salesperson(id, update);
            }
            (QueueCommand::RemoveSalesperson { id }, SequencerResult::SalespersonRemoved { .. }) => {
                engine.remove_salesperson(id);
            }
            (command, result) => {
                return Err(inconsistent(
                    event,
                    format!("result {result:?} does not match command {command:?}"),
                ));
            }
        }

        Ok(())
    }
}

fn inconsistent(event: &SequencerEvent, reason: String) -> ReplayError {
    warn!(sequence = event.sequence_num, %reason, "journal event rejected during replay");
    ReplayError::Inconsistent {
        sequence_num: event.sequence_num,
        reason,
    }
}

/// Compares an engine's profiles and sales with a snapshot.
///
/// Version and checksum are not compared.
///
/// # Examples
///
/// ```
/// use turnqueue::sequencer::replay::state_matches;
/// use turnqueue::QueueEngine;
///
/// let engine = QueueEngine::new();
/// let snapshot = engine.snapshot().unwrap();
/// assert!(state_matches(&engine, &snapshot));
/// ```
#[must_use]
pub fn state_matches(engine: &QueueEngine, expected: &QueueSnapshot) -> bool {
    engine.salespeople() == expected.salespeople.as_slice()
        && engine.log().len() == expected.sales.len()
        && engine.log().iter().zip(&expected.sales).all(|(a, b)| a == b)
}
