/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sales-floor journal.
//!
//! Every sale, reorder and profile change that went through the sequencer is
//! kept here, so a [`QueueEngine`] can be rebuilt after a restart or checked
//! against a saved snapshot.
//!
//! [`QueueEngine`]: crate::QueueEngine

use super::event::SequencerEvent;
use super::replay::ReplayError;

/// Append-only store of queue events, read back by [`ReplayEngine`].
///
/// Events come out in the order they were sequenced.
///
/// [`ReplayEngine`]: super::replay::ReplayEngine
pub trait Journal {
    /// Appends a new event to the journal.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the event cannot be stored.
    fn append(&mut self, event: SequencerEvent) -> Result<(), ReplayError>;

    /// Returns an iterator over all events with `sequence_num >= from_sequence`.
    ///
    /// Events are yielded in ascending sequence order.
    fn read_from(&self, from_sequence: u64) -> impl Iterator<Item = &SequencerEvent> + '_;

    /// Returns an iterator over events with `from_sequence <= sequence_num <= to_sequence`.
    ///
    /// Events are yielded in ascending sequence order.
    fn read_range(
        &self,
        from_sequence: u64,
        to_sequence: u64,
    ) -> impl Iterator<Item = &SequencerEvent> + '_;

    /// Returns the total number of events stored.
    #[must_use]
    fn len(&self) -> usize;

    /// Returns `true` if no events have been appended.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sequence number of the last event, or `None` if empty.
    #[must_use]
    fn last_sequence(&self) -> Option<u64>;
}

/// In-memory implementation of [`Journal`].
///
/// Holds one shift's events in a `Vec`. An event whose sequence number does
/// not exceed the last stored one is refused with [`ReplayError::SequenceGap`].
///
/// # Examples
///
/// ```
/// use turnqueue::sequencer::journal::{Journal, InMemoryJournal};
/// use turnqueue::sequencer::{QueueCommand, SequencerEvent, SequencerResult};
///
/// let mut journal = InMemoryJournal::new();
/// assert!(journal.is_empty());
///
/// let event = SequencerEvent::new(
///     1,
///     0,
///     QueueCommand::ClearAll,
///     SequencerResult::Cleared { removed: 0 },
/// );
/// journal.append(event).ok();
/// assert_eq!(journal.len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryJournal {
    events: Vec<SequencerEvent>,
}

impl InMemoryJournal {
    /// Creates a new empty in-memory journal.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Creates an empty journal sized for `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Returns a slice of all stored events.
    #[must_use]
    pub fn events(&self) -> &[SequencerEvent] {
        &self.events
    }
}

impl Journal for InMemoryJournal {
    fn append(&mut self, event: SequencerEvent) -> Result<(), ReplayError> {
        if let Some(last) = self
            .last_sequence()
            .filter(|last| event.sequence_num <= *last)
        {
            return Err(ReplayError::SequenceGap {
                expected: last.saturating_add(1),
                found: event.sequence_num,
            });
        }
        self.events.push(event);
        Ok(())
    }

    fn read_from(&self, from_sequence: u64) -> impl Iterator<Item = &SequencerEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.sequence_num >= from_sequence)
    }

    fn read_range(
        &self,
        from_sequence: u64,
        to_sequence: u64,
    ) -> impl Iterator<Item = &SequencerEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.sequence_num >= from_sequence && e.sequence_num <= to_sequence)
    }

    #[inline]
    fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    fn last_sequence(&self) -> Option<u64> {
        self.events.last().map(|e| e.sequence_num)
    }
}
