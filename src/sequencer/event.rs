/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! The record of one sequenced queue command.

use super::command::QueueCommand;
use super::result::SequencerResult;
use serde::{Deserialize, Serialize};

/// A queue command together with what it did to the sale log or roster.
///
/// Listeners receive one per command, in sequence order. The result carries
/// the generated sale id for registrations, which is what lets a journal be
/// replayed into an identical queue.
///
/// # Examples
///
/// ```
/// use turnqueue::sequencer::SequencerEvent;
/// # use turnqueue::sequencer::{QueueCommand, SequencerResult};
///
/// # let event = SequencerEvent {
/// #     sequence_num: 1,
/// #     timestamp_ns: 1234567890,
/// #     command: QueueCommand::ClearAll,
/// #     result: SequencerResult::Cleared { removed: 0 },
/// # };
/// assert_eq!(event.sequence_num, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencerEvent {
    /// Monotonically increasing sequence number.
    pub sequence_num: u64,

    /// Wall-clock nanoseconds when the sequencer ran the command. Unrelated
    /// to the sale timestamps inside the command.
    pub timestamp_ns: u64,

    /// The command that was executed.
    pub command: QueueCommand,

    /// The result of executing the command.
    pub result: SequencerResult,
}

impl SequencerEvent {
    /// Creates a new sequencer event.
    #[must_use]
    pub fn new(
        sequence_num: u64,
        timestamp_ns: u64,
        command: QueueCommand,
        result: SequencerResult,
    ) -> Self {
        Self {
            sequence_num,
            timestamp_ns,
            command,
            result,
        }
    }
}
