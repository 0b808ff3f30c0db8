/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Submission receipts.

use super::result::SequencerResult;

/// What a caller gets back for a submitted queue command.
///
/// For a registered sale, `result` holds the new sale id, which the caller
/// needs to delete or reorder that sale later.
///
/// # Examples
///
/// ```
/// use turnqueue::sequencer::SequencerReceipt;
/// # use turnqueue::sequencer::SequencerResult;
///
/// # let receipt = SequencerReceipt {
/// #     sequence_num: 42,
/// #     result: SequencerResult::Cleared { removed: 3 },
/// # };
/// assert_eq!(receipt.sequence_num, 42);
/// assert!(receipt.is_applied());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerReceipt {
    /// Position of the command in the sequencer's total order.
    pub sequence_num: u64,

    /// The result of executing the command.
    pub result: SequencerResult,
}

impl SequencerReceipt {
    /// Creates a new receipt.
    #[must_use]
    pub fn new(sequence_num: u64, result: SequencerResult) -> Self {
        Self {
            sequence_num,
            result,
        }
    }

    /// Returns `true` if the command changed engine state.
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.result.is_applied()
    }
}
