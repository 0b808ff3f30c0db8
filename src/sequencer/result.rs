/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer result types.
//!
//! This module defines the outcomes reported after executing commands on the
//! Sequencer. Operations on unknown ids are not failures: they come back as
//! [`SequencerResult::Unchanged`].

use crate::queue::{SaleId, Salesperson, SalespersonId};
use serde::{Deserialize, Serialize};

/// Why a command left the engine untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoOpReason {
    /// No sale with this id is in the log.
    UnknownSale(SaleId),
    /// No profile with this id is registered.
    UnknownSalesperson(SalespersonId),
    /// A profile with this id is already registered.
    AlreadyRegistered(SalespersonId),
}

/// Result of executing a sequencer command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SequencerResult {
    /// A sale was appended to the log.
    SaleRegistered {
        /// Id assigned to the new sale.
        sale_id: SaleId,
        /// Salesperson the sale is attributed to.
        salesperson_id: SalespersonId,
    },

    /// A sale was removed.
    SaleDeleted {
        /// Id of the removed sale.
        sale_id: SaleId,
    },

    /// A sale was moved and the log renumbered.
    Reordered {
        /// Id of the moved sale.
        sale_id: SaleId,
        /// Clamped index the sale landed on.
        index: usize,
    },

    /// The sale log was emptied.
    Cleared {
        /// Number of sales removed.
        removed: usize,
    },

    /// A profile was registered.
    SalespersonAdded { id: SalespersonId },

    /// A session-start registration found the profile already stored.
    SalespersonPresent {
        /// The stored profile, left as it was.
        profile: Salesperson,
    },

    /// A profile was patched.
    SalespersonUpdated { id: SalespersonId },

    /// A profile was removed.
    SalespersonRemoved { id: SalespersonId },

    /// The command was a no-op.
    Unchanged {
        /// Why nothing happened.
        reason: NoOpReason,
    },
}

impl SequencerResult {
    /// Returns `true` if the command changed engine state.
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Unchanged { .. } | Self::SalespersonPresent { .. })
    }

    /// Returns `true` if the command was a no-op.
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }

    /// Id of the sale registered by this command, if any.
    #[must_use]
    pub fn registered_sale(&self) -> Option<SaleId> {
        match self {
            Self::SaleRegistered { sale_id, .. } => Some(*sale_id),
            _ => None,
        }
    }
}
