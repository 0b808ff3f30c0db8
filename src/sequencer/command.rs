/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer command types.
//!
//! This module defines the mutations that can be submitted to the Sequencer
//! for ordered execution on the queue engine.

use crate::queue::{SaleId, Salesperson, SalespersonId, SalespersonUpdate, Timestamp};
use serde::{Deserialize, Serialize};

/// Commands that can be submitted to the Sequencer.
///
/// Each command is one queue mutation. Instants are carried on the command
/// itself so that replaying a journal reproduces the same state.
///
/// # Examples
///
/// ```
/// use turnqueue::sequencer::QueueCommand;
/// use turnqueue::SalespersonId;
///
/// let command = QueueCommand::RegisterSale {
///     salesperson_id: SalespersonId::from("ana"),
///     at: 1_000,
/// };
/// assert!(command.is_sale_mutation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueueCommand {
    /// Record a sale for a salesperson.
    RegisterSale {
        salesperson_id: SalespersonId,
        at: Timestamp,
    },

    /// Delete one sale.
    DeleteSale { sale_id: SaleId },

    /// Move one sale to an explicit rank.
    Reorder {
        sale_id: SaleId,
        new_index: i64,
        at: Timestamp,
    },

    /// Empty the sale log.
    ClearAll,

    /// Register a new salesperson profile.
    AddSalesperson(Salesperson),

    /// Register a profile on session start unless it already exists.
    EnsureSalesperson(Salesperson),

    /// Patch an existing profile.
    UpdateSalesperson {
        id: SalespersonId,
        update: SalespersonUpdate,
    },

    /// Remove a profile; its sales stay in the log.
    RemoveSalesperson { id: SalespersonId },
}

impl QueueCommand {
    /// Returns `true` if the command touches the sale log.
    #[must_use]
    pub fn is_sale_mutation(&self) -> bool {
        matches!(
            self,
            Self::RegisterSale { .. } | Self::DeleteSale { .. } | Self::Reorder { .. } | Self::ClearAll
        )
    }
}
