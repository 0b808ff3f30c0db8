/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Point-in-time snapshot of the engine's sales and profiles.

use super::error::PersistenceError;
use crate::queue::{EventLog, QueueConfig, QueueEngine, Sale, Salesperson};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::warn;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of the engine state.
///
/// `sales` are stored in log display order (newest first) so that the
/// explicit ranking written by a manual reorder survives a round trip.
/// `checksum` is the hex SHA-256 of the canonical JSON encoding of
/// `salespeople` and `sales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSnapshot {
    pub version: u32,
    pub salespeople: Vec<Salesperson>,
    pub sales: Vec<Sale>,
    pub checksum: String,
}

#[derive(Serialize)]
struct ChecksumPayload<'a> {
    salespeople: &'a [Salesperson],
    sales: &'a [Sale],
}

impl QueueSnapshot {
    /// Builds a snapshot and stamps its checksum.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Serialization`] if encoding fails.
    pub fn new(salespeople: Vec<Salesperson>, sales: Vec<Sale>) -> Result<Self, PersistenceError> {
        let checksum = Self::compute_checksum(&salespeople, &sales)?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            salespeople,
            sales,
            checksum,
        })
    }

    /// Computes the checksum for the given contents.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Serialization`] if encoding fails.
    pub fn compute_checksum(salespeople: &[Salesperson], sales: &[Sale]) -> Result<String, PersistenceError> {
        let bytes = serde_json::to_vec(&ChecksumPayload { salespeople, sales })?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }

    /// Checks the format version and the checksum.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UnsupportedVersion`] or
    /// [`PersistenceError::ChecksumMismatch`].
    pub fn verify(&self) -> Result<(), PersistenceError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        let computed = Self::compute_checksum(&self.salespeople, &self.sales)?;
        if computed != self.checksum {
            return Err(PersistenceError::ChecksumMismatch {
                expected: self.checksum.clone(),
                computed,
            });
        }
        Ok(())
    }

    /// Returns `true` when both snapshots describe the same profiles and
    /// sales, regardless of version or checksum.
    #[must_use]
    pub fn same_state(&self, other: &Self) -> bool {
        self.salespeople == other.salespeople && self.sales == other.sales
    }
}

impl QueueEngine {
    /// Captures the current profiles and sales.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Serialization`] if checksum encoding fails.
    pub fn snapshot(&self) -> Result<QueueSnapshot, PersistenceError> {
        QueueSnapshot::new(self.salespeople().to_vec(), self.log().iter().cloned().collect())
    }

    /// Rebuilds an engine from a verified snapshot.
    ///
    /// # Errors
    ///
    /// Returns the [`QueueSnapshot::verify`] errors, or
    /// [`PersistenceError::InvalidSale`] for a duplicated or inconsistent sale.
    pub fn restore(snapshot: QueueSnapshot, config: QueueConfig) -> Result<Self, PersistenceError> {
        if let Err(err) = snapshot.verify() {
            warn!(error = %err, "rejected snapshot");
            return Err(err);
        }

        if let Some(bad) = snapshot.sales.iter().find(|sale| !sale.is_consistent()) {
            warn!(sale_id = %bad.id, "snapshot sale breaks last_modified >= timestamp");
            return Err(PersistenceError::InvalidSale(bad.id));
        }

        let (log, duplicates) = EventLog::from_sales(snapshot.sales);
        if let Some(dup) = duplicates.first() {
            warn!(sale_id = %dup.id, "snapshot holds a duplicated sale id");
            return Err(PersistenceError::InvalidSale(dup.id));
        }

        let mut seen = HashSet::new();
        let salespeople: Vec<Salesperson> = snapshot
            .salespeople
            .into_iter()
            .filter(|profile| seen.insert(profile.id.clone()))
            .collect();

        Ok(Self::from_parts(config, salespeople, log))
    }
}
