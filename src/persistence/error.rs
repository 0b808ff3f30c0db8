/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Persistence error types.

use crate::queue::SaleId;
use thiserror::Error;

/// Errors that can occur while saving or restoring queue state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed.
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored checksum does not match the snapshot contents.
    #[error("snapshot checksum mismatch: expected {expected}, computed {computed}")]
    ChecksumMismatch {
        /// Checksum recorded in the snapshot.
        expected: String,
        /// Checksum computed from the contents.
        computed: String,
    },

    /// The snapshot was written by an incompatible format version.
    #[error("unsupported snapshot version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Version this build understands.
        supported: u32,
    },

    /// A sale is duplicated or violates `last_modified >= timestamp`.
    #[error("invalid sale {0} in snapshot")]
    InvalidSale(SaleId),
}
