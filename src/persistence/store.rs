/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Snapshot stores.

use super::error::PersistenceError;
use super::snapshot::QueueSnapshot;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Destination for engine snapshots.
pub trait SnapshotStore {
    /// Persists a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the snapshot cannot be written.
    fn save(&mut self, snapshot: &QueueSnapshot) -> Result<(), PersistenceError>;

    /// Loads the last saved snapshot, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if stored data cannot be read or decoded.
    fn load(&self) -> Result<Option<QueueSnapshot>, PersistenceError>;
}

/// Stores the snapshot as pretty-printed JSON in a single file.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&mut self, snapshot: &QueueSnapshot) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &self.path)?;
        info!(
            path = %self.path.display(),
            sales = snapshot.sales.len(),
            salespeople = snapshot.salespeople.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<QueueSnapshot>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot: QueueSnapshot = serde_json::from_slice(&bytes)?;
        info!(
            path = %self.path.display(),
            sales = snapshot.sales.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }
}

/// Keeps the last snapshot in memory. Useful for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<QueueSnapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &QueueSnapshot) -> Result<(), PersistenceError> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<QueueSnapshot>, PersistenceError> {
        Ok(self.snapshot.clone())
    }
}
