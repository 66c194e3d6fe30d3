//! Snapshot repository and service traits.

use super::snapshot_model::BackupSnapshot;
use crate::errors::Result;

/// Contract for reading the whole store in one pass.
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// All rows from all tables, read under a single connection so the
    /// snapshot is internally consistent.
    fn export_all(&self) -> Result<BackupSnapshot>;
}

/// Contract for backup export.
pub trait SnapshotServiceTrait: Send + Sync {
    /// The full store as pretty-printed JSON.
    fn export(&self) -> Result<String>;

    /// Restoring a backup into a live store. Always refused; restores go
    /// through a fresh database file.
    fn import(&self, payload: &str) -> Result<()>;
}
