//! Snapshot module - full-tenant backup export.

mod snapshot_model;
mod snapshot_service;
mod snapshot_traits;

pub use snapshot_model::BackupSnapshot;
pub use snapshot_service::SnapshotService;
pub use snapshot_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};
