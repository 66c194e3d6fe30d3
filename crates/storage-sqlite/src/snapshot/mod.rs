//! SQLite storage implementation for backup snapshots.

mod repository;

pub use repository::SnapshotRepository;
