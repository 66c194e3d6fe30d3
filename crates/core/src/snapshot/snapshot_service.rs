use log::info;
use std::sync::Arc;

use super::snapshot_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service producing JSON backups of the whole store.
pub struct SnapshotService {
    repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl SnapshotService {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl SnapshotServiceTrait for SnapshotService {
    fn export(&self) -> Result<String> {
        let snapshot = self.repository.export_all()?;
        info!(
            "Exported snapshot: {} companies, {} transactions",
            snapshot.companies.len(),
            snapshot.transactions.len()
        );
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    fn import(&self, _payload: &str) -> Result<()> {
        Err(Error::Validation(ValidationError::InvalidInput(
            "Snapshot import is not supported; restore into a fresh database file".to_string(),
        )))
    }
}
