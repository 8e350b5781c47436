//! Activity log repository.

use std::sync::Arc;

use factoryflow_core::activity::ActivityLog;
use factoryflow_shared::types::OwnerId;
use tracing::warn;

use crate::error::RepositoryError;
use crate::store::LedgerStore;

/// Writes and reads activity log records.
#[derive(Clone)]
pub struct ActivityRepository {
    store: Arc<dyn LedgerStore>,
}

impl ActivityRepository {
    /// Creates a new activity repository.
    #[must_use]
    pub const fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Appends a record. Failures are logged and never returned.
    pub async fn record(&self, log: ActivityLog) {
        if let Err(e) = self.store.insert_activity_log(&log).await {
            warn!(
                error = %e,
                owner_id = %log.owner_id,
                action = ?log.action,
                entity_id = %log.entity_id,
                "Failed to write activity log"
            );
        }
    }

    /// Most recent records for an owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn recent(
        &self,
        owner_id: OwnerId,
        limit: usize,
    ) -> Result<Vec<ActivityLog>, RepositoryError> {
        Ok(self.store.list_activity_logs(owner_id, limit).await?)
    }
}
