//! Integrity audit repository: loads documents and runs the verifier.

use std::collections::HashSet;
use std::sync::Arc;

use factoryflow_core::integrity::{IntegrityVerifier, VerificationProgress, VerificationResult};
use factoryflow_shared::config::VerificationConfig;
use factoryflow_core::journal::JournalEntry;
use factoryflow_core::ledger::LedgerEntry;
use factoryflow_shared::types::{JournalEntryId, OwnerId, TransactionId};
use tracing::{error, info, warn};

use crate::error::RepositoryError;
use crate::store::LedgerStore;

/// Runs integrity audits over one owner's books.
#[derive(Clone)]
pub struct IntegrityRepository {
    store: Arc<dyn LedgerStore>,
    config: VerificationConfig,
}

impl IntegrityRepository {
    /// Creates a new integrity repository.
    #[must_use]
    pub const fn new(store: Arc<dyn LedgerStore>, config: VerificationConfig) -> Self {
        Self { store, config }
    }

    /// Loads up to `max_records` ledger and journal entries and audits them.
    ///
    /// When the journal load is capped, the journal entries of every loaded
    /// ledger entry are fetched as well, so a capped journal list never
    /// shows up as missing journals.
    ///
    /// # Errors
    ///
    /// Returns a store error if loading fails; the audit is abandoned.
    pub async fn verify<F>(
        &self,
        owner_id: OwnerId,
        on_progress: F,
    ) -> Result<VerificationResult, RepositoryError>
    where
        F: FnMut(VerificationProgress) + Send,
    {
        let max_records = self.config.max_records;
        let mut verifier = IntegrityVerifier::new();
        verifier.begin_loading()?;

        let (ledger, journals, query_limit_reached) = match self.load(owner_id).await {
            Ok(docs) => docs,
            Err(e) => {
                verifier.fail();
                error!(error = %e, owner_id = %owner_id, "Failed to load documents for verification");
                return Err(e);
            }
        };

        if query_limit_reached {
            warn!(
                owner_id = %owner_id,
                max_records,
                "Verification hit the record cap, results are partial"
            );
        }

        let result = verifier.verify(&ledger, &journals, query_limit_reached, on_progress)?;
        info!(
            owner_id = %owner_id,
            ledger_entries = result.ledger_entries_checked,
            journal_entries = result.journal_entries_checked,
            errors = result.error_count,
            warnings = result.warning_count,
            balanced = result.trial_balance.is_balanced,
            "Integrity verification complete"
        );
        Ok(result)
    }

    async fn load(
        &self,
        owner_id: OwnerId,
    ) -> Result<(Vec<LedgerEntry>, Vec<JournalEntry>, bool), RepositoryError> {
        let max_records = self.config.max_records;
        let ledger = self.store.list_ledger_entries(owner_id, max_records).await?;
        let mut journals = self.store.list_journal_entries(owner_id, max_records).await?;

        let ledger_capped = ledger.len() >= max_records;
        let journals_capped = journals.len() >= max_records;
        if journals_capped {
            let loaded: HashSet<JournalEntryId> = journals.iter().map(|j| j.id).collect();
            let transaction_ids: Vec<TransactionId> =
                ledger.iter().map(|e| e.transaction_id).collect();
            let counterparts = self
                .store
                .list_journal_entries_for_transactions(owner_id, &transaction_ids)
                .await?;
            journals.extend(counterparts.into_iter().filter(|j| !loaded.contains(&j.id)));
        }

        Ok((ledger, journals, ledger_capped || journals_capped))
    }

    /// Number of discrepancies to show per report.
    #[must_use]
    pub const fn display_limit(&self) -> usize {
        self.config.display_limit
    }
}
