//! Ledger entry repository.

use std::sync::Arc;

use factoryflow_core::activity::ActivityLog;
use factoryflow_core::journal::journal_for_ledger_entry;
use factoryflow_core::ledger::{
    LedgerEntry, LedgerError, NewLedgerEntry, NewPayment, validate_ledger_entry,
};
use factoryflow_shared::types::{OwnerId, TransactionId, UserId};
use tracing::info;

use super::activity::ActivityRepository;
use super::payment::PaymentRepository;
use crate::error::RepositoryError;
use crate::store::LedgerStore;

/// Creates and reads ledger entries.
#[derive(Clone)]
pub struct LedgerRepository {
    store: Arc<dyn LedgerStore>,
    payments: PaymentRepository,
    activity: ActivityRepository,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            payments: PaymentRepository::new(Arc::clone(&store)),
            activity: ActivityRepository::new(Arc::clone(&store)),
            store,
        }
    }

    /// Validates and stores a new entry together with its journal entry.
    ///
    /// An AR/AP entry submitted with `immediate_settlement` is stored unpaid
    /// and then settled through the regular payment path.
    ///
    /// # Errors
    ///
    /// Returns a ledger error if validation or journal generation fails, or a
    /// store error if a write fails.
    pub async fn create_entry(
        &self,
        user_id: UserId,
        input: &NewLedgerEntry,
    ) -> Result<LedgerEntry, RepositoryError> {
        let entry = validate_ledger_entry(input)?;
        let journal = journal_for_ledger_entry(&entry)?;

        self.store.insert_ledger_entry(&entry).await?;
        self.store.insert_journal_entry(&journal).await?;

        info!(
            owner_id = %entry.owner_id,
            transaction_id = %entry.transaction_id,
            entry_type = %entry.entry_type,
            amount = %entry.amount,
            arap = entry.is_arap_entry,
            "Ledger entry created"
        );
        self.activity
            .record(ActivityLog::entry_created(user_id, &entry))
            .await;

        if input.immediate_settlement && entry.is_arap_entry {
            let settlement = NewPayment {
                amount: entry.amount,
                date: entry.date,
                notes: Some("Settled on creation".to_string()),
            };
            let (_, settled) = self
                .payments
                .record_payment(user_id, entry.owner_id, entry.transaction_id, settlement)
                .await?;
            return Ok(settled);
        }

        Ok(entry)
    }

    /// Fetches one entry.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if it does not exist.
    pub async fn get_entry(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
    ) -> Result<LedgerEntry, RepositoryError> {
        self.store
            .get_ledger_entry(owner_id, transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id).into())
    }

    /// Lists entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_entries(
        &self,
        owner_id: OwnerId,
        limit: usize,
    ) -> Result<Vec<LedgerEntry>, RepositoryError> {
        Ok(self.store.list_ledger_entries(owner_id, limit).await?)
    }
}
