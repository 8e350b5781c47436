//! Payment repository: AR/AP read-modify-write against the store.
//!
//! Each write is guarded by the ledger entry's `version`. A concurrent
//! writer makes the second write fail with `ConcurrentModification`; nothing
//! is retried.

use std::sync::Arc;

use factoryflow_core::activity::ActivityLog;
use factoryflow_core::journal::{BALANCE_EPSILON, journal_for_payment};
use factoryflow_core::ledger::{
    ArapState, ArapUpdateResult, LedgerEntry, LedgerError, NewPayment, Payment, apply_payment,
    reverse_payment, validate_amount,
};
use factoryflow_shared::types::{OwnerId, PaymentId, TransactionId, UserId};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use super::activity::ActivityRepository;
use crate::error::{RepositoryError, StoreError};
use crate::store::LedgerStore;

/// Maps a version conflict to the domain error surfaced to callers.
fn conflict_as_ledger(err: StoreError) -> RepositoryError {
    match err {
        StoreError::Conflict { .. } => LedgerError::ConcurrentModification.into(),
        other => other.into(),
    }
}

/// Payment and AR/AP repository.
#[derive(Clone)]
pub struct PaymentRepository {
    store: Arc<dyn LedgerStore>,
    activity: ActivityRepository,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            activity: ActivityRepository::new(Arc::clone(&store)),
            store,
        }
    }

    async fn load_entry(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
    ) -> Result<LedgerEntry, RepositoryError> {
        self.store
            .get_ledger_entry(owner_id, transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id).into())
    }

    async fn write_arap<F>(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
        update: F,
    ) -> Result<LedgerEntry, RepositoryError>
    where
        F: FnOnce(&LedgerEntry) -> Result<ArapState, LedgerError> + Send,
    {
        let mut entry = self.load_entry(owner_id, transaction_id).await?;
        update(&entry)?.apply_to(&mut entry);
        self.store
            .update_ledger_entry(&entry)
            .await
            .map_err(conflict_as_ledger)
    }

    /// Removes a payment and its journal entries after a failed write.
    async fn discard_payment(&self, payment: &Payment) {
        let owner_id = payment.owner_id;
        let payment_id = payment.payment_id;
        if let Err(e) = self.store.delete_payment(owner_id, payment_id).await {
            error!(error = %e, payment_id = %payment_id, "Failed to discard payment");
        }
        if let Err(e) = self
            .store
            .delete_journal_entries_for_payment(owner_id, payment_id)
            .await
        {
            error!(error = %e, payment_id = %payment_id, "Failed to discard payment journal");
        }
    }

    fn into_update_result(
        outcome: Result<LedgerEntry, RepositoryError>,
        message: &str,
    ) -> Result<ArapUpdateResult, RepositoryError> {
        match outcome {
            Ok(entry) => Ok(ArapUpdateResult::applied(ArapState::of(&entry), message)),
            Err(RepositoryError::Ledger(e)) => {
                warn!(error = %e, "AR/AP update rejected");
                Ok(ArapUpdateResult::failed(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Adds a payment amount to an AR/AP entry's totals.
    ///
    /// Domain failures (entry missing, not tracked, bad amount, stale write)
    /// come back as `success = false`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    pub async fn update_arap_on_payment_add(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
        payment_amount: Decimal,
    ) -> Result<ArapUpdateResult, RepositoryError> {
        let outcome = self
            .write_arap(owner_id, transaction_id, |entry| {
                apply_payment(entry, payment_amount)
            })
            .await;
        Self::into_update_result(outcome, "Payment applied")
    }

    /// Subtracts a deleted payment from an AR/AP entry's totals.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    pub async fn update_arap_on_payment_delete(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
        payment_amount: Decimal,
    ) -> Result<ArapUpdateResult, RepositoryError> {
        let outcome = self
            .write_arap(owner_id, transaction_id, |entry| {
                reverse_payment(entry, payment_amount)
            })
            .await;
        Self::into_update_result(outcome, "Payment reversed")
    }

    /// Records a payment: stores the payment, posts its journal entry and
    /// then updates the entry. If a later step fails, the payment and its
    /// journal entry are removed again.
    ///
    /// # Errors
    ///
    /// Returns a ledger error if the amount is invalid, the entry is missing
    /// or not AR/AP-tracked, the payment exceeds the remaining balance, or
    /// the entry changed concurrently. Store failures are passed through.
    pub async fn record_payment(
        &self,
        user_id: UserId,
        owner_id: OwnerId,
        transaction_id: TransactionId,
        input: NewPayment,
    ) -> Result<(Payment, LedgerEntry), RepositoryError> {
        validate_amount(input.amount)?;
        let entry = self.load_entry(owner_id, transaction_id).await?;
        if !entry.is_arap_entry {
            return Err(LedgerError::NotArapEntry(transaction_id).into());
        }
        if input.amount - entry.remaining_balance >= BALANCE_EPSILON {
            return Err(LedgerError::PaymentExceedsBalance {
                amount: input.amount,
                remaining: entry.remaining_balance,
            }
            .into());
        }

        let notes = input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let payment = Payment::new(owner_id, transaction_id, input.amount, input.date, notes);
        let journal = journal_for_payment(&entry, &payment)?;

        let mut updated = entry.clone();
        apply_payment(&entry, payment.amount)?.apply_to(&mut updated);

        self.store.insert_payment(&payment).await?;
        if let Err(e) = self.store.insert_journal_entry(&journal).await {
            self.discard_payment(&payment).await;
            return Err(e.into());
        }
        let updated = match self.store.update_ledger_entry(&updated).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_payment(&payment).await;
                return Err(conflict_as_ledger(e));
            }
        };

        info!(
            owner_id = %owner_id,
            transaction_id = %transaction_id,
            payment_id = %payment.payment_id,
            amount = %payment.amount,
            status = %updated.payment_status,
            "Payment recorded"
        );
        self.activity
            .record(ActivityLog::payment_recorded(user_id, &updated, &payment))
            .await;

        Ok((payment, updated))
    }

    /// Deletes a payment, reverses its effect and removes its journal entry.
    ///
    /// The payment document is removed first, so of two concurrent deletes
    /// only one reverses the amount. If the reversal fails, the payment is
    /// put back.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` or `TransactionNotFound` if either document
    /// is missing, `ConcurrentModification` on a stale write, or a store error.
    pub async fn delete_payment(
        &self,
        user_id: UserId,
        owner_id: OwnerId,
        payment_id: PaymentId,
    ) -> Result<LedgerEntry, RepositoryError> {
        let payment = self
            .store
            .delete_payment(owner_id, payment_id)
            .await?
            .ok_or(LedgerError::PaymentNotFound(payment_id))?;

        let amount = payment.amount;
        let reversed = self
            .write_arap(owner_id, payment.transaction_id, |entry| {
                reverse_payment(entry, amount)
            })
            .await;
        let entry = match reversed {
            Ok(entry) => entry,
            Err(e) => {
                if let Err(restore) = self.store.insert_payment(&payment).await {
                    error!(error = %restore, payment_id = %payment_id, "Failed to restore payment");
                }
                return Err(e);
            }
        };
        let removed = self
            .store
            .delete_journal_entries_for_payment(owner_id, payment_id)
            .await?;

        debug!(payment_id = %payment_id, removed, "Removed payment journal entries");
        info!(
            owner_id = %owner_id,
            transaction_id = %payment.transaction_id,
            payment_id = %payment_id,
            status = %entry.payment_status,
            "Payment deleted"
        );
        self.activity
            .record(ActivityLog::payment_deleted(user_id, &payment))
            .await;

        Ok(entry)
    }

    /// Payments recorded against one entry, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_payments(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
    ) -> Result<Vec<Payment>, RepositoryError> {
        Ok(self.store.list_payments(owner_id, transaction_id).await?)
    }
}
