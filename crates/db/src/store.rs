//! Document store abstraction.
//!
//! Every collection is scoped to one owner (`users/{ownerId}/...`). Ledger
//! entries carry a `version`; updates are compare-and-set on it.

use async_trait::async_trait;
use factoryflow_core::activity::ActivityLog;
use factoryflow_core::journal::JournalEntry;
use factoryflow_core::ledger::{LedgerEntry, Payment};
use factoryflow_shared::types::{OwnerId, PaymentId, TransactionId};

use crate::error::StoreResult;

/// Tenant-scoped document collections backing the books.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Inserts a new ledger entry.
    async fn insert_ledger_entry(&self, entry: &LedgerEntry) -> StoreResult<()>;

    /// Fetches one ledger entry.
    async fn get_ledger_entry(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
    ) -> StoreResult<Option<LedgerEntry>>;

    /// Replaces a ledger entry if its stored version equals `entry.version`.
    ///
    /// Returns the stored document with its version incremented.
    async fn update_ledger_entry(&self, entry: &LedgerEntry) -> StoreResult<LedgerEntry>;

    /// Lists ledger entries, newest date first, at most `limit`.
    async fn list_ledger_entries(
        &self,
        owner_id: OwnerId,
        limit: usize,
    ) -> StoreResult<Vec<LedgerEntry>>;

    /// Inserts a payment.
    async fn insert_payment(&self, payment: &Payment) -> StoreResult<()>;

    /// Fetches one payment.
    async fn get_payment(
        &self,
        owner_id: OwnerId,
        payment_id: PaymentId,
    ) -> StoreResult<Option<Payment>>;

    /// Deletes a payment, returning it if it existed.
    async fn delete_payment(
        &self,
        owner_id: OwnerId,
        payment_id: PaymentId,
    ) -> StoreResult<Option<Payment>>;

    /// Lists payments recorded against one ledger entry, oldest first.
    async fn list_payments(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
    ) -> StoreResult<Vec<Payment>>;

    /// Inserts a journal entry.
    async fn insert_journal_entry(&self, journal: &JournalEntry) -> StoreResult<()>;

    /// Lists journal entries, newest date first, at most `limit`.
    async fn list_journal_entries(
        &self,
        owner_id: OwnerId,
        limit: usize,
    ) -> StoreResult<Vec<JournalEntry>>;

    /// Lists every journal entry posted against the given transactions.
    async fn list_journal_entries_for_transactions(
        &self,
        owner_id: OwnerId,
        transaction_ids: &[TransactionId],
    ) -> StoreResult<Vec<JournalEntry>>;

    /// Deletes journal entries posted for a payment. Returns how many were removed.
    async fn delete_journal_entries_for_payment(
        &self,
        owner_id: OwnerId,
        payment_id: PaymentId,
    ) -> StoreResult<usize>;

    /// Appends an activity log record.
    async fn insert_activity_log(&self, log: &ActivityLog) -> StoreResult<()>;

    /// Lists activity, newest first, at most `limit`.
    async fn list_activity_logs(
        &self,
        owner_id: OwnerId,
        limit: usize,
    ) -> StoreResult<Vec<ActivityLog>>;
}
