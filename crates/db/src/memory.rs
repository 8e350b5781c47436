//! In-memory `LedgerStore` backed by `DashMap`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use factoryflow_core::activity::ActivityLog;
use factoryflow_core::journal::JournalEntry;
use factoryflow_core::ledger::{LedgerEntry, Payment};
use factoryflow_shared::types::{JournalEntryId, OwnerId, PaymentId, TransactionId};

use crate::error::{StoreError, StoreResult};
use crate::store::LedgerStore;

/// Thread-safe in-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledger: DashMap<(OwnerId, TransactionId), LedgerEntry>,
    payments: DashMap<(OwnerId, PaymentId), Payment>,
    journals: DashMap<(OwnerId, JournalEntryId), JournalEntry>,
    activity: DashMap<OwnerId, Vec<ActivityLog>>,
    reject_activity: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes activity log writes fail with a backend error.
    pub fn reject_activity_logs(&self, reject: bool) {
        self.reject_activity.store(reject, Ordering::SeqCst);
    }
}

fn newest_first<T, K: Ord>(mut docs: Vec<T>, key: impl Fn(&T) -> K, limit: usize) -> Vec<T> {
    docs.sort_by_key(|doc| std::cmp::Reverse(key(doc)));
    docs.truncate(limit);
    docs
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn insert_ledger_entry(&self, entry: &LedgerEntry) -> StoreResult<()> {
        match self.ledger.entry((entry.owner_id, entry.transaction_id)) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(entry.transaction_id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(entry.clone());
                Ok(())
            }
        }
    }

    async fn get_ledger_entry(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
    ) -> StoreResult<Option<LedgerEntry>> {
        Ok(self
            .ledger
            .get(&(owner_id, transaction_id))
            .map(|e| e.value().clone()))
    }

    async fn update_ledger_entry(&self, entry: &LedgerEntry) -> StoreResult<LedgerEntry> {
        let mut stored = self
            .ledger
            .get_mut(&(entry.owner_id, entry.transaction_id))
            .ok_or_else(|| StoreError::NotFound(entry.transaction_id.to_string()))?;

        if stored.version != entry.version {
            return Err(StoreError::Conflict {
                expected: entry.version,
                actual: stored.version,
            });
        }

        let mut updated = entry.clone();
        updated.version += 1;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn list_ledger_entries(
        &self,
        owner_id: OwnerId,
        limit: usize,
    ) -> StoreResult<Vec<LedgerEntry>> {
        let docs = self
            .ledger
            .iter()
            .filter(|e| e.key().0 == owner_id)
            .map(|e| e.value().clone())
            .collect();
        Ok(newest_first(docs, |e| (e.date, e.created_at), limit))
    }

    async fn insert_payment(&self, payment: &Payment) -> StoreResult<()> {
        match self.payments.entry((payment.owner_id, payment.payment_id)) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(payment.payment_id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(payment.clone());
                Ok(())
            }
        }
    }

    async fn get_payment(
        &self,
        owner_id: OwnerId,
        payment_id: PaymentId,
    ) -> StoreResult<Option<Payment>> {
        Ok(self
            .payments
            .get(&(owner_id, payment_id))
            .map(|p| p.value().clone()))
    }

    async fn delete_payment(
        &self,
        owner_id: OwnerId,
        payment_id: PaymentId,
    ) -> StoreResult<Option<Payment>> {
        Ok(self.payments.remove(&(owner_id, payment_id)).map(|(_, p)| p))
    }

    async fn list_payments(
        &self,
        owner_id: OwnerId,
        transaction_id: TransactionId,
    ) -> StoreResult<Vec<Payment>> {
        let mut docs: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.key().0 == owner_id && p.transaction_id == transaction_id)
            .map(|p| p.value().clone())
            .collect();
        docs.sort_by_key(|p| (p.date, p.created_at));
        Ok(docs)
    }

    async fn insert_journal_entry(&self, journal: &JournalEntry) -> StoreResult<()> {
        match self.journals.entry((journal.owner_id, journal.id)) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(journal.id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(journal.clone());
                Ok(())
            }
        }
    }

    async fn list_journal_entries(
        &self,
        owner_id: OwnerId,
        limit: usize,
    ) -> StoreResult<Vec<JournalEntry>> {
        let docs = self
            .journals
            .iter()
            .filter(|j| j.key().0 == owner_id)
            .map(|j| j.value().clone())
            .collect();
        Ok(newest_first(docs, |j| (j.date, j.created_at), limit))
    }

    async fn list_journal_entries_for_transactions(
        &self,
        owner_id: OwnerId,
        transaction_ids: &[TransactionId],
    ) -> StoreResult<Vec<JournalEntry>> {
        let wanted: HashSet<TransactionId> = transaction_ids.iter().copied().collect();
        Ok(self
            .journals
            .iter()
            .filter(|j| j.key().0 == owner_id && wanted.contains(&j.transaction_id))
            .map(|j| j.value().clone())
            .collect())
    }

    async fn delete_journal_entries_for_payment(
        &self,
        owner_id: OwnerId,
        payment_id: PaymentId,
    ) -> StoreResult<usize> {
        let before = self.journals.len();
        self.journals
            .retain(|key, journal| key.0 != owner_id || journal.payment_id != Some(payment_id));
        Ok(before.saturating_sub(self.journals.len()))
    }

    async fn insert_activity_log(&self, log: &ActivityLog) -> StoreResult<()> {
        if self.reject_activity.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("activity log write rejected".to_string()));
        }
        self.activity.entry(log.owner_id).or_default().push(log.clone());
        Ok(())
    }

    async fn list_activity_logs(
        &self,
        owner_id: OwnerId,
        limit: usize,
    ) -> StoreResult<Vec<ActivityLog>> {
        let docs = self
            .activity
            .get(&owner_id)
            .map(|logs| logs.value().clone())
            .unwrap_or_default();
        Ok(newest_first(docs, |l| l.timestamp, limit))
    }
}
