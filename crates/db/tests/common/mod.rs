//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use factoryflow_core::ledger::{LedgerEntryType, NewLedgerEntry, NewPayment};
use factoryflow_db::{LedgerStore, MemoryStore};
use factoryflow_shared::types::OwnerId;
use rust_decimal::Decimal;

pub fn stores() -> (Arc<MemoryStore>, Arc<dyn LedgerStore>) {
    let memory = Arc::new(MemoryStore::new());
    let store: Arc<dyn LedgerStore> = memory.clone();
    (memory, store)
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn new_entry(
    owner_id: OwnerId,
    entry_type: LedgerEntryType,
    amount: Decimal,
    category: &str,
    is_arap_entry: bool,
) -> NewLedgerEntry {
    NewLedgerEntry {
        owner_id,
        entry_type,
        amount,
        category: category.to_string(),
        subcategory: None,
        description: format!("{category} {amount}"),
        date: date(4, 1),
        associated_party: is_arap_entry.then(|| "Al Noor Trading".to_string()),
        is_arap_entry,
        immediate_settlement: false,
    }
}

pub fn payment(amount: Decimal) -> NewPayment {
    NewPayment {
        amount,
        date: date(4, 15),
        notes: None,
    }
}
