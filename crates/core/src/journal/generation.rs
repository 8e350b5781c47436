//! Journal generation for ledger entries and payments.
//!
//! Posting rules:
//!
//! | source | debit | credit |
//! |---|---|---|
//! | income | Cash, or A/R when tracked | revenue by category |
//! | expense | expense by category | Cash, or A/P when tracked |
//! | owner capital | Cash | Owner's Capital |
//! | owner drawings | Owner's Drawings | Cash |
//! | receivable payment | Cash | A/R |
//! | payable payment | A/P | Cash |

use chrono::Utc;
use factoryflow_shared::types::JournalEntryId;
use rust_decimal::Decimal;

use super::types::{JournalEntry, JournalLine, JournalSource};
use super::validation::check_journal_lines;
use crate::accounts::{
    ACCOUNTS_PAYABLE, ACCOUNTS_RECEIVABLE, Account, CASH, OTHER_EXPENSES, OWNER_CAPITAL,
    OWNER_DRAWINGS, SALES_REVENUE, find_account,
};
use crate::ledger::{
    ArapDirection, CapitalMovementKind, LedgerEntry, LedgerEntryType, LedgerError, Payment,
};

/// Category keywords mapped to expense account codes, first match wins.
const EXPENSE_ACCOUNTS: &[(&str, &str)] = &[
    ("cost of goods", "5000"),
    ("cogs", "5000"),
    ("salar", "5100"),
    ("wage", "5100"),
    ("rent", "5200"),
    ("utilit", "5300"),
    ("electric", "5300"),
    ("water", "5300"),
    ("raw material", "5400"),
    ("maintenance", "5500"),
    ("repair", "5500"),
];

/// Category keywords mapped to revenue account codes, first match wins.
const REVENUE_ACCOUNTS: &[(&str, &str)] = &[("other income", "4100")];

fn lookup(category: &str, table: &[(&str, &str)], fallback: Account) -> Account {
    let category = category.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| category.contains(keyword))
        .and_then(|(_, code)| find_account(code))
        .copied()
        .unwrap_or(fallback)
}

/// Expense account for a ledger category.
#[must_use]
pub fn expense_account_for(category: &str) -> Account {
    lookup(category, EXPENSE_ACCOUNTS, OTHER_EXPENSES)
}

/// Revenue account for a ledger category.
#[must_use]
pub fn revenue_account_for(category: &str) -> Account {
    lookup(category, REVENUE_ACCOUNTS, SALES_REVENUE)
}

fn two_line_entry(
    debit: Account,
    credit: Account,
    amount: Decimal,
) -> Result<Vec<JournalLine>, LedgerError> {
    let lines = vec![
        JournalLine::debit(&debit, amount),
        JournalLine::credit(&credit, amount),
    ];
    check_journal_lines(&lines)?;
    Ok(lines)
}

/// Builds the journal entry posted when a ledger entry is created.
///
/// # Errors
///
/// Returns `UnmappedCategory` for a capital movement with an unknown
/// category, or a line error if the generated lines fail the structural check.
pub fn journal_for_ledger_entry(entry: &LedgerEntry) -> Result<JournalEntry, LedgerError> {
    let (debit, credit) = match entry.entry_type {
        LedgerEntryType::Income => {
            let debit = if entry.is_arap_entry {
                ACCOUNTS_RECEIVABLE
            } else {
                CASH
            };
            (debit, revenue_account_for(&entry.category))
        }
        LedgerEntryType::Expense => {
            let credit = if entry.is_arap_entry {
                ACCOUNTS_PAYABLE
            } else {
                CASH
            };
            (expense_account_for(&entry.category), credit)
        }
        LedgerEntryType::CapitalMovement => match CapitalMovementKind::from_category(&entry.category)
        {
            Some(CapitalMovementKind::Contribution) => (CASH, OWNER_CAPITAL),
            Some(CapitalMovementKind::Drawing) => (OWNER_DRAWINGS, CASH),
            None => return Err(LedgerError::UnmappedCategory(entry.category.clone())),
        },
    };

    Ok(JournalEntry {
        id: JournalEntryId::new(),
        owner_id: entry.owner_id,
        transaction_id: entry.transaction_id,
        source: JournalSource::LedgerEntry,
        payment_id: None,
        date: entry.date,
        description: entry.description.clone(),
        lines: two_line_entry(debit, credit, entry.amount)?,
        created_at: Utc::now(),
    })
}

/// Builds the journal entry posted when a payment settles an AR/AP entry.
///
/// # Errors
///
/// Returns `NotArapEntry` if the ledger entry is not tracked.
pub fn journal_for_payment(
    entry: &LedgerEntry,
    payment: &Payment,
) -> Result<JournalEntry, LedgerError> {
    let (debit, credit) = match entry.arap_direction() {
        Some(ArapDirection::Receivable) => (CASH, ACCOUNTS_RECEIVABLE),
        Some(ArapDirection::Payable) => (ACCOUNTS_PAYABLE, CASH),
        None => return Err(LedgerError::NotArapEntry(entry.transaction_id)),
    };

    Ok(JournalEntry {
        id: JournalEntryId::new(),
        owner_id: entry.owner_id,
        transaction_id: entry.transaction_id,
        source: JournalSource::Payment,
        payment_id: Some(payment.payment_id),
        date: payment.date,
        description: format!("Payment: {}", entry.description),
        lines: two_line_entry(debit, credit, payment.amount)?,
        created_at: Utc::now(),
    })
}
