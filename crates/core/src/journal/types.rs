//! Journal domain types.

use chrono::{DateTime, NaiveDate, Utc};
use factoryflow_shared::types::{JournalEntryId, OwnerId, PaymentId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{JournalValidation, validate_journal_entry};
use crate::accounts::Account;
use crate::ledger::LedgerError;

/// One debit or credit line of a journal entry.
///
/// Exactly one of `debit` and `credit` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLine {
    /// Account code from the chart of accounts.
    pub account_code: String,
    /// Account display name.
    pub account_name: String,
    /// Debit amount (0 if credit).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (0 if debit).
    #[serde(default)]
    pub credit: Decimal,
}

impl JournalLine {
    /// A debit line against an account.
    #[must_use]
    pub fn debit(account: &Account, amount: Decimal) -> Self {
        Self {
            account_code: account.code.to_string(),
            account_name: account.name.to_string(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// A credit line against an account.
    #[must_use]
    pub fn credit(account: &Account, amount: Decimal) -> Self {
        Self {
            account_code: account.code.to_string(),
            account_name: account.name.to_string(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// What produced a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalSource {
    /// Posted when the ledger entry was created.
    LedgerEntry,
    /// Posted when a payment was recorded against an AR/AP entry.
    Payment,
}

/// A committed set of journal lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Journal entry identifier.
    pub id: JournalEntryId,
    /// Owner of the books.
    pub owner_id: OwnerId,
    /// Ledger transaction this entry belongs to.
    pub transaction_id: TransactionId,
    /// What produced the entry.
    pub source: JournalSource,
    /// Payment that produced the entry, for payment journals.
    pub payment_id: Option<PaymentId>,
    /// Posting date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Debit and credit lines.
    pub lines: Vec<JournalLine>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Returns the balance check for this entry's lines.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if the line totals overflow.
    pub fn validation(&self) -> Result<JournalValidation, LedgerError> {
        validate_journal_entry(&self.lines)
    }
}
