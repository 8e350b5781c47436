//! Verification report types.

use factoryflow_shared::types::{JournalEntryId, TransactionId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accounts::AccountType;

/// Default cap on documents loaded per audit.
pub const DEFAULT_MAX_RECORDS: usize = 10_000;

/// Default number of discrepancies shown to the user.
pub const DEFAULT_DISPLAY_LIMIT: usize = 100;

/// Phase of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPhase {
    /// Not running.
    Idle,
    /// Fetching ledger and journal documents.
    Loading,
    /// Building the transaction index.
    Indexing,
    /// Checking each ledger entry.
    Verifying,
    /// Finished; the result is available.
    Complete,
}

impl VerificationPhase {
    /// Returns true if the state machine may move from `self` to `next`.
    ///
    /// Any phase may drop back to `Idle` after an error. A completed run may
    /// start loading again.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (_, Self::Idle)
                | (Self::Idle | Self::Complete, Self::Loading)
                | (Self::Loading, Self::Indexing)
                | (Self::Indexing, Self::Verifying)
                | (Self::Verifying, Self::Complete)
        )
    }
}

impl std::fmt::Display for VerificationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Indexing => write!(f, "indexing"),
            Self::Verifying => write!(f, "verifying"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Progress notification emitted while verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationProgress {
    /// Current phase.
    pub phase: VerificationPhase,
    /// Items processed so far.
    pub current: usize,
    /// Items to process.
    pub total: usize,
}

/// Discrepancy severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The books are inconsistent.
    Error,
    /// Worth a look, not necessarily wrong.
    Warning,
}

/// What a discrepancy is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// A ledger entry has no ledger-sourced journal entry.
    MissingJournalEntry,
    /// A journal entry's debits and credits differ.
    UnbalancedJournalEntry,
    /// A journal entry's total differs from its ledger amount.
    AmountMismatch,
    /// AR/AP fields disagree with the derived values.
    ArapInconsistency,
    /// Journal and ledger dates differ.
    DateMismatch,
    /// A journal entry points at a ledger entry that was not found.
    OrphanedJournalEntry,
    /// A ledger entry has more than one ledger-sourced journal entry.
    DuplicateJournalEntry,
}

impl DiscrepancyKind {
    /// Severity assigned to this kind.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::MissingJournalEntry
            | Self::UnbalancedJournalEntry
            | Self::AmountMismatch
            | Self::ArapInconsistency => Severity::Error,
            Self::DateMismatch | Self::OrphanedJournalEntry | Self::DuplicateJournalEntry => {
                Severity::Warning
            }
        }
    }
}

/// A single finding of the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discrepancy {
    /// What is wrong.
    pub kind: DiscrepancyKind,
    /// How bad it is.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Ledger transaction involved, if any.
    pub transaction_id: Option<TransactionId>,
    /// Journal entry involved, if any.
    pub journal_entry_id: Option<JournalEntryId>,
}

impl Discrepancy {
    /// Creates a discrepancy with the kind's default severity.
    #[must_use]
    pub fn new(kind: DiscrepancyKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            transaction_id: None,
            journal_entry_id: None,
        }
    }

    /// Attaches the ledger transaction.
    #[must_use]
    pub const fn with_transaction(mut self, transaction_id: TransactionId) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    /// Attaches the journal entry.
    #[must_use]
    pub const fn with_journal_entry(mut self, journal_entry_id: JournalEntryId) -> Self {
        self.journal_entry_id = Some(journal_entry_id);
        self
    }
}

/// Debit and credit totals posted to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Account code.
    pub code: String,
    /// Account name as posted.
    pub name: String,
    /// Type resolved from the code range.
    pub account_type: AccountType,
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// Net balance on the account's normal side.
    pub balance: Decimal,
}

/// Aggregate trial balance over every loaded journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceStatus {
    /// Per-account totals, ordered by code.
    pub accounts: Vec<AccountBalance>,
    /// Grand total of debits.
    pub total_debits: Decimal,
    /// Grand total of credits.
    pub total_credits: Decimal,
    /// Absolute difference between the grand totals.
    pub difference: Decimal,
    /// True iff every journal entry balances and the grand totals agree.
    pub is_balanced: bool,
}

/// Outcome of a verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Ledger entries examined.
    pub ledger_entries_checked: usize,
    /// Journal entries examined.
    pub journal_entries_checked: usize,
    /// Every discrepancy found, in ledger order.
    pub discrepancies: Vec<Discrepancy>,
    /// Discrepancies with severity error.
    pub error_count: usize,
    /// Discrepancies with severity warning.
    pub warning_count: usize,
    /// Trial balance across all journal entries.
    pub trial_balance: TrialBalanceStatus,
    /// The load hit the record cap, so the audit is partial.
    pub query_limit_reached: bool,
}

impl VerificationResult {
    /// Returns true if no error-severity discrepancy was found.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.error_count == 0
    }

    /// Returns at most `limit` discrepancies for display.
    #[must_use]
    pub fn displayed_discrepancies(&self, limit: usize) -> &[Discrepancy] {
        &self.discrepancies[..self.discrepancies.len().min(limit)]
    }

    /// Counts discrepancies of one kind.
    #[must_use]
    pub fn count_of(&self, kind: DiscrepancyKind) -> usize {
        self.discrepancies.iter().filter(|d| d.kind == kind).count()
    }
}
