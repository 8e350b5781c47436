//! Double-entry journal.
//!
//! This module implements:
//! - Journal entry and line types
//! - Balance validation (debits = credits within tolerance)
//! - Structural line checks against the chart of accounts
//! - Journal generation for ledger entries and payments

pub mod generation;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use generation::{journal_for_ledger_entry, journal_for_payment};
pub use types::{JournalEntry, JournalLine, JournalSource};
pub use validation::{
    BALANCE_EPSILON, JournalValidation, check_journal_lines, validate_journal_entry,
};
