//! Ledger entries and AR/AP tracking.
//!
//! This module implements the ledger side of the books:
//! - Ledger entry and payment domain types
//! - Payment status derivation
//! - Ledger entry validation
//! - AR/AP balance updates on payment add and delete
//! - Error types for ledger operations

pub mod arap;
pub mod error;
pub mod status;
pub mod types;
pub mod validation;

#[cfg(test)]
mod arap_props;
#[cfg(test)]
mod status_props;

pub use arap::{ArapState, ArapUpdateResult, apply_payment, reverse_payment};
pub use error::LedgerError;
pub use status::calculate_payment_status;
pub use types::{
    ArapDirection, CapitalMovementKind, LedgerEntry, LedgerEntryType, NewLedgerEntry, NewPayment,
    OWNER_CAPITAL_CATEGORY, OWNER_DRAWINGS_CATEGORY, Payment, PaymentStatus,
};
pub use validation::{MAX_AMOUNT, MAX_DECIMAL_PLACES, validate_amount, validate_ledger_entry};
