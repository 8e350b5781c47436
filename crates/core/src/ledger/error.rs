//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur during ledger operations,
//! including entry validation errors, payment errors, journal errors,
//! permission errors, and concurrency errors.

use factoryflow_shared::AppError;
use factoryflow_shared::types::{PaymentId, TransactionId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::LedgerEntryType;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A required field is missing or blank.
    #[error("Required field missing: {0}")]
    MissingField(&'static str),

    /// Amount cannot be zero.
    #[error("Amount cannot be zero")]
    ZeroAmount,

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Amount exceeds the allowed maximum.
    #[error("Amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge {
        /// The submitted amount.
        amount: Decimal,
        /// The allowed maximum.
        max: Decimal,
    },

    /// Amount has more decimal places than the currency supports.
    #[error("Amount {0} has too many decimal places")]
    TooManyDecimalPlaces(Decimal),

    /// AR/AP entries must name a client or supplier.
    #[error("AR/AP entries require an associated party")]
    MissingParty,

    /// This entry type cannot be tracked as AR/AP.
    #[error("{0} entries cannot be tracked as receivables or payables")]
    ArapNotAllowed(LedgerEntryType),

    /// No journal rule exists for this category.
    #[error("No journal mapping for category: {0}")]
    UnmappedCategory(String),

    // ========== Payment Errors ==========
    /// Payments can only be recorded against AR/AP entries.
    #[error("Transaction {0} is not an AR/AP entry")]
    NotArapEntry(TransactionId),

    /// Payment amount must be positive.
    #[error("Payment amount must be positive")]
    InvalidPaymentAmount,

    /// Payment exceeds what is still owed.
    #[error("Payment of {amount} exceeds remaining balance of {remaining}")]
    PaymentExceedsBalance {
        /// The submitted payment amount.
        amount: Decimal,
        /// The outstanding balance.
        remaining: Decimal,
    },

    /// Ledger entry not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Payment not found.
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    // ========== Journal Errors ==========
    /// Account code is not numeric or outside every type range.
    #[error("Invalid account code: {0}")]
    InvalidAccountCode(String),

    /// Account code is well-formed but not in the chart of accounts.
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// A journal line must carry exactly one non-zero side.
    #[error("Journal line {index} is invalid: {reason}")]
    InvalidJournalLine {
        /// Zero-based line index.
        index: usize,
        /// What is wrong with the line.
        reason: &'static str,
    },

    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedJournal {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// A running total exceeds the representable range.
    #[error("Amount total exceeds the representable range")]
    AmountOverflow,

    // ========== Permission Errors ==========
    /// The caller's role does not allow the action.
    #[error("Role {role} is not allowed to {action}")]
    PermissionDenied {
        /// The caller's role.
        role: String,
        /// The attempted action.
        action: &'static str,
    },

    // ========== Concurrency Errors ==========
    /// The document changed between read and write.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            Self::TooManyDecimalPlaces(_) => "TOO_MANY_DECIMAL_PLACES",
            Self::MissingParty => "MISSING_PARTY",
            Self::ArapNotAllowed(_) => "ARAP_NOT_ALLOWED",
            Self::UnmappedCategory(_) => "UNMAPPED_CATEGORY",
            Self::NotArapEntry(_) => "NOT_ARAP_ENTRY",
            Self::InvalidPaymentAmount => "INVALID_PAYMENT_AMOUNT",
            Self::PaymentExceedsBalance { .. } => "PAYMENT_EXCEEDS_BALANCE",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::PaymentNotFound(_) => "PAYMENT_NOT_FOUND",
            Self::InvalidAccountCode(_) => "INVALID_ACCOUNT_CODE",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::InvalidJournalLine { .. } => "INVALID_JOURNAL_LINE",
            Self::UnbalancedJournal { .. } => "UNBALANCED_JOURNAL",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::MissingField(_)
            | Self::ZeroAmount
            | Self::NegativeAmount
            | Self::AmountTooLarge { .. }
            | Self::TooManyDecimalPlaces(_)
            | Self::MissingParty
            | Self::ArapNotAllowed(_)
            | Self::UnmappedCategory(_)
            | Self::NotArapEntry(_)
            | Self::InvalidPaymentAmount
            | Self::PaymentExceedsBalance { .. }
            | Self::InvalidAccountCode(_)
            | Self::UnknownAccount(_)
            | Self::InvalidJournalLine { .. }
            | Self::UnbalancedJournal { .. }
            | Self::AmountOverflow => 400,

            // 403 Forbidden - permission errors
            Self::PermissionDenied { .. } => 403,

            // 404 Not Found
            Self::TransactionNotFound(_) | Self::PaymentNotFound(_) => 404,

            // 409 Conflict - concurrency errors
            Self::ConcurrentModification => 409,
        }
    }

    /// Returns true if the caller may retry the same request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.http_status_code() {
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Validation(message),
        }
    }
}
