//! AR/AP balance updates.
//!
//! The pure halves of the payment-add and payment-delete flows. Repositories
//! read the ledger entry, call [`apply_payment`] or [`reverse_payment`], and
//! write the resulting [`ArapState`] back.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LedgerError;
use super::status::calculate_payment_status;
use super::types::{LedgerEntry, PaymentStatus};

/// AR/AP fields of a ledger entry after a payment change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArapState {
    /// Amount settled so far.
    pub total_paid: Decimal,
    /// Amount still outstanding, floored at zero.
    pub remaining_balance: Decimal,
    /// Status derived from `total_paid` and the entry amount.
    pub payment_status: PaymentStatus,
}

impl ArapState {
    /// Derives the state for an entry amount and a settled total.
    #[must_use]
    pub fn derive(amount: Decimal, total_paid: Decimal) -> Self {
        Self {
            total_paid,
            remaining_balance: (amount - total_paid).max(Decimal::ZERO),
            payment_status: calculate_payment_status(total_paid, amount),
        }
    }

    /// Reads the current state off an entry.
    #[must_use]
    pub const fn of(entry: &LedgerEntry) -> Self {
        Self {
            total_paid: entry.total_paid,
            remaining_balance: entry.remaining_balance,
            payment_status: entry.payment_status,
        }
    }

    /// Writes this state onto an entry.
    pub fn apply_to(self, entry: &mut LedgerEntry) {
        entry.total_paid = self.total_paid;
        entry.remaining_balance = self.remaining_balance;
        entry.payment_status = self.payment_status;
    }
}

fn check_payment(entry: &LedgerEntry, payment_amount: Decimal) -> Result<(), LedgerError> {
    if !entry.is_arap_entry {
        return Err(LedgerError::NotArapEntry(entry.transaction_id));
    }
    if payment_amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidPaymentAmount);
    }
    Ok(())
}

/// Computes the AR/AP state after adding a payment.
///
/// # Errors
///
/// Returns an error if the entry is not AR/AP-tracked, the payment amount
/// is not positive, or the new total overflows.
pub fn apply_payment(
    entry: &LedgerEntry,
    payment_amount: Decimal,
) -> Result<ArapState, LedgerError> {
    check_payment(entry, payment_amount)?;
    let total_paid = entry
        .total_paid
        .checked_add(payment_amount)
        .ok_or(LedgerError::AmountOverflow)?;
    Ok(ArapState::derive(entry.amount, total_paid))
}

/// Computes the AR/AP state after deleting a payment.
///
/// # Errors
///
/// Returns an error if the entry is not AR/AP-tracked or the payment amount
/// is not positive.
pub fn reverse_payment(
    entry: &LedgerEntry,
    payment_amount: Decimal,
) -> Result<ArapState, LedgerError> {
    check_payment(entry, payment_amount)?;
    Ok(ArapState::derive(
        entry.amount,
        (entry.total_paid - payment_amount).max(Decimal::ZERO),
    ))
}

/// Outcome of an AR/AP update, reported to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArapUpdateResult {
    /// Whether the update was written.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Settled total after the update.
    pub new_total_paid: Option<Decimal>,
    /// Outstanding balance after the update.
    pub new_remaining_balance: Option<Decimal>,
    /// Status after the update.
    pub new_status: Option<PaymentStatus>,
}

impl ArapUpdateResult {
    /// A successful update.
    #[must_use]
    pub fn applied(state: ArapState, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            new_total_paid: Some(state.total_paid),
            new_remaining_balance: Some(state.remaining_balance),
            new_status: Some(state.payment_status),
        }
    }

    /// A failed update.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            new_total_paid: None,
            new_remaining_balance: None,
            new_status: None,
        }
    }
}
