//! Payment status derivation.

use rust_decimal::Decimal;

use super::types::PaymentStatus;

/// Derives the payment status from the amount settled so far.
///
/// `Paid` wins when `total_paid >= amount`, so a zero-amount entry is paid.
#[must_use]
pub fn calculate_payment_status(total_paid: Decimal, amount: Decimal) -> PaymentStatus {
    if total_paid >= amount {
        PaymentStatus::Paid
    } else if total_paid <= Decimal::ZERO {
        PaymentStatus::Unpaid
    } else {
        PaymentStatus::Partial
    }
}
