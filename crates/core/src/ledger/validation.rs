//! Business rule validation for new ledger entries.

use chrono::Utc;
use factoryflow_shared::types::TransactionId;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::status::calculate_payment_status;
use super::types::{CapitalMovementKind, LedgerEntry, LedgerEntryType, NewLedgerEntry};

/// Largest amount accepted on a single entry.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Currency precision (fils/millimes).
pub const MAX_DECIMAL_PLACES: u32 = 3;

/// Validates a monetary amount against the entry bounds.
///
/// # Errors
///
/// Returns an error if the amount is zero, negative, above [`MAX_AMOUNT`], or
/// carries more than [`MAX_DECIMAL_PLACES`] significant decimal places.
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::ZeroAmount);
    }
    if amount.is_sign_negative() {
        return Err(LedgerError::NegativeAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::AmountTooLarge {
            amount,
            max: MAX_AMOUNT,
        });
    }
    if amount.normalize().scale() > MAX_DECIMAL_PLACES {
        return Err(LedgerError::TooManyDecimalPlaces(amount));
    }
    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<String, LedgerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Validates a submitted entry and returns the normalized ledger entry.
///
/// Non-AR/AP entries are settled on creation (`total_paid == amount`).
/// AR/AP entries start unpaid; immediate settlement is recorded afterwards as
/// a regular payment so the payment history stays complete.
///
/// # Errors
///
/// Returns `LedgerError` if a required field is blank, the amount is out of
/// bounds, an AR/AP entry lacks a party or has an untrackable type, or a
/// capital movement uses an unknown category.
pub fn validate_ledger_entry(input: &NewLedgerEntry) -> Result<LedgerEntry, LedgerError> {
    let description = required(&input.description, "description")?;
    let category = required(&input.category, "category")?;
    validate_amount(input.amount)?;

    if input.entry_type == LedgerEntryType::CapitalMovement
        && CapitalMovementKind::from_category(&category).is_none()
    {
        return Err(LedgerError::UnmappedCategory(category));
    }

    let associated_party = optional(input.associated_party.as_deref());

    let (total_paid, remaining_balance) = if input.is_arap_entry {
        if input.entry_type.arap_direction().is_none() {
            return Err(LedgerError::ArapNotAllowed(input.entry_type));
        }
        if associated_party.is_none() {
            return Err(LedgerError::MissingParty);
        }
        (Decimal::ZERO, input.amount)
    } else {
        (input.amount, Decimal::ZERO)
    };

    Ok(LedgerEntry {
        transaction_id: TransactionId::new(),
        owner_id: input.owner_id,
        entry_type: input.entry_type,
        amount: input.amount,
        category,
        subcategory: optional(input.subcategory.as_deref()),
        description,
        date: input.date,
        associated_party,
        is_arap_entry: input.is_arap_entry,
        total_paid,
        remaining_balance,
        payment_status: calculate_payment_status(total_paid, input.amount),
        version: 0,
        created_at: Utc::now(),
    })
}
