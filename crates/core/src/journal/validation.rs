//! Journal balance validation.

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::JournalLine;
use crate::accounts::validate_account_code;
use crate::ledger::{LedgerError, MAX_AMOUNT};

/// Tolerance for debit/credit comparisons (0.0001).
pub const BALANCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Result of a journal balance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalValidation {
    /// Whether debits equal credits within [`BALANCE_EPSILON`].
    pub is_valid: bool,
    /// Sum of all debit amounts.
    pub total_debits: Decimal,
    /// Sum of all credit amounts.
    pub total_credits: Decimal,
    /// Absolute difference between the totals.
    pub difference: Decimal,
}

/// Checks that the debit and credit totals of a set of lines agree.
///
/// Amounts are summed by magnitude, so a line recorded with a negative sign
/// still counts toward its side. An empty set is valid.
///
/// # Errors
///
/// Returns `AmountOverflow` if either total does not fit in a `Decimal`.
pub fn validate_journal_entry(lines: &[JournalLine]) -> Result<JournalValidation, LedgerError> {
    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;
    for line in lines {
        total_debits = total_debits
            .checked_add(line.debit.abs())
            .ok_or(LedgerError::AmountOverflow)?;
        total_credits = total_credits
            .checked_add(line.credit.abs())
            .ok_or(LedgerError::AmountOverflow)?;
    }
    // Both totals are non-negative, so the subtraction cannot overflow.
    let difference = (total_debits - total_credits).abs();

    Ok(JournalValidation {
        is_valid: difference < BALANCE_EPSILON,
        total_debits,
        total_credits,
        difference,
    })
}

/// Structural check applied before a journal entry is committed.
///
/// Every line must reference an account in the chart and carry exactly one
/// positive side no larger than [`MAX_AMOUNT`], and the lines must balance.
///
/// # Errors
///
/// Returns the first offending line, or `UnbalancedJournal`.
pub fn check_journal_lines(lines: &[JournalLine]) -> Result<JournalValidation, LedgerError> {
    for (index, line) in lines.iter().enumerate() {
        if line.account_code.trim().is_empty() {
            return Err(LedgerError::InvalidJournalLine {
                index,
                reason: "missing account code",
            });
        }
        validate_account_code(&line.account_code)?;

        if line.debit.is_sign_negative() || line.credit.is_sign_negative() {
            return Err(LedgerError::InvalidJournalLine {
                index,
                reason: "amounts must not be negative",
            });
        }
        for amount in [line.debit, line.credit] {
            if amount > MAX_AMOUNT {
                return Err(LedgerError::AmountTooLarge {
                    amount,
                    max: MAX_AMOUNT,
                });
            }
        }
        match (line.debit.is_zero(), line.credit.is_zero()) {
            (true, true) => {
                return Err(LedgerError::InvalidJournalLine {
                    index,
                    reason: "line has neither debit nor credit",
                });
            }
            (false, false) => {
                return Err(LedgerError::InvalidJournalLine {
                    index,
                    reason: "line has both debit and credit",
                });
            }
            _ => {}
        }
    }

    let validation = validate_journal_entry(lines)?;
    if !validation.is_valid {
        return Err(LedgerError::UnbalancedJournal {
            debit: validation.total_debits,
            credit: validation.total_credits,
        });
    }
    Ok(validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(code: &str, debit: Decimal, credit: Decimal) -> JournalLine {
        JournalLine {
            account_code: code.to_string(),
            account_name: String::new(),
            debit,
            credit,
        }
    }

    #[test]
    fn test_balanced_lines() {
        let lines = vec![
            line("1000", dec!(1000), dec!(0)),
            line("4000", dec!(0), dec!(1000)),
        ];
        let result = validate_journal_entry(&lines).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.difference, Decimal::ZERO);
        assert_eq!(result.total_debits, dec!(1000));
        assert_eq!(result.total_credits, dec!(1000));
    }

    #[test]
    fn test_unbalanced_lines() {
        let lines = vec![
            line("1000", dec!(1000), dec!(0)),
            line("4000", dec!(0), dec!(500)),
        ];
        let result = validate_journal_entry(&lines).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.difference, dec!(500));
    }

    #[test]
    fn test_empty_lines_are_valid() {
        let result = validate_journal_entry(&[]).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.total_debits, Decimal::ZERO);
        assert_eq!(result.total_credits, Decimal::ZERO);
    }

    #[test]
    fn test_tolerance_boundary() {
        let within = vec![
            line("1000", dec!(100.00009), dec!(0)),
            line("4000", dec!(0), dec!(100)),
        ];
        assert!(validate_journal_entry(&within).unwrap().is_valid);

        let at_epsilon = vec![
            line("1000", dec!(100.0001), dec!(0)),
            line("4000", dec!(0), dec!(100)),
        ];
        assert!(!validate_journal_entry(&at_epsilon).unwrap().is_valid);
    }

    #[test]
    fn test_sign_is_ignored() {
        let lines = vec![
            line("1000", dec!(-250), dec!(0)),
            line("4000", dec!(0), dec!(250)),
        ];
        assert!(validate_journal_entry(&lines).unwrap().is_valid);
    }

    #[test]
    fn test_check_lines_accepts_balanced_entry() {
        let lines = vec![
            line("5200", dec!(700), dec!(0)),
            line("1000", dec!(0), dec!(700)),
        ];
        assert!(check_journal_lines(&lines).is_ok());
    }

    #[test]
    fn test_check_lines_rejects_structural_problems() {
        let both = vec![line("1000", dec!(1), dec!(1))];
        assert!(matches!(
            check_journal_lines(&both),
            Err(LedgerError::InvalidJournalLine { index: 0, .. })
        ));

        let neither = vec![
            line("1000", dec!(5), dec!(0)),
            line("4000", dec!(0), dec!(0)),
        ];
        assert!(matches!(
            check_journal_lines(&neither),
            Err(LedgerError::InvalidJournalLine { index: 1, .. })
        ));

        let unknown = vec![line("1999", dec!(5), dec!(0))];
        assert!(matches!(
            check_journal_lines(&unknown),
            Err(LedgerError::UnknownAccount(_))
        ));

        let unbalanced = vec![
            line("1000", dec!(5), dec!(0)),
            line("4000", dec!(0), dec!(4)),
        ];
        assert!(matches!(
            check_journal_lines(&unbalanced),
            Err(LedgerError::UnbalancedJournal { .. })
        ));
    }

    #[test]
    fn test_overflowing_totals_are_rejected() {
        let lines = vec![
            line("1000", Decimal::MAX, dec!(0)),
            line("1000", Decimal::MAX, dec!(0)),
        ];
        assert_eq!(
            validate_journal_entry(&lines),
            Err(LedgerError::AmountOverflow)
        );
        assert!(matches!(
            check_journal_lines(&lines),
            Err(LedgerError::AmountTooLarge { .. })
        ));
    }
}
