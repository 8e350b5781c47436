//! Property-based tests for journal balance validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::JournalLine;
use super::validation::{BALANCE_EPSILON, validate_journal_entry};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn line_strategy() -> impl Strategy<Value = JournalLine> {
    (any::<bool>(), amount_strategy()).prop_map(|(is_debit, amount)| JournalLine {
        account_code: if is_debit { "1000" } else { "4000" }.to_string(),
        account_name: String::new(),
        debit: if is_debit { amount } else { Decimal::ZERO },
        credit: if is_debit { Decimal::ZERO } else { amount },
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Invalid exactly when the totals differ by at least epsilon.
    #[test]
    fn prop_invalid_iff_difference_at_least_epsilon(
        lines in prop::collection::vec(line_strategy(), 0..12),
    ) {
        let result = validate_journal_entry(&lines).unwrap();
        let debits: Decimal = lines.iter().map(|l| l.debit).sum();
        let credits: Decimal = lines.iter().map(|l| l.credit).sum();

        prop_assert_eq!(result.total_debits, debits);
        prop_assert_eq!(result.total_credits, credits);
        prop_assert_eq!(!result.is_valid, (debits - credits).abs() >= BALANCE_EPSILON);
    }

    /// Mirroring every line onto the other side always balances.
    #[test]
    fn prop_mirrored_lines_balance(
        lines in prop::collection::vec(line_strategy(), 0..12),
    ) {
        let mut all = lines.clone();
        all.extend(lines.iter().map(|l| JournalLine {
            account_code: l.account_code.clone(),
            account_name: l.account_name.clone(),
            debit: l.credit,
            credit: l.debit,
        }));

        let result = validate_journal_entry(&all).unwrap();
        prop_assert!(result.is_valid);
        prop_assert_eq!(result.difference, Decimal::ZERO);
    }

    /// Line order does not matter.
    #[test]
    fn prop_order_independent(
        lines in prop::collection::vec(line_strategy(), 0..12),
    ) {
        let mut reversed = lines.clone();
        reversed.reverse();
        prop_assert_eq!(validate_journal_entry(&lines), validate_journal_entry(&reversed));
    }
}
