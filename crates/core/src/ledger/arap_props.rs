//! Property-based tests for AR/AP updates.

use chrono::{NaiveDate, Utc};
use factoryflow_shared::types::{OwnerId, TransactionId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::arap::{ArapState, apply_payment, reverse_payment};
use super::status::calculate_payment_status;
use super::types::{LedgerEntry, LedgerEntryType, PaymentStatus};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_entry(amount: Decimal, total_paid: Decimal) -> LedgerEntry {
    let state = ArapState::derive(amount, total_paid);
    LedgerEntry {
        transaction_id: TransactionId::new(),
        owner_id: OwnerId::new(),
        entry_type: LedgerEntryType::Expense,
        amount,
        category: "Raw Materials".to_string(),
        subcategory: None,
        description: "Steel sheets".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        associated_party: Some("Supplier".to_string()),
        is_arap_entry: true,
        total_paid: state.total_paid,
        remaining_balance: state.remaining_balance,
        payment_status: state.payment_status,
        version: 3,
        created_at: Utc::now(),
    }
}

/// An entry with some amount already settled, never more than the amount.
fn entry_strategy() -> impl Strategy<Value = LedgerEntry> {
    amount_strategy().prop_flat_map(|amount| {
        let max_cents = i64::try_from((amount * Decimal::ONE_HUNDRED).trunc()).unwrap_or(0);
        (0i64..=max_cents).prop_map(move |paid| make_entry(amount, Decimal::new(paid, 2)))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Adding then deleting the same payment restores the entry.
    #[test]
    fn prop_add_then_reverse_round_trips(
        entry in entry_strategy(),
        payment in amount_strategy(),
    ) {
        let before = ArapState::of(&entry);

        let mut updated = entry.clone();
        apply_payment(&entry, payment).unwrap().apply_to(&mut updated);
        let after = reverse_payment(&updated, payment).unwrap();

        prop_assert_eq!(after, before);
    }

    /// While nothing is overpaid, settled plus outstanding equals the amount.
    #[test]
    fn prop_paid_plus_remaining_equals_amount(
        entry in entry_strategy(),
        percent in 1u32..=100u32,
    ) {
        let payment = (entry.remaining_balance * Decimal::new(i64::from(percent), 2)).round_dp(2);
        prop_assume!(payment > Decimal::ZERO);
        let state = apply_payment(&entry, payment).unwrap();
        prop_assert_eq!(state.total_paid + state.remaining_balance, entry.amount);
    }

    /// The stored status always matches the derived status.
    #[test]
    fn prop_status_is_derived(
        entry in entry_strategy(),
        payment in amount_strategy(),
    ) {
        let added = apply_payment(&entry, payment).unwrap();
        prop_assert_eq!(
            added.payment_status,
            calculate_payment_status(added.total_paid, entry.amount)
        );

        let reversed = reverse_payment(&entry, payment).unwrap();
        prop_assert_eq!(
            reversed.payment_status,
            calculate_payment_status(reversed.total_paid, entry.amount)
        );
    }

    /// Balances never go negative.
    #[test]
    fn prop_balances_never_negative(
        entry in entry_strategy(),
        payment in amount_strategy(),
    ) {
        for state in [
            apply_payment(&entry, payment).unwrap(),
            reverse_payment(&entry, payment).unwrap(),
        ] {
            prop_assert!(state.total_paid >= Decimal::ZERO);
            prop_assert!(state.remaining_balance >= Decimal::ZERO);
        }
    }

    /// Paying off the remaining balance always lands on paid.
    #[test]
    fn prop_paying_remaining_settles(entry in entry_strategy()) {
        prop_assume!(entry.remaining_balance > Decimal::ZERO);
        let state = apply_payment(&entry, entry.remaining_balance).unwrap();
        prop_assert_eq!(state.payment_status, PaymentStatus::Paid);
        prop_assert_eq!(state.remaining_balance, Decimal::ZERO);
    }
}
