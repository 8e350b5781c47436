//! Property-based tests for payment status derivation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::status::calculate_payment_status;
use super::types::PaymentStatus;

/// Strategy to generate a positive transaction amount (0.001 to 1,000,000.000).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|mils| Decimal::new(mils, 3))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Anything at or above the amount is paid.
    #[test]
    fn prop_at_or_above_amount_is_paid(
        amount in positive_amount(),
        extra in 0i64..1_000_000i64,
    ) {
        let total_paid = amount + Decimal::new(extra, 3);
        prop_assert_eq!(calculate_payment_status(total_paid, amount), PaymentStatus::Paid);
    }

    /// Nothing or less than nothing paid is unpaid.
    #[test]
    fn prop_non_positive_is_unpaid(
        amount in positive_amount(),
        paid in -1_000_000i64..=0i64,
    ) {
        let total_paid = Decimal::new(paid, 3);
        prop_assert_eq!(calculate_payment_status(total_paid, amount), PaymentStatus::Unpaid);
    }

    /// Strictly between zero and the amount is partial.
    #[test]
    fn prop_between_is_partial(
        amount in positive_amount(),
        fraction in 1u32..1000u32,
    ) {
        let total_paid = (amount * Decimal::new(i64::from(fraction), 3)).round_dp(3);
        prop_assume!(total_paid > Decimal::ZERO && total_paid < amount);
        prop_assert_eq!(calculate_payment_status(total_paid, amount), PaymentStatus::Partial);
    }
}
