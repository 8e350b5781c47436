//! Tests for the integrity verifier.

use chrono::NaiveDate;
use factoryflow_shared::types::OwnerId;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::journal::{JournalEntry, journal_for_ledger_entry, journal_for_payment};
use crate::ledger::{
    LedgerEntry, LedgerEntryType, NewLedgerEntry, Payment, PaymentStatus, apply_payment,
    validate_ledger_entry,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn entry(owner_id: OwnerId, description: &str, is_arap_entry: bool) -> LedgerEntry {
    validate_ledger_entry(&NewLedgerEntry {
        owner_id,
        entry_type: LedgerEntryType::Income,
        amount: dec!(1000),
        category: "Sales".to_string(),
        subcategory: None,
        description: description.to_string(),
        date: date(1),
        associated_party: Some("Customer".to_string()),
        is_arap_entry,
        immediate_settlement: false,
    })
    .unwrap()
}

fn with_journal(entry: &LedgerEntry) -> JournalEntry {
    journal_for_ledger_entry(entry).unwrap()
}

fn run(
    ledger: &[LedgerEntry],
    journals: &[JournalEntry],
    query_limit_reached: bool,
) -> VerificationResult {
    let mut verifier = IntegrityVerifier::new();
    verifier.begin_loading().unwrap();
    let result = verifier
        .verify(ledger, journals, query_limit_reached, |_| {})
        .unwrap();
    assert_eq!(verifier.phase(), VerificationPhase::Complete);
    result
}

#[test]
fn test_clean_books() {
    let owner = OwnerId::new();
    let mut receivable = entry(owner, "Invoice 7", true);
    let payment = Payment::new(owner, receivable.transaction_id, dec!(400), date(5), None);
    apply_payment(&receivable, payment.amount)
        .unwrap()
        .apply_to(&mut receivable);
    let cash_sale = entry(owner, "Counter sale", false);

    let journals = vec![
        with_journal(&receivable),
        journal_for_payment(&receivable, &payment).unwrap(),
        with_journal(&cash_sale),
    ];
    let result = run(&[receivable, cash_sale], &journals, false);

    assert!(result.discrepancies.is_empty());
    assert!(result.is_consistent());
    assert_eq!(result.ledger_entries_checked, 2);
    assert_eq!(result.journal_entries_checked, 3);
    assert!(result.trial_balance.is_balanced);
    assert_eq!(result.trial_balance.total_debits, dec!(2400));

    let balances: Vec<(&str, Decimal)> = result
        .trial_balance
        .accounts
        .iter()
        .map(|a| (a.code.as_str(), a.balance))
        .collect();
    assert_eq!(
        balances,
        [("1000", dec!(1400)), ("1200", dec!(600)), ("4000", dec!(2000))]
    );
    assert_eq!(result.trial_balance.accounts[1].name, "Accounts Receivable");
}

#[test]
fn test_missing_journal_is_single_error() {
    let ledger = vec![entry(OwnerId::new(), "Lost invoice", false)];
    let result = run(&ledger, &[], false);

    assert_eq!(result.discrepancies.len(), 1);
    let discrepancy = &result.discrepancies[0];
    assert_eq!(discrepancy.kind, DiscrepancyKind::MissingJournalEntry);
    assert_eq!(discrepancy.severity, Severity::Error);
    assert_eq!(discrepancy.transaction_id, Some(ledger[0].transaction_id));
    assert_eq!(result.error_count, 1);
    assert_eq!(result.warning_count, 0);
}

#[test]
fn test_unbalanced_journal_breaks_trial_balance() {
    let ledger = vec![entry(OwnerId::new(), "Invoice", false)];
    let mut journal = with_journal(&ledger[0]);
    journal.lines[1].credit = dec!(990);

    let result = run(&ledger, &[journal], false);
    assert_eq!(result.count_of(DiscrepancyKind::UnbalancedJournalEntry), 1);
    assert!(!result.trial_balance.is_balanced);
    assert_eq!(result.trial_balance.difference, dec!(10));
}

#[test]
fn test_overflowing_journal_is_reported_as_unbalanced() {
    let ledger = vec![entry(OwnerId::new(), "Invoice", false)];
    let mut journal = with_journal(&ledger[0]);
    let mut extra = journal.lines[0].clone();
    journal.lines[0].debit = Decimal::MAX;
    extra.debit = Decimal::MAX;
    journal.lines.push(extra);

    let result = run(&ledger, &[journal], false);
    assert_eq!(result.count_of(DiscrepancyKind::UnbalancedJournalEntry), 1);
    assert_eq!(result.count_of(DiscrepancyKind::AmountMismatch), 0);
    assert!(!result.trial_balance.is_balanced);
}

#[test]
fn test_amount_and_date_mismatch() {
    let ledger = vec![entry(OwnerId::new(), "Invoice", false)];
    let mut journal = with_journal(&ledger[0]);
    journal.date = date(9);
    journal.lines[0].debit = dec!(900);
    journal.lines[1].credit = dec!(900);

    let result = run(&ledger, &[journal], false);
    assert_eq!(result.count_of(DiscrepancyKind::AmountMismatch), 1);
    assert_eq!(result.count_of(DiscrepancyKind::DateMismatch), 1);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.warning_count, 1);
    assert!(result.trial_balance.is_balanced);
}

#[test]
fn test_arap_inconsistency() {
    let mut broken = entry(OwnerId::new(), "Invoice", true);
    broken.total_paid = dec!(1000);
    broken.remaining_balance = Decimal::ZERO;
    broken.payment_status = PaymentStatus::Partial;
    let journal = with_journal(&broken);

    let result = run(&[broken], &[journal], false);
    assert_eq!(result.count_of(DiscrepancyKind::ArapInconsistency), 1);
}

#[rstest]
#[case(false, 1)]
#[case(true, 0)]
fn test_orphans_only_reported_for_full_loads(
    #[case] query_limit_reached: bool,
    #[case] expected: usize,
) {
    let orphan_source = entry(OwnerId::new(), "Deleted entry", false);
    let orphan = with_journal(&orphan_source);

    let result = run(&[], &[orphan], query_limit_reached);
    assert_eq!(result.count_of(DiscrepancyKind::OrphanedJournalEntry), expected);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.query_limit_reached, query_limit_reached);
}

#[test]
fn test_duplicate_journal_warning() {
    let ledger = vec![entry(OwnerId::new(), "Invoice", false)];
    let journals = vec![with_journal(&ledger[0]), with_journal(&ledger[0])];

    let result = run(&ledger, &journals, false);
    assert_eq!(result.count_of(DiscrepancyKind::DuplicateJournalEntry), 1);
    assert!(result.is_consistent());
}

#[test]
fn test_progress_reported_per_entry() {
    let owner = OwnerId::new();
    let ledger: Vec<_> = (0..3).map(|i| entry(owner, &format!("Sale {i}"), false)).collect();
    let journals: Vec<_> = ledger.iter().map(with_journal).collect();

    let mut seen = Vec::new();
    let mut verifier = IntegrityVerifier::new();
    verifier.begin_loading().unwrap();
    verifier
        .verify(&ledger, &journals, false, |progress| seen.push(progress))
        .unwrap();

    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|p| p.phase == VerificationPhase::Verifying));
    assert_eq!(seen.last().map(|p| (p.current, p.total)), Some((3, 3)));
}

#[test]
fn test_display_limit_caps_discrepancies() {
    let owner = OwnerId::new();
    let ledger: Vec<_> = (0..5).map(|i| entry(owner, &format!("Sale {i}"), false)).collect();

    let result = run(&ledger, &[], false);
    assert_eq!(result.discrepancies.len(), 5);
    assert_eq!(result.displayed_discrepancies(2).len(), 2);
    assert_eq!(result.displayed_discrepancies(DEFAULT_DISPLAY_LIMIT).len(), 5);
}

#[test]
fn test_verify_requires_loading_phase() {
    let mut verifier = IntegrityVerifier::new();
    let err = verifier.verify(&[], &[], false, |_| {}).unwrap_err();
    assert_eq!(
        err,
        VerificationError::InvalidTransition {
            from: VerificationPhase::Idle,
            to: VerificationPhase::Indexing,
        }
    );
    assert_eq!(verifier.phase(), VerificationPhase::Idle);
}

#[test]
fn test_fail_and_rerun() {
    let mut verifier = IntegrityVerifier::new();
    verifier.begin_loading().unwrap();
    assert!(verifier.begin_loading().is_err());
    verifier.fail();
    assert_eq!(verifier.phase(), VerificationPhase::Idle);

    verifier.begin_loading().unwrap();
    verifier.verify(&[], &[], false, |_| {}).unwrap();
    verifier.begin_loading().unwrap();
    assert_eq!(verifier.phase(), VerificationPhase::Loading);
}

#[rstest]
#[case(VerificationPhase::Idle, VerificationPhase::Loading, true)]
#[case(VerificationPhase::Loading, VerificationPhase::Indexing, true)]
#[case(VerificationPhase::Indexing, VerificationPhase::Verifying, true)]
#[case(VerificationPhase::Verifying, VerificationPhase::Complete, true)]
#[case(VerificationPhase::Complete, VerificationPhase::Loading, true)]
#[case(VerificationPhase::Verifying, VerificationPhase::Idle, true)]
#[case(VerificationPhase::Idle, VerificationPhase::Verifying, false)]
#[case(VerificationPhase::Loading, VerificationPhase::Complete, false)]
#[case(VerificationPhase::Complete, VerificationPhase::Indexing, false)]
fn test_phase_transitions(
    #[case] from: VerificationPhase,
    #[case] to: VerificationPhase,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}
