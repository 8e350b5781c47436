//! Batch verifier cross-checking ledger entries against journal entries.

use std::collections::{BTreeMap, HashMap, HashSet};

use factoryflow_shared::types::TransactionId;
use rust_decimal::Decimal;

use super::error::VerificationError;
use super::types::{
    AccountBalance, Discrepancy, DiscrepancyKind, Severity, TrialBalanceStatus, VerificationPhase,
    VerificationProgress, VerificationResult,
};
use crate::accounts::{AccountType, find_account};
use crate::journal::{BALANCE_EPSILON, JournalEntry, JournalSource};
use crate::ledger::{ArapState, LedgerEntry};

/// Drives a verification run through its phases.
#[derive(Debug)]
pub struct IntegrityVerifier {
    phase: VerificationPhase,
}

impl Default for IntegrityVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrityVerifier {
    /// Creates an idle verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: VerificationPhase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> VerificationPhase {
        self.phase
    }

    /// Moves to `next` if the transition is allowed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for a disallowed phase change.
    pub fn transition(&mut self, next: VerificationPhase) -> Result<(), VerificationError> {
        if !self.phase.can_transition_to(next) {
            return Err(VerificationError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Enters `Loading`. The caller fetches documents, then calls [`Self::verify`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if a run is already in progress.
    pub fn begin_loading(&mut self) -> Result<(), VerificationError> {
        self.transition(VerificationPhase::Loading)
    }

    /// Aborts the run after a load failure.
    pub const fn fail(&mut self) {
        self.phase = VerificationPhase::Idle;
    }

    /// Audits the loaded documents.
    ///
    /// Must be called in `Loading`. Moves through `Indexing` and `Verifying`
    /// and ends in `Complete`. `on_progress` fires once per ledger entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the verifier is not loading.
    pub fn verify<F>(
        &mut self,
        ledger: &[LedgerEntry],
        journals: &[JournalEntry],
        query_limit_reached: bool,
        mut on_progress: F,
    ) -> Result<VerificationResult, VerificationError>
    where
        F: FnMut(VerificationProgress),
    {
        self.transition(VerificationPhase::Indexing)?;

        let mut by_transaction: HashMap<TransactionId, Vec<&JournalEntry>> = HashMap::new();
        for journal in journals {
            by_transaction
                .entry(journal.transaction_id)
                .or_default()
                .push(journal);
        }
        let known: HashSet<TransactionId> = ledger.iter().map(|e| e.transaction_id).collect();

        self.transition(VerificationPhase::Verifying)?;

        let total = ledger.len();
        let mut discrepancies = Vec::new();
        for (index, entry) in ledger.iter().enumerate() {
            let related = by_transaction
                .get(&entry.transaction_id)
                .map_or(&[][..], Vec::as_slice);
            check_ledger_entry(entry, related, &mut discrepancies);
            on_progress(VerificationProgress {
                phase: VerificationPhase::Verifying,
                current: index + 1,
                total,
            });
        }

        // A partial ledger load cannot tell orphans from unloaded entries.
        if !query_limit_reached {
            for journal in journals.iter().filter(|j| !known.contains(&j.transaction_id)) {
                discrepancies.push(
                    Discrepancy::new(
                        DiscrepancyKind::OrphanedJournalEntry,
                        format!(
                            "Journal entry \"{}\" references a missing ledger entry",
                            journal.description
                        ),
                    )
                    .with_transaction(journal.transaction_id)
                    .with_journal_entry(journal.id),
                );
            }
        }

        let trial_balance = trial_balance(journals);
        let error_count = discrepancies
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warning_count = discrepancies.len() - error_count;

        self.transition(VerificationPhase::Complete)?;

        Ok(VerificationResult {
            ledger_entries_checked: ledger.len(),
            journal_entries_checked: journals.len(),
            discrepancies,
            error_count,
            warning_count,
            trial_balance,
            query_limit_reached,
        })
    }
}

fn check_ledger_entry(
    entry: &LedgerEntry,
    journals: &[&JournalEntry],
    discrepancies: &mut Vec<Discrepancy>,
) {
    let tx = entry.transaction_id;
    let primary: Vec<&JournalEntry> = journals
        .iter()
        .copied()
        .filter(|j| j.source == JournalSource::LedgerEntry)
        .collect();

    match primary.as_slice() {
        [] => discrepancies.push(
            Discrepancy::new(
                DiscrepancyKind::MissingJournalEntry,
                format!("Ledger entry \"{}\" has no journal entry", entry.description),
            )
            .with_transaction(tx),
        ),
        [first, rest @ ..] => {
            for duplicate in rest {
                discrepancies.push(
                    Discrepancy::new(
                        DiscrepancyKind::DuplicateJournalEntry,
                        format!(
                            "Ledger entry \"{}\" has more than one journal entry",
                            entry.description
                        ),
                    )
                    .with_transaction(tx)
                    .with_journal_entry(duplicate.id),
                );
            }

            // An overflowing journal is reported as unbalanced below.
            if let Ok(validation) = first.validation()
                && validation.total_debits != entry.amount
            {
                discrepancies.push(
                    Discrepancy::new(
                        DiscrepancyKind::AmountMismatch,
                        format!(
                            "Journal total {} does not match ledger amount {}",
                            validation.total_debits, entry.amount
                        ),
                    )
                    .with_transaction(tx)
                    .with_journal_entry(first.id),
                );
            }
            if first.date != entry.date {
                discrepancies.push(
                    Discrepancy::new(
                        DiscrepancyKind::DateMismatch,
                        format!(
                            "Journal date {} differs from ledger date {}",
                            first.date, entry.date
                        ),
                    )
                    .with_transaction(tx)
                    .with_journal_entry(first.id),
                );
            }
        }
    }

    for journal in journals {
        let message = match journal.validation() {
            Ok(validation) if validation.is_valid => continue,
            Ok(validation) => format!(
                "Journal entry is out of balance: debits {}, credits {}",
                validation.total_debits, validation.total_credits
            ),
            Err(err) => format!("Journal entry cannot be totalled: {err}"),
        };
        discrepancies.push(
            Discrepancy::new(DiscrepancyKind::UnbalancedJournalEntry, message)
                .with_transaction(tx)
                .with_journal_entry(journal.id),
        );
    }

    if entry.is_arap_entry {
        let expected = ArapState::derive(entry.amount, entry.total_paid);
        let sum_matches =
            entry.total_paid.checked_add(entry.remaining_balance) == Some(entry.amount);
        if !sum_matches || entry.payment_status != expected.payment_status {
            discrepancies.push(
                Discrepancy::new(
                    DiscrepancyKind::ArapInconsistency,
                    format!(
                        "AR/AP fields inconsistent: paid {} + remaining {} vs amount {}, status {} (expected {})",
                        entry.total_paid,
                        entry.remaining_balance,
                        entry.amount,
                        entry.payment_status,
                        expected.payment_status
                    ),
                )
                .with_transaction(tx),
            );
        }
    }
}

fn trial_balance(journals: &[JournalEntry]) -> TrialBalanceStatus {
    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;
    let mut all_balanced = true;
    let mut accounts: BTreeMap<&str, AccountBalance> = BTreeMap::new();

    for journal in journals {
        let Ok(validation) = journal.validation() else {
            all_balanced = false;
            continue;
        };
        total_debits = total_debits.saturating_add(validation.total_debits);
        total_credits = total_credits.saturating_add(validation.total_credits);
        all_balanced &= validation.is_valid;

        for line in &journal.lines {
            let Some(account_type) = AccountType::for_code(&line.account_code) else {
                continue;
            };
            let balance = accounts
                .entry(line.account_code.as_str())
                .or_insert_with(|| AccountBalance {
                    code: line.account_code.clone(),
                    name: find_account(&line.account_code)
                        .map_or_else(|| line.account_name.clone(), |a| a.name.to_string()),
                    account_type,
                    total_debit: Decimal::ZERO,
                    total_credit: Decimal::ZERO,
                    balance: Decimal::ZERO,
                });
            balance.total_debit = balance.total_debit.saturating_add(line.debit.abs());
            balance.total_credit = balance.total_credit.saturating_add(line.credit.abs());
        }
    }

    let accounts = accounts
        .into_values()
        .map(|mut account| {
            account.balance = account
                .account_type
                .normal_balance()
                .balance_change(account.total_debit, account.total_credit);
            account
        })
        .collect();

    let difference = (total_debits - total_credits).abs();
    TrialBalanceStatus {
        accounts,
        total_debits,
        total_credits,
        difference,
        is_balanced: all_balanced && difference < BALANCE_EPSILON,
    }
}
