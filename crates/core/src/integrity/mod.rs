//! Data integrity verification.
//!
//! Audits ledger entries against their journal entries:
//! - Every ledger entry has a ledger-sourced journal entry
//! - Every journal entry balances
//! - Journal amounts and dates agree with the ledger
//! - AR/AP fields agree with the derived payment status
//!
//! The audit runs through `Idle → Loading → Indexing → Verifying → Complete`.
//! Loading is done by the caller; the verifier owns the remaining phases.

pub mod error;
pub mod types;
pub mod verifier;

#[cfg(test)]
mod tests;

pub use error::VerificationError;
pub use types::{
    AccountBalance, DEFAULT_DISPLAY_LIMIT, DEFAULT_MAX_RECORDS, Discrepancy, DiscrepancyKind, Severity,
    TrialBalanceStatus, VerificationPhase, VerificationProgress, VerificationResult,
};
pub use verifier::IntegrityVerifier;
