//! Verification error types.

use thiserror::Error;

use super::types::VerificationPhase;

/// Errors raised by the verification state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The requested phase change is not allowed.
    #[error("Cannot move verification from {from} to {to}")]
    InvalidTransition {
        /// Current phase.
        from: VerificationPhase,
        /// Requested phase.
        to: VerificationPhase,
    },
}
