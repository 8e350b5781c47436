//! Store and repository error types.

use factoryflow_core::integrity::VerificationError;
use factoryflow_core::ledger::LedgerError;
use factoryflow_shared::AppError;
use thiserror::Error;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The document to update does not exist.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The document changed since it was read.
    #[error("Version conflict: expected {expected}, found {actual}")]
    Conflict {
        /// Version the writer read.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// A document with this id already exists.
    #[error("Duplicate document: {0}")]
    Duplicate(String),

    /// The backend failed (network, permissions, quota).
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Errors raised by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Domain rule violated.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Audit state machine misuse.
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Ledger(e) => e.into(),
            RepositoryError::Store(StoreError::Conflict { .. }) => {
                LedgerError::ConcurrentModification.into()
            }
            RepositoryError::Store(StoreError::NotFound(id)) => Self::NotFound(id),
            RepositoryError::Store(e) => Self::Storage(e.to_string()),
            RepositoryError::Verification(e) => Self::Conflict(e.to_string()),
        }
    }
}
