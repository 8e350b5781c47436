//! Document store layer for FactoryFlow books.
//!
//! This crate provides:
//! - The `LedgerStore` trait over tenant-scoped document collections
//! - `MemoryStore`, a `DashMap`-backed implementation
//! - Repositories for ledger entries, payments, audits and activity logs

pub mod error;
pub mod memory;
pub mod repositories;
pub mod store;

pub use error::{RepositoryError, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repositories::{
    ActivityRepository, IntegrityRepository, LedgerRepository, PaymentRepository,
};
pub use store::LedgerStore;
