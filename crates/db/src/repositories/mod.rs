//! Repository abstractions for data access.
//!
//! Repositories own the read-modify-write cycles against a `LedgerStore`,
//! keeping the core crate free of I/O.

pub mod activity;
pub mod integrity;
pub mod ledger;
pub mod payment;

pub use activity::ActivityRepository;
pub use integrity::IntegrityRepository;
pub use ledger::LedgerRepository;
pub use payment::PaymentRepository;
