//! Core bookkeeping logic for FactoryFlow.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Ledger entries, payment status and AR/AP tracking
//! - `journal` - Journal entries, balance validation and generation
//! - `accounts` - Default chart of accounts
//! - `integrity` - Batch audit of ledger entries against journal entries
//! - `auth` - Roles and permission checks
//! - `activity` - Activity log records

pub mod accounts;
pub mod activity;
pub mod auth;
pub mod integrity;
pub mod journal;
pub mod ledger;
