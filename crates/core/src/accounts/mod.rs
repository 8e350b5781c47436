//! Chart of accounts.
//!
//! Account codes are range-coded by type:
//! - Asset: 1000-1999
//! - Liability: 2000-2999
//! - Equity: 3000-3999
//! - Revenue: 4000-4999
//! - Expense: 5000-5999

mod chart;

pub use chart::{
    ACCOUNTS_PAYABLE, ACCOUNTS_RECEIVABLE, CASH, DEFAULT_ACCOUNTS, OTHER_EXPENSES, OWNER_CAPITAL,
    OWNER_DRAWINGS, SALES_REVENUE, find_account,
};

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Things the business owns.
    Asset,
    /// Things the business owes.
    Liability,
    /// Owner's stake.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// All account types in code order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the numeric code range reserved for this type.
    #[must_use]
    pub const fn code_range(self) -> RangeInclusive<u32> {
        match self {
            Self::Asset => 1000..=1999,
            Self::Liability => 2000..=2999,
            Self::Equity => 3000..=3999,
            Self::Revenue => 4000..=4999,
            Self::Expense => 5000..=5999,
        }
    }

    /// Returns the side on which this account type normally carries its balance.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Resolves the account type from a numeric account code.
    #[must_use]
    pub fn for_code(code: &str) -> Option<Self> {
        let numeric: u32 = code.parse().ok()?;
        Self::ALL
            .into_iter()
            .find(|t| t.code_range().contains(&numeric))
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Equity => write!(f, "equity"),
            Self::Revenue => write!(f, "revenue"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Normal balance side of an account.
///
/// - Debit-normal (Asset, Expense): balance += debit - credit
/// - Credit-normal (Liability, Equity, Revenue): balance += credit - debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Balance grows with debits.
    Debit,
    /// Balance grows with credits.
    Credit,
}

impl NormalBalance {
    /// Calculates the balance change for a debit/credit pair.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Numeric account code.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Account classification.
    pub account_type: AccountType,
}

impl Account {
    /// Returns the normal balance side for this account.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        self.account_type.normal_balance()
    }
}

/// Validates that an account code is numeric, falls inside a known range,
/// and exists in the default chart.
///
/// # Errors
///
/// Returns `InvalidAccountCode` for a code outside every range and
/// `UnknownAccount` for a well-formed code missing from the chart.
pub fn validate_account_code(code: &str) -> Result<&'static Account, LedgerError> {
    if AccountType::for_code(code).is_none() {
        return Err(LedgerError::InvalidAccountCode(code.to_string()));
    }
    find_account(code).ok_or_else(|| LedgerError::UnknownAccount(code.to_string()))
}
