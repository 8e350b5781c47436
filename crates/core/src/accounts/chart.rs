//! Default chart of accounts for a small manufacturer.

use super::{Account, AccountType};

/// Cash on hand.
pub const CASH: Account = Account {
    code: "1000",
    name: "Cash",
    account_type: AccountType::Asset,
};

/// Amounts owed by clients.
pub const ACCOUNTS_RECEIVABLE: Account = Account {
    code: "1200",
    name: "Accounts Receivable",
    account_type: AccountType::Asset,
};

/// Amounts owed to suppliers.
pub const ACCOUNTS_PAYABLE: Account = Account {
    code: "2000",
    name: "Accounts Payable",
    account_type: AccountType::Liability,
};

/// Capital contributed by the owner.
pub const OWNER_CAPITAL: Account = Account {
    code: "3000",
    name: "Owner's Capital",
    account_type: AccountType::Equity,
};

/// Capital withdrawn by the owner.
pub const OWNER_DRAWINGS: Account = Account {
    code: "3100",
    name: "Owner's Drawings",
    account_type: AccountType::Equity,
};

/// Sales of finished goods.
pub const SALES_REVENUE: Account = Account {
    code: "4000",
    name: "Sales Revenue",
    account_type: AccountType::Revenue,
};

/// Fallback for expenses without a dedicated account.
pub const OTHER_EXPENSES: Account = Account {
    code: "5900",
    name: "Other Expenses",
    account_type: AccountType::Expense,
};

/// The complete default chart, ordered by code.
pub static DEFAULT_ACCOUNTS: &[Account] = &[
    CASH,
    Account {
        code: "1100",
        name: "Bank",
        account_type: AccountType::Asset,
    },
    ACCOUNTS_RECEIVABLE,
    Account {
        code: "1300",
        name: "Inventory - Raw Materials",
        account_type: AccountType::Asset,
    },
    Account {
        code: "1310",
        name: "Inventory - Finished Goods",
        account_type: AccountType::Asset,
    },
    Account {
        code: "1500",
        name: "Equipment",
        account_type: AccountType::Asset,
    },
    ACCOUNTS_PAYABLE,
    Account {
        code: "2100",
        name: "Accrued Expenses",
        account_type: AccountType::Liability,
    },
    Account {
        code: "2200",
        name: "Loans Payable",
        account_type: AccountType::Liability,
    },
    OWNER_CAPITAL,
    OWNER_DRAWINGS,
    Account {
        code: "3200",
        name: "Retained Earnings",
        account_type: AccountType::Equity,
    },
    SALES_REVENUE,
    Account {
        code: "4100",
        name: "Other Income",
        account_type: AccountType::Revenue,
    },
    Account {
        code: "5000",
        name: "Cost of Goods Sold",
        account_type: AccountType::Expense,
    },
    Account {
        code: "5100",
        name: "Salaries and Wages",
        account_type: AccountType::Expense,
    },
    Account {
        code: "5200",
        name: "Rent",
        account_type: AccountType::Expense,
    },
    Account {
        code: "5300",
        name: "Utilities",
        account_type: AccountType::Expense,
    },
    Account {
        code: "5400",
        name: "Raw Materials",
        account_type: AccountType::Expense,
    },
    Account {
        code: "5500",
        name: "Maintenance",
        account_type: AccountType::Expense,
    },
    OTHER_EXPENSES,
];

/// Looks up an account in the default chart by code.
#[must_use]
pub fn find_account(code: &str) -> Option<&'static Account> {
    DEFAULT_ACCOUNTS.iter().find(|a| a.code == code)
}
