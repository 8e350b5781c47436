//! Chart of accounts routes.

use axum::{Json, Router, extract::Query, routing::get};
use factoryflow_core::accounts::{Account, AccountType, DEFAULT_ACCOUNTS};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by account type: asset, liability, equity, revenue, expense.
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
}

/// GET `/accounts` - The default chart of accounts.
async fn list_accounts(Query(query): Query<ListAccountsQuery>) -> Json<Value> {
    let accounts: Vec<&Account> = DEFAULT_ACCOUNTS
        .iter()
        .filter(|a| query.account_type.is_none_or(|t| a.account_type == t))
        .collect();
    Json(json!({ "accounts": accounts }))
}

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/accounts", get(list_accounts))
}
