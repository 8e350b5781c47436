//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::identity_middleware};

pub mod accounts;
pub mod activity;
pub mod health;
pub mod integrity;
pub mod journal;
pub mod ledger;
pub mod payments;

/// Creates the API router.
///
/// Health, chart of accounts and journal validation are public. Everything
/// under `/owners/{owner_id}` requires caller identity.
pub fn api_routes() -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(ledger::routes())
        .merge(payments::routes())
        .merge(integrity::routes())
        .merge(activity::routes())
        .layer(middleware::from_fn(identity_middleware));

    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(journal::routes())
        .merge(protected_routes)
}
