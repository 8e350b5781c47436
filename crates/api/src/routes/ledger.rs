//! Ledger entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use factoryflow_core::auth::Permission;
use factoryflow_core::ledger::NewLedgerEntry;
use factoryflow_shared::types::{OwnerId, TransactionId};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::Caller};

/// Default page size for entry listings.
const DEFAULT_LIMIT: usize = 50;
/// Largest page size accepted.
const MAX_LIMIT: usize = 500;

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Number of entries to return (default 50, max 500).
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Requested limit, clamped to the allowed range.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// GET `/owners/{owner_id}/ledger` - Newest entries first.
async fn list_entries(
    State(state): State<AppState>,
    caller: Caller,
    Path(owner_id): Path<OwnerId>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    caller.authorize(owner_id, Permission::ViewLedger)?;
    let entries = state.ledger().list_entries(owner_id, query.limit()).await?;
    Ok((StatusCode::OK, Json(json!({ "entries": entries }))).into_response())
}

/// POST `/owners/{owner_id}/ledger` - Create an entry and its journal entry.
async fn create_entry(
    State(state): State<AppState>,
    caller: Caller,
    Path(owner_id): Path<OwnerId>,
    Json(mut payload): Json<NewLedgerEntry>,
) -> Result<Response, ApiError> {
    caller.authorize(owner_id, Permission::CreateEntries)?;
    payload.owner_id = owner_id;

    let entry = state.ledger().create_entry(caller.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

/// GET `/owners/{owner_id}/ledger/{transaction_id}` - One entry with its payments.
async fn get_entry(
    State(state): State<AppState>,
    caller: Caller,
    Path((owner_id, transaction_id)): Path<(OwnerId, TransactionId)>,
) -> Result<Response, ApiError> {
    caller.authorize(owner_id, Permission::ViewLedger)?;
    let entry = state.ledger().get_entry(owner_id, transaction_id).await?;
    let payments = state
        .payments()
        .list_payments(owner_id, transaction_id)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "entry": entry, "payments": payments })),
    )
        .into_response())
}

/// Creates the ledger routes (requires identity middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/owners/{owner_id}/ledger",
            get(list_entries).post(create_entry),
        )
        .route("/owners/{owner_id}/ledger/{transaction_id}", get(get_entry))
}
