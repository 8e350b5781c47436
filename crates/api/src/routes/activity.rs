//! Activity log route.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use factoryflow_core::auth::Permission;
use factoryflow_shared::types::OwnerId;
use serde_json::{Value, json};

use super::ledger::ListQuery;
use crate::{AppState, error::ApiError, middleware::Caller};

/// GET `/owners/{owner_id}/activity` - Recent activity, newest first.
async fn recent_activity(
    State(state): State<AppState>,
    caller: Caller,
    Path(owner_id): Path<OwnerId>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    caller.authorize(owner_id, Permission::ViewLedger)?;
    let activities = state.activity().recent(owner_id, query.limit()).await?;
    Ok(Json(json!({ "activities": activities })))
}

/// Creates the activity routes (requires identity middleware).
pub fn routes() -> Router<AppState> {
    Router::new().route("/owners/{owner_id}/activity", get(recent_activity))
}
