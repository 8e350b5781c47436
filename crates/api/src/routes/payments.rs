//! AR/AP payment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
};
use factoryflow_core::auth::Permission;
use factoryflow_core::ledger::{ArapState, ArapUpdateResult, NewPayment};
use factoryflow_shared::types::{OwnerId, PaymentId, TransactionId};
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::Caller};

/// POST `/owners/{owner_id}/ledger/{transaction_id}/payments` - Record a payment.
async fn record_payment(
    State(state): State<AppState>,
    caller: Caller,
    Path((owner_id, transaction_id)): Path<(OwnerId, TransactionId)>,
    Json(payload): Json<NewPayment>,
) -> Result<Response, ApiError> {
    caller.authorize(owner_id, Permission::RecordPayments)?;

    let (payment, entry) = state
        .payments()
        .record_payment(caller.user_id, owner_id, transaction_id, payload)
        .await?;
    let update = ArapUpdateResult::applied(ArapState::of(&entry), "Payment recorded");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "payment": payment, "update": update })),
    )
        .into_response())
}

/// DELETE `/owners/{owner_id}/payments/{payment_id}` - Delete a payment and
/// reverse its effect on the entry.
async fn delete_payment(
    State(state): State<AppState>,
    caller: Caller,
    Path((owner_id, payment_id)): Path<(OwnerId, PaymentId)>,
) -> Result<Response, ApiError> {
    caller.authorize(owner_id, Permission::DeletePayments)?;

    let entry = state
        .payments()
        .delete_payment(caller.user_id, owner_id, payment_id)
        .await?;
    let update = ArapUpdateResult::applied(ArapState::of(&entry), "Payment deleted");

    Ok((StatusCode::OK, Json(json!({ "update": update }))).into_response())
}

/// Creates the payment routes (requires identity middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/owners/{owner_id}/ledger/{transaction_id}/payments",
            post(record_payment),
        )
        .route(
            "/owners/{owner_id}/payments/{payment_id}",
            delete(delete_payment),
        )
}
