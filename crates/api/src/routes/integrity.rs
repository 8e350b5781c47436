//! Integrity audit route.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use factoryflow_core::auth::Permission;
use factoryflow_core::integrity::{Discrepancy, TrialBalanceStatus};
use factoryflow_shared::types::OwnerId;
use serde::Serialize;
use tracing::debug;

use crate::{AppState, error::ApiError, middleware::Caller};

/// Audit report returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Ledger entries examined.
    pub ledger_entries_checked: usize,
    /// Journal entries examined.
    pub journal_entries_checked: usize,
    /// Discrepancies found in total.
    pub total_discrepancies: usize,
    /// Error-severity discrepancies.
    pub error_count: usize,
    /// Warning-severity discrepancies.
    pub warning_count: usize,
    /// Discrepancies shown, capped at the display limit.
    pub discrepancies: Vec<Discrepancy>,
    /// Aggregate trial balance.
    pub trial_balance: TrialBalanceStatus,
    /// The audit covered only the first `max_records` documents.
    pub query_limit_reached: bool,
}

/// POST `/owners/{owner_id}/integrity/verify` - Run an integrity audit.
async fn verify(
    State(state): State<AppState>,
    caller: Caller,
    Path(owner_id): Path<OwnerId>,
) -> Result<Json<VerificationReport>, ApiError> {
    caller.authorize(owner_id, Permission::RunIntegrityAudit)?;

    let repo = state.integrity();
    let result = repo
        .verify(owner_id, |progress| {
            debug!(
                phase = %progress.phase,
                current = progress.current,
                total = progress.total,
                "Verification progress"
            );
        })
        .await?;

    Ok(Json(VerificationReport {
        ledger_entries_checked: result.ledger_entries_checked,
        journal_entries_checked: result.journal_entries_checked,
        total_discrepancies: result.discrepancies.len(),
        error_count: result.error_count,
        warning_count: result.warning_count,
        discrepancies: result.displayed_discrepancies(repo.display_limit()).to_vec(),
        trial_balance: result.trial_balance,
        query_limit_reached: result.query_limit_reached,
    }))
}

/// Creates the integrity routes (requires identity middleware).
pub fn routes() -> Router<AppState> {
    Router::new().route("/owners/{owner_id}/integrity/verify", post(verify))
}
