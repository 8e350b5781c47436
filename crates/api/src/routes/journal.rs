//! Journal validation route.

use axum::{Json, Router, routing::post};
use factoryflow_core::journal::{
    JournalLine, JournalValidation, check_journal_lines, validate_journal_entry,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

/// Request body for validating journal lines.
#[derive(Debug, Deserialize)]
pub struct ValidateJournalRequest {
    /// Lines to check.
    pub lines: Vec<JournalLine>,
}

/// Balance check plus the first structural problem, if any.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateJournalResponse {
    /// Balance totals.
    #[serde(flatten)]
    pub validation: JournalValidation,
    /// Structural problem that would block posting these lines.
    pub structural_error: Option<String>,
}

/// POST `/journal/validate` - Check that journal lines balance.
///
/// Lines whose totals overflow are rejected with 400.
async fn validate_journal(
    Json(payload): Json<ValidateJournalRequest>,
) -> Result<Json<ValidateJournalResponse>, ApiError> {
    let validation = validate_journal_entry(&payload.lines)?;
    let structural_error = check_journal_lines(&payload.lines)
        .err()
        .map(|e| e.to_string());
    Ok(Json(ValidateJournalResponse {
        validation,
        structural_error,
    }))
}

/// Creates the journal routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/journal/validate", post(validate_journal))
}
