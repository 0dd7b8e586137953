use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::settlements::{enforce_reconciliation, PlanView};
use crate::api::AppState;
use crate::domain::{GameId, SessionEntry};
use crate::engine::{settle, LedgerBuilder, SessionLedger};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLedgerRequest {
    pub entries: Vec<SessionEntry>,
    /// Poker Now game URL, e.g. `https://www.pokernow.club/games/{id}`.
    pub game_url: Option<String>,
    /// Name of the uploaded ledger export, e.g. `ledger_{id}.csv`.
    pub ledger_filename: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLedgerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
    #[serde(flatten)]
    pub ledger: SessionLedger,
    pub skipped_entries: usize,
    #[serde(flatten)]
    pub plan: PlanView,
}

pub async fn post_session_ledger(
    State(state): State<AppState>,
    Json(request): Json<SessionLedgerRequest>,
) -> Result<Json<SessionLedgerResponse>, AppError> {
    let game_id = resolve_game_id(&request)?;

    let mut builder = LedgerBuilder::new();
    builder.extend(&request.entries);
    let ledger = builder.build();

    let plan = settle(&ledger.balances());
    enforce_reconciliation(state.config.reconciliation_mode, &plan.reconciliation)?;

    info!(
        game_id = game_id.as_ref().map(|g| g.as_str()).unwrap_or("-"),
        players = ledger.player_count(),
        settlements = plan.settlements.len(),
        discrepancy = %ledger.discrepancy(),
        "Session ledger computed"
    );

    Ok(Json(SessionLedgerResponse {
        game_id,
        ledger,
        skipped_entries: builder.skipped(),
        plan: plan.into(),
    }))
}

/// Game id from the URL if given, otherwise from the file name.
fn resolve_game_id(request: &SessionLedgerRequest) -> Result<Option<GameId>, AppError> {
    let non_empty = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(url) = non_empty(&request.game_url) {
        return GameId::from_game_url(&url)
            .map(Some)
            .map_err(|e| AppError::BadRequest(e.to_string()));
    }
    if let Some(filename) = non_empty(&request.ledger_filename) {
        return GameId::from_ledger_filename(&filename)
            .map(Some)
            .map_err(|e| AppError::BadRequest(e.to_string()));
    }
    Ok(None)
}
