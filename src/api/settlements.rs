use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::api::AppState;
use crate::config::ReconciliationMode;
use crate::domain::{PlayerBalance, Settlement};
use crate::engine::{settle, Reconciliation, SettlementPlan};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementsRequest {
    pub balances: Vec<PlayerBalance>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementView {
    pub settlement_key: String,
    #[serde(flatten)]
    pub settlement: Settlement,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub settlements: Vec<SettlementView>,
    pub reconciliation: Reconciliation,
    pub unsettled: Vec<PlayerBalance>,
}

impl From<SettlementPlan> for PlanView {
    fn from(plan: SettlementPlan) -> Self {
        let settlements = plan
            .settlements
            .into_iter()
            .enumerate()
            .map(|(position, settlement)| SettlementView {
                settlement_key: settlement.key(position),
                settlement,
            })
            .collect();
        PlanView {
            settlements,
            reconciliation: plan.reconciliation,
            unsettled: plan.unsettled,
        }
    }
}

pub async fn post_settlements(
    State(state): State<AppState>,
    Json(request): Json<SettlementsRequest>,
) -> Result<Json<PlanView>, AppError> {
    validate_balances(&request.balances)?;

    let plan = settle(&request.balances);
    enforce_reconciliation(state.config.reconciliation_mode, &plan.reconciliation)?;

    Ok(Json(plan.into()))
}

/// Reject blank or repeated player ids; the engine needs one entry per player.
pub(crate) fn validate_balances(balances: &[PlayerBalance]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for balance in balances {
        if balance.id.is_blank() {
            return Err(AppError::BadRequest("player id must not be empty".to_string()));
        }
        if !seen.insert(balance.id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "duplicate player id: {}",
                balance.id
            )));
        }
    }
    Ok(())
}

pub(crate) fn enforce_reconciliation(
    mode: ReconciliationMode,
    reconciliation: &Reconciliation,
) -> Result<(), AppError> {
    if mode == ReconciliationMode::Strict && !reconciliation.is_balanced() {
        return Err(AppError::Unprocessable(format!(
            "balances do not sum to zero (imbalance {})",
            reconciliation.imbalance
        )));
    }
    Ok(())
}
