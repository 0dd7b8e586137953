use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{Cents, PlayerId, PlayerRef, Settlement};
use crate::error::AppError;
use crate::payment::{lookup_handles, settlements_for_player, Direction, LookupStatsSnapshot};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinksRequest {
    pub player_id: PlayerId,
    pub settlements: Vec<Settlement>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkEntry {
    pub settlement_key: String,
    pub direction: Direction,
    pub counterparty: PlayerRef,
    pub amount: Cents,
    /// Counterparty handle, `@`-prefixed, when one is on file.
    pub counterparty_handle: Option<String>,
    /// Deep link, absent when the counterparty has no handle.
    pub link: Option<String>,
}

/// Links for every settlement the player takes part in.
pub async fn post_payment_links(
    State(state): State<AppState>,
    Json(request): Json<PaymentLinksRequest>,
) -> Result<Json<Vec<PaymentLinkEntry>>, AppError> {
    if request.player_id.is_blank() {
        return Err(AppError::BadRequest("playerId is required".to_string()));
    }
    validate_settlements(&request.settlements)?;

    let own = settlements_for_player(&request.settlements, &request.player_id);
    let counterparties: Vec<PlayerId> = own.iter().map(|s| s.counterparty.id.clone()).collect();
    let handles = lookup_handles(
        state.directory.as_ref(),
        &counterparties,
        &state.lookup_stats,
    )
    .await;

    let entries = own
        .into_iter()
        .map(|s| {
            let handle = handles.get(&s.counterparty.id);
            PaymentLinkEntry {
                link: handle.map(|h| state.formatter.link_for(&s, h).to_string()),
                counterparty_handle: handle.map(|h| h.to_string()),
                settlement_key: s.settlement_key,
                direction: s.direction,
                counterparty: s.counterparty,
                amount: s.amount,
            }
        })
        .collect();

    Ok(Json(entries))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<LookupStatsSnapshot> {
    Json(state.lookup_stats.snapshot())
}

fn validate_settlements(settlements: &[Settlement]) -> Result<(), AppError> {
    for s in settlements {
        if !s.amount.is_positive() {
            return Err(AppError::BadRequest(format!(
                "settlement amount must be positive, got {}",
                s.amount
            )));
        }
        if s.from.id == s.to.id {
            return Err(AppError::BadRequest(format!(
                "settlement from {} to itself",
                s.from.id
            )));
        }
    }
    Ok(())
}
