use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::AppState;
use crate::domain::{PaymentHandle, PlayerId};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct PutHandleRequest {
    pub handle: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleResponse {
    pub player_id: PlayerId,
    pub handle: PaymentHandle,
}

pub async fn get_handle(
    Path(player_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<HandleResponse>, AppError> {
    let player_id = parse_player_id(player_id)?;
    let handle = state
        .directory
        .get(&player_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no payment handle for {}", player_id)))?;

    Ok(Json(HandleResponse { player_id, handle }))
}

pub async fn put_handle(
    Path(player_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<PutHandleRequest>,
) -> Result<Json<HandleResponse>, AppError> {
    let player_id = parse_player_id(player_id)?;
    let handle = PaymentHandle::parse(&request.handle)?;

    let replaced = state
        .directory
        .put(player_id.clone(), handle.clone())
        .await?;
    info!(player_id = %player_id, replaced = replaced.is_some(), "Payment handle saved");

    Ok(Json(HandleResponse { player_id, handle }))
}

fn parse_player_id(raw: String) -> Result<PlayerId, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("player id must not be empty".to_string()));
    }
    Ok(PlayerId::new(trimmed.to_string()))
}
