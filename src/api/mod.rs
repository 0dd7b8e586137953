pub mod handles;
pub mod health;
pub mod payments;
pub mod sessions;
pub mod settlements;

use crate::config::Config;
use crate::error::AppError;
use crate::payment::{HandleDirectory, InMemoryHandleDirectory, LookupStats, PaymentLinkFormatter};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub directory: Arc<dyn HandleDirectory>,
    pub formatter: Arc<PaymentLinkFormatter>,
    pub lookup_stats: Arc<LookupStats>,
}

impl AppState {
    pub fn new(config: Config, directory: Arc<dyn HandleDirectory>) -> Result<Self, AppError> {
        let formatter =
            PaymentLinkFormatter::new(config.payment_base_url.clone(), config.payment_note.clone())?;
        Ok(Self {
            config,
            directory,
            formatter: Arc::new(formatter),
            lookup_stats: Arc::new(LookupStats::new()),
        })
    }

    /// State backed by an in-memory directory seeded from `config.payment_handles`.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let directory = InMemoryHandleDirectory::with_handles(config.payment_handles.clone());
        Self::new(config, Arc::new(directory))
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/settlements", post(settlements::post_settlements))
        .route("/v1/sessions/ledger", post(sessions::post_session_ledger))
        .route("/v1/payment-links", post(payments::post_payment_links))
        .route("/v1/stats", get(payments::get_stats))
        .route(
            "/v1/handles/:player_id",
            get(handles::get_handle).put(handles::put_handle),
        )
        .layer(cors)
        .with_state(state)
}
