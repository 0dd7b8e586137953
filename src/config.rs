use std::collections::HashMap;
use thiserror::Error;
use url::Url;

use crate::domain::{PaymentHandle, PlayerId};

const DEFAULT_PAYMENT_BASE_URL: &str = "https://venmo.com";
const DEFAULT_PAYMENT_NOTE: &str = "TL Online";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub payment_base_url: Url,
    pub payment_note: String,
    pub reconciliation_mode: ReconciliationMode,
    /// Handles loaded into the directory at startup.
    pub payment_handles: Vec<(PlayerId, PaymentHandle)>,
}

/// What the API does with sessions whose balances do not sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationMode {
    /// Return the partial plan together with the reconciliation diagnostic.
    Lenient,
    /// Reject the request.
    Strict,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let payment_base_url = env_map
            .get("PAYMENT_BASE_URL")
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_PAYMENT_BASE_URL);
        let payment_base_url = Url::parse(payment_base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base() && matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "PAYMENT_BASE_URL".to_string(),
                    format!("must be an http(s) URL, got {}", payment_base_url),
                )
            })?;

        let payment_note = env_map
            .get("PAYMENT_NOTE")
            .cloned()
            .unwrap_or_else(|| DEFAULT_PAYMENT_NOTE.to_string());

        let reconciliation_mode = match env_map
            .get("RECONCILIATION_MODE")
            .map(|s| s.as_str())
            .unwrap_or("lenient")
        {
            "lenient" => ReconciliationMode::Lenient,
            "strict" => ReconciliationMode::Strict,
            other => {
                return Err(ConfigError::InvalidValue(
                    "RECONCILIATION_MODE".to_string(),
                    format!("must be lenient or strict, got {}", other),
                ))
            }
        };

        let payment_handles = parse_payment_handles_from_map(&env_map)?;

        Ok(Config {
            port,
            payment_base_url,
            payment_note,
            reconciliation_mode,
            payment_handles,
        })
    }
}

fn parse_payment_handles_from_map(
    env_map: &HashMap<String, String>,
) -> Result<Vec<(PlayerId, PaymentHandle)>, ConfigError> {
    if let Some(pairs) = env_map.get("PAYMENT_HANDLES") {
        parse_handle_pairs("PAYMENT_HANDLES", pairs.split(','))
    } else if let Some(file_path) = env_map.get("PAYMENT_HANDLES_FILE") {
        let content = std::fs::read_to_string(file_path).map_err(|_| {
            ConfigError::InvalidValue(
                "PAYMENT_HANDLES_FILE".to_string(),
                "file not found or unreadable".to_string(),
            )
        })?;
        parse_handle_pairs("PAYMENT_HANDLES_FILE", content.lines())
    } else {
        Ok(Vec::new())
    }
}

fn parse_handle_pairs<'a>(
    key: &str,
    pairs: impl Iterator<Item = &'a str>,
) -> Result<Vec<(PlayerId, PaymentHandle)>, ConfigError> {
    pairs
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let invalid = |reason: &str| {
                ConfigError::InvalidValue(key.to_string(), format!("{}: {}", reason, pair))
            };
            let (player, handle) = pair
                .split_once('=')
                .ok_or_else(|| invalid("expected playerId=handle"))?;
            let player = player.trim();
            if player.is_empty() {
                return Err(invalid("empty player id"));
            }
            let handle = PaymentHandle::parse(handle).map_err(|e| invalid(&e.to_string()))?;
            Ok((PlayerId::new(player.to_string()), handle))
        })
        .collect()
}
