//! Game identifiers derived from Poker Now URLs and ledger export file names.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const POKER_NOW_HOSTS: [&str; 4] = [
    "pokernow.club",
    "www.pokernow.club",
    "pokernow.com",
    "www.pokernow.com",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameIdError {
    #[error("not a Poker Now game URL: {0}")]
    InvalidUrl(String),
    #[error("invalid ledger file name, expected ledger_GAMEID.csv: {0}")]
    InvalidFilename(String),
}

/// Poker Now game identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the id from `https://[www.]pokernow.(club|com)/games/{id}`.
    pub fn from_game_url(raw: &str) -> Result<Self, GameIdError> {
        let invalid = || GameIdError::InvalidUrl(raw.to_string());
        let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
        if !is_poker_now_host(&url) {
            return Err(invalid());
        }

        let mut segments = url.path_segments().ok_or_else(invalid)?;
        match (segments.next(), segments.next()) {
            (Some("games"), Some(id)) if !id.is_empty() => Ok(GameId(id.to_string())),
            _ => Err(invalid()),
        }
    }

    /// Extract the id from `ledger_{id}.csv`, tolerating browser duplicate
    /// suffixes such as `ledger_{id} (1).csv`.
    pub fn from_ledger_filename(filename: &str) -> Result<Self, GameIdError> {
        let invalid = || GameIdError::InvalidFilename(filename.to_string());
        let start = filename.find("ledger_").ok_or_else(invalid)? + "ledger_".len();
        let id: String = filename[start..]
            .chars()
            .take_while(|c| !(*c == '.' || *c == '(' || c.is_whitespace()))
            .collect();
        if id.is_empty() {
            return Err(invalid());
        }
        Ok(GameId(id))
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_poker_now_host(url: &Url) -> bool {
    url.host_str()
        .map(|host| POKER_NOW_HOSTS.contains(&host))
        .unwrap_or(false)
}
