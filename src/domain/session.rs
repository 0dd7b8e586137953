//! Typed session ledger records.

use crate::domain::{Cents, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One buy-in/cash-out row of a session ledger export.
///
/// A player who re-buys or re-seats appears in several entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(default)]
    pub buy_in: Cents,
    #[serde(default)]
    pub buy_out: Cents,
    /// Chips still on the table when the ledger was exported.
    #[serde(default)]
    pub stack: Cents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_end_at: Option<DateTime<Utc>>,
}

impl SessionEntry {
    pub fn new(player_id: PlayerId, player_name: String, buy_in: Cents, buy_out: Cents) -> Self {
        Self {
            player_id,
            player_name,
            buy_in,
            buy_out,
            stack: Cents::zero(),
            session_start_at: None,
            session_end_at: None,
        }
    }

    pub fn with_stack(mut self, stack: Cents) -> Self {
        self.stack = stack;
        self
    }

    pub fn with_window(mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        self.session_start_at = Some(start);
        self.session_end_at = end;
        self
    }

    /// Amount this entry contributes to the player's cash-out.
    ///
    /// A seat that never cashed out is valued at its remaining stack.
    pub fn cash_out(&self) -> Cents {
        if self.buy_out.is_zero() {
            self.stack
        } else {
            self.buy_out
        }
    }
}

/// Aggregated result for one distinct player in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub id: PlayerId,
    pub name: String,
    pub buy_in: Cents,
    pub cash_out: Cents,
    pub net: Cents,
}
