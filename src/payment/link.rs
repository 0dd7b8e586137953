//! Pay / request deep links for settlements.

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::domain::{Cents, PaymentHandle, PlayerId, PlayerRef, Settlement};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("payment base URL cannot carry a path: {0}")]
    CannotBeABase(String),
    #[error("payment base URL must be http or https: {0}")]
    UnsupportedScheme(String),
}

/// Which way money moves from the viewing player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The player owes the counterparty.
    Pay,
    /// The counterparty owes the player.
    Request,
}

impl Direction {
    fn txn(&self) -> &'static str {
        match self {
            Direction::Pay => "pay",
            Direction::Request => "charge",
        }
    }
}

/// A settlement seen from one participant's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettlement {
    pub settlement_key: String,
    pub direction: Direction,
    pub counterparty: PlayerRef,
    pub amount: Cents,
}

/// Settlements in which `player` pays or is paid, in plan order.
pub fn settlements_for_player(
    settlements: &[Settlement],
    player: &PlayerId,
) -> Vec<PlayerSettlement> {
    settlements
        .iter()
        .enumerate()
        .filter_map(|(position, s)| {
            let (direction, counterparty) = if &s.from.id == player {
                (Direction::Pay, &s.to)
            } else if &s.to.id == player {
                (Direction::Request, &s.from)
            } else {
                return None;
            };
            Some(PlayerSettlement {
                settlement_key: s.key(position),
                direction,
                counterparty: counterparty.clone(),
                amount: s.amount,
            })
        })
        .collect()
}

/// Builds `{base}/{handle}?txn=...&note=...&amount=...` links.
#[derive(Debug, Clone)]
pub struct PaymentLinkFormatter {
    base_url: Url,
    note: String,
}

impl PaymentLinkFormatter {
    pub fn new(base_url: Url, note: String) -> Result<Self, LinkError> {
        if base_url.cannot_be_a_base() {
            return Err(LinkError::CannotBeABase(base_url.to_string()));
        }
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(LinkError::UnsupportedScheme(base_url.to_string()));
        }
        Ok(Self { base_url, note })
    }

    /// Link for the payer to send `settlement.amount` to the payee.
    pub fn pay_link(&self, settlement: &Settlement, payee: &PaymentHandle) -> Url {
        self.build(payee, Direction::Pay, settlement.amount)
    }

    /// Link for the payee to request `settlement.amount` from the payer.
    pub fn request_link(&self, settlement: &Settlement, payer: &PaymentHandle) -> Url {
        self.build(payer, Direction::Request, settlement.amount)
    }

    /// Link for a player-side settlement, addressed to the counterparty.
    pub fn link_for(&self, settlement: &PlayerSettlement, counterparty: &PaymentHandle) -> Url {
        self.build(counterparty, settlement.direction, settlement.amount)
    }

    fn build(&self, handle: &PaymentHandle, direction: Direction, amount: Cents) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(handle.as_str());
        }
        url.query_pairs_mut()
            .append_pair("txn", direction.txn())
            .append_pair("note", &self.note)
            .append_pair("amount", &amount.to_major_string());
        url
    }
}
