//! Per-player net balances for a completed session.

use crate::domain::{Cents, PlayerId};
use serde::{Deserialize, Serialize};

/// Identity of a player as it appears on a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerRef {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self { id, name }
    }
}

/// A player's net result for one session.
///
/// `net` is total cash-out minus total buy-in: positive means the player is
/// owed money, negative means they owe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBalance {
    pub id: PlayerId,
    pub name: String,
    pub net: Cents,
}

impl PlayerBalance {
    pub fn new(id: PlayerId, name: String, net: Cents) -> Self {
        Self { id, name, net }
    }

    /// The `{id, name}` pair used on settlements.
    pub fn player_ref(&self) -> PlayerRef {
        PlayerRef::new(self.id.clone(), self.name.clone())
    }

    pub fn is_creditor(&self) -> bool {
        self.net.is_positive()
    }

    pub fn is_debtor(&self) -> bool {
        self.net.is_negative()
    }
}
