//! Directed payment obligations derived from session balances.

use crate::domain::{Cents, PlayerRef};
use serde::{Deserialize, Serialize};

/// A single payment from one player to another.
///
/// Settlements are derived data: they are recomputed from balances every time
/// and carry no stored identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: PlayerRef,
    pub to: PlayerRef,
    pub amount: Cents,
}

impl Settlement {
    pub fn new(from: PlayerRef, to: PlayerRef, amount: Cents) -> Self {
        Self { from, to, amount }
    }

    /// Stable key for the settlement at `position` in a computed plan.
    ///
    /// Two plans computed from identical input yield identical keys, so clients
    /// can use it to key rows and drop duplicate submissions.
    pub fn key(&self, position: usize) -> String {
        use sha2::{Digest, Sha256};

        fn hash_var(hasher: &mut Sha256, data: &str) {
            hasher.update((data.len() as u32).to_le_bytes());
            hasher.update(data.as_bytes());
        }

        let mut hasher = Sha256::new();
        hasher.update((position as u64).to_le_bytes());
        hash_var(&mut hasher, self.from.id.as_str());
        hash_var(&mut hasher, self.to.id.as_str());
        hasher.update(self.amount.as_i64().to_le_bytes());

        let hash = hasher.finalize();
        format!("stl:{}", hex::encode(&hash[..12]))
    }
}
