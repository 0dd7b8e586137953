//! Counters for handle directory lookups.
//!
//! Owned by the caller and passed by reference; there is no process-wide
//! tracker.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Default)]
pub struct LookupStats {
    lookups: AtomicU64,
    batches: AtomicU64,
    players_requested: AtomicU64,
    handles_found: AtomicU64,
    failed_batches: AtomicU64,
}

/// Point-in-time copy of [`LookupStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupStatsSnapshot {
    pub lookups: u64,
    pub batches: u64,
    pub players_requested: u64,
    pub handles_found: u64,
    pub failed_batches: u64,
    pub average_players_per_lookup: u64,
}

impl LookupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lookup(&self, players: usize, batches: usize, found: usize) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.batches.fetch_add(batches as u64, Ordering::Relaxed);
        self.players_requested
            .fetch_add(players as u64, Ordering::Relaxed);
        self.handles_found.fetch_add(found as u64, Ordering::Relaxed);
        debug!(players, batches, found, "Payment handle lookup");
    }

    pub fn record_failed_batch(&self) {
        self.failed_batches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> LookupStatsSnapshot {
        let lookups = self.lookups.load(Ordering::Relaxed);
        let players_requested = self.players_requested.load(Ordering::Relaxed);
        LookupStatsSnapshot {
            lookups,
            batches: self.batches.load(Ordering::Relaxed),
            players_requested,
            handles_found: self.handles_found.load(Ordering::Relaxed),
            failed_batches: self.failed_batches.load(Ordering::Relaxed),
            average_players_per_lookup: if lookups == 0 {
                0
            } else {
                (players_requested + lookups / 2) / lookups
            },
        }
    }
}
