//! Folding session ledger entries into one result per player.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Cents, PlayerBalance, PlayerId, PlayerResult, SessionEntry};

/// Aggregated view of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLedger {
    /// Player results ordered by net descending; equal nets keep first-appearance order.
    pub results: Vec<PlayerResult>,
    pub buy_in_total: Cents,
    pub cash_out_total: Cents,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    /// First-appearance order of players, used to build engine input.
    #[serde(skip)]
    appearance: Vec<PlayerId>,
}

impl SessionLedger {
    /// Net balances in first-appearance order.
    pub fn balances(&self) -> Vec<PlayerBalance> {
        let by_id: HashMap<&PlayerId, &PlayerResult> =
            self.results.iter().map(|r| (&r.id, r)).collect();
        self.appearance
            .iter()
            .filter_map(|id| by_id.get(id))
            .map(|r| PlayerBalance::new(r.id.clone(), r.name.clone(), r.net))
            .collect()
    }

    /// Cash-out total minus buy-in total; zero when the session reconciles.
    pub fn discrepancy(&self) -> Cents {
        self.cash_out_total - self.buy_in_total
    }

    pub fn player_count(&self) -> usize {
        self.results.len()
    }
}

#[derive(Debug, Clone)]
struct PlayerTotals {
    name: String,
    buy_in: Cents,
    cash_out: Cents,
}

/// Accumulates session entries, merging repeated appearances of a player.
#[derive(Debug, Default)]
pub struct LedgerBuilder {
    players: HashMap<PlayerId, PlayerTotals>,
    order: Vec<PlayerId>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    skipped: usize,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entry. Entries without a player id are ignored.
    pub fn push(&mut self, entry: &SessionEntry) -> &mut Self {
        if entry.player_id.is_blank() {
            self.skipped += 1;
            return self;
        }

        let name = entry.player_name.trim();
        let totals = self
            .players
            .entry(entry.player_id.clone())
            .or_insert_with(|| {
                self.order.push(entry.player_id.clone());
                PlayerTotals {
                    name: String::new(),
                    buy_in: Cents::zero(),
                    cash_out: Cents::zero(),
                }
            });

        if totals.name.is_empty() && !name.is_empty() {
            totals.name = name.to_string();
        }
        totals.buy_in += entry.buy_in;
        totals.cash_out += entry.cash_out();

        if let Some(start) = entry.session_start_at {
            self.started_at = Some(self.started_at.map_or(start, |s| s.min(start)));
        }
        if let Some(end) = entry.session_end_at {
            self.ended_at = Some(self.ended_at.map_or(end, |e| e.max(end)));
        }

        self
    }

    pub fn extend<'a, I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a SessionEntry>,
    {
        for entry in entries {
            self.push(entry);
        }
        self
    }

    /// Number of entries ignored for lacking a player id.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn build(&self) -> SessionLedger {
        let mut results: Vec<PlayerResult> = self
            .order
            .iter()
            .filter_map(|id| self.players.get(id).map(|t| (id, t)))
            .map(|(id, t)| PlayerResult {
                id: id.clone(),
                name: if t.name.is_empty() {
                    id.as_str().to_string()
                } else {
                    t.name.clone()
                },
                buy_in: t.buy_in,
                cash_out: t.cash_out,
                net: t.cash_out - t.buy_in,
            })
            .collect();
        results.sort_by(|a, b| b.net.cmp(&a.net));

        let buy_in_total = results.iter().map(|r| r.buy_in).sum();
        let cash_out_total = results.iter().map(|r| r.cash_out).sum();

        SessionLedger {
            results,
            buy_in_total,
            cash_out_total,
            started_at: self.started_at,
            ended_at: self.ended_at,
            appearance: self.order.clone(),
        }
    }
}
