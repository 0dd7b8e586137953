//! Minimal-transaction settlement of session balances.
//!
//! Balances are sorted by net descending and scanned with two pointers: the
//! largest remaining creditor is paid by the largest remaining debtor until one
//! of them reaches zero. Every step zeroes at least one side, so `n` players
//! produce at most `n - 1` payments.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{Cents, PlayerBalance, Settlement};

/// Compute the payments that bring every balance to zero.
///
/// Pure and total: the caller's balances are not touched, and input that does
/// not sum to zero yields a best-effort partial plan instead of an error.
///
/// Among players with equal net, the one that appears earlier in `balances` is
/// matched first, on both the creditor and the debtor side.
pub fn compute_settlements(balances: &[PlayerBalance]) -> Vec<Settlement> {
    let mut working: Vec<(usize, PlayerBalance)> =
        balances.iter().cloned().enumerate().collect();
    working.sort_by(|(ia, a), (ib, b)| {
        b.net.cmp(&a.net).then_with(|| tie_break(a.net, *ia, *ib))
    });

    let mut settlements = Vec::new();
    if working.len() < 2 {
        return settlements;
    }

    let mut i = 0;
    let mut j = working.len() - 1;

    while i < j {
        let winner_net = working[i].1.net;
        let loser_net = working[j].1.net;
        if !winner_net.is_positive() || !loser_net.is_negative() {
            break;
        }

        let amount = winner_net.min(-loser_net);
        if amount.is_positive() {
            settlements.push(Settlement::new(
                working[j].1.player_ref(),
                working[i].1.player_ref(),
                amount,
            ));
            working[i].1.net -= amount;
            working[j].1.net += amount;
        }

        if working[i].1.net.is_zero() {
            i += 1;
        }
        if working[j].1.net.is_zero() {
            j -= 1;
        }
    }

    settlements
}

/// Debtors are consumed from the back of the sorted list, so their input order
/// is reversed to keep "earlier input settles first" on both sides.
fn tie_break(net: Cents, ia: usize, ib: usize) -> Ordering {
    if net.is_negative() {
        ib.cmp(&ia)
    } else {
        ia.cmp(&ib)
    }
}

/// Balances left after every settlement has been paid.
///
/// A payment raises the payer's balance toward zero and lowers the payee's.
/// The result keeps the input order.
pub fn apply_settlements(
    balances: &[PlayerBalance],
    settlements: &[Settlement],
) -> Vec<PlayerBalance> {
    let mut residual = balances.to_vec();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (idx, balance) in balances.iter().enumerate() {
        index.entry(balance.id.as_str()).or_insert(idx);
    }

    for settlement in settlements {
        if let Some(&idx) = index.get(settlement.from.id.as_str()) {
            residual[idx].net += settlement.amount;
        }
        if let Some(&idx) = index.get(settlement.to.id.as_str()) {
            residual[idx].net -= settlement.amount;
        }
    }

    residual
}

/// Diagnostic comparing what was owed with what the plan moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// Sum of all positive nets.
    pub total_credit: Cents,
    /// Sum of the magnitudes of all negative nets.
    pub total_debit: Cents,
    /// Sum of all nets; zero for a well-formed session.
    pub imbalance: Cents,
    /// Sum of all settlement amounts.
    pub settled: Cents,
    pub unsettled_credit: Cents,
    pub unsettled_debit: Cents,
}

impl Reconciliation {
    pub fn is_balanced(&self) -> bool {
        self.imbalance.is_zero()
    }

    pub fn is_fully_settled(&self) -> bool {
        self.unsettled_credit.is_zero() && self.unsettled_debit.is_zero()
    }
}

/// Totals are summed in `i128` so sessions whose nets exceed the `i64` range
/// still report a nonzero imbalance; reported fields clamp to `Cents` bounds.
pub fn reconcile(balances: &[PlayerBalance], settlements: &[Settlement]) -> Reconciliation {
    let total_credit: i128 = balances
        .iter()
        .filter(|b| b.net.is_positive())
        .map(|b| i128::from(b.net.as_i64()))
        .sum();
    let total_debit: i128 = balances
        .iter()
        .filter(|b| b.net.is_negative())
        .map(|b| -i128::from(b.net.as_i64()))
        .sum();
    let settled: i128 = settlements
        .iter()
        .map(|s| i128::from(s.amount.as_i64()))
        .sum();

    Reconciliation {
        total_credit: clamp_cents(total_credit),
        total_debit: clamp_cents(total_debit),
        imbalance: clamp_cents(total_credit - total_debit),
        settled: clamp_cents(settled),
        unsettled_credit: clamp_cents(total_credit - settled),
        unsettled_debit: clamp_cents(total_debit - settled),
    }
}

fn clamp_cents(value: i128) -> Cents {
    Cents::new(value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
}

/// Settlements for a session together with their reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementPlan {
    pub settlements: Vec<Settlement>,
    pub reconciliation: Reconciliation,
    /// Players whose balance is still nonzero after the plan, with the residual.
    pub unsettled: Vec<PlayerBalance>,
}

/// Compute settlements and the reconciliation diagnostic in one pass.
pub fn settle(balances: &[PlayerBalance]) -> SettlementPlan {
    let settlements = compute_settlements(balances);
    let reconciliation = reconcile(balances, &settlements);
    let unsettled: Vec<PlayerBalance> = apply_settlements(balances, &settlements)
        .into_iter()
        .filter(|b| !b.net.is_zero())
        .collect();

    if reconciliation.is_balanced() {
        debug!(
            players = balances.len(),
            settlements = settlements.len(),
            settled = %reconciliation.settled,
            "Computed settlements"
        );
    } else {
        warn!(
            players = balances.len(),
            settlements = settlements.len(),
            total_credit = %reconciliation.total_credit,
            total_debit = %reconciliation.total_debit,
            imbalance = %reconciliation.imbalance,
            unsettled_players = unsettled.len(),
            "Session balances do not sum to zero; settlement is partial"
        );
    }

    SettlementPlan {
        settlements,
        reconciliation,
        unsettled,
    }
}
