//! Pure computation engine(s) for deterministic ledger logic.

pub mod ledger;
pub mod settlement;

pub use ledger::{LedgerBuilder, SessionLedger};
pub use settlement::{
    apply_settlements, compute_settlements, reconcile, settle, Reconciliation, SettlementPlan,
};
