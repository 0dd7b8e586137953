pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod payment;

pub use config::Config;
pub use domain::{
    Cents, GameId, PaymentHandle, PlayerBalance, PlayerId, PlayerRef, PlayerResult, SessionEntry,
    Settlement,
};
pub use engine::{compute_settlements, settle, LedgerBuilder, Reconciliation, SettlementPlan};
pub use error::AppError;
pub use payment::{HandleDirectory, InMemoryHandleDirectory, PaymentLinkFormatter};
