//! Domain types for the session ledger and settlement flow.
//!
//! This module provides:
//! - Integer money handling via the Cents wrapper
//! - Player balances and the settlements derived from them
//! - Typed session ledger entries and aggregated player results
//! - Payment handles and Poker Now game identifiers

pub mod balance;
pub mod game;
pub mod handle;
pub mod primitives;
pub mod session;
pub mod settlement;

pub use balance::{PlayerBalance, PlayerRef};
pub use game::{GameId, GameIdError};
pub use handle::{HandleParseError, PaymentHandle};
pub use primitives::{Cents, PlayerId};
pub use session::{PlayerResult, SessionEntry};
pub use settlement::Settlement;
