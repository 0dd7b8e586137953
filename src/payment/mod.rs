//! Payment hand-off: deep links, the handle directory and its lookup counters.

pub mod directory;
pub mod link;
pub mod stats;

pub use directory::{
    lookup_handles, DirectoryError, HandleDirectory, InMemoryHandleDirectory, LOOKUP_BATCH_SIZE,
};
pub use link::{settlements_for_player, Direction, LinkError, PaymentLinkFormatter, PlayerSettlement};
pub use stats::{LookupStats, LookupStatsSnapshot};
