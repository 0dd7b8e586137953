//! Player id to payment handle directory.

use async_trait::async_trait;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::warn;

use super::LookupStats;
use crate::domain::{PaymentHandle, PlayerId};

/// Players fetched together in one lookup batch.
pub const LOOKUP_BATCH_SIZE: usize = 10;

#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("handle directory unavailable: {0}")]
    Unavailable(String),
}

/// Source of payment handles keyed by player id.
///
/// Lookups only ever name explicit player ids; the directory is never
/// enumerated.
#[async_trait]
pub trait HandleDirectory: Send + Sync + fmt::Debug {
    async fn get(&self, player: &PlayerId) -> Result<Option<PaymentHandle>, DirectoryError>;

    /// Store a handle, returning the one it replaced.
    async fn put(
        &self,
        player: PlayerId,
        handle: PaymentHandle,
    ) -> Result<Option<PaymentHandle>, DirectoryError>;
}

/// Fetch handles for `players`, in concurrent batches of [`LOOKUP_BATCH_SIZE`].
///
/// Duplicate and blank ids are dropped. Players without a handle are absent
/// from the result. A failing batch is logged and contributes nothing; it does
/// not fail the whole lookup.
pub async fn lookup_handles(
    directory: &dyn HandleDirectory,
    players: &[PlayerId],
    stats: &LookupStats,
) -> HashMap<PlayerId, PaymentHandle> {
    let mut seen = HashSet::new();
    let unique: Vec<&PlayerId> = players
        .iter()
        .filter(|p| !p.is_blank())
        .filter(|p| seen.insert(*p))
        .collect();

    if unique.is_empty() {
        return HashMap::new();
    }

    let batches: Vec<&[&PlayerId]> = unique.chunks(LOOKUP_BATCH_SIZE).collect();
    let batch_count = batches.len();

    let results = join_all(batches.into_iter().map(|batch| async move {
        let fetched = join_all(batch.iter().map(|p| directory.get(p))).await;
        let mut found = Vec::new();
        for (player, result) in batch.iter().zip(fetched) {
            if let Some(handle) = result? {
                found.push(((*player).clone(), handle));
            }
        }
        Ok::<_, DirectoryError>(found)
    }))
    .await;

    let mut handles = HashMap::new();
    for result in results {
        match result {
            Ok(found) => handles.extend(found),
            Err(e) => {
                stats.record_failed_batch();
                warn!(error = %e, "Payment handle batch lookup failed");
            }
        }
    }

    stats.record_lookup(unique.len(), batch_count, handles.len());
    handles
}

/// Process-local directory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryHandleDirectory {
    handles: RwLock<HashMap<PlayerId, PaymentHandle>>,
}

impl InMemoryHandleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handles<I>(handles: I) -> Self
    where
        I: IntoIterator<Item = (PlayerId, PaymentHandle)>,
    {
        Self {
            handles: RwLock::new(handles.into_iter().collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.handles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.handles.read().await.is_empty()
    }
}

#[async_trait]
impl HandleDirectory for InMemoryHandleDirectory {
    async fn get(&self, player: &PlayerId) -> Result<Option<PaymentHandle>, DirectoryError> {
        Ok(self.handles.read().await.get(player).cloned())
    }

    async fn put(
        &self,
        player: PlayerId,
        handle: PaymentHandle,
    ) -> Result<Option<PaymentHandle>, DirectoryError> {
        Ok(self.handles.write().await.insert(player, handle))
    }
}
