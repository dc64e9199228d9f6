//! Sync error types.

use sysrev_client::ClientError;
use sysrev_store::StoreError;
use thiserror::Error;

use crate::SyncState;

/// A sync that stopped before completing.
///
/// `state` is the last state the run reached. Tables written before the
/// failure stay written; later ones keep their previous contents.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("sync failed after {state}: {source}")]
    Client {
        state: SyncState,
        #[source]
        source: ClientError,
    },

    #[error("sync failed after {state}: {source}")]
    Store {
        state: SyncState,
        #[source]
        source: StoreError,
    },
}

impl SyncError {
    pub(crate) const fn client(state: SyncState, source: ClientError) -> Self {
        Self::Client { state, source }
    }

    pub(crate) const fn store(state: SyncState, source: StoreError) -> Self {
        Self::Store { state, source }
    }

    /// Last state reached before the failure.
    #[must_use]
    pub const fn state(&self) -> SyncState {
        match self {
            Self::Client { state, .. } | Self::Store { state, .. } => *state,
        }
    }
}
