//! # sync
//!
//! why: let appends return before their entries are durable, without letting
//!      the caller acknowledge them too early
//! relations: created by Log::append in every backend, waited on by the consensus module
//! what: LogSync completion token, SyncNotifier for backends with outstanding i/o

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::trace;

use crate::error::{LogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    Pending,
    Durable,
    Abandoned,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<SyncState>,
    changed: Condvar,
}

impl Shared {
    fn settle(&self, outcome: SyncState) {
        let mut state = self.state.lock();
        if *state == SyncState::Pending {
            *state = outcome;
            self.changed.notify_all();
        }
    }
}

/// durability obligation for the entries `first_index..=last_index` of one append
///
/// The entries are readable as soon as `append` returns but must not be treated
/// as committed until [`LogSync::wait`] returns `Ok`.
#[must_use = "appended entries are not durable until the sync is waited on"]
#[derive(Debug)]
pub struct LogSync {
    /// index of the first entry written by the append
    pub first_index: u64,
    /// index of the last entry written by the append
    pub last_index: u64,
    shared: Option<Arc<Shared>>,
}

impl LogSync {
    /// a sync whose range is already durable
    pub fn completed(first_index: u64, last_index: u64) -> Self {
        Self {
            first_index,
            last_index,
            shared: None,
        }
    }

    /// a sync that completes once the returned notifier is fired
    pub fn pending(first_index: u64, last_index: u64) -> (Self, SyncNotifier) {
        let shared = Arc::new(Shared {
            state: Mutex::new(SyncState::Pending),
            changed: Condvar::new(),
        });
        let notifier = SyncNotifier {
            first_index,
            last_index,
            shared: Arc::clone(&shared),
        };
        let sync = Self {
            first_index,
            last_index,
            shared: Some(shared),
        };
        (sync, notifier)
    }

    /// true when the append covered no entries
    pub fn is_empty(&self) -> bool {
        self.first_index > self.last_index
    }

    pub fn is_complete(&self) -> bool {
        match &self.shared {
            None => true,
            Some(shared) => *shared.state.lock() == SyncState::Durable,
        }
    }

    /// block until the range is durable
    pub fn wait(self) -> Result<()> {
        let Some(shared) = self.shared.as_ref() else {
            return Ok(());
        };
        let mut state = shared.state.lock();
        loop {
            match *state {
                SyncState::Durable => {
                    trace!(
                        first_index = self.first_index,
                        last_index = self.last_index,
                        "sync complete"
                    );
                    return Ok(());
                }
                SyncState::Abandoned => {
                    return Err(LogError::SyncAbandoned {
                        first_index: self.first_index,
                        last_index: self.last_index,
                    });
                }
                SyncState::Pending => shared.changed.wait(&mut state),
            }
        }
    }
}

/// backend side of a pending [`LogSync`]
///
/// Dropping it without calling [`SyncNotifier::complete`] fails the waiter
/// instead of leaving it blocked forever.
#[derive(Debug)]
pub struct SyncNotifier {
    first_index: u64,
    last_index: u64,
    shared: Arc<Shared>,
}

impl SyncNotifier {
    /// mark the range durable and wake the waiter
    pub fn complete(self) {
        trace!(
            first_index = self.first_index,
            last_index = self.last_index,
            "marking entries durable"
        );
        self.shared.settle(SyncState::Durable);
    }
}

impl Drop for SyncNotifier {
    fn drop(&mut self) {
        self.shared.settle(SyncState::Abandoned);
    }
}
