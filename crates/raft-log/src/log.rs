//! # log
//!
//! why: define the operations every log backend must support identically
//! relations: implemented by memory.rs and backend.rs; called by the consensus module
//! what: Log trait, LogDump diagnostic rendering

use std::fmt;
use std::slice;

use raft_log_core::{Entry, Metadata};

use crate::error::Result;
use crate::sync::LogSync;

/// append-only, 1-indexed sequence of entries with prefix and suffix truncation
///
/// The log holds every index in `[log_start_index(), last_log_index()]` and
/// nothing else. It is empty exactly when `last_log_index() == log_start_index() - 1`.
/// A fresh log starts at index 1 with last index 0.
///
/// Callers serialize access themselves; implementations need no internal locking.
pub trait Log {
    /// store `entries` starting at `last_log_index() + 1`
    ///
    /// The returned sync covers the new entries and must be waited on before
    /// they are treated as committed. An empty slice changes nothing and
    /// returns an empty-range sync (`first_index == last_log_index() + 1`).
    fn append(&mut self, entries: &[Entry]) -> LogSync;

    fn append_single(&mut self, entry: &Entry) -> LogSync {
        self.append(slice::from_ref(entry))
    }

    /// the entry at `index`, or `LogError::OutOfRange` outside the held range
    fn entry(&self, index: u64) -> Result<&Entry>;

    fn log_start_index(&self) -> u64;

    fn last_log_index(&self) -> u64;

    /// total encoded size of the held entries
    fn size_bytes(&self) -> u64;

    /// discard every entry below `first_index` and move the start up to it
    ///
    /// The start index never moves backwards. Truncating past the tail leaves
    /// an empty log whose next append lands at `first_index`.
    fn truncate_prefix(&mut self, first_index: u64);

    /// discard every entry above `last_index`
    ///
    /// Never drops below `log_start_index() - 1`; the start index is unchanged.
    fn truncate_suffix(&mut self, last_index: u64);

    fn metadata(&self) -> &Metadata;

    /// replace the metadata as a single unit
    fn set_metadata(&mut self, metadata: Metadata);

    fn is_empty(&self) -> bool {
        self.last_log_index() < self.log_start_index()
    }
}

/// human-readable dump of a log's metadata and entries, for debugging
pub struct LogDump<'a, L: ?Sized>(&'a L);

pub fn dump<L: Log + ?Sized>(log: &L) -> LogDump<'_, L> {
    LogDump(log)
}

impl<L: Log + ?Sized> fmt::Display for LogDump<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log = self.0;
        let metadata = serde_json::to_string(log.metadata()).map_err(|_| fmt::Error)?;
        writeln!(f, "Log:")?;
        writeln!(f, "metadata: {metadata}")?;
        writeln!(f, "startIndex: {}", log.log_start_index())?;
        for index in log.log_start_index()..=log.last_log_index() {
            let entry = log.entry(index).map_err(|_| fmt::Error)?;
            writeln!(f, "Entry {index}: {entry}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for dyn Log + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&dump(self), f)
    }
}
