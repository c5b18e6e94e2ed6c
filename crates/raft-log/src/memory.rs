//! # memory
//!
//! why: reference backend for the log contract, with no durability
//! relations: implements log.rs; the baseline durable backends are checked against
//! what: MemoryLog storing entries in a deque, every sync already complete

use std::collections::VecDeque;

use raft_log_core::{Entry, Metadata};
use tracing::debug;

use crate::error::{LogError, Result};
use crate::log::Log;
use crate::sync::LogSync;

/// in-memory log, lost when dropped
#[derive(Debug, Clone)]
pub struct MemoryLog {
    /// index of `entries[0]`, or of the next append when empty
    start_index: u64,
    entries: VecDeque<Entry>,
    /// running total of `Entry::encoded_len` over `entries`
    size_bytes: u64,
    metadata: Metadata,
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self {
            start_index: 1,
            entries: VecDeque::new(),
            size_bytes: 0,
            metadata: Metadata::default(),
        }
    }
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of entries physically held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// true when no entries are physically held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// held entries in index order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

impl Log for MemoryLog {
    fn append(&mut self, entries: &[Entry]) -> LogSync {
        let first_index = self.last_log_index() + 1;
        for entry in entries {
            self.size_bytes += entry.encoded_len();
            self.entries.push_back(entry.clone());
        }
        let last_index = self.last_log_index();
        debug!(first_index, last_index, "appended entries");
        LogSync::completed(first_index, last_index)
    }

    fn entry(&self, index: u64) -> Result<&Entry> {
        index
            .checked_sub(self.start_index)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|offset| self.entries.get(offset))
            .ok_or_else(|| LogError::OutOfRange {
                index,
                start: self.start_index,
                last: self.last_log_index(),
            })
    }

    fn log_start_index(&self) -> u64 {
        self.start_index
    }

    fn last_log_index(&self) -> u64 {
        self.start_index - 1 + self.entries.len() as u64
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    fn truncate_prefix(&mut self, first_index: u64) {
        if first_index <= self.start_index {
            return;
        }
        let held = self.entries.len() as u64;
        let discard = (first_index - self.start_index).min(held) as usize;
        let freed: u64 = self.entries.drain(..discard).map(|e| e.encoded_len()).sum();
        self.size_bytes -= freed;
        self.start_index = first_index;
        debug!(
            start_index = self.start_index,
            discarded = discard,
            "truncated log prefix"
        );
    }

    fn truncate_suffix(&mut self, last_index: u64) {
        if last_index >= self.last_log_index() {
            return;
        }
        // anything below start_index - 1 clamps to an empty log
        let keep = (last_index + 1).saturating_sub(self.start_index) as usize;
        let discarded = self.entries.len() - keep;
        let freed: u64 = self.entries.drain(keep..).map(|e| e.encoded_len()).sum();
        self.size_bytes -= freed;
        debug!(
            last_index = self.last_log_index(),
            discarded, "truncated log suffix"
        );
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn set_metadata(&mut self, metadata: Metadata) {
        debug!(
            current_term = metadata.current_term,
            voted_for = ?metadata.voted_for,
            "replacing log metadata"
        );
        self.metadata = metadata;
    }
}

// truncate_prefix affects every other method, so most tests below call it
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> Entry {
        Entry::new(40, "foo")
    }

    fn push(log: &mut MemoryLog, entry: &Entry) {
        log.append_single(entry).wait().unwrap();
    }

    #[test]
    fn basic() {
        let mut log = MemoryLog::new();
        let sync = log.append_single(&sample_entry());
        assert_eq!(sync.first_index, 1);
        assert_eq!(sync.last_index, 1);
        assert!(sync.is_complete());
        let entry = log.entry(1).unwrap();
        assert_eq!(entry.term, 40);
        assert_eq!(entry.data, b"foo");
    }

    #[test]
    fn append() {
        let mut log = MemoryLog::new();
        let entry = sample_entry();
        let sync = log.append_single(&entry);
        assert_eq!((sync.first_index, sync.last_index), (1, 1));

        log.truncate_prefix(10);
        let sync = log.append(&[entry.clone(), entry]);
        assert_eq!((sync.first_index, sync.last_index), (10, 11));
        assert_eq!(log.log_start_index(), 10);
        assert_eq!(log.last_log_index(), 11);
    }

    #[test]
    fn append_nothing() {
        let mut log = MemoryLog::new();
        push(&mut log, &sample_entry());
        let sync = log.append(&[]);
        assert!(sync.is_empty());
        assert_eq!((sync.first_index, sync.last_index), (2, 1));
        assert_eq!(log.last_log_index(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn get_entry() {
        let mut log = MemoryLog::new();
        let mut entry = sample_entry();
        push(&mut log, &entry);
        assert_eq!(log.entry(1).unwrap().data, b"foo");
        assert!(matches!(log.entry(0), Err(LogError::OutOfRange { .. })));
        assert!(matches!(log.entry(2), Err(LogError::OutOfRange { .. })));

        entry.data = b"bar".to_vec();
        push(&mut log, &entry);
        log.truncate_prefix(2);
        assert_eq!(
            log.entry(1),
            Err(LogError::OutOfRange {
                index: 1,
                start: 2,
                last: 2
            })
        );
        push(&mut log, &entry);
        assert_eq!(log.entry(2).unwrap().data, b"bar");
    }

    #[test]
    fn log_start_index() {
        let mut log = MemoryLog::new();
        assert_eq!(log.log_start_index(), 1);
        log.truncate_prefix(200);
        log.truncate_prefix(100);
        assert_eq!(log.log_start_index(), 200);
    }

    #[test]
    fn last_log_index() {
        let mut log = MemoryLog::new();
        assert_eq!(log.last_log_index(), 0);
        push(&mut log, &sample_entry());
        push(&mut log, &sample_entry());
        assert_eq!(log.last_log_index(), 2);

        log.truncate_prefix(2);
        assert_eq!(log.last_log_index(), 2);
    }

    #[test]
    fn size_bytes() {
        let mut log = MemoryLog::new();
        assert_eq!(log.size_bytes(), 0);
        push(&mut log, &sample_entry());
        let s = log.size_bytes();
        assert!(s > 0);
        push(&mut log, &sample_entry());
        assert_eq!(log.size_bytes(), 2 * s);

        log.truncate_prefix(2);
        assert_eq!(log.size_bytes(), s);
        log.truncate_suffix(1);
        assert_eq!(log.size_bytes(), 0);
    }

    #[test]
    fn truncate_prefix() {
        let mut log = MemoryLog::new();
        let mut entry = sample_entry();
        assert_eq!(log.start_index, 1);
        log.truncate_prefix(0);
        assert_eq!(log.start_index, 1);
        log.truncate_prefix(1);
        assert_eq!(log.start_index, 1);

        // entries is empty
        log.truncate_prefix(500);
        assert_eq!(log.start_index, 500);
        assert_eq!(log.entries.len(), 0);

        // entries has fewer elements than truncated
        push(&mut log, &entry);
        log.truncate_prefix(502);
        assert_eq!(log.start_index, 502);
        assert_eq!(log.entries.len(), 0);

        // entries has exactly the elements truncated
        push(&mut log, &entry);
        push(&mut log, &entry);
        log.truncate_prefix(504);
        assert_eq!(log.start_index, 504);
        assert_eq!(log.entries.len(), 0);

        // entries has more elements than truncated
        push(&mut log, &entry);
        push(&mut log, &entry);
        entry.data = b"bar".to_vec();
        push(&mut log, &entry);
        log.truncate_prefix(506);
        assert_eq!(log.start_index, 506);
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].data, b"bar");
        assert_eq!(log.iter().map(|e| e.term).collect::<Vec<_>>(), vec![40]);

        // truncating to an earlier index has no effect
        log.truncate_prefix(400);
        assert_eq!(log.start_index, 506);
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.size_bytes(), entry.encoded_len());
    }

    #[test]
    fn truncate_suffix() {
        let mut log = MemoryLog::new();
        log.truncate_suffix(0);
        log.truncate_suffix(10);
        assert_eq!(log.last_log_index(), 0);
        push(&mut log, &sample_entry());
        push(&mut log, &sample_entry());
        log.truncate_suffix(10);
        assert_eq!(log.last_log_index(), 2);
        log.truncate_suffix(2);
        assert_eq!(log.last_log_index(), 2);
        log.truncate_suffix(1);
        assert_eq!(log.last_log_index(), 1);
        log.truncate_suffix(0);
        assert_eq!(log.last_log_index(), 0);

        log.truncate_prefix(10);
        push(&mut log, &sample_entry());
        assert_eq!(log.last_log_index(), 10);
        log.truncate_suffix(10);
        assert_eq!(log.last_log_index(), 10);
        log.truncate_suffix(8);
        assert_eq!(log.last_log_index(), 9);
        assert_eq!(log.log_start_index(), 10);
        push(&mut log, &sample_entry());
        assert_eq!(log.last_log_index(), 10);
    }

    #[test]
    fn append_at_top_of_index_space() {
        let mut log = MemoryLog::new();
        log.truncate_prefix(u64::MAX);
        assert_eq!(log.last_log_index(), u64::MAX - 1);
        let sync = log.append_single(&sample_entry());
        assert_eq!((sync.first_index, sync.last_index), (u64::MAX, u64::MAX));
        assert_eq!(log.entry(u64::MAX).unwrap(), &sample_entry());

        let mut log = MemoryLog::new();
        log.truncate_prefix(u64::MAX - 1);
        let bar = Entry::new(41, "bar");
        log.append(&[sample_entry(), bar.clone()]).wait().unwrap();
        assert_eq!(log.last_log_index(), u64::MAX);
        assert_eq!(log.entry(u64::MAX).unwrap(), &bar);
        assert!(log.entry(u64::MAX - 2).is_err());
        log.truncate_suffix(u64::MAX - 1);
        assert_eq!(log.last_log_index(), u64::MAX - 1);
    }

    #[test]
    fn inherent_len_and_is_empty_count_held_entries() {
        let mut log = MemoryLog::new();
        assert!(MemoryLog::is_empty(&log));
        assert_eq!(log.len(), 0);
        push(&mut log, &sample_entry());
        assert!(!MemoryLog::is_empty(&log));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn successful_read_after_failed_read() {
        let mut log = MemoryLog::new();
        push(&mut log, &sample_entry());
        assert!(log.entry(2).is_err());
        assert_eq!(log.entry(1).unwrap(), &sample_entry());
    }

    #[test]
    fn metadata_is_replaced_wholesale() {
        let mut log = MemoryLog::new();
        assert_eq!(log.metadata(), &Metadata::default());
        log.set_metadata(Metadata::new(5, Some(2)));
        log.set_metadata(Metadata::new(6, None));
        assert_eq!(log.metadata(), &Metadata::new(6, None));
    }

    #[test]
    fn is_empty_follows_indices() {
        let mut log = MemoryLog::new();
        assert!(log.is_empty());
        push(&mut log, &sample_entry());
        assert!(!log.is_empty());
        log.truncate_prefix(2);
        assert!(log.is_empty());
    }
}
