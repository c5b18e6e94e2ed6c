//! # error
//!
//! why: surface the few conditions a log caller must handle
//! relations: returned by log.rs reads and sync.rs waits
//! what: LogError, Result alias

use thiserror::Error;

/// result type for log operations
pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogError {
    /// a read outside `[start, last]`, including any read from an empty log
    #[error("index {index} out of range [{start}, {last}]")]
    OutOfRange { index: u64, start: u64, last: u64 },

    /// the backend dropped its notifier without ever making the range durable
    #[error("sync for entries {first_index}..={last_index} was abandoned by the backend")]
    SyncAbandoned { first_index: u64, last_index: u64 },
}
