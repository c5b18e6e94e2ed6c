//! # raft-log
//!
//! why: give the consensus module one storage contract for its replicated log
//! relations: stores raft-log-core entries and metadata; called by the raft state machine
//! what: Log trait, LogSync durability token, MemoryLog backend, AnyLog backend selection

pub mod backend;
pub mod error;
pub mod log;
pub mod memory;
pub mod sync;

pub use backend::{AnyLog, BackendKind, LogConfig};
pub use error::{LogError, Result};
pub use log::{dump, Log, LogDump};
pub use memory::MemoryLog;
pub use raft_log_core::{Entry, Metadata};
pub use sync::{LogSync, SyncNotifier};
