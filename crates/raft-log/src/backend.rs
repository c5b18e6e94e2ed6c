//! # backend
//!
//! why: pick a log backend at construction time without callers naming it
//! relations: wraps memory.rs; constructed from configuration by the storage owner
//! what: BackendKind, LogConfig, AnyLog closed set of backends

use raft_log_core::{Entry, Metadata};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::log::Log;
use crate::memory::MemoryLog;
use crate::sync::LogSync;

/// available log backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// entries live in process memory only
    #[default]
    Memory,
}

/// configuration for opening a log
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub backend: BackendKind,
}

/// one of the supported backends, behind the shared contract
#[derive(Debug)]
pub enum AnyLog {
    Memory(MemoryLog),
}

impl AnyLog {
    pub fn open(config: &LogConfig) -> Self {
        info!(backend = ?config.backend, "opening log");
        match config.backend {
            BackendKind::Memory => Self::Memory(MemoryLog::new()),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Memory(_) => BackendKind::Memory,
        }
    }

    fn inner(&self) -> &dyn Log {
        match self {
            Self::Memory(log) => log,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Log {
        match self {
            Self::Memory(log) => log,
        }
    }
}

impl Log for AnyLog {
    fn append(&mut self, entries: &[Entry]) -> LogSync {
        self.inner_mut().append(entries)
    }

    fn entry(&self, index: u64) -> Result<&Entry> {
        self.inner().entry(index)
    }

    fn log_start_index(&self) -> u64 {
        self.inner().log_start_index()
    }

    fn last_log_index(&self) -> u64 {
        self.inner().last_log_index()
    }

    fn size_bytes(&self) -> u64 {
        self.inner().size_bytes()
    }

    fn truncate_prefix(&mut self, first_index: u64) {
        self.inner_mut().truncate_prefix(first_index)
    }

    fn truncate_suffix(&mut self, last_index: u64) {
        self.inner_mut().truncate_suffix(last_index)
    }

    fn metadata(&self) -> &Metadata {
        self.inner().metadata()
    }

    fn set_metadata(&mut self, metadata: Metadata) {
        self.inner_mut().set_metadata(metadata)
    }
}
