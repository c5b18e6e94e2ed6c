//! # metadata
//!
//! why: hold the consensus state that must survive restarts alongside the log
//! relations: stored wholesale by raft-log backends, never interpreted by them
//! what: Metadata struct (current term, vote)

use serde::{Deserialize, Serialize};

/// persisted term and vote, replaced as a single unit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// latest term this server has seen
    pub current_term: u64,
    /// server that received this server's vote in `current_term`, if any
    pub voted_for: Option<u64>,
}

impl Metadata {
    pub fn new(current_term: u64, voted_for: Option<u64>) -> Self {
        Self {
            current_term,
            voted_for,
        }
    }
}
