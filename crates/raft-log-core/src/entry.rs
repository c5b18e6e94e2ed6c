//! # entry
//!
//! why: the unit of data the raft log replicates
//! relations: stored by every raft-log backend, sized for log accounting
//! what: Entry struct, binary encoding, encoded length, display form

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// width of the term field in the encoded form
const TERM_LEN: u64 = 8;
/// width of the payload length prefix in the encoded form
const DATA_LEN_PREFIX: u64 = 8;

/// A single entry in the replicated log
///
/// Entries carry no index of their own: the position in the log is the index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    /// The term when this entry was created
    pub term: u64,
    /// Opaque payload to be applied to the state machine
    pub data: Vec<u8>,
}

impl Entry {
    /// Create a new log entry
    pub fn new(term: u64, data: impl Into<Vec<u8>>) -> Self {
        Self {
            term,
            data: data.into(),
        }
    }

    /// serialize into the binary form persistent backends write
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(CodecError::Encode)
    }

    /// parse an entry previously produced by [`Entry::encode`]
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(CodecError::Decode)
    }

    /// length in bytes of [`Entry::encode`]'s output, computed without encoding
    pub fn encoded_len(&self) -> u64 {
        TERM_LEN + DATA_LEN_PREFIX + self.data.len() as u64
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "term: {}, data: \"{}\"", self.term, self.data.escape_ascii())
    }
}
