//! # raft-log-core
//!
//! why: define the plain data types the replicated log stores, in pure, portable rust
//! relations: used by raft-log for every backend; the consensus layer builds entries with it
//! what: Entry (term + payload), Metadata (persisted term/vote), entry encoding

pub mod entry;
pub mod error;
pub mod metadata;

pub use entry::Entry;
pub use error::{CodecError, Result};
pub use metadata::Metadata;
