//! # error
//!
//! why: report failures of the entry encoding
//! relations: returned by entry.rs encode/decode
//! what: CodecError, Result alias

use thiserror::Error;

/// result type for entry encoding operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// errors raised while turning entries into bytes and back
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode entry: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode entry: {0}")]
    Decode(#[source] bincode::Error),
}
