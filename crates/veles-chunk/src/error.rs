//! Error types for chunk container parsing.

use thiserror::Error;

/// Errors that can occur when reading or building chunk streams.
#[derive(Debug, Error)]
pub enum Error {
    /// Bytes remain but not enough for a full 8-byte chunk header.
    #[error("truncated chunk header: {available} bytes remain of an 8-byte header")]
    TruncatedHeader { available: usize },

    /// A chunk header declared more payload bytes than the buffer holds.
    #[error("truncated chunk {id:#x}: declared {declared} payload bytes but only {available} remain")]
    TruncatedChunk {
        id: u32,
        declared: usize,
        available: usize,
    },

    /// A targeted chunk id lookup reached the end of the stream.
    #[error("chunk {id:#x} not found before end of stream")]
    ChunkNotFound { id: u32 },

    /// A payload exceeds the 31-bit length-field capacity.
    #[error("payload of {len} bytes exceeds the 31-bit chunk length limit")]
    PayloadTooLarge { len: usize },

    /// A chunk id uses bit 31, which is reserved for the compressed flag.
    #[error("chunk id {id:#010x} uses bit 31, reserved for the compressed flag")]
    IdReservesFlagBit { id: u32 },

    /// Common library error.
    #[error("{0}")]
    Common(#[from] veles_common::Error),
}

/// Result type for chunk operations.
pub type Result<T> = std::result::Result<T, Error>;
