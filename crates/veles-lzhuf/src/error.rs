//! Error types for LZHUF decompression.

use thiserror::Error;

/// Errors that can occur during decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// The compressed stream ended before producing the expected output.
    #[error("corrupt LZHUF stream: produced {produced} of {expected} expected bytes")]
    CorruptStream { expected: usize, produced: usize },
}

/// Result type for LZHUF operations.
pub type Result<T> = std::result::Result<T, Error>;
