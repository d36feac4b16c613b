//! Error types for veles-common.

use thiserror::Error;

/// Common error type for packed codec operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// String data ended before a NUL terminator was found.
    #[error("string missing NUL terminator")]
    UnterminatedString,

    /// A character with no representation in the legacy codepage.
    #[error("character {ch:?} (U+{code:04X}) has no Windows-1252 encoding", code = *ch as u32)]
    UnencodableChar { ch: char },

    /// Encoded text does not fit its fixed-size field.
    #[error("field of {available} bytes cannot hold {needed} bytes of text plus terminator")]
    FieldTooSmall { needed: usize, available: usize },

    /// Malformed format descriptor.
    #[error("invalid format descriptor {descriptor:?}: {reason}")]
    InvalidFormat {
        descriptor: String,
        reason: &'static str,
    },

    /// Invalid magic bytes encountered.
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic {
        expected: Vec<u8>,
        actual: Vec<u8>,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
