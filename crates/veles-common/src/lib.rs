//! Common utilities for Veles.
//!
//! This crate provides the packed binary codec shared by all Veles crates:
//!
//! - [`BinaryReader`] - cursor-style reading of packed little-endian records
//! - [`BinaryWriter`] - the append-only builder counterpart
//! - [`FormatSpec`] - compiled format descriptors (`"3fI"` style)
//! - [`codepage`] - Windows-1252 text conversion for identifiers and paths
//!
//! The asset formats are little-endian throughout with no padding between
//! fields, so neither the reader nor the writer takes an endianness or
//! alignment parameter.

mod error;
mod format;
mod reader;
mod writer;

pub mod codepage;

pub use error::{Error, Result};
pub use format::{FieldType, FormatSpec, Value};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Re-export memchr for SIMD-accelerated byte searching
pub use memchr;
