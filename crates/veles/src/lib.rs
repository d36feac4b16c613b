//! Veles - chunked game asset container and codec library.
//!
//! This crate provides a unified interface to the Veles library ecosystem
//! for working with legacy chunked asset files (meshes, skeletal animation,
//! level details, compiled models).
//!
//! # Crates
//!
//! - [`veles_common`] - packed binary records, format descriptors, codepage text
//! - [`veles_chunk`] - the tagged, length-prefixed chunk container
//! - [`veles_lzhuf`] - LZHUF decompression for compressed payloads
//!
//! The three layers compose in the caller's hands: locate a chunk's bytes
//! with the container, decompress flagged payloads explicitly, then parse
//! fields out of the result.
//!
//! # Example
//!
//! ```
//! use veles::prelude::*;
//!
//! // Build a container with one record chunk.
//! let mut record = BinaryWriter::new();
//! record.write_u32(3);
//! record.write_f32(0.5);
//! record.write_cstring("node_root")?;
//!
//! let mut container = ChunkWriter::new();
//! container.put(0x1001, record.as_bytes())?;
//! let buf = container.serialize();
//!
//! // Read it back.
//! let mut chunks = ChunkReader::new(&buf);
//! let payload = chunks.find(0x1001)?;
//! let mut reader = BinaryReader::new(payload);
//! assert_eq!(reader.read_u32()?, 3);
//! assert_eq!(reader.read_f32()?, 0.5);
//! assert_eq!(reader.read_cstring()?, "node_root");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use veles_chunk as chunk;
pub use veles_common as common;
pub use veles_lzhuf as lzhuf;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use veles_chunk::{Chunk, ChunkReader, ChunkWriter};
    pub use veles_common::{codepage, BinaryReader, BinaryWriter, FieldType, FormatSpec, Value};
    pub use veles_lzhuf::decompress;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
