//! Chunked asset container format.
//!
//! The asset files are sequences of tagged, length-prefixed binary blocks
//! ("chunks"). Each chunk is an 8-byte header followed by its payload:
//!
//! - 4 bytes: little-endian tag - bits 0-30 are the chunk id, bit 31 marks
//!   an LZHUF-compressed payload
//! - 4 bytes: little-endian payload length
//! - N bytes: payload
//!
//! Payloads are opaque to the container. A payload may itself be a chunk
//! stream; callers re-parse it by constructing a new [`ChunkReader`] over
//! the payload bytes. A flagged payload is decompressed by the caller with
//! `veles-lzhuf` - the container never decompresses anything itself.
//!
//! # Example
//!
//! ```
//! use veles_chunk::{ChunkReader, ChunkWriter};
//!
//! let mut writer = ChunkWriter::new();
//! writer.put(5, b"ABC")?;
//! writer.put(7, b"XY")?;
//! let buf = writer.serialize();
//!
//! let mut reader = ChunkReader::new(&buf);
//! assert_eq!(reader.find(7)?, b"XY");
//! # Ok::<(), veles_chunk::Error>(())
//! ```

mod error;
mod header;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use header::{ChunkHeader, COMPRESSED_FLAG, ID_MASK, MAX_PAYLOAD_LEN};
pub use reader::{Chunk, ChunkReader};
pub use writer::ChunkWriter;
