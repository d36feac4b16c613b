//! LZHUF decompression for compressed chunk payloads.
//!
//! Older asset files shrink chunk payloads with LZHUF: LZSS-style
//! sliding-window matching entropy-coded by an adaptive Huffman code. The
//! scheme decodes symbol-by-symbol from an MSB-first bit stream over a
//! 314-symbol alphabet (256 literals plus 58 match lengths of 3..=60),
//! with 12-bit back-reference positions into a 4096-byte window.
//!
//! The compressed stream has no terminator: the decompressed size travels
//! out-of-band in the surrounding chunk metadata, so [`decompress`] takes
//! it as a parameter and stops exactly there.
//!
//! # Example
//!
//! ```no_run
//! use veles_chunk::ChunkReader;
//!
//! # fn example(container: &[u8], raw_len: usize) -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = ChunkReader::new(container);
//! while let Some(chunk) = reader.next_chunk()? {
//!     let payload = if chunk.compressed {
//!         veles_lzhuf::decompress(chunk.payload, raw_len)?
//!     } else {
//!         chunk.payload.to_vec()
//!     };
//!     // parse `payload` with veles_common::BinaryReader...
//! }
//! # Ok(())
//! # }
//! ```

mod bits;
mod decoder;
mod error;
mod tables;
mod tree;

pub use decoder::decompress;
pub use error::{Error, Result};
