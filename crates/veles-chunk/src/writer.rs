//! Chunk stream builder.

use veles_common::BinaryWriter;

use crate::header::{ChunkHeader, COMPRESSED_FLAG, ID_MASK, MAX_PAYLOAD_LEN};
use crate::{Error, Result};

/// An append-only builder for chunk streams.
///
/// Entries keep their insertion order - that order is exactly the order
/// chunks appear in the serialized buffer. The writer owns copies of all
/// payload bytes given to it. No deduplication happens: appending the same
/// id twice produces two chunks, and readers draining into a map will keep
/// the later one.
///
/// # Example
///
/// ```
/// use veles_chunk::ChunkWriter;
///
/// let mut writer = ChunkWriter::new();
/// writer.put(5, b"ABC").unwrap();
/// assert_eq!(writer.serialize(), b"\x05\x00\x00\x00\x03\x00\x00\x00ABC");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChunkWriter {
    /// (raw tag word, owned payload) in insertion order.
    entries: Vec<(u32, Vec<u8>)>,
}

impl ChunkWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chunks appended so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no chunks have been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a chunk.
    ///
    /// Fails with [`Error::PayloadTooLarge`] if the payload exceeds the
    /// 31-bit length encoding, and with [`Error::IdReservesFlagBit`] if the
    /// id itself carries bit 31 - silently masking it would change the id a
    /// reader sees.
    pub fn put(&mut self, id: u32, payload: &[u8]) -> Result<()> {
        self.put_tagged(id, false, payload)
    }

    /// Append a chunk whose payload is marked LZHUF-compressed.
    ///
    /// The payload bytes are stored verbatim; compressing them is the
    /// caller's job, this only sets the flag bit in the header.
    pub fn put_compressed(&mut self, id: u32, payload: &[u8]) -> Result<()> {
        self.put_tagged(id, true, payload)
    }

    /// Append a chunk whose payload is another fully built writer.
    pub fn put_nested(&mut self, id: u32, nested: &ChunkWriter) -> Result<()> {
        self.put(id, &nested.serialize())
    }

    fn put_tagged(&mut self, id: u32, compressed: bool, payload: &[u8]) -> Result<()> {
        if id & !ID_MASK != 0 {
            return Err(Error::IdReservesFlagBit { id });
        }
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLarge { len: payload.len() });
        }
        let tag = if compressed { id | COMPRESSED_FLAG } else { id };
        self.entries.push((tag, payload.to_vec()));
        Ok(())
    }

    /// Serialize all chunks, headers plus payloads, in insertion order.
    ///
    /// Idempotent: repeated calls return identical bytes until the next
    /// `put`.
    pub fn serialize(&self) -> Vec<u8> {
        let total: usize = self
            .entries
            .iter()
            .map(|(_, payload)| ChunkHeader::SIZE + payload.len())
            .sum();

        let mut writer = BinaryWriter::with_capacity(total);
        for (tag, payload) in &self.entries {
            writer.write_struct(&ChunkHeader::new(*tag, payload.len() as u32));
            writer.write_bytes(payload);
        }
        writer.into_bytes()
    }
}
