//! Chunk stream reader.

use std::collections::HashMap;

use veles_common::BinaryReader;

use crate::header::ChunkHeader;
use crate::{Error, Result};

/// A single chunk borrowed from the underlying stream.
///
/// The payload is opaque bytes. When a payload is itself a chunk stream the
/// caller re-parses it explicitly with [`Chunk::reader`]; nothing recurses
/// automatically.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    /// The chunk id, flag bit masked off.
    pub id: u32,
    /// Whether the payload is marked LZHUF-compressed.
    pub compressed: bool,
    /// The raw payload bytes.
    pub payload: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Reinterpret the payload as a nested chunk stream.
    pub fn reader(&self) -> ChunkReader<'a> {
        ChunkReader::new(self.payload)
    }
}

/// A forward-only reader over a chunk stream.
///
/// Chunks are produced lazily; nothing is materialized up front. The reader
/// is consumed as a sequence and is not restartable - re-construct it from
/// the original buffer to scan again.
///
/// # Example
///
/// ```
/// use veles_chunk::ChunkReader;
///
/// let data = b"\x05\x00\x00\x00\x03\x00\x00\x00ABC";
/// let mut reader = ChunkReader::new(data);
///
/// let chunk = reader.next_chunk().unwrap().unwrap();
/// assert_eq!(chunk.id, 5);
/// assert_eq!(chunk.payload, b"ABC");
/// assert!(reader.next_chunk().unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    inner: BinaryReader<'a>,
    done: bool,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader over a chunk stream.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: BinaryReader::new(data),
            done: false,
        }
    }

    /// Bytes left in the stream.
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    /// Produce the next chunk, or `None` exactly at the end of the stream.
    ///
    /// Fails with [`Error::TruncatedHeader`] or [`Error::TruncatedChunk`] if
    /// bytes remain but do not complete a header plus its declared payload.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk<'a>>> {
        if self.inner.is_empty() {
            return Ok(None);
        }
        if self.inner.remaining() < ChunkHeader::SIZE {
            return Err(Error::TruncatedHeader {
                available: self.inner.remaining(),
            });
        }

        let header: ChunkHeader = self.inner.read_struct()?;
        let declared = header.payload_len();
        let payload = self.inner.read_bytes(declared).map_err(|_| Error::TruncatedChunk {
            id: header.id(),
            declared,
            available: self.inner.remaining(),
        })?;

        Ok(Some(Chunk {
            id: header.id(),
            compressed: header.is_compressed(),
            payload,
        }))
    }

    /// Scan forward from the current position for a chunk with the given id
    /// and return its payload.
    ///
    /// This never rewinds: chunks skipped over are gone, and callers needing
    /// out-of-order access should drain into a map instead. Fails with
    /// [`Error::ChunkNotFound`] if the stream ends first.
    pub fn find(&mut self, id: u32) -> Result<&'a [u8]> {
        while let Some(chunk) = self.next_chunk()? {
            if chunk.id == id {
                return Ok(chunk.payload);
            }
        }
        Err(Error::ChunkNotFound { id })
    }

    /// Drain the rest of the stream into an id-to-payload map.
    ///
    /// Duplicate ids are legal in the raw stream; the last occurrence wins,
    /// matching how writers append corrections to existing streams.
    pub fn into_map(mut self) -> Result<HashMap<u32, &'a [u8]>> {
        let mut map = HashMap::new();
        while let Some(chunk) = self.next_chunk()? {
            map.insert(chunk.id, chunk.payload);
        }
        Ok(map)
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>>;

    /// Lazily yields chunks; fused after the end of the stream or an error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chunk_stream() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"\x05\x00\x00\x00\x03\x00\x00\x00ABC");
        data.extend_from_slice(b"\x07\x00\x00\x00\x02\x00\x00\x00XY");
        data
    }

    #[test]
    fn test_parse_concrete_example() {
        let mut reader = ChunkReader::new(b"\x05\x00\x00\x00\x03\x00\x00\x00ABC");
        let chunk = reader.next_chunk().unwrap().unwrap();

        assert_eq!(chunk.id, 5);
        assert!(!chunk.compressed);
        assert_eq!(chunk.payload, b"ABC");
        assert!(reader.next_chunk().unwrap().is_none());
    }

    #[test]
    fn test_compressed_flag_masked_from_id() {
        let mut reader = ChunkReader::new(b"\x05\x00\x00\x80\x03\x00\x00\x00ABC");
        let chunk = reader.next_chunk().unwrap().unwrap();

        assert_eq!(chunk.id, 5);
        assert!(chunk.compressed);
    }

    #[test]
    fn test_truncated_payload() {
        let data = b"\x05\x00\x00\x00\x0A\x00\x00\x00ABC";
        let mut reader = ChunkReader::new(data);

        assert!(matches!(
            reader.next_chunk(),
            Err(Error::TruncatedChunk {
                id: 5,
                declared: 10,
                available: 3
            })
        ));
    }

    #[test]
    fn test_truncation_at_every_boundary() {
        let data = two_chunk_stream();
        // Valid prefixes: empty, after chunk one, after chunk two.
        let valid = [0, 11, data.len()];

        for cut in 0..data.len() {
            let mut reader = ChunkReader::new(&data[..cut]);
            let mut result = Ok(());
            loop {
                match reader.next_chunk() {
                    Ok(Some(_)) => continue,
                    Ok(None) => break,
                    Err(err) => {
                        result = Err(err);
                        break;
                    }
                }
            }
            assert_eq!(result.is_ok(), valid.contains(&cut), "cut at {cut}");
        }
    }

    #[test]
    fn test_find_scans_forward_only() {
        let data = two_chunk_stream();
        let mut reader = ChunkReader::new(&data);

        assert_eq!(reader.find(7).unwrap(), b"XY");
        // Chunk 5 was skipped over and is now unreachable.
        assert!(matches!(reader.find(5), Err(Error::ChunkNotFound { id: 5 })));
    }

    #[test]
    fn test_iterator_yields_all_chunks() {
        let data = two_chunk_stream();
        let ids: Vec<u32> = ChunkReader::new(&data)
            .map(|c| c.unwrap().id)
            .collect();
        assert_eq!(ids, [5, 7]);
    }

    #[test]
    fn test_iterator_fused_after_error() {
        let mut reader = ChunkReader::new(b"\x05\x00\x00\x00\xFF\x00\x00\x00");
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_into_map_last_occurrence_wins() {
        let mut data = Vec::new();
        data.extend_from_slice(b"\x05\x00\x00\x00\x03\x00\x00\x00old");
        data.extend_from_slice(b"\x07\x00\x00\x00\x02\x00\x00\x00XY");
        data.extend_from_slice(b"\x05\x00\x00\x00\x03\x00\x00\x00new");

        let map = ChunkReader::new(&data).into_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&5], b"new");
        assert_eq!(map[&7], b"XY");
    }

    #[test]
    fn test_nested_stream_reparsed_explicitly() {
        let mut inner = Vec::new();
        inner.extend_from_slice(b"\x01\x00\x00\x00\x02\x00\x00\x00hi");

        let mut data = Vec::new();
        data.extend_from_slice(&9u32.to_le_bytes());
        data.extend_from_slice(&(inner.len() as u32).to_le_bytes());
        data.extend_from_slice(&inner);

        let mut outer = ChunkReader::new(&data);
        let chunk = outer.next_chunk().unwrap().unwrap();
        assert_eq!(chunk.id, 9);

        let mut nested = chunk.reader();
        let inner_chunk = nested.next_chunk().unwrap().unwrap();
        assert_eq!(inner_chunk.id, 1);
        assert_eq!(inner_chunk.payload, b"hi");
    }

    #[test]
    fn test_empty_stream() {
        let mut reader = ChunkReader::new(b"");
        assert!(reader.next_chunk().unwrap().is_none());
    }
}
