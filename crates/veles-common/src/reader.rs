//! Packed binary reader for byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! tightly packed little-endian records from a byte slice without copying.

use zerocopy::FromBytes;

use crate::format::{FormatSpec, Value};
use crate::{codepage, Error, Result};

/// A cursor over an immutable byte slice.
///
/// Every read advances the position by the exact width of the value read and
/// fails with [`Error::UnexpectedEof`] if insufficient bytes remain - a read
/// never consumes a partial value. The reader borrows the buffer for its
/// whole lifetime and never copies payload bytes.
///
/// # Example
///
/// ```
/// use veles_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u32().unwrap(), 0x08070605);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a new reader starting at a specific position.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    ///
    /// Callers iterating implicitly counted records read until this returns
    /// true.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Advance the cursor by `count` bytes without returning data.
    ///
    /// Fails like [`read_bytes`](Self::read_bytes) if fewer bytes remain, so
    /// a skip can never silently run past a truncated buffer.
    #[inline]
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_u16().map(|v| v as i16)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_u32().map(|v| v as i32)
    }

    /// Read a little-endian u64.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a little-endian i64.
    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_u64().map(|v| v as i64)
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Read a little-endian f64.
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_u64().map(f64::from_bits)
    }

    /// Peek at a u32 without advancing.
    #[inline]
    pub fn peek_u32(&self) -> Result<u32> {
        let bytes = self.peek_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a packed record per a compiled format descriptor.
    ///
    /// Values are returned in encounter order. If the buffer is short the
    /// read fails before consuming anything, so the cursor never ends up in
    /// the middle of a record.
    pub fn read_fixed(&mut self, spec: &FormatSpec) -> Result<Vec<Value>> {
        // Check the full record up front: no partial consumption.
        self.peek_bytes(spec.size())?;

        let mut values = Vec::with_capacity(spec.field_count());
        for field in spec.fields() {
            use crate::format::FieldType::*;
            values.push(match field {
                U8 => Value::U8(self.read_u8()?),
                I8 => Value::I8(self.read_i8()?),
                U16 => Value::U16(self.read_u16()?),
                I16 => Value::I16(self.read_i16()?),
                U32 => Value::U32(self.read_u32()?),
                I32 => Value::I32(self.read_i32()?),
                U64 => Value::U64(self.read_u64()?),
                I64 => Value::I64(self.read_i64()?),
                F32 => Value::F32(self.read_f32()?),
            });
        }
        Ok(values)
    }

    /// Read a NUL-terminated string as raw codepage bytes.
    ///
    /// The terminator is consumed but not included in the result.
    pub fn read_cstring_bytes(&mut self) -> Result<&'a [u8]> {
        let remaining = &self.data[self.position.min(self.data.len())..];
        let nul = memchr::memchr(0, remaining).ok_or(Error::UnterminatedString)?;
        let bytes = &remaining[..nul];
        self.position += nul + 1;
        Ok(bytes)
    }

    /// Read a NUL-terminated string, decoded from Windows-1252.
    pub fn read_cstring(&mut self) -> Result<String> {
        self.read_cstring_bytes().map(codepage::decode)
    }

    /// Read a string from a fixed-size field, stopping at the first NUL.
    ///
    /// The cursor always advances by `buffer_size` regardless of where the
    /// terminator sits.
    pub fn read_string_in_buffer(&mut self, buffer_size: usize) -> Result<String> {
        let bytes = self.read_bytes(buffer_size)?;
        let end = memchr::memchr(0, bytes).unwrap_or(buffer_size);
        Ok(codepage::decode(&bytes[..end]))
    }

    /// Read a fixed-layout struct using zerocopy.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Expect specific magic bytes.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }
}
