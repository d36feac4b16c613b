//! Packed binary writer.
//!
//! [`BinaryWriter`] is the append-only builder side of [`BinaryReader`]:
//! every write appends the exact little-endian encoding of the given value
//! to an owned, growable buffer, with no padding or alignment between
//! fields.
//!
//! [`BinaryReader`]: crate::BinaryReader

use zerocopy::{Immutable, IntoBytes};

use crate::format::{FormatSpec, Value};
use crate::{codepage, Result};

/// An append-only packed record writer.
///
/// # Example
///
/// ```
/// use veles_common::BinaryWriter;
///
/// let mut writer = BinaryWriter::new();
/// writer.write_u32(0x04030201);
/// writer.write_u16(0x0605);
/// assert_eq!(writer.as_bytes(), &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated buffer. Idempotent: the writer is not consumed and
    /// repeated calls see identical bytes until the next write.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer and take the accumulated buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Append a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append a signed byte.
    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.write_u8(value as u8);
    }

    /// Append a little-endian u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian i16.
    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    /// Append a little-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian i32.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    /// Append a little-endian u64.
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a little-endian i64.
    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.write_u64(value as u64);
    }

    /// Append a little-endian f32, preserving the exact bit pattern.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    /// Append a little-endian f64, preserving the exact bit pattern.
    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    /// Append raw bytes verbatim.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a packed record per a compiled format descriptor.
    ///
    /// # Panics
    ///
    /// Panics if the value count or any value variant does not match the
    /// descriptor. A mismatch is a programming error at the call site, not
    /// malformed external data, so it fails fast rather than returning a
    /// recoverable error.
    pub fn write_fixed(&mut self, spec: &FormatSpec, values: &[Value]) {
        assert_eq!(
            values.len(),
            spec.field_count(),
            "format descriptor expects {} values, got {}",
            spec.field_count(),
            values.len()
        );
        for (field, value) in spec.fields().iter().zip(values) {
            assert_eq!(
                value.field_type(),
                *field,
                "value {value:?} does not match descriptor field {field:?}"
            );
            match *value {
                Value::U8(v) => self.write_u8(v),
                Value::I8(v) => self.write_i8(v),
                Value::U16(v) => self.write_u16(v),
                Value::I16(v) => self.write_i16(v),
                Value::U32(v) => self.write_u32(v),
                Value::I32(v) => self.write_i32(v),
                Value::U64(v) => self.write_u64(v),
                Value::I64(v) => self.write_i64(v),
                Value::F32(v) => self.write_f32(v),
            }
        }
    }

    /// Append a NUL-terminated Windows-1252 string.
    ///
    /// Fails with [`UnencodableChar`] if any character has no codepage byte;
    /// on failure nothing is appended.
    ///
    /// [`UnencodableChar`]: crate::Error::UnencodableChar
    pub fn write_cstring(&mut self, text: &str) -> Result<()> {
        let encoded = codepage::encode(text)?;
        self.buf.extend_from_slice(&encoded);
        self.buf.push(0);
        Ok(())
    }

    /// Append a Windows-1252 string into a fixed-size field, NUL-padded.
    ///
    /// Fails if the encoded text (plus terminator) does not fit or contains
    /// an unencodable character; on failure nothing is appended.
    pub fn write_cstring_in_buffer(&mut self, text: &str, buffer_size: usize) -> Result<()> {
        let encoded = codepage::encode(text)?;
        if encoded.len() >= buffer_size {
            return Err(crate::Error::FieldTooSmall {
                needed: encoded.len() + 1,
                available: buffer_size,
            });
        }
        self.buf.extend_from_slice(&encoded);
        self.buf.extend(std::iter::repeat(0).take(buffer_size - encoded.len()));
        Ok(())
    }

    /// Append a fixed-layout struct using zerocopy.
    #[inline]
    pub fn write_struct<T: IntoBytes + Immutable>(&mut self, value: &T) {
        self.buf.extend_from_slice(value.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatSpec;
    use crate::{BinaryReader, Error};

    #[test]
    fn test_write_fixed_concrete() {
        let spec = FormatSpec::parse("2I").unwrap();
        let mut writer = BinaryWriter::new();
        writer.write_fixed(&spec, &[Value::U32(1), Value::U32(0xFFFFFFFF)]);

        assert_eq!(
            writer.as_bytes(),
            &[0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_format_round_trip() {
        let spec = FormatSpec::parse("3fhB2q").unwrap();
        let values = vec![
            Value::F32(1.5),
            Value::F32(f32::NEG_INFINITY),
            Value::F32(-0.0),
            Value::I16(-12345),
            Value::U8(0xAB),
            Value::I64(i64::MIN),
            Value::I64(i64::MAX),
        ];

        let mut writer = BinaryWriter::new();
        writer.write_fixed(&spec, &values);
        assert_eq!(writer.len(), spec.size());

        let buf = writer.into_bytes();
        let mut reader = BinaryReader::new(&buf);
        assert_eq!(reader.read_fixed(&spec).unwrap(), values);
        assert!(reader.is_empty());
    }

    #[test]
    #[should_panic(expected = "expects 2 values")]
    fn test_write_fixed_arity_mismatch_panics() {
        let spec = FormatSpec::parse("2I").unwrap();
        BinaryWriter::new().write_fixed(&spec, &[Value::U32(1)]);
    }

    #[test]
    #[should_panic(expected = "does not match descriptor field")]
    fn test_write_fixed_type_mismatch_panics() {
        let spec = FormatSpec::parse("I").unwrap();
        BinaryWriter::new().write_fixed(&spec, &[Value::F32(1.0)]);
    }

    #[test]
    fn test_write_cstring_round_trip() {
        let mut writer = BinaryWriter::new();
        writer.write_cstring("Größe").unwrap();

        let buf = writer.into_bytes();
        assert_eq!(*buf.last().unwrap(), 0);

        let mut reader = BinaryReader::new(&buf);
        assert_eq!(reader.read_cstring().unwrap(), "Größe");
    }

    #[test]
    fn test_write_cstring_failure_appends_nothing() {
        let mut writer = BinaryWriter::new();
        writer.write_u16(7);
        let before = writer.len();

        let err = writer.write_cstring("snowman \u{2603}").unwrap_err();
        assert!(matches!(err, Error::UnencodableChar { ch: '\u{2603}' }));
        assert_eq!(writer.len(), before);
    }

    #[test]
    fn test_write_cstring_in_buffer() {
        let mut writer = BinaryWriter::new();
        writer.write_cstring_in_buffer("abc", 6).unwrap();
        assert_eq!(writer.as_bytes(), b"abc\0\0\0");

        assert!(writer.write_cstring_in_buffer("toolong", 4).is_err());
        assert_eq!(writer.len(), 6);
    }

    #[test]
    fn test_serialize_idempotent() {
        let mut writer = BinaryWriter::new();
        writer.write_u32(42);
        let first = writer.as_bytes().to_vec();
        assert_eq!(writer.as_bytes(), first.as_slice());
    }
}
