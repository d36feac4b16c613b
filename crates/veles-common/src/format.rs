//! Format descriptors for packed records.
//!
//! A descriptor is a compact token sequence describing the layout of a
//! tightly packed little-endian record: `"I3fH"` is one u32, three f32s and
//! one u16. Descriptors are compiled once into a flat field list by
//! [`FormatSpec::parse`] and can then be applied any number of times without
//! re-parsing the text.
//!
//! Grammar: each token is an optional decimal repeat count followed by a
//! type code. `B`/`H`/`I`/`Q` are unsigned 8/16/32/64-bit integers,
//! `b`/`h`/`i`/`q` the signed variants, `f` is a 32-bit float. There is no
//! endianness token; the codec is little-endian only.

use crate::{Error, Result};

/// Repeat counts above this are rejected as descriptor corruption.
const MAX_REPEAT: usize = 0xFFFF;

/// A primitive field type within a packed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
}

impl FieldType {
    /// Encoded width in bytes.
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            FieldType::U8 | FieldType::I8 => 1,
            FieldType::U16 | FieldType::I16 => 2,
            FieldType::U32 | FieldType::I32 | FieldType::F32 => 4,
            FieldType::U64 | FieldType::I64 => 8,
        }
    }

    /// The descriptor character for this type.
    pub const fn code(self) -> char {
        match self {
            FieldType::U8 => 'B',
            FieldType::I8 => 'b',
            FieldType::U16 => 'H',
            FieldType::I16 => 'h',
            FieldType::U32 => 'I',
            FieldType::I32 => 'i',
            FieldType::U64 => 'Q',
            FieldType::I64 => 'q',
            FieldType::F32 => 'f',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'B' => FieldType::U8,
            'b' => FieldType::I8,
            'H' => FieldType::U16,
            'h' => FieldType::I16,
            'I' => FieldType::U32,
            'i' => FieldType::I32,
            'Q' => FieldType::U64,
            'q' => FieldType::I64,
            'f' => FieldType::F32,
            _ => return None,
        })
    }
}

/// A single decoded (or to-be-encoded) field value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
}

impl Value {
    /// The field type this value encodes as.
    pub const fn field_type(self) -> FieldType {
        match self {
            Value::U8(_) => FieldType::U8,
            Value::I8(_) => FieldType::I8,
            Value::U16(_) => FieldType::U16,
            Value::I16(_) => FieldType::I16,
            Value::U32(_) => FieldType::U32,
            Value::I32(_) => FieldType::I32,
            Value::U64(_) => FieldType::U64,
            Value::I64(_) => FieldType::I64,
            Value::F32(_) => FieldType::F32,
        }
    }

    /// Widen an unsigned integer value to u64.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Value::U8(v) => Some(v as u64),
            Value::U16(v) => Some(v as u64),
            Value::U32(v) => Some(v as u64),
            Value::U64(v) => Some(v),
            _ => None,
        }
    }

    /// Widen a signed integer value to i64.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Value::I8(v) => Some(v as i64),
            Value::I16(v) => Some(v as i64),
            Value::I32(v) => Some(v as i64),
            Value::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Extract a float value.
    pub fn as_f32(self) -> Option<f32> {
        match self {
            Value::F32(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($prim:ty => $variant:ident),* $(,)?) => {
        $(impl From<$prim> for Value {
            fn from(v: $prim) -> Self {
                Value::$variant(v)
            }
        })*
    };
}

value_from! {
    u8 => U8, i8 => I8, u16 => U16, i16 => I16,
    u32 => U32, i32 => I32, u64 => U64, i64 => I64, f32 => F32,
}

/// A compiled format descriptor: a flat field list plus the total width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    fields: Vec<FieldType>,
    size: usize,
}

impl FormatSpec {
    /// Compile a descriptor string.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidFormat {
            descriptor: descriptor.to_string(),
            reason,
        };

        let mut fields = Vec::new();
        let mut size = 0usize;
        let mut repeat: Option<usize> = None;

        for ch in descriptor.chars() {
            if let Some(digit) = ch.to_digit(10) {
                let acc = repeat.unwrap_or(0) * 10 + digit as usize;
                if acc > MAX_REPEAT {
                    return Err(invalid("repeat count too large"));
                }
                repeat = Some(acc);
                continue;
            }

            let field = FieldType::from_code(ch).ok_or_else(|| invalid("unknown type code"))?;
            let count = match repeat.take() {
                Some(0) => return Err(invalid("repeat count of zero")),
                Some(n) => n,
                None => 1,
            };
            for _ in 0..count {
                fields.push(field);
            }
            size += field.width() * count;
        }

        if repeat.is_some() {
            return Err(invalid("trailing repeat count without a type code"));
        }

        Ok(Self { fields, size })
    }

    /// The flattened field list, in encounter order.
    pub fn fields(&self) -> &[FieldType] {
        &self.fields
    }

    /// Number of fields the descriptor reads or writes.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Total encoded width in bytes.
    pub const fn size(&self) -> usize {
        self.size
    }
}
