//! Protobuf Wire Format Utilities for Cosmos SDK
//!
//! Low-level protobuf encoding functions used by the registry transaction
//! encoder, plus a minimal field decoder used to inspect encoded messages.
//!
//! # Wire Types
//!
//! | Type | Meaning | Used For |
//! |------|---------|----------|
//! | 0 | Varint | int32, uint64, bool, enum |
//! | 1 | 64-bit | fixed64 (decode only) |
//! | 2 | Length-delimited | string, bytes, embedded messages |
//! | 5 | 32-bit | fixed32 (decode only) |
//!
//! # Example
//!
//! ```
//! use registry_sdk::crypto::cosmos::protobuf::*;
//!
//! let mut buf = Vec::new();
//! encode_string(&mut buf, 1, "hello");
//! encode_uint64(&mut buf, 2, 12345);
//!
//! let fields = decode_fields(&buf).unwrap();
//! assert_eq!(fields[0].1, ProtoValue::Bytes(b"hello".to_vec()));
//! assert_eq!(fields[1].1, ProtoValue::Varint(12345));
//! ```
//!
//! # References
//!
//! - [Protocol Buffers Encoding](https://protobuf.dev/programming-guides/encoding/)

use crate::errors::{RegistryError, RegistryResult};

/// Wire type constants
pub mod wire_type {
    /// Varint: int32, int64, uint32, uint64, bool, enum
    pub const VARINT: u8 = 0;
    /// 64-bit: fixed64, sfixed64, double
    pub const FIXED64: u8 = 1;
    /// Length-delimited: string, bytes, embedded messages, packed repeated fields
    pub const LENGTH_DELIMITED: u8 = 2;
    /// 32-bit: fixed32, sfixed32, float
    pub const FIXED32: u8 = 5;
}

/// Encode a variable-length integer (varint)
#[inline]
pub fn encode_varint(buf: &mut Vec<u8>, value: u64) {
    let mut v = value;
    while v >= 0x80 {
        buf.push((v as u8) | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

/// Encode a field tag (field number + wire type)
#[inline]
pub fn encode_tag(buf: &mut Vec<u8>, field_number: u32, wire_type: u8) {
    encode_varint(buf, ((field_number as u64) << 3) | (wire_type as u64));
}

/// Encode a uint32 / enum field
///
/// Skips encoding if value is 0 (protobuf default behavior).
#[inline]
pub fn encode_uint32(buf: &mut Vec<u8>, field_number: u32, value: u32) {
    if value == 0 {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    encode_varint(buf, value as u64);
}

/// Encode a uint64 field
///
/// Skips encoding if value is 0 (protobuf default behavior).
#[inline]
pub fn encode_uint64(buf: &mut Vec<u8>, field_number: u32, value: u64) {
    if value == 0 {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    encode_varint(buf, value);
}

/// Encode an int32 / enum field
///
/// Negative values are sign-extended to ten varint bytes, as protobuf does.
#[inline]
pub fn encode_int32(buf: &mut Vec<u8>, field_number: u32, value: i32) {
    if value == 0 {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    encode_varint(buf, value as i64 as u64);
}

/// Encode a boolean field
///
/// Skips encoding if value is false (protobuf default behavior).
#[inline]
pub fn encode_bool(buf: &mut Vec<u8>, field_number: u32, value: bool) {
    if !value {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    buf.push(1);
}

/// Encode a string field
///
/// Skips encoding if value is empty (protobuf default behavior).
#[inline]
pub fn encode_string(buf: &mut Vec<u8>, field_number: u32, value: &str) {
    encode_bytes(buf, field_number, value.as_bytes());
}

/// Encode a bytes field
///
/// Skips encoding if value is empty (protobuf default behavior).
#[inline]
pub fn encode_bytes(buf: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    if value.is_empty() {
        return;
    }
    encode_length_delimited(buf, field_number, value);
}

/// Encode a length-delimited field (for embedded messages)
///
/// Unlike `encode_bytes`, this always encodes even if value is empty,
/// which is needed for embedded message fields and repeated bytes entries.
#[inline]
pub fn encode_length_delimited(buf: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    encode_tag(buf, field_number, wire_type::LENGTH_DELIMITED);
    encode_varint(buf, value.len() as u64);
    buf.extend_from_slice(value);
}

// ============================================================================
// Decoding
// ============================================================================

/// A decoded field value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtoValue {
    /// Wire type 0
    Varint(u64),
    /// Wire type 1
    Fixed64(u64),
    /// Wire type 2 (string, bytes or embedded message)
    Bytes(Vec<u8>),
    /// Wire type 5
    Fixed32(u32),
}

impl ProtoValue {
    /// Varint payload, if this is a varint field
    pub fn as_varint(&self) -> Option<u64> {
        match self {
            ProtoValue::Varint(v) => Some(*v),
            _ => None,
        }
    }

    /// Length-delimited payload, if this is a length-delimited field
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ProtoValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Length-delimited payload as UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }
}

fn truncated(what: &str) -> RegistryError {
    RegistryError::encoding("protobuf", format!("truncated {what}"))
}

/// Decode a varint starting at `*pos`, advancing the cursor
pub fn decode_varint(bytes: &[u8], pos: &mut usize) -> RegistryResult<u64> {
    let mut result = 0u64;
    for shift in (0..64).step_by(7) {
        let byte = *bytes.get(*pos).ok_or_else(|| truncated("varint"))?;
        *pos += 1;
        result |= ((byte & 0x7f) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(RegistryError::encoding("protobuf", "varint overflows 64 bits"))
}

fn take<'a>(bytes: &'a [u8], pos: &mut usize, len: usize, what: &str) -> RegistryResult<&'a [u8]> {
    let end = pos
        .checked_add(len)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| truncated(what))?;
    let slice = &bytes[*pos..end];
    *pos = end;
    Ok(slice)
}

/// Decode a message into its `(field_number, value)` pairs, in wire order
pub fn decode_fields(bytes: &[u8]) -> RegistryResult<Vec<(u32, ProtoValue)>> {
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let key = decode_varint(bytes, &mut pos)?;
        let field_number = u32::try_from(key >> 3)
            .map_err(|_| RegistryError::encoding("protobuf", "field number out of range"))?;
        if field_number == 0 {
            return Err(RegistryError::encoding("protobuf", "field number 0"));
        }

        let value = match (key & 0x07) as u8 {
            wire_type::VARINT => ProtoValue::Varint(decode_varint(bytes, &mut pos)?),
            wire_type::FIXED64 => {
                let raw = take(bytes, &mut pos, 8, "fixed64")?;
                let mut word = [0u8; 8];
                word.copy_from_slice(raw);
                ProtoValue::Fixed64(u64::from_le_bytes(word))
            },
            wire_type::LENGTH_DELIMITED => {
                let len = decode_varint(bytes, &mut pos)?;
                let len = usize::try_from(len).map_err(|_| truncated("length"))?;
                ProtoValue::Bytes(take(bytes, &mut pos, len, "length-delimited field")?.to_vec())
            },
            wire_type::FIXED32 => {
                let raw = take(bytes, &mut pos, 4, "fixed32")?;
                let mut word = [0u8; 4];
                word.copy_from_slice(raw);
                ProtoValue::Fixed32(u32::from_le_bytes(word))
            },
            other => {
                return Err(RegistryError::encoding(
                    "protobuf",
                    format!("unsupported wire type {other}"),
                ))
            },
        };

        fields.push((field_number, value));
    }

    Ok(fields)
}
