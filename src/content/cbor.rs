//! DAG-CBOR codec for the JSON data model
//!
//! Encoding rules:
//! - map keys ordered by encoded length first, then bytewise
//! - integer and length heads in their shortest form
//! - floats always as 64-bit (major type 7, additional info 27)
//! - definite lengths only, no tags
//!
//! [`deserialize`] is the inverse over the JSON data model. It rejects byte
//! strings, tags, indefinite lengths, non-string map keys, half/single
//! precision floats, `undefined` and trailing bytes.

use crate::canonical::CanonicalValue;
use crate::errors::{RegistryError, RegistryResult};
use serde_json::{Map, Number, Value};

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;
const MAJOR_TAG: u8 = 6;
const MAJOR_SIMPLE: u8 = 7;

const SIMPLE_FALSE: u8 = 0xf4;
const SIMPLE_TRUE: u8 = 0xf5;
const SIMPLE_NULL: u8 = 0xf6;
const FLOAT64: u8 = 0xfb;

const MAX_DEPTH: usize = 128;

/// Serialize a canonical value to DAG-CBOR bytes
pub fn serialize(value: &CanonicalValue) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value(&mut buf, value.as_value());
    buf
}

fn encode_head(buf: &mut Vec<u8>, major: u8, value: u64) {
    let major = major << 5;
    if value < 24 {
        buf.push(major | value as u8);
    } else if value <= u8::MAX as u64 {
        buf.push(major | 24);
        buf.push(value as u8);
    } else if value <= u16::MAX as u64 {
        buf.push(major | 25);
        buf.extend_from_slice(&(value as u16).to_be_bytes());
    } else if value <= u32::MAX as u64 {
        buf.push(major | 26);
        buf.extend_from_slice(&(value as u32).to_be_bytes());
    } else {
        buf.push(major | 27);
        buf.extend_from_slice(&value.to_be_bytes());
    }
}

fn encode_text(buf: &mut Vec<u8>, text: &str) {
    encode_head(buf, MAJOR_TEXT, text.len() as u64);
    buf.extend_from_slice(text.as_bytes());
}

fn encode_number(buf: &mut Vec<u8>, number: &Number) {
    if let Some(u) = number.as_u64() {
        encode_head(buf, MAJOR_UNSIGNED, u);
    } else if let Some(i) = number.as_i64() {
        // i < 0 here; CBOR stores -1 - n
        encode_head(buf, MAJOR_NEGATIVE, !(i as u64));
    } else if let Some(f) = number.as_f64() {
        buf.push(FLOAT64);
        buf.extend_from_slice(&f.to_bits().to_be_bytes());
    }
}

fn encode_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.push(SIMPLE_NULL),
        Value::Bool(false) => buf.push(SIMPLE_FALSE),
        Value::Bool(true) => buf.push(SIMPLE_TRUE),
        Value::Number(number) => encode_number(buf, number),
        Value::String(text) => encode_text(buf, text),
        Value::Array(items) => {
            encode_head(buf, MAJOR_ARRAY, items.len() as u64);
            for item in items {
                encode_value(buf, item);
            }
        },
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| {
                a.len()
                    .cmp(&b.len())
                    .then_with(|| a.as_bytes().cmp(b.as_bytes()))
            });

            encode_head(buf, MAJOR_MAP, entries.len() as u64);
            for (key, child) in entries {
                encode_text(buf, key);
                encode_value(buf, child);
            }
        },
    }
}

// ============================================================================
// Decoding
// ============================================================================

fn cbor_error(message: impl Into<String>) -> RegistryError {
    RegistryError::encoding("dag-cbor", message)
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn byte(&mut self) -> RegistryResult<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| cbor_error("unexpected end of input"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn take(&mut self, len: usize) -> RegistryResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| cbor_error("unexpected end of input"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn argument(&mut self, info: u8) -> RegistryResult<u64> {
        let width = match info {
            0..=23 => return Ok(info as u64),
            24 => 1,
            25 => 2,
            26 => 4,
            27 => 8,
            31 => return Err(cbor_error("indefinite lengths are not allowed")),
            _ => return Err(cbor_error(format!("reserved additional info {info}"))),
        };
        let raw = self.take(width)?;
        Ok(raw.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
    }

    fn length(&mut self, info: u8) -> RegistryResult<usize> {
        let len = self.argument(info)?;
        usize::try_from(len).map_err(|_| cbor_error("length out of range"))
    }

    fn text(&mut self, info: u8) -> RegistryResult<String> {
        let len = self.length(info)?;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|e| cbor_error(format!("invalid UTF-8: {e}")))
    }

    fn value(&mut self, depth: usize) -> RegistryResult<Value> {
        if depth > MAX_DEPTH {
            return Err(cbor_error("nesting too deep"));
        }

        let initial = self.byte()?;
        let major = initial >> 5;
        let info = initial & 0x1f;

        match major {
            MAJOR_UNSIGNED => Ok(Value::Number(self.argument(info)?.into())),
            MAJOR_NEGATIVE => {
                let n = self.argument(info)?;
                let n = i64::try_from(n).map_err(|_| cbor_error("negative integer out of range"))?;
                Ok(Value::Number((-1 - n).into()))
            },
            MAJOR_BYTES => Err(cbor_error("byte strings are not part of the JSON data model")),
            MAJOR_TEXT => Ok(Value::String(self.text(info)?)),
            MAJOR_ARRAY => {
                let len = self.length(info)?;
                let mut items = Vec::with_capacity(len.min(self.bytes.len() - self.pos));
                for _ in 0..len {
                    items.push(self.value(depth + 1)?);
                }
                Ok(Value::Array(items))
            },
            MAJOR_MAP => {
                let len = self.length(info)?;
                let mut map = Map::new();
                for _ in 0..len {
                    let key_head = self.byte()?;
                    if key_head >> 5 != MAJOR_TEXT {
                        return Err(cbor_error("map keys must be text strings"));
                    }
                    let key = self.text(key_head & 0x1f)?;
                    let child = self.value(depth + 1)?;
                    if map.insert(key.clone(), child).is_some() {
                        return Err(cbor_error(format!("duplicate map key {key:?}")));
                    }
                }
                Ok(Value::Object(map))
            },
            MAJOR_TAG => Err(cbor_error("tags are not supported")),
            MAJOR_SIMPLE => match initial {
                SIMPLE_FALSE => Ok(Value::Bool(false)),
                SIMPLE_TRUE => Ok(Value::Bool(true)),
                SIMPLE_NULL => Ok(Value::Null),
                FLOAT64 => {
                    let raw = self.take(8)?;
                    let mut word = [0u8; 8];
                    word.copy_from_slice(raw);
                    let f = f64::from_bits(u64::from_be_bytes(word));
                    Number::from_f64(f)
                        .map(Value::Number)
                        .ok_or_else(|| cbor_error("non-finite float"))
                },
                other => Err(cbor_error(format!("unsupported simple value 0x{other:02x}"))),
            },
            _ => Err(cbor_error(format!("invalid major type {major}"))),
        }
    }
}

/// Decode DAG-CBOR bytes back into a JSON value
pub fn deserialize(bytes: &[u8]) -> RegistryResult<Value> {
    let mut decoder = Decoder { bytes, pos: 0 };
    let value = decoder.value(0)?;
    if decoder.pos != bytes.len() {
        return Err(cbor_error(format!(
            "{} trailing bytes",
            bytes.len() - decoder.pos
        )));
    }
    Ok(value)
}
