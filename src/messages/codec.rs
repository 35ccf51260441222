//! Message Encoders
//!
//! Both halves of a registry transaction are produced here from the same
//! `(schema, values)` pair:
//!
//! - [`amino_value`]: the legacy-amino JSON `value` signed through EIP-712
//! - [`proto_bytes`]: the protobuf message packed into the `Any`
//!
//! Each encoder first checks that the values cover the schema exactly (same
//! names, same order, compatible kinds, nested structs included). A mismatch
//! is a programming error in the message definitions and panics with the
//! `FieldMappingMismatch` error text.
//!
//! Value mapping:
//!
//! | Value | Typed data | Protobuf |
//! |-------|-----------|----------|
//! | `Str` | string | string (skipped when empty) |
//! | `Uint64` | decimal string | varint |
//! | `Int32` | number | varint |
//! | `Bool` | bool | varint (skipped when false) |
//! | `Struct` | object | embedded message |
//! | `List` | array | repeated embedded message |
//!
//! Typed-data objects follow the schema's declaration order. Protobuf fields
//! are written in ascending field-number order, nested messages included.

use super::{FieldSpec, FieldValue, MessageSchema, TxMessage};
use crate::crypto::cosmos::protobuf::{
    encode_bool, encode_int32, encode_length_delimited, encode_string, encode_uint64,
};
use crate::crypto::cosmos::transaction::CosmosAny;
use crate::errors::RegistryError;
use serde_json::{json, Map, Value};

fn mismatch(variant: &str, field: &str, message: String) -> ! {
    panic!(
        "{}",
        RegistryError::FieldMappingMismatch {
            variant: variant.to_string(),
            field: field.to_string(),
            message,
        }
    )
}

fn nested<'s>(schema: &'s MessageSchema, spec: &FieldSpec) -> &'s [FieldSpec] {
    match schema.nested_struct(spec.eip712_type) {
        Some(s) => s.fields,
        None => mismatch(
            schema.variant,
            spec.name,
            format!("references undeclared type {}", spec.eip712_type),
        ),
    }
}

/// Panics unless `values` covers `specs` exactly
pub fn check_coverage(schema: &MessageSchema, specs: &[FieldSpec], values: &[(&'static str, FieldValue)]) {
    for (index, spec) in specs.iter().enumerate() {
        match values.get(index) {
            Some((name, _)) if *name == spec.name => {},
            Some((name, _)) => mismatch(
                schema.variant,
                spec.name,
                format!("expected at position {index}, found '{name}'"),
            ),
            None => mismatch(schema.variant, spec.name, "has no value".to_string()),
        }
    }
    if let Some((extra, _)) = values.get(specs.len()) {
        mismatch(schema.variant, extra, "has no schema entry".to_string());
    }

    for (spec, (_, value)) in specs.iter().zip(values) {
        check_value(schema, spec, value);
    }
}

fn check_value(schema: &MessageSchema, spec: &FieldSpec, value: &FieldValue) {
    match (spec.eip712_type, value) {
        ("string", FieldValue::Str(_))
        | ("uint64", FieldValue::Uint64(_))
        | ("int32", FieldValue::Int32(_))
        | ("bool", FieldValue::Bool(_)) => {},
        (_, FieldValue::Struct(fields)) if !spec.is_list() => {
            check_coverage(schema, nested(schema, spec), fields);
        },
        (_, FieldValue::List(items)) if spec.is_list() => {
            let fields = nested(schema, spec);
            for item in items {
                match item {
                    FieldValue::Struct(inner) => check_coverage(schema, fields, inner),
                    other => mismatch(
                        schema.variant,
                        spec.name,
                        format!("list item is {}, expected {}", other.kind(), spec.struct_name()),
                    ),
                }
            }
        },
        (ty, other) => mismatch(
            schema.variant,
            spec.name,
            format!("is declared {ty} but the value is {}", other.kind()),
        ),
    }
}

// ============================================================================
// Typed data (amino JSON)
// ============================================================================

/// Legacy-amino JSON `value` object for one message
pub fn amino_value(schema: &MessageSchema, values: &[(&'static str, FieldValue)]) -> Value {
    check_coverage(schema, schema.fields, values);
    json_struct(values)
}

fn json_struct(values: &[(&'static str, FieldValue)]) -> Value {
    let mut map = Map::new();
    for (name, value) in values {
        map.insert(name.to_string(), json_value(value));
    }
    Value::Object(map)
}

fn json_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Str(s) => Value::String(s.clone()),
        // amino JSON carries 64-bit integers as strings
        FieldValue::Uint64(n) => Value::String(n.to_string()),
        FieldValue::Int32(n) => json!(n),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Struct(fields) => json_struct(fields),
        FieldValue::List(items) => Value::Array(items.iter().map(json_value).collect()),
    }
}

// ============================================================================
// Protobuf
// ============================================================================

/// Protobuf encoding of one message
pub fn proto_bytes(schema: &MessageSchema, values: &[(&'static str, FieldValue)]) -> Vec<u8> {
    check_coverage(schema, schema.fields, values);
    proto_struct(schema, schema.fields, values)
}

fn proto_struct(schema: &MessageSchema, specs: &[FieldSpec], values: &[(&'static str, FieldValue)]) -> Vec<u8> {
    // typed data keeps declaration order; protobuf is written by ascending field number
    let mut fields: Vec<(&FieldSpec, &FieldValue)> =
        specs.iter().zip(values.iter().map(|(_, value)| value)).collect();
    fields.sort_by_key(|(spec, _)| spec.proto_tag);

    let mut buf = Vec::new();
    for (spec, value) in fields {
        proto_field(&mut buf, schema, spec, value);
    }
    buf
}

fn proto_field(buf: &mut Vec<u8>, schema: &MessageSchema, spec: &FieldSpec, value: &FieldValue) {
    let tag = spec.proto_tag;
    match value {
        FieldValue::Str(s) => encode_string(buf, tag, s),
        FieldValue::Uint64(n) => encode_uint64(buf, tag, *n),
        FieldValue::Int32(n) => encode_int32(buf, tag, *n),
        FieldValue::Bool(b) => encode_bool(buf, tag, *b),
        FieldValue::Struct(fields) => {
            let inner = proto_struct(schema, nested(schema, spec), fields);
            encode_length_delimited(buf, tag, &inner);
        },
        FieldValue::List(items) => {
            let specs = nested(schema, spec);
            for item in items {
                if let FieldValue::Struct(fields) = item {
                    let inner = proto_struct(schema, specs, fields);
                    encode_length_delimited(buf, tag, &inner);
                }
            }
        },
    }
}

// ============================================================================
// TxMessage helpers
// ============================================================================

impl TxMessage {
    /// `{type, value}` message as it appears in the EIP-712 `msgs` array
    pub fn to_amino(&self, signer: &str) -> Value {
        let schema = self.schema();
        json!({
            "type": schema.amino_type,
            "value": amino_value(schema, &self.fields(signer)),
        })
    }

    /// Protobuf bytes of the message
    pub fn to_proto(&self, signer: &str) -> Vec<u8> {
        proto_bytes(self.schema(), &self.fields(signer))
    }

    /// Message packed as `google.protobuf.Any`
    pub fn to_any(&self, signer: &str) -> CosmosAny {
        CosmosAny::new(self.type_url(), self.to_proto(signer))
    }
}
