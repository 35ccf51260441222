//! Canonical JSON values
//!
//! [`CanonicalValue`] is the only input accepted by the content addresser and
//! the record signer. Object keys are sorted by byte order at every depth,
//! array order is preserved, scalars are left untouched, and `null` stays
//! distinct from an absent key.
//!
//! The ordering is applied explicitly, so the result does not depend on
//! whether serde_json's `preserve_order` feature is enabled elsewhere in the
//! dependency graph.

use crate::errors::{RegistryError, RegistryResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// A JSON value whose objects are key-sorted at every depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalValue(Value);

impl CanonicalValue {
    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the underlying JSON value
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Compact JSON text with sorted keys
    ///
    /// This is the stable string form hashed by the record signer.
    pub fn to_canonical_string(&self) -> String {
        self.0.to_string()
    }
}

impl std::fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonicalize a JSON value. Total over the JSON data model.
pub fn canonicalize(value: &Value) -> CanonicalValue {
    CanonicalValue(sort_keys(value))
}

/// Serialize `value` to JSON and canonicalize it
///
/// Fails with `UnsupportedType` when the value has no JSON representation
/// (e.g. maps keyed by non-string types).
pub fn canonicalize_serializable<T: Serialize + ?Sized>(value: &T) -> RegistryResult<CanonicalValue> {
    let json = serde_json::to_value(value).map_err(|e| RegistryError::UnsupportedType {
        path: "$".to_string(),
        message: e.to_string(),
    })?;
    Ok(canonicalize(&json))
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, child) in entries {
                sorted.insert(key.clone(), sort_keys(child));
            }
            Value::Object(sorted)
        },
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        scalar => scalar.clone(),
    }
}
