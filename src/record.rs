//! Registry records and their signatures
//!
//! A [`Record`] is a schema-validated JSON object. Signers sign the canonical
//! form of the record; the chain stores the record as base64 attributes
//! inside a [`WireRecord`] whose chain-owned fields are placeholders.
//!
//! Signature scheme:
//!
//! ```text
//! digest = SHA-256(SHA-256(canonical JSON text))
//! sig    = secp256k1 compact r || s over SHA-256(digest)
//! ```
//!
//! The outer SHA-256 is the chain's secp256k1 verification convention; the
//! signature verifies with the registry public key (amino-prefixed, base64).

use crate::account::Account;
use crate::canonical::{canonicalize, CanonicalValue};
use crate::client::SchemaValidator;
use crate::crypto::cosmos::{verify_signature, CosmosSignature, AMINO_PUBKEY_PREFIX};
use crate::errors::{RegistryError, RegistryResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Placeholder for chain-owned record fields
pub const PLACEHOLDER: &str = "_";

/// A validated registry record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    content: CanonicalValue,
}

impl Record {
    /// Validate `value` and wrap it as a record
    ///
    /// Rejected records never reach the signer.
    pub fn new(value: Value, validator: &dyn SchemaValidator) -> RegistryResult<Self> {
        validator
            .validate(&value)
            .map_err(|errors| RegistryError::InvalidRecordSchema { errors })?;

        Ok(Self {
            content: canonicalize(&value),
        })
    }

    /// Record JSON (keys sorted)
    pub fn value(&self) -> &Value {
        self.content.as_value()
    }

    /// The canonical value covered by record signatures
    pub fn message_to_sign(&self) -> &CanonicalValue {
        &self.content
    }

    /// Base64 of the record JSON, as stored in the wire record
    pub fn attributes(&self) -> String {
        STANDARD.encode(self.content.to_canonical_string())
    }

    /// Wire form with placeholder chain fields
    pub fn to_wire(&self) -> WireRecord {
        WireRecord::placeholder(self.attributes())
    }
}

/// Record as carried by `SetRecord`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub id: String,
    pub bond_id: String,
    pub create_time: String,
    pub expiry_time: String,
    pub deleted: bool,
    pub attributes: String,
}

impl WireRecord {
    /// Wire record for new attributes; id, bond and times are assigned on chain
    pub fn placeholder(attributes: String) -> Self {
        Self {
            id: PLACEHOLDER.to_string(),
            bond_id: PLACEHOLDER.to_string(),
            create_time: PLACEHOLDER.to_string(),
            expiry_time: PLACEHOLDER.to_string(),
            deleted: true,
            attributes,
        }
    }
}

/// One signer's signature over a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordSignature {
    /// base64(amino prefix || compressed public key)
    pub pub_key: String,
    /// base64 compact signature
    pub sig: String,
}

/// Record digest: SHA-256(SHA-256(canonical JSON text))
pub fn record_digest(record: &Record) -> [u8; 32] {
    let inner = Sha256::digest(record.content.to_canonical_string().as_bytes());
    Sha256::digest(inner).into()
}

/// Signs and verifies records
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSigner;

impl RecordSigner {
    /// Sign a record with the account's key
    pub fn sign(record: &Record, account: &Account) -> RecordSignature {
        let digest = record_digest(record);
        let signature = account.sign_cosmos(&digest);

        debug!(
            signer = %account.addresses().registry_address,
            digest = %hex::encode(&digest[..4]),
            "record signed"
        );

        RecordSignature {
            pub_key: account.addresses().registry_public_key.clone(),
            sig: signature.to_base64(),
        }
    }

    /// Verify one signature against the record
    ///
    /// Returns `Ok(false)` for a well-formed signature that doesn't match;
    /// malformed keys or signatures are errors.
    pub fn verify(record: &Record, signature: &RecordSignature) -> RegistryResult<bool> {
        let public_key = decode_registry_public_key(&signature.pub_key)?;
        let sig = CosmosSignature::from_base64(&signature.sig)?;
        verify_signature(&public_key, &record_digest(record), &sig)
    }
}

/// Compressed public key from a registry public key
pub fn decode_registry_public_key(registry_public_key: &str) -> RegistryResult<[u8; 33]> {
    let bytes = STANDARD
        .decode(registry_public_key)
        .map_err(|e| RegistryError::key_material(format!("registry public key is not base64: {e}")))?;

    let key = bytes
        .strip_prefix(&AMINO_PUBKEY_PREFIX[..])
        .ok_or_else(|| RegistryError::key_material("registry public key lacks the amino prefix"))?;

    key.try_into().map_err(|_| {
        RegistryError::key_material(format!("expected 33-byte public key, got {}", key.len()))
    })
}

/// A record with its signatures (append-only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPayload {
    record: Record,
    signatures: Vec<RecordSignature>,
}

impl RecordPayload {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            signatures: Vec::new(),
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn signatures(&self) -> &[RecordSignature] {
        &self.signatures
    }

    pub fn add_signature(&mut self, signature: RecordSignature) {
        self.signatures.push(signature);
    }

    /// Sign with `account` and append the signature
    pub fn sign_with(&mut self, account: &Account) -> &RecordSignature {
        let signature = RecordSigner::sign(&self.record, account);
        self.signatures.push(signature);
        &self.signatures[self.signatures.len() - 1]
    }

    /// Verify every signature; an empty payload verifies as false
    pub fn verify_all(&self) -> RegistryResult<bool> {
        if self.signatures.is_empty() {
            return Ok(false);
        }
        for signature in &self.signatures {
            if !RecordSigner::verify(&self.record, signature)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn to_wire(&self) -> WirePayload {
        WirePayload {
            record: self.record.to_wire(),
            signatures: self.signatures.clone(),
        }
    }
}

/// Payload as carried by `SetRecord`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePayload {
    pub record: WireRecord,
    pub signatures: Vec<RecordSignature>,
}

/// Accepts any JSON object with a non-empty string `type`
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicRecordSchema;

impl SchemaValidator for BasicRecordSchema {
    fn validate(&self, record: &Value) -> Result<(), Vec<String>> {
        let Some(object) = record.as_object() else {
            return Err(vec!["record must be a JSON object".to_string()]);
        };

        match object.get("type") {
            Some(Value::String(kind)) if !kind.is_empty() => Ok(()),
            Some(Value::String(_)) => Err(vec!["record.type must not be empty".to_string()]),
            Some(_) => Err(vec!["record.type must be a string".to_string()]),
            None => Err(vec!["record.type is required".to_string()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_PRIVATE_KEY: &str =
        "0451f0bd95c855d52e76cdc8dd06f29097b944bfef26d3455725157f9133f4e0";

    fn watcher() -> Record {
        Record::new(
            json!({ "type": "WebsiteRegistrationRecord", "url": "https://cerc.io", "version": "0.1.0" }),
            &BasicRecordSchema,
        )
        .unwrap()
    }

    fn account() -> Account {
        Account::from_private_key_hex(TEST_PRIVATE_KEY).unwrap()
    }

    #[test]
    fn test_schema_rejects_before_signing() {
        let err = Record::new(json!({ "url": "x" }), &BasicRecordSchema).unwrap_err();
        assert_eq!(err.code(), "INVALID_RECORD_SCHEMA");

        let err = Record::new(json!([1, 2]), &BasicRecordSchema).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn test_digest_is_key_order_independent() {
        let a = Record::new(json!({ "type": "t", "a": 1, "b": 2 }), &BasicRecordSchema).unwrap();
        let b = Record::new(json!({ "b": 2, "a": 1, "type": "t" }), &BasicRecordSchema).unwrap();
        assert_eq!(record_digest(&a), record_digest(&b));
    }

    #[test]
    fn test_digest_is_double_sha256() {
        let record = watcher();
        let text = record.message_to_sign().to_canonical_string();
        let expected: [u8; 32] = Sha256::digest(Sha256::digest(text.as_bytes())).into();
        assert_eq!(record_digest(&record), expected);
    }

    #[test]
    fn test_sign_and_verify() {
        let record = watcher();
        let account = account();
        let signature = RecordSigner::sign(&record, &account);

        assert_eq!(signature.pub_key, "61rphyECIxy4cSshlIrMi2ZFyZjqlQnbwzxTQbr9Ov9SH17Ywrs=");
        assert_eq!(STANDARD.decode(&signature.sig).unwrap().len(), 64);
        assert!(RecordSigner::verify(&record, &signature).unwrap());

        // deterministic
        assert_eq!(signature, RecordSigner::sign(&record, &account));
    }

    #[test]
    fn test_verify_rejects_other_record() {
        let account = account();
        let signature = RecordSigner::sign(&watcher(), &account);
        let other = Record::new(json!({ "type": "other" }), &BasicRecordSchema).unwrap();
        assert!(!RecordSigner::verify(&other, &signature).unwrap());
    }

    #[test]
    fn test_verify_malformed_public_key() {
        let signature = RecordSignature {
            pub_key: STANDARD.encode([2u8; 33]),
            sig: STANDARD.encode([1u8; 64]),
        };
        let err = RecordSigner::verify(&watcher(), &signature).unwrap_err();
        assert_eq!(err.code(), "INVALID_KEY_MATERIAL");
    }

    #[test]
    fn test_wire_record() {
        let record = watcher();
        let wire = record.to_wire();

        assert_eq!(wire.id, PLACEHOLDER);
        assert_eq!(wire.expiry_time, PLACEHOLDER);
        assert!(wire.deleted);

        let decoded = STANDARD.decode(&wire.attributes).unwrap();
        let value: Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(&value, record.value());
    }

    #[test]
    fn test_payload_is_append_only() {
        let mut payload = RecordPayload::new(watcher());
        assert!(!payload.verify_all().unwrap());

        let account = account();
        payload.sign_with(&account);
        let second = Account::from_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .unwrap();
        payload.sign_with(&second);

        assert_eq!(payload.signatures().len(), 2);
        assert_eq!(payload.signatures()[0].pub_key, account.addresses().registry_public_key);
        assert!(payload.verify_all().unwrap());

        let wire = payload.to_wire();
        assert_eq!(wire.signatures.len(), 2);
        assert_eq!(
            serde_json::to_value(&wire.signatures[0]).unwrap().as_object().unwrap().len(),
            2
        );
    }
}
