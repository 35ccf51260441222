//! REST payloads exchanged with the chain
//!
//! Account lookups and broadcast responses use the Cosmos SDK REST gateway
//! JSON shapes. 64-bit integers arrive as decimal strings.

use crate::errors::{RegistryError, RegistryResult};
use crate::record::decode_registry_public_key;
use crate::tx::Sender;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn collaborator(message: impl Into<String>) -> RegistryError {
    RegistryError::Collaborator {
        collaborator: "rest".to_string(),
        message: message.into(),
    }
}

/// u64 as a decimal string or a plain number
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        Raw::Number(n) => Ok(n),
    }
}

// ============================================================================
// Accounts
// ============================================================================

#[derive(Deserialize)]
struct AccountEnvelope {
    account: RawAccount,
}

#[derive(Deserialize)]
struct RawAccount {
    base_account: RawBaseAccount,
}

#[derive(Deserialize)]
struct RawBaseAccount {
    address: String,
    #[serde(default)]
    pub_key: Option<RawPubKey>,
    #[serde(deserialize_with = "lenient_u64")]
    account_number: u64,
    #[serde(deserialize_with = "lenient_u64")]
    sequence: u64,
}

#[derive(Deserialize)]
struct RawPubKey {
    key: String,
}

/// On-chain account state needed to build a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub address: String,
    pub account_number: u64,
    pub sequence: u64,
    /// Compressed public key; absent until the account has sent a transaction
    pub public_key: Option<[u8; 33]>,
}

impl AccountInfo {
    /// Parse an Ethermint account response (`{"account": {"base_account": …}}`)
    pub fn from_json(value: &Value) -> RegistryResult<Self> {
        let envelope: AccountEnvelope = serde_json::from_value(value.clone())
            .map_err(|e| collaborator(format!("unexpected account response: {e}")))?;
        let base = envelope.account.base_account;

        let public_key = match base.pub_key {
            Some(pub_key) => Some(decode_public_key(&pub_key.key)?),
            None => None,
        };

        Ok(Self {
            address: base.address,
            account_number: base.account_number,
            sequence: base.sequence,
            public_key,
        })
    }
}

/// Account public keys come as bare base64 compressed keys; the amino-prefixed
/// registry encoding is accepted as well.
fn decode_public_key(key: &str) -> RegistryResult<[u8; 33]> {
    let bytes = STANDARD
        .decode(key)
        .map_err(|e| RegistryError::key_material(format!("account public key is not base64: {e}")))?;

    match bytes.len() {
        33 => {
            let mut out = [0u8; 33];
            out.copy_from_slice(&bytes);
            Ok(out)
        },
        _ => decode_registry_public_key(key),
    }
}

impl Sender {
    /// Sender from on-chain account state
    ///
    /// `fallback_public_key` is used when the chain has not seen the
    /// account's key yet (no transaction sent).
    pub fn from_account(account: &AccountInfo, fallback_public_key: &[u8; 33]) -> Self {
        Sender::new(
            account.address.clone(),
            account.account_number,
            account.sequence,
            account.public_key.unwrap_or(*fallback_public_key),
        )
    }
}

// ============================================================================
// Broadcast responses
// ============================================================================

/// Decoded event attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Vec<EventAttribute>,
}

#[derive(Deserialize)]
struct RawTxResponse {
    txhash: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    height: u64,
    #[serde(default)]
    code: u32,
    #[serde(default)]
    codespace: String,
    #[serde(default)]
    raw_log: String,
    #[serde(default)]
    data: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    gas_wanted: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    gas_used: u64,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: Vec<RawAttribute>,
}

#[derive(Deserialize)]
struct RawAttribute {
    key: String,
    #[serde(default)]
    value: Option<String>,
}

/// Broadcast result, as reported by the chain
///
/// `raw_log` is passed through unmodified; a non-zero `code` is an on-chain
/// failure and not turned into an error here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    pub hash: String,
    pub height: u64,
    pub code: u32,
    pub codespace: String,
    pub raw_log: String,
    /// `data` decoded from base64 to UTF-8 text
    pub data: Option<String>,
    pub gas_wanted: u64,
    pub gas_used: u64,
    pub events: Vec<TxEvent>,
}

impl TxResponse {
    /// Parse a broadcast response (`{"tx_response": …}` or the bare object)
    pub fn from_json(value: &Value) -> RegistryResult<Self> {
        let inner = value.get("tx_response").unwrap_or(value);
        let raw: RawTxResponse = serde_json::from_value(inner.clone())
            .map_err(|e| collaborator(format!("unexpected broadcast response: {e}")))?;

        Ok(Self {
            hash: raw.txhash,
            height: raw.height,
            code: raw.code,
            codespace: raw.codespace,
            raw_log: raw.raw_log,
            data: raw.data.filter(|d| !d.is_empty()).map(|d| decode_text(&d)),
            gas_wanted: raw.gas_wanted,
            gas_used: raw.gas_used,
            events: raw
                .events
                .into_iter()
                .map(|event| TxEvent {
                    kind: event.kind,
                    attributes: event
                        .attributes
                        .into_iter()
                        .map(|attr| EventAttribute {
                            key: decode_text(&attr.key),
                            value: attr.value.map(|v| decode_text(&v)).unwrap_or_default(),
                        })
                        .collect(),
                })
                .collect(),
        })
    }

    /// True if the chain executed the transaction
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// First value of `key` among events of type `kind`
    pub fn find_attribute(&self, kind: &str, key: &str) -> Option<&str> {
        self.events
            .iter()
            .filter(|event| event.kind == kind)
            .flat_map(|event| event.attributes.iter())
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

/// Base64 text to UTF-8; newer nodes send plain text, which is kept as is
fn decode_text(text: &str) -> String {
    STANDARD
        .decode(text)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| text.to_string())
}
