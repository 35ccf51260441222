//! Registry Transactions
//!
//! Every registry transaction is encoded twice from the same message:
//!
//! 1. EIP-712 typed data over the legacy-amino JSON sign doc, whose digest is
//!    what the account signs
//! 2. The Cosmos SDK protobuf envelope (`TxBody`, `AuthInfo`, `TxRaw`) that
//!    is broadcast
//!
//! The signature travels in the Ethermint Web3 extension option of the body.
//!
//! # Example
//!
//! ```
//! use registry_sdk::crypto::cosmos::ChainConfig;
//! use registry_sdk::messages::{bond::CreateBond, Coin, TxMessage};
//! use registry_sdk::tx::{encode, Fee, Sender};
//! use registry_sdk::Account;
//!
//! let account = Account::from_private_key_hex(
//!     "0451f0bd95c855d52e76cdc8dd06f29097b944bfef26d3455725157f9133f4e0",
//! ).unwrap();
//! let sender = Sender::new(account.address(), 1, 0, account.addresses().public_key);
//! let message = TxMessage::from(CreateBond { coins: vec![Coin::new("aphoton", "1000")] });
//!
//! let encoding = encode(&ChainConfig::ethermint_local(), &sender, &Fee::default(), "", &message).unwrap();
//! let signed = encoding.sign_and_finish(&account).unwrap();
//! assert!(!signed.to_bytes().is_empty());
//! ```

mod builder;
pub mod web3;

pub use builder::{base_types, encode, typed_data, DualEncoding, SignedTx, DOMAIN_NAME, DOMAIN_VERSION};
pub use web3::Web3Extension;

use crate::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Default fee amount
pub const DEFAULT_FEE_AMOUNT: &str = "20";
/// Default fee denomination
pub const DEFAULT_FEE_DENOM: &str = "aphoton";
/// Default gas limit
pub const DEFAULT_GAS: u64 = 200_000;

/// The account a transaction is sent from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Bech32 account address
    pub address: String,
    pub account_number: u64,
    pub sequence: u64,
    /// 33-byte compressed public key
    #[serde(with = "hex_key")]
    pub public_key: [u8; 33],
}

impl Sender {
    pub fn new(address: impl Into<String>, account_number: u64, sequence: u64, public_key: [u8; 33]) -> Self {
        Self {
            address: address.into(),
            account_number,
            sequence,
            public_key,
        }
    }
}

mod hex_key {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &[u8; 33], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(key))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 33], D::Error> {
        let bytes = hex::decode(String::deserialize(deserializer)?).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("public key must be 33 bytes"))
    }
}

/// Transaction fee (single denomination)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Decimal amount
    pub amount: String,
    pub denom: String,
    pub gas: u64,
}

impl Fee {
    pub fn new(amount: impl Into<String>, denom: impl Into<String>, gas: u64) -> Self {
        Self {
            amount: amount.into(),
            denom: denom.into(),
            gas,
        }
    }
}

impl Default for Fee {
    fn default() -> Self {
        Self::new(DEFAULT_FEE_AMOUNT, DEFAULT_FEE_DENOM, DEFAULT_GAS)
    }
}

/// cosmos.tx.v1beta1.BroadcastMode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BroadcastMode {
    #[default]
    #[serde(rename = "BROADCAST_MODE_BLOCK")]
    Block,
    #[serde(rename = "BROADCAST_MODE_SYNC")]
    Sync,
    #[serde(rename = "BROADCAST_MODE_ASYNC")]
    Async,
}

impl BroadcastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastMode::Block => "BROADCAST_MODE_BLOCK",
            BroadcastMode::Sync => "BROADCAST_MODE_SYNC",
            BroadcastMode::Async => "BROADCAST_MODE_ASYNC",
        }
    }
}

impl std::fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BroadcastMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" | "broadcast_mode_block" => Ok(BroadcastMode::Block),
            "sync" | "broadcast_mode_sync" => Ok(BroadcastMode::Sync),
            "async" | "broadcast_mode_async" => Ok(BroadcastMode::Async),
            other => Err(format!("unknown broadcast mode: {other}")),
        }
    }
}

/// POST body for `/cosmos/tx/v1beta1/txs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastRequest {
    /// base64 TxRaw bytes
    pub tx_bytes: String,
    pub mode: BroadcastMode,
}

/// Predict the id the chain will assign to an object created by the next tx
///
/// `hex(sha256("{address}:{account_number}:{sequence + 1}"))`. Best effort:
/// any other transaction from the same account landing first invalidates it.
/// Fails if `sequence` is `u64::MAX`.
pub fn predict_next_id(address: &str, account_number: u64, sequence: u64) -> RegistryResult<String> {
    let next = sequence
        .checked_add(1)
        .ok_or_else(|| RegistryError::encoding("next id", format!("sequence {sequence} has no successor")))?;
    let preimage = format!("{address}:{account_number}:{next}");
    Ok(hex::encode(Sha256::digest(preimage.as_bytes())))
}
