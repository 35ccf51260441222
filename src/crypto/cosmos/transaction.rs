//! Cosmos SDK Transaction Envelope
//!
//! Protobuf types for the binary half of a registry transaction.
//!
//! # Supported Types
//!
//! - `CosmosAny` - google.protobuf.Any wrapper
//! - `EthSecp256k1PubKey` - Ethermint secp256k1 public key
//! - `CosmosCoin` / `CosmosFee` - Fee amount and gas limit
//! - `CosmosTxBody` - Messages, memo and extension options
//! - `CosmosModeInfo` - Single-signer mode (LEGACY_AMINO_JSON)
//! - `CosmosSignerInfo` / `CosmosAuthInfo` - Signer and fee info
//! - `CosmosTxRaw` - Final broadcast envelope
//!
//! # References
//!
//! - [Cosmos SDK Tx](https://docs.cosmos.network/main/core/transactions)
//! - [Cosmos Proto Definitions](https://github.com/cosmos/cosmos-sdk/tree/main/proto/cosmos/tx/v1beta1)

use super::protobuf::*;
use base64::{engine::general_purpose::STANDARD, Engine};

// ============================================================================
// google.protobuf.Any
// ============================================================================

/// google.protobuf.Any - Universal message wrapper
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosmosAny {
    /// Type URL (e.g., "/vulcanize.bond.v1beta1.MsgCreateBond")
    pub type_url: String,
    /// Encoded message bytes
    pub value: Vec<u8>,
}

impl CosmosAny {
    /// Create a new Any message
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, &self.type_url);
        encode_bytes(&mut buf, 2, &self.value);
        buf
    }
}

// ============================================================================
// Public Key
// ============================================================================

/// Ethermint secp256k1 public key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EthSecp256k1PubKey {
    /// Compressed public key bytes (33 bytes)
    pub key: Vec<u8>,
}

impl EthSecp256k1PubKey {
    /// Type URL for Ethermint secp256k1 public key
    pub const TYPE_URL: &'static str = "/ethermint.crypto.v1.ethsecp256k1.PubKey";

    /// Create a new public key
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.key);
        buf
    }

    /// Wrap as Any message
    pub fn to_any(&self) -> CosmosAny {
        CosmosAny::new(Self::TYPE_URL, self.encode())
    }
}

// ============================================================================
// Fee and Coin
// ============================================================================

/// Coin amount
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosmosCoin {
    /// Denomination (e.g., "aphoton")
    pub denom: String,
    /// Amount as decimal string
    pub amount: String,
}

impl CosmosCoin {
    /// Create a new coin
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, &self.denom);
        encode_string(&mut buf, 2, &self.amount);
        buf
    }
}

/// Transaction fee
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosmosFee {
    /// Fee amount
    pub amount: Vec<CosmosCoin>,
    /// Gas limit
    pub gas_limit: u64,
}

impl CosmosFee {
    /// Create a fee with specified amount and gas
    pub fn new(amount: Vec<CosmosCoin>, gas_limit: u64) -> Self {
        Self { amount, gas_limit }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: amount (repeated Coin)
        for coin in &self.amount {
            encode_length_delimited(&mut buf, 1, &coin.encode());
        }
        // Field 2: gas_limit (uint64)
        encode_uint64(&mut buf, 2, self.gas_limit);
        buf
    }
}

// ============================================================================
// Transaction Body
// ============================================================================

/// Transaction body containing messages
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosmosTxBody {
    /// Messages to execute
    pub messages: Vec<CosmosAny>,
    /// Transaction memo
    pub memo: String,
    /// Extension options (field 1023)
    pub extension_options: Vec<CosmosAny>,
}

impl CosmosTxBody {
    /// Create a new transaction body
    pub fn new(messages: Vec<CosmosAny>, memo: &str) -> Self {
        Self {
            messages,
            memo: memo.to_string(),
            extension_options: vec![],
        }
    }

    /// Append an extension option
    pub fn with_extension_option(mut self, option: CosmosAny) -> Self {
        self.extension_options.push(option);
        self
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: messages (repeated Any)
        for msg in &self.messages {
            encode_length_delimited(&mut buf, 1, &msg.encode());
        }
        // Field 2: memo (string)
        encode_string(&mut buf, 2, &self.memo);
        // Field 1023: extension_options (repeated Any)
        for option in &self.extension_options {
            encode_length_delimited(&mut buf, 1023, &option.encode());
        }
        buf
    }
}

// ============================================================================
// Signing Mode
// ============================================================================

/// Signing mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignMode {
    /// SIGN_MODE_LEGACY_AMINO_JSON - Legacy Amino JSON signing (EIP-712 on Ethermint)
    LegacyAminoJson = 127,
}

/// Mode info for signing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosmosModeInfo {
    /// Signing mode
    pub mode: SignMode,
}

impl CosmosModeInfo {
    /// Create LEGACY_AMINO_JSON signing mode
    pub fn legacy_amino_json() -> Self {
        Self {
            mode: SignMode::LegacyAminoJson,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // single.mode (nested message)
        let mut single_buf = Vec::new();
        encode_uint32(&mut single_buf, 1, self.mode as u32);
        encode_length_delimited(&mut buf, 1, &single_buf);
        buf
    }
}

// ============================================================================
// Signer Info
// ============================================================================

/// Signer information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosmosSignerInfo {
    /// Public key wrapped as Any
    pub public_key: Option<CosmosAny>,
    /// Signing mode info
    pub mode_info: CosmosModeInfo,
    /// Account sequence number
    pub sequence: u64,
}

impl CosmosSignerInfo {
    /// Create a new signer info with an Ethermint secp256k1 public key
    pub fn new(public_key: &[u8], sequence: u64) -> Self {
        Self {
            public_key: Some(EthSecp256k1PubKey::new(public_key).to_any()),
            mode_info: CosmosModeInfo::legacy_amino_json(),
            sequence,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: public_key (Any)
        if let Some(pk) = &self.public_key {
            encode_length_delimited(&mut buf, 1, &pk.encode());
        }
        // Field 2: mode_info (ModeInfo)
        encode_length_delimited(&mut buf, 2, &self.mode_info.encode());
        // Field 3: sequence (uint64)
        encode_uint64(&mut buf, 3, self.sequence);
        buf
    }
}

// ============================================================================
// Auth Info
// ============================================================================

/// Authentication info
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosmosAuthInfo {
    /// Signer information
    pub signer_infos: Vec<CosmosSignerInfo>,
    /// Transaction fee
    pub fee: CosmosFee,
}

impl CosmosAuthInfo {
    /// Create new auth info
    pub fn new(signer_infos: Vec<CosmosSignerInfo>, fee: CosmosFee) -> Self {
        Self { signer_infos, fee }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Field 1: signer_infos (repeated SignerInfo)
        for signer in &self.signer_infos {
            encode_length_delimited(&mut buf, 1, &signer.encode());
        }
        // Field 2: fee (Fee)
        encode_length_delimited(&mut buf, 2, &self.fee.encode());
        buf
    }
}

// ============================================================================
// Raw Transaction
// ============================================================================

/// Raw signed transaction (TxRaw)
///
/// This is the final format broadcast to the network. Every signature entry
/// is written even when empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CosmosTxRaw {
    /// Encoded TxBody bytes
    pub body_bytes: Vec<u8>,
    /// Encoded AuthInfo bytes
    pub auth_info_bytes: Vec<u8>,
    /// Signatures
    pub signatures: Vec<Vec<u8>>,
}

impl CosmosTxRaw {
    /// Create a new raw transaction
    pub fn new(body_bytes: Vec<u8>, auth_info_bytes: Vec<u8>, signatures: Vec<Vec<u8>>) -> Self {
        Self {
            body_bytes,
            auth_info_bytes,
            signatures,
        }
    }

    /// Encode to protobuf bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.body_bytes);
        encode_bytes(&mut buf, 2, &self.auth_info_bytes);
        for sig in &self.signatures {
            encode_length_delimited(&mut buf, 3, sig);
        }
        buf
    }

    /// Encode to base64 string for broadcasting
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.encode())
    }
}
