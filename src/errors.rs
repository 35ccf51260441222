//! Registry SDK Error Hierarchy
//!
//! Every fallible operation in this crate returns [`RegistryResult`].
//!
//! - Key material
//!   - InvalidMnemonic
//!   - InvalidKeyMaterial
//!   - InvalidAddress
//!   - InvalidSignature
//! - Data model
//!   - UnsupportedType
//!   - InvalidRecordSchema
//!   - Encoding
//!   - Json
//! - Transactions
//!   - UnknownMessageVariant
//!   - FieldMappingMismatch (programmer error, raised as a panic)
//! - Auctions
//!   - MalformedReveal
//!   - InvalidBidState
//! - Collaborators
//!   - Collaborator (account lookup / broadcast failures, passed through)

use thiserror::Error;

/// Registry SDK error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    // === Key material ===
    /// BIP-39 phrase failed word-list or checksum validation
    #[error("Invalid mnemonic: {message}")]
    InvalidMnemonic { message: String },

    /// Malformed, zero or out-of-range private key bytes
    #[error("Invalid key material: {message}")]
    InvalidKeyMaterial { message: String },

    /// Malformed bech32 / hex address
    #[error("Invalid address: {address} - {message}")]
    InvalidAddress { address: String, message: String },

    /// Malformed or unverifiable signature bytes
    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },

    // === Data model ===
    /// Value cannot be represented in the canonical data model
    #[error("Unsupported type at {path}: {message}")]
    UnsupportedType { path: String, message: String },

    /// Record rejected by the schema validator before signing
    #[error("Invalid record schema: {}", .errors.join("; "))]
    InvalidRecordSchema { errors: Vec<String> },

    /// Hashing / typed-data / binary codec failure
    #[error("Encoding error in {context}: {message}")]
    Encoding { context: String, message: String },

    /// JSON (de)serialization failure
    #[error("JSON error: {message}")]
    Json { message: String },

    // === Transactions ===
    /// Message type is not part of the registered variant set
    #[error("Unknown message variant: {variant}")]
    UnknownMessageVariant { variant: String },

    /// Typed-data and binary encoders disagree on a variant's fields
    #[error("Field mapping mismatch in {variant}: field '{field}' {message}")]
    FieldMappingMismatch {
        variant: String,
        field: String,
        message: String,
    },

    // === Auctions ===
    /// Reveal token could not be decoded into a bid reveal
    #[error("Malformed reveal: {message}")]
    MalformedReveal { message: String },

    /// Bid lifecycle transition not allowed from the current state
    #[error("Invalid bid state transition: {from} -> {to}")]
    InvalidBidState { from: String, to: String },

    // === Collaborators ===
    /// Error reported by an account lookup / broadcast implementation
    #[error("{collaborator} error: {message}")]
    Collaborator {
        collaborator: String,
        message: String,
    },
}

impl RegistryError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::InvalidMnemonic { .. } => "INVALID_MNEMONIC",
            RegistryError::InvalidKeyMaterial { .. } => "INVALID_KEY_MATERIAL",
            RegistryError::InvalidAddress { .. } => "INVALID_ADDRESS",
            RegistryError::InvalidSignature { .. } => "INVALID_SIGNATURE",
            RegistryError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            RegistryError::InvalidRecordSchema { .. } => "INVALID_RECORD_SCHEMA",
            RegistryError::Encoding { .. } => "ENCODING_ERROR",
            RegistryError::Json { .. } => "JSON_ERROR",
            RegistryError::UnknownMessageVariant { .. } => "UNKNOWN_MESSAGE_VARIANT",
            RegistryError::FieldMappingMismatch { .. } => "FIELD_MAPPING_MISMATCH",
            RegistryError::MalformedReveal { .. } => "MALFORMED_REVEAL",
            RegistryError::InvalidBidState { .. } => "INVALID_BID_STATE",
            RegistryError::Collaborator { .. } => "COLLABORATOR_ERROR",
        }
    }

    /// Returns true if the caller can recover (reject input, retry, re-prompt).
    ///
    /// `FieldMappingMismatch` means the two encoders drifted apart and is
    /// never recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RegistryError::FieldMappingMismatch { .. })
    }

    /// Returns true if this error was caused by key or signature material
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            RegistryError::InvalidMnemonic { .. }
                | RegistryError::InvalidKeyMaterial { .. }
                | RegistryError::InvalidAddress { .. }
                | RegistryError::InvalidSignature { .. }
        )
    }

    pub(crate) fn encoding(context: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::Encoding {
            context: context.into(),
            message: message.into(),
        }
    }

    pub(crate) fn key_material(message: impl Into<String>) -> Self {
        RegistryError::InvalidKeyMaterial {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Json {
            message: err.to_string(),
        }
    }
}

/// Result 타입 alias
pub type RegistryResult<T> = Result<T, RegistryError>;
