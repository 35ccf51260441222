//! Content identifiers
//!
//! CIDv1 over DAG-CBOR bytes: version `0x01`, codec `dag-cbor` (`0x71`),
//! multihash `sha2-256` (`0x12`, 32-byte digest), rendered in multibase
//! base32-lower without padding (`b` prefix).

use super::cbor;
use crate::canonical::{canonicalize_serializable, CanonicalValue};
use crate::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

const CID_VERSION: u8 = 0x01;
const CODEC_DAG_CBOR: u8 = 0x71;
const MULTIHASH_SHA2_256: u8 = 0x12;
const DIGEST_LEN: u8 = 0x20;
const MULTIBASE_BASE32: char = 'b';

const CID_PREFIX: [u8; 4] = [CID_VERSION, CODEC_DAG_CBOR, MULTIHASH_SHA2_256, DIGEST_LEN];
const BASE32_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// CIDv1 (dag-cbor, sha2-256)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId {
    digest: [u8; 32],
}

impl ContentId {
    /// Wrap a sha2-256 digest of DAG-CBOR bytes
    pub fn from_digest(digest: [u8; 32]) -> Self {
        Self { digest }
    }

    /// The sha2-256 digest
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Binary CID: version || codec || multihash
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(CID_PREFIX.len() + 32);
        bytes.extend_from_slice(&CID_PREFIX);
        bytes.extend_from_slice(&self.digest);
        bytes
    }

    /// Parse a multibase base32 CID string
    pub fn parse(text: &str) -> RegistryResult<Self> {
        let body = text
            .strip_prefix(MULTIBASE_BASE32)
            .ok_or_else(|| cid_error(format!("expected multibase prefix 'b' in {text:?}")))?;
        let bytes = base32_decode(body)?;

        let digest = bytes
            .strip_prefix(&CID_PREFIX[..])
            .ok_or_else(|| cid_error("not a CIDv1 dag-cbor sha2-256 identifier"))?;
        let digest: [u8; 32] = digest
            .try_into()
            .map_err(|_| cid_error(format!("expected 32-byte digest, got {}", digest.len())))?;

        Ok(Self { digest })
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MULTIBASE_BASE32}{}", base32_encode(&self.to_bytes()))
    }
}

impl FromStr for ContentId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Content identifier of a canonical value
pub fn content_id(value: &CanonicalValue) -> ContentId {
    let bytes = cbor::serialize(value);
    ContentId::from_digest(Sha256::digest(&bytes).into())
}

/// Canonicalize a serializable value and compute its content identifier
pub fn content_id_of<T: Serialize + ?Sized>(value: &T) -> RegistryResult<ContentId> {
    Ok(content_id(&canonicalize_serializable(value)?))
}

fn cid_error(message: impl Into<String>) -> RegistryError {
    RegistryError::encoding("cid", message)
}

fn base32_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer = 0u32;
    let mut bits = 0u32;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }

    out
}

fn base32_decode(text: &str) -> RegistryResult<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len() * 5 / 8);
    let mut buffer = 0u32;
    let mut bits = 0u32;

    for c in text.bytes() {
        let value = BASE32_ALPHABET
            .iter()
            .position(|&a| a == c)
            .ok_or_else(|| cid_error(format!("invalid base32 character {:?}", c as char)))?;
        buffer = (buffer << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
        buffer &= (1 << bits) - 1;
    }

    Ok(out)
}
