//! Cosmos SDK secp256k1 Signing Convention
//!
//! Cosmos SDK의 secp256k1 서명 규약을 제공합니다.
//!
//! # 서명 방식
//!
//! 체인은 `VerifySignature(msg, sig)` 시 `SHA-256(msg)`에 대해 검증하므로,
//! 서명자는 메시지 바이트를 SHA-256으로 해싱한 뒤 서명합니다.
//! 서명은 64바이트 compact `r || s` (low-S) 형식입니다.
//!
//! 레코드 서명은 이 규약으로 레코드 digest 자체를 메시지로 서명합니다.

use crate::errors::{RegistryError, RegistryResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use k256::ecdsa::{
    signature::{Signer as K256Signer, Verifier},
    Signature as K256Signature, SigningKey, VerifyingKey,
};

/// Cosmos ECDSA 서명 (r, s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosmosSignature {
    /// r 값 (32 bytes)
    pub r: [u8; 32],
    /// s 값 (32 bytes)
    pub s: [u8; 32],
}

impl CosmosSignature {
    /// 새 서명 생성
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Self { r, s }
    }

    /// 64바이트 형식으로 변환 (r || s)
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes
    }

    /// 64바이트에서 파싱
    pub fn from_bytes(bytes: &[u8]) -> RegistryResult<Self> {
        if bytes.len() != 64 {
            return Err(RegistryError::InvalidSignature {
                message: format!("Expected 64 bytes, got {}", bytes.len()),
            });
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(Self { r, s })
    }

    /// Base64 인코딩
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Base64 디코딩
    pub fn from_base64(encoded: &str) -> RegistryResult<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| RegistryError::InvalidSignature {
                message: format!("Invalid base64: {e}"),
            })?;
        Self::from_bytes(&bytes)
    }
}

/// 바이트 데이터 서명 (SHA-256 해시 후 서명)
pub fn sign_bytes(signing_key: &SigningKey, data: &[u8]) -> CosmosSignature {
    let signature: K256Signature = signing_key.sign(data);
    let bytes = signature.to_bytes();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    CosmosSignature::new(r, s)
}

/// 서명 검증
///
/// `public_key`는 33바이트 압축 공개키입니다.
pub fn verify_signature(
    public_key: &[u8],
    data: &[u8],
    signature: &CosmosSignature,
) -> RegistryResult<bool> {
    let verifying_key =
        VerifyingKey::from_sec1_bytes(public_key).map_err(|e| RegistryError::InvalidSignature {
            message: format!("Invalid public key: {e}"),
        })?;

    let k256_sig = K256Signature::from_slice(&signature.to_bytes()).map_err(|e| {
        RegistryError::InvalidSignature {
            message: format!("Invalid signature format: {e}"),
        }
    })?;

    Ok(verifying_key.verify(data, &k256_sig).is_ok())
}
