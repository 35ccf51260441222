//! secp256k1 ECDSA signing utilities
//!
//! ECDSA 서명, 공개키 복구, Ethereum 주소 파생을 위한 유틸리티를 제공합니다.
//! 트랜잭션 서명(EIP-712 digest)과 레코드 서명이 모두 이 모듈을 통과합니다.

use super::keccak::keccak256;
use crate::crypto::common::Signature;
use crate::errors::{RegistryError, RegistryResult};

use k256::{
    ecdsa::{signature::hazmat::PrehashVerifier, RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey},
    SecretKey,
};

/// 개인키에서 서명 키 생성
///
/// 길이가 32가 아니거나 스칼라가 `0 < k < n` 범위를 벗어나면
/// `InvalidKeyMaterial`을 반환합니다.
pub fn signing_key_from_bytes(private_key: &[u8]) -> RegistryResult<SigningKey> {
    if private_key.len() != 32 {
        return Err(RegistryError::key_material(format!(
            "Private key must be 32 bytes, got {}",
            private_key.len()
        )));
    }
    let secret_key = SecretKey::from_slice(private_key)
        .map_err(|e| RegistryError::key_material(format!("Invalid private key: {e}")))?;
    Ok(SigningKey::from(secret_key))
}

/// 32바이트 해시에 서명합니다.
///
/// RFC 6979 결정적 nonce, low-S 정규화, `v = 27 + recovery_id`.
pub fn sign_hash(signing_key: &SigningKey, hash: &[u8; 32]) -> RegistryResult<Signature> {
    let (sig, recovery_id) =
        signing_key
            .sign_prehash_recoverable(hash)
            .map_err(|e| RegistryError::InvalidSignature {
                message: format!("Signing failed: {e}"),
            })?;

    let sig_bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig_bytes[..32]);
    s.copy_from_slice(&sig_bytes[32..]);

    let v = recovery_id.to_byte() + 27;

    Ok(Signature::new(r, s, v))
}

/// 압축 공개키로 해시 서명 검증 (r || s 64바이트)
pub fn verify_hash(public_key: &[u8], hash: &[u8; 32], compact: &[u8]) -> RegistryResult<bool> {
    let verifying_key =
        VerifyingKey::from_sec1_bytes(public_key).map_err(|e| RegistryError::InvalidSignature {
            message: format!("Invalid public key: {e}"),
        })?;

    let sig = K256Signature::from_slice(compact).map_err(|e| RegistryError::InvalidSignature {
        message: format!("Invalid signature format: {e}"),
    })?;

    Ok(verifying_key.verify_prehash(hash, &sig).is_ok())
}

/// 서명에서 Ethereum 주소를 복구합니다.
pub fn recover_address(hash: &[u8; 32], signature: &Signature) -> RegistryResult<String> {
    let recovery_id = match signature.v {
        27 => RecoveryId::new(false, false),
        28 => RecoveryId::new(true, false),
        _ => {
            return Err(RegistryError::InvalidSignature {
                message: format!("Invalid v value: {}", signature.v),
            })
        },
    };

    let sig = K256Signature::from_slice(&signature.to_compact()).map_err(|e| {
        RegistryError::InvalidSignature {
            message: format!("Invalid signature: {e}"),
        }
    })?;

    let verifying_key =
        VerifyingKey::recover_from_prehash(hash, &sig, recovery_id).map_err(|e| {
            RegistryError::InvalidSignature {
                message: format!("Recovery failed: {e}"),
            }
        })?;

    let address = verifying_key_to_eth_bytes(&verifying_key);
    Ok(to_checksum_address(&hex::encode(address)))
}

/// 공개키에서 20바이트 Ethereum 주소 계산
///
/// 비압축 공개키(0x04 제외 64바이트)의 Keccak256 해시 마지막 20바이트
pub fn verifying_key_to_eth_bytes(key: &VerifyingKey) -> [u8; 20] {
    let public_key = key.to_encoded_point(false);
    let hash = keccak256(&public_key.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// 압축 공개키(33바이트)에서 20바이트 Ethereum 주소 계산
pub fn public_key_to_eth_bytes(public_key: &[u8]) -> RegistryResult<[u8; 20]> {
    let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| RegistryError::key_material(format!("Invalid public key: {e}")))?;
    Ok(verifying_key_to_eth_bytes(&verifying_key))
}

/// EIP-55 체크섬 주소로 변환
///
/// `0x` 접두사는 선택입니다. 결과는 항상 `0x`로 시작합니다.
pub fn to_checksum_address(address: &str) -> String {
    let address_lower = address.to_lowercase();
    let address_hex = address_lower.strip_prefix("0x").unwrap_or(&address_lower);

    let hash = keccak256(address_hex.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in address_hex.chars().enumerate() {
        // i번째 hex 니블
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// 주소 유효성 검사 (체크섬 포함)
pub fn is_valid_address(address: &str) -> bool {
    let address = match address.strip_prefix("0x") {
        Some(a) => a,
        None => return false,
    };

    if address.len() != 40 || !address.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    // 모두 소문자 또는 대문자인 경우 체크섬 검사 불필요
    if !address.chars().any(|c| c.is_ascii_uppercase())
        || !address.chars().any(|c| c.is_ascii_lowercase())
    {
        return true;
    }

    let checksummed = to_checksum_address(address);
    format!("0x{address}") == checksummed
}

/// Hex 문자열에서 개인키 파싱
pub fn parse_private_key(hex_str: &str) -> RegistryResult<[u8; 32]> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);

    let bytes = hex::decode(hex_str)
        .map_err(|e| RegistryError::key_material(format!("Invalid hex: {e}")))?;

    bytes.as_slice().try_into().map_err(|_| {
        RegistryError::key_material(format!(
            "Private key must be 32 bytes, got {}",
            bytes.len()
        ))
    })
}
