//! Ethermint Bech32 Address Encoding
//!
//! 레지스트리 체인 계정 주소와 레지스트리 전용 키 표현을 제공합니다.
//!
//! # 주소 형식
//!
//! Ethermint 계정 주소는 다음과 같이 생성됩니다:
//! 1. 공개키 (33 bytes, 압축) → 비압축 64바이트
//! 2. Keccak256 해시의 마지막 20바이트 (Ethereum 주소)
//! 3. Bech32 인코딩 (prefix + data), 기본 접두사 `ethm`
//!
//! # 레지스트리 키 표현
//!
//! - `registry_public_key`: base64(`EB5AE98721` || 압축 공개키)
//! - `registry_address`: hex(RIPEMD-160(SHA-256(`EB5AE98721` || 압축 공개키)))

use super::keys::coin_type;
use crate::crypto::evm::public_key_to_eth_bytes;
use crate::errors::{RegistryError, RegistryResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use bech32::{Bech32, Hrp};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Ethermint 계정 주소 기본 접두사
pub const DEFAULT_ADDRESS_PREFIX: &str = "ethm";

/// Amino secp256k1 공개키 접두사
pub const AMINO_PUBKEY_PREFIX: [u8; 5] = [0xEB, 0x5A, 0xE9, 0x87, 0x21];

/// 체인 설정
///
/// 모든 인코딩 호출에 명시적으로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// EIP-712 도메인 체인 ID (e.g., 9000)
    pub chain_id: u64,
    /// Cosmos 체인 ID (e.g., "ethermint_9000-1")
    pub cosmos_chain_id: String,
    /// Bech32 주소 접두사
    pub address_prefix: String,
    /// SLIP-44 코인 타입
    pub coin_type: u32,
}

impl ChainConfig {
    /// 새 체인 설정 생성 (접두사 `ethm`, coin type 60)
    pub fn new(chain_id: u64, cosmos_chain_id: impl Into<String>) -> Self {
        Self {
            chain_id,
            cosmos_chain_id: cosmos_chain_id.into(),
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            coin_type: coin_type::ETHEREUM,
        }
    }

    /// 로컬 Ethermint 개발 체인 (9000 / `ethermint_9000-1`)
    pub fn ethermint_local() -> Self {
        Self::new(9000, "ethermint_9000-1")
    }

    /// 주소 접두사 설정
    pub fn with_address_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.address_prefix = prefix.into();
        self
    }
}

fn parse_hrp(prefix: &str) -> RegistryResult<Hrp> {
    Hrp::parse(prefix).map_err(|e| RegistryError::InvalidAddress {
        address: prefix.to_string(),
        message: format!("Invalid address prefix: {e}"),
    })
}

/// 20바이트 계정 데이터를 Bech32 주소로 인코딩
pub fn encode_address(data: &[u8], prefix: &str) -> RegistryResult<String> {
    let hrp = parse_hrp(prefix)?;
    bech32::encode::<Bech32>(hrp, data).map_err(|e| RegistryError::InvalidAddress {
        address: hex::encode(data),
        message: format!("Bech32 encoding failed: {e}"),
    })
}

/// 공개키에서 Ethermint 계정 주소 생성
///
/// # Process
/// 1. Keccak256(비압축 공개키)[12..]
/// 2. Bech32 인코딩
pub fn public_key_to_address(public_key: &[u8; 33], prefix: &str) -> RegistryResult<String> {
    let eth_bytes = public_key_to_eth_bytes(public_key)?;
    encode_address(&eth_bytes, prefix)
}

/// Amino 접두사가 붙은 공개키 (`EB5AE98721` || pubkey)
pub fn amino_public_key(public_key: &[u8; 33]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(AMINO_PUBKEY_PREFIX.len() + public_key.len());
    bytes.extend_from_slice(&AMINO_PUBKEY_PREFIX);
    bytes.extend_from_slice(public_key);
    bytes
}

/// 레지스트리 공개키 문자열 (base64)
pub fn registry_public_key(public_key: &[u8; 33]) -> String {
    STANDARD.encode(amino_public_key(public_key))
}

/// 레지스트리 주소 (RIPEMD-160(SHA-256(amino pubkey)), 소문자 hex)
pub fn registry_address(public_key: &[u8; 33]) -> String {
    let sha256_hash = Sha256::digest(amino_public_key(public_key));
    let ripemd_hash = Ripemd160::digest(sha256_hash);
    hex::encode(ripemd_hash)
}

/// Bech32 주소 검증
///
/// 유효하면 (prefix, data) 튜플을 반환합니다.
pub fn validate_address(
    address: &str,
    expected_prefix: Option<&str>,
) -> RegistryResult<(String, Vec<u8>)> {
    let invalid = |message: String| RegistryError::InvalidAddress {
        address: address.to_string(),
        message,
    };

    let (hrp, data) =
        bech32::decode(address).map_err(|e| invalid(format!("Invalid Bech32 address: {e}")))?;

    let prefix = hrp.to_string();

    if let Some(expected) = expected_prefix {
        if prefix != expected {
            return Err(invalid(format!(
                "Expected prefix '{expected}', got '{prefix}'"
            )));
        }
    }

    if data.len() != 20 {
        return Err(invalid(format!(
            "Expected 20 bytes address data, got {}",
            data.len()
        )));
    }

    Ok((prefix, data))
}

/// 주소 접두사 변환
pub fn convert_address_prefix(address: &str, new_prefix: &str) -> RegistryResult<String> {
    let (_, data) = validate_address(address, None)?;
    encode_address(&data, new_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PUBLIC_KEY: &str =
        "02231cb8712b21948acc8b6645c998ea9509dbc33c5341bafd3aff521f5ed8c2bb";
    const TEST_ADDRESS: &str = "ethm19n3je0lhuk0w9kmkftsuw4etn8lmpu3jjfayeh";

    fn test_public_key() -> [u8; 33] {
        hex::decode(TEST_PUBLIC_KEY).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_public_key_to_address() {
        let address = public_key_to_address(&test_public_key(), "ethm").unwrap();
        assert_eq!(address, TEST_ADDRESS);
    }

    #[test]
    fn test_registry_key_forms() {
        let public_key = test_public_key();
        assert_eq!(
            registry_public_key(&public_key),
            "61rphyECIxy4cSshlIrMi2ZFyZjqlQnbwzxTQbr9Ov9SH17Ywrs="
        );
        assert_eq!(
            registry_address(&public_key),
            "3beddaf8be7164642f8328641fee58206703be79"
        );
    }

    #[test]
    fn test_validate_address() {
        let (prefix, data) = validate_address(TEST_ADDRESS, Some("ethm")).unwrap();
        assert_eq!(prefix, "ethm");
        assert_eq!(hex::encode(data), "2ce32cbff7e59ee2db764ae1c7572b99ffb0f232");

        let err = validate_address(TEST_ADDRESS, Some("cosmos")).unwrap_err();
        assert_eq!(err.code(), "INVALID_ADDRESS");

        assert!(validate_address("ethm1notanaddress", None).is_err());
    }

    #[test]
    fn test_convert_address_prefix() {
        let converted = convert_address_prefix(TEST_ADDRESS, "cosmos").unwrap();
        assert!(converted.starts_with("cosmos1"));

        let back = convert_address_prefix(&converted, "ethm").unwrap();
        assert_eq!(back, TEST_ADDRESS);
    }

    #[test]
    fn test_chain_config() {
        let config = ChainConfig::ethermint_local();
        assert_eq!(config.chain_id, 9000);
        assert_eq!(config.cosmos_chain_id, "ethermint_9000-1");
        assert_eq!(config.address_prefix, "ethm");
        assert_eq!(config.coin_type, 60);

        let custom = ChainConfig::new(1, "registry-1").with_address_prefix("reg");
        assert_eq!(custom.address_prefix, "reg");
    }
}
