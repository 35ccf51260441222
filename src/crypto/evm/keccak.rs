//! Keccak256 hashing utilities
//!
//! Ethereum 주소 파생과 EIP-712 해싱에서 사용하는 Keccak256 함수 및
//! 32바이트 ABI 워드 패딩 헬퍼를 제공합니다.

use sha3::{Digest, Keccak256};

/// 데이터의 Keccak256 해시를 계산합니다.
///
/// # Example
///
/// ```rust
/// use registry_sdk::crypto::evm::keccak256;
///
/// let hash = keccak256(b"hello");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// 여러 데이터 조각을 연결하여 Keccak256 해시를 계산합니다.
pub fn keccak256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// 정수를 32바이트 big-endian 형식으로 패딩
pub fn pad_u256(value: u64) -> [u8; 32] {
    let mut result = [0u8; 32];
    result[24..].copy_from_slice(&value.to_be_bytes());
    result
}

/// 부호 있는 정수를 32바이트 2의 보수 형식으로 패딩
pub fn pad_i256(value: i64) -> [u8; 32] {
    let mut result = if value < 0 { [0xff; 32] } else { [0u8; 32] };
    result[24..].copy_from_slice(&value.to_be_bytes());
    result
}

/// 주소를 32바이트로 패딩 (왼쪽 12바이트 0으로 채움)
pub fn pad_address(address: &[u8; 20]) -> [u8; 32] {
    let mut result = [0u8; 32];
    result[12..].copy_from_slice(address);
    result
}

/// Bool을 32바이트로 패딩
pub fn pad_bool(value: bool) -> [u8; 32] {
    let mut result = [0u8; 32];
    if value {
        result[31] = 1;
    }
    result
}
