//! Common cryptographic traits for transaction and record signing
//!
//! 이 모듈은 트랜잭션 서명에 필요한 공통 트레이트를 정의합니다.

use crate::errors::{RegistryError, RegistryResult};

/// ECDSA 서명 결과 (recoverable)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// r 값 (32 bytes)
    pub r: [u8; 32],
    /// s 값 (32 bytes, low-S)
    pub s: [u8; 32],
    /// v 값 (recovery id, 27 또는 28)
    pub v: u8,
}

impl Signature {
    /// 새 서명 생성
    pub fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Self { r, s, v }
    }

    /// 65바이트 형식으로 변환 (r || s || v)
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }

    /// 64바이트 compact 형식 (r || s), Cosmos 서명 형식
    pub fn to_compact(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes
    }

    /// 65바이트에서 파싱
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { r, s, v: bytes[64] }
    }

    /// Hex 문자열로 변환 (0x 접두사 포함)
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Hex 문자열에서 파싱 (0x 접두사 선택)
    pub fn from_hex(hex_str: &str) -> RegistryResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| RegistryError::InvalidSignature {
            message: format!("Invalid hex: {e}"),
        })?;

        let arr: [u8; 65] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| RegistryError::InvalidSignature {
                message: format!("Expected 65 bytes, got {}", bytes.len()),
            })?;
        Ok(Self::from_bytes(&arr))
    }
}

/// 서명자 트레이트
///
/// 트랜잭션 서명 경로(EIP-712 digest)와 레코드 서명 경로가 공유하는
/// 최소 인터페이스입니다. 모든 연산은 동기식이며 I/O가 없습니다.
pub trait Signer: Send + Sync {
    /// Bech32 계정 주소
    fn address(&self) -> &str;

    /// 압축 공개키 (33 bytes)
    fn public_key(&self) -> &[u8; 33];

    /// 32바이트 digest 직접 서명 (RFC 6979, low-S)
    fn sign_digest(&self, digest: &[u8; 32]) -> RegistryResult<Signature>;
}

/// 타입 데이터 해싱 트레이트
pub trait TypedDataHasher {
    /// 구조화된 데이터의 해시 계산
    fn hash_struct(&self) -> RegistryResult<[u8; 32]>;

    /// 전체 서명 해시 계산 (도메인 분리자 포함)
    fn sign_hash(&self) -> RegistryResult<[u8; 32]>;
}
