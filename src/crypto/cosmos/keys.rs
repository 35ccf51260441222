//! BIP-39/32 HD Key Derivation for Ethermint accounts
//!
//! 레지스트리 체인 계정을 위한 계층적 결정적(HD) 키 파생을 제공합니다.
//!
//! # 파생 경로
//!
//! 모든 계정은 고정 경로 `m/44'/60'/0'/0`에서 파생됩니다 (주소 인덱스 없음).
//! 패스프레이즈는 항상 빈 문자열입니다.
//!
//! # 참조
//!
//! - [BIP-32](https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
//! - [BIP-39](https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki)
//! - [SLIP-44](https://github.com/satoshilabs/slips/blob/master/slip-0044.md)

use crate::crypto::evm::signing_key_from_bytes;
use crate::errors::{RegistryError, RegistryResult};
use bip32::{DerivationPath, XPrv};
use bip39::Mnemonic;

/// 레지스트리 계정 HD 파생 경로
pub const HD_PATH: &str = "m/44'/60'/0'/0";

/// 생성되는 니모닉 단어 수
pub const MNEMONIC_WORD_COUNT: usize = 12;

/// SLIP-44 Coin Types
pub mod coin_type {
    /// Ethereum (Ethermint 계정)
    pub const ETHEREUM: u32 = 60;
}

/// secp256k1 키 쌍
#[derive(Clone)]
pub struct KeyPair {
    /// 개인키 (32 bytes)
    pub private_key: [u8; 32],
    /// 압축 공개키 (33 bytes)
    pub public_key: [u8; 33],
}

impl KeyPair {
    /// 개인키에서 키 쌍 생성
    pub fn from_private_key(private_key: [u8; 32]) -> RegistryResult<Self> {
        let public_key = private_key_to_public_key(&private_key)?;
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// 공개키 hex 문자열 반환
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key_hex())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// 새 12단어 영어 니모닉 생성 (OS CSPRNG)
pub fn generate_mnemonic() -> RegistryResult<String> {
    let mnemonic =
        Mnemonic::generate(MNEMONIC_WORD_COUNT).map_err(|e| RegistryError::InvalidMnemonic {
            message: format!("Mnemonic generation failed: {e}"),
        })?;
    Ok(mnemonic.to_string())
}

/// 니모닉에서 시드 생성
///
/// 단어 목록 및 체크섬 검증에 실패하면 `InvalidMnemonic`을 반환합니다.
pub fn mnemonic_to_seed(mnemonic_str: &str) -> RegistryResult<[u8; 64]> {
    let mnemonic =
        Mnemonic::parse_normalized(mnemonic_str).map_err(|e| RegistryError::InvalidMnemonic {
            message: e.to_string(),
        })?;

    Ok(mnemonic.to_seed(""))
}

/// 시드에서 주어진 경로로 개인키 파생
pub fn derive_private_key_from_seed(seed: &[u8; 64], path: &str) -> RegistryResult<[u8; 32]> {
    let path: DerivationPath = path
        .parse()
        .map_err(|e| RegistryError::key_material(format!("Invalid derivation path: {e}")))?;

    let xprv = XPrv::derive_from_path(seed, &path)
        .map_err(|e| RegistryError::key_material(format!("Key derivation failed: {e}")))?;

    let mut private_key = [0u8; 32];
    private_key.copy_from_slice(&xprv.private_key().to_bytes());
    Ok(private_key)
}

/// 니모닉에서 고정 경로(`m/44'/60'/0'/0`)로 키 쌍 파생
pub fn derive_key_pair(mnemonic: &str) -> RegistryResult<KeyPair> {
    let seed = mnemonic_to_seed(mnemonic)?;
    let private_key = derive_private_key_from_seed(&seed, HD_PATH)?;
    KeyPair::from_private_key(private_key)
}

/// 개인키에서 압축 공개키 생성
pub fn private_key_to_public_key(private_key: &[u8; 32]) -> RegistryResult<[u8; 33]> {
    let signing_key = signing_key_from_bytes(private_key)?;
    let compressed = signing_key.verifying_key().to_encoded_point(true);

    compressed
        .as_bytes()
        .try_into()
        .map_err(|_| RegistryError::key_material("Unexpected public key length"))
}
