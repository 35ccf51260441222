//! Registry account key management
//!
//! 니모닉 또는 개인키에서 계정을 만들고, 생성 시점에 한 번 계산된 주소 묶음
//! ([`AddressSet`])과 digest 서명 기능을 제공합니다.
//!
//! # 사용 예시
//!
//! ```
//! use registry_sdk::Account;
//!
//! let account = Account::from_private_key_hex(
//!     "0451f0bd95c855d52e76cdc8dd06f29097b944bfef26d3455725157f9133f4e0",
//! ).unwrap();
//! assert_eq!(
//!     account.address(),
//!     "ethm19n3je0lhuk0w9kmkftsuw4etn8lmpu3jjfayeh"
//! );
//! ```

use crate::crypto::common::{Signature, Signer};
use crate::crypto::cosmos::{
    derive_key_pair, encode_address, generate_mnemonic, private_key_to_public_key,
    registry_address, registry_public_key, sign_bytes, CosmosSignature, DEFAULT_ADDRESS_PREFIX,
};
use crate::crypto::evm::{
    parse_private_key, sign_hash, signing_key_from_bytes, to_checksum_address,
    verifying_key_to_eth_bytes,
};
use crate::errors::RegistryResult;
use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 계정 주소 묶음
///
/// 모든 표현은 동일한 secp256k1 공개키에서 파생됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSet {
    /// 압축 공개키 (33 bytes)
    #[serde(with = "hex_public_key")]
    pub public_key: [u8; 33],
    /// EIP-55 체크섬 Ethereum 주소 (`0x…`)
    pub eth_address: String,
    /// Bech32 Ethermint 계정 주소 (`ethm1…`)
    pub cosmos_address: String,
    /// base64(Amino 접두사 || 공개키)
    pub registry_public_key: String,
    /// hex(RIPEMD-160(SHA-256(Amino 접두사 || 공개키)))
    pub registry_address: String,
}

mod hex_public_key {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &[u8; 33], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(key))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 33], D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("public key must be 33 bytes"))
    }
}

/// 레지스트리 계정
///
/// 개인키는 생성 후 변경되지 않습니다. `Debug` 출력에서 개인키는 가려집니다.
#[derive(Clone)]
pub struct Account {
    private_key: [u8; 32],
    signing_key: SigningKey,
    addresses: AddressSet,
}

impl Account {
    /// 새 12단어 BIP-39 니모닉 생성
    pub fn generate_mnemonic() -> RegistryResult<String> {
        generate_mnemonic()
    }

    /// 니모닉에서 계정 생성 (경로 `m/44'/60'/0'/0`, 빈 패스프레이즈)
    pub fn from_mnemonic(mnemonic: &str) -> RegistryResult<Self> {
        Self::from_mnemonic_with_prefix(mnemonic, DEFAULT_ADDRESS_PREFIX)
    }

    /// 니모닉에서 계정 생성 (주소 접두사 지정)
    pub fn from_mnemonic_with_prefix(mnemonic: &str, prefix: &str) -> RegistryResult<Self> {
        let keypair = derive_key_pair(mnemonic)?;
        Self::from_private_key_with_prefix(&keypair.private_key, prefix)
    }

    /// 32바이트 개인키에서 계정 생성
    pub fn from_private_key(private_key: &[u8]) -> RegistryResult<Self> {
        Self::from_private_key_with_prefix(private_key, DEFAULT_ADDRESS_PREFIX)
    }

    /// Hex 개인키에서 계정 생성 (`0x` 접두사 선택)
    pub fn from_private_key_hex(private_key: &str) -> RegistryResult<Self> {
        let bytes = parse_private_key(private_key)?;
        Self::from_private_key(&bytes)
    }

    /// 32바이트 개인키에서 계정 생성 (주소 접두사 지정)
    pub fn from_private_key_with_prefix(private_key: &[u8], prefix: &str) -> RegistryResult<Self> {
        let signing_key = signing_key_from_bytes(private_key)?;

        let mut key = [0u8; 32];
        key.copy_from_slice(private_key);

        let public_key = private_key_to_public_key(&key)?;
        let eth_bytes = verifying_key_to_eth_bytes(signing_key.verifying_key());

        let addresses = AddressSet {
            public_key,
            eth_address: to_checksum_address(&hex::encode(eth_bytes)),
            cosmos_address: encode_address(&eth_bytes, prefix)?,
            registry_public_key: registry_public_key(&public_key),
            registry_address: registry_address(&public_key),
        };

        debug!(address = %addresses.cosmos_address, "account loaded");

        Ok(Self {
            private_key: key,
            signing_key,
            addresses,
        })
    }

    /// 주소 묶음
    pub fn addresses(&self) -> &AddressSet {
        &self.addresses
    }

    /// Bech32 계정 주소
    pub fn address(&self) -> &str {
        &self.addresses.cosmos_address
    }

    /// 다른 접두사로 인코딩한 계정 주소
    pub fn address_for_prefix(&self, prefix: &str) -> RegistryResult<String> {
        encode_address(&verifying_key_to_eth_bytes(self.signing_key.verifying_key()), prefix)
    }

    /// 개인키 hex (내보내기용)
    pub fn export_private_key_hex(&self) -> String {
        hex::encode(self.private_key)
    }

    /// 32바이트 digest 서명 (RFC 6979, low-S, `v = 27 + recid`)
    pub fn sign_digest(&self, digest: &[u8; 32]) -> RegistryResult<Signature> {
        sign_hash(&self.signing_key, digest)
    }

    /// Cosmos 규약 서명: SHA-256(data)에 대한 64바이트 compact 서명
    pub fn sign_cosmos(&self, data: &[u8]) -> CosmosSignature {
        sign_bytes(&self.signing_key, data)
    }
}

impl Signer for Account {
    fn address(&self) -> &str {
        Account::address(self)
    }

    fn public_key(&self) -> &[u8; 33] {
        &self.addresses.public_key
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> RegistryResult<Signature> {
        Account::sign_digest(self, digest)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.addresses.cosmos_address)
            .field("public_key", &hex::encode(self.addresses.public_key))
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// 64자리 hex 개인키 형식인지 검사 (`0x` 접두사 선택)
pub fn is_valid_private_key_hex(private_key: &str) -> bool {
    let hex_str = private_key.strip_prefix("0x").unwrap_or(private_key);
    hex_str.len() == 64 && hex_str.chars().all(|c| c.is_ascii_hexdigit())
}
