//! Cosmos SDK Cryptography Module
//!
//! Ethermint 기반 레지스트리 체인을 위한 암호화 유틸리티를 제공합니다.
//!
//! # 주요 기능
//!
//! - BIP-39/32 HD 키 파생 (고정 경로 `m/44'/60'/0'/0`)
//! - Bech32 주소 인코딩 (`ethm`)
//! - 레지스트리 공개키/주소 표현 (Amino 접두사)
//! - Cosmos secp256k1 서명 규약
//! - Protobuf 인코딩/디코딩 유틸리티
//! - Cosmos SDK 트랜잭션 타입
//!
//! # 사용 예시
//!
//! ```
//! use registry_sdk::crypto::cosmos::{derive_key_pair, public_key_to_address};
//!
//! let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
//! let keypair = derive_key_pair(mnemonic).unwrap();
//! let address = public_key_to_address(&keypair.public_key, "ethm").unwrap();
//! assert!(address.starts_with("ethm1"));
//! ```

mod address;
mod keys;
pub mod protobuf;
mod signer;
pub mod transaction;

pub use address::{
    amino_public_key, convert_address_prefix, encode_address, public_key_to_address,
    registry_address, registry_public_key, validate_address, ChainConfig, AMINO_PUBKEY_PREFIX,
    DEFAULT_ADDRESS_PREFIX,
};
pub use keys::{
    coin_type, derive_key_pair, derive_private_key_from_seed, generate_mnemonic,
    mnemonic_to_seed, private_key_to_public_key, KeyPair, HD_PATH, MNEMONIC_WORD_COUNT,
};
pub use signer::{sign_bytes, verify_signature, CosmosSignature};

pub use transaction::{
    CosmosAny, CosmosAuthInfo, CosmosCoin, CosmosFee, CosmosModeInfo, CosmosSignerInfo,
    CosmosTxBody, CosmosTxRaw, EthSecp256k1PubKey, SignMode,
};
