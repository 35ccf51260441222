//! Registry Cryptographic Utilities
//!
//! 이 모듈은 레지스트리 트랜잭션 및 레코드 서명을 위한 암호화 기능을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `common`: 공통 트레이트 및 서명 타입
//! - `evm`: Keccak256, EIP-712, secp256k1 (트랜잭션 digest 서명)
//! - `cosmos`: BIP-39/32 키, Bech32 주소, protobuf, Cosmos 트랜잭션 봉투
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use registry_sdk::crypto::cosmos::{derive_key_pair, public_key_to_address};
//!
//! let keypair = derive_key_pair(&mnemonic)?;
//! let address = public_key_to_address(&keypair.public_key, "ethm")?;
//! ```

pub mod common;
pub mod cosmos;
pub mod evm;

// Re-exports: Common
pub use common::{Signature, Signer, TypedDataHasher};

// Re-exports: EVM
pub use evm::{keccak256, Eip712Domain, Eip712TypedData, TypedDataField};

// Re-exports: Cosmos
pub use cosmos::{ChainConfig, CosmosSignature, KeyPair};
