//! EVM-compatible cryptographic utilities
//!
//! Ethermint 계정과 EIP-712 서명을 위한 암호화 기능을 제공합니다.
//!
//! # 모듈
//!
//! - `keccak`: Keccak256 해싱
//! - `secp256k1`: ECDSA 서명 및 주소 파생
//! - `eip712`: EIP-712 타입 데이터 인코딩

mod eip712;
mod keccak;
mod secp256k1;

pub use eip712::{
    encode_type, hash_struct_in, hash_type, Eip712Domain, Eip712TypedData, TypeTable,
    TypedDataField, DOMAIN_TYPE,
};
pub use keccak::keccak256;
pub use secp256k1::{
    is_valid_address, parse_private_key, public_key_to_eth_bytes, recover_address, sign_hash,
    signing_key_from_bytes, to_checksum_address, verify_hash, verifying_key_to_eth_bytes,
};
