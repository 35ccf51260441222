//! Common cryptographic traits and utilities
//!
//! 서명 및 해싱을 위한 공통 인터페이스를 정의합니다.
//!
//! ## 모듈 구성
//!
//! - [`traits`]: 서명 및 해싱 인터페이스 (Signature, Signer, TypedDataHasher)

mod traits;

pub use traits::{Signature, Signer, TypedDataHasher};
