//! EIP-712 Typed Data Hashing
//!
//! Ethereum EIP-712 표준에 따른 구조화된 데이터 인코딩 및 해싱을 제공합니다.
//!
//! 도메인 분리자는 타입 테이블에 `EIP712Domain` 항목이 있으면 그 필드 타입으로
//! 해싱하고, 없으면 도메인에 설정된 필드로부터 표준 타입
//! (`string name`, `string version`, `uint256 chainId`,
//! `address verifyingContract`, `bytes32 salt`)을 유도합니다.
//! Ethermint 계열 체인은 `verifyingContract`와 `salt`를 `string`으로 선언하므로
//! 타입 테이블 경로가 필요합니다.
//!
//! # 참조
//!
//! - [EIP-712: Typed structured data hashing and signing](https://eips.ethereum.org/EIPS/eip-712)

use super::keccak::{keccak256, keccak256_concat, pad_address, pad_bool, pad_i256, pad_u256};
use crate::crypto::common::TypedDataHasher;
use crate::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 도메인 타입 이름
pub const DOMAIN_TYPE: &str = "EIP712Domain";

/// 타입 테이블 (타입 이름 -> 필드 목록)
pub type TypeTable = BTreeMap<String, Vec<TypedDataField>>;

/// EIP-712 도메인 분리자
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    /// 도메인 이름 (e.g., "Cosmos Web3")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 도메인 버전 (e.g., "1.0.0")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// 체인 ID (e.g., 9000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// 검증 컨트랙트
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<String>,

    /// 솔트
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl Eip712Domain {
    /// 새 도메인 생성
    pub fn new(name: impl Into<String>, version: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
            chain_id: Some(chain_id),
            verifying_contract: None,
            salt: None,
        }
    }

    /// 검증 컨트랙트 설정
    pub fn with_verifying_contract(mut self, contract: impl Into<String>) -> Self {
        self.verifying_contract = Some(contract.into());
        self
    }

    /// 솔트 설정
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// 설정된 필드로부터 표준 `EIP712Domain` 필드 목록 유도
    pub fn standard_fields(&self) -> Vec<TypedDataField> {
        let mut fields = Vec::new();

        if self.name.is_some() {
            fields.push(TypedDataField::new("name", "string"));
        }
        if self.version.is_some() {
            fields.push(TypedDataField::new("version", "string"));
        }
        if self.chain_id.is_some() {
            fields.push(TypedDataField::new("chainId", "uint256"));
        }
        if self.verifying_contract.is_some() {
            fields.push(TypedDataField::new("verifyingContract", "address"));
        }
        if self.salt.is_some() {
            fields.push(TypedDataField::new("salt", "bytes32"));
        }

        fields
    }

    /// 도메인을 JSON 값으로 변환 (hashStruct 입력)
    pub fn to_value(&self) -> RegistryResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// EIP-712 필드 타입 정의
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    /// 필드 이름
    pub name: String,
    /// 필드 타입 (e.g., "string", "uint256", "TypeCoins[]")
    #[serde(rename = "type")]
    pub field_type: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }
}

/// EIP-712 타입 데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712TypedData {
    /// 타입 정의
    pub types: TypeTable,

    /// 주 타입 이름
    pub primary_type: String,

    /// 도메인
    pub domain: Eip712Domain,

    /// 메시지 데이터
    pub message: serde_json::Value,
}

impl Eip712TypedData {
    /// 새 타입 데이터 생성
    pub fn new(
        domain: Eip712Domain,
        primary_type: impl Into<String>,
        types: TypeTable,
        message: serde_json::Value,
    ) -> Self {
        Self {
            types,
            primary_type: primary_type.into(),
            domain,
            message,
        }
    }

    /// 도메인 분리자 해시 계산
    pub fn domain_separator(&self) -> RegistryResult<[u8; 32]> {
        let domain_value = self.domain.to_value()?;

        if self.types.contains_key(DOMAIN_TYPE) {
            return hash_struct_in(&self.types, DOMAIN_TYPE, &domain_value);
        }

        let mut types = TypeTable::new();
        types.insert(DOMAIN_TYPE.to_string(), self.domain.standard_fields());
        hash_struct_in(&types, DOMAIN_TYPE, &domain_value)
    }
}

impl TypedDataHasher for Eip712TypedData {
    /// 메시지 구조체 해시 계산
    fn hash_struct(&self) -> RegistryResult<[u8; 32]> {
        hash_struct_in(&self.types, &self.primary_type, &self.message)
    }

    /// 전체 서명 해시 계산
    ///
    /// keccak256("\x19\x01" || domainSeparator || hashStruct(message))
    fn sign_hash(&self) -> RegistryResult<[u8; 32]> {
        let domain_separator = self.domain_separator()?;
        let struct_hash = self.hash_struct()?;

        Ok(keccak256_concat(&[
            &[0x19u8, 0x01][..],
            &domain_separator[..],
            &struct_hash[..],
        ]))
    }
}

fn typed_data_error(message: String) -> RegistryError {
    RegistryError::encoding("eip712", message)
}

/// 구조체 해시 계산: keccak256(typeHash || encodeData(data))
pub fn hash_struct_in(
    types: &TypeTable,
    type_name: &str,
    data: &serde_json::Value,
) -> RegistryResult<[u8; 32]> {
    let type_hash = hash_type(type_name, types)?;
    let mut encoded = type_hash.to_vec();

    let fields = types
        .get(type_name)
        .ok_or_else(|| typed_data_error(format!("Type not found: {type_name}")))?;

    for field in fields {
        let value = data.get(&field.name).ok_or_else(|| {
            typed_data_error(format!("Field not found: {type_name}.{}", field.name))
        })?;

        let encoded_value = encode_value_in(types, &field.field_type, value)?;
        encoded.extend_from_slice(&encoded_value);
    }

    Ok(keccak256(&encoded))
}

/// 값 인코딩 (32바이트 워드)
fn encode_value_in(
    types: &TypeTable,
    field_type: &str,
    value: &serde_json::Value,
) -> RegistryResult<[u8; 32]> {
    // 배열 타입
    if let Some(base_type) = field_type.strip_suffix("[]") {
        let arr = value
            .as_array()
            .ok_or_else(|| typed_data_error(format!("Expected array, got {value}")))?;

        let mut encoded_elements = Vec::with_capacity(arr.len() * 32);
        for element in arr {
            let encoded = encode_value_in(types, base_type, element)?;
            encoded_elements.extend_from_slice(&encoded);
        }
        return Ok(keccak256(&encoded_elements));
    }

    // 커스텀 구조체 타입
    if types.contains_key(field_type) {
        return hash_struct_in(types, field_type, value);
    }

    match field_type {
        "string" => {
            let s = value
                .as_str()
                .ok_or_else(|| typed_data_error(format!("Expected string, got {value}")))?;
            Ok(keccak256(s.as_bytes()))
        },
        "bytes" => {
            let hex_str = value.as_str().ok_or_else(|| {
                typed_data_error(format!("Expected hex string for bytes, got {value}"))
            })?;
            Ok(keccak256(&parse_hex_bytes(hex_str)?))
        },
        "address" => {
            let addr = value
                .as_str()
                .ok_or_else(|| typed_data_error(format!("Expected address string, got {value}")))?;
            Ok(pad_address(&parse_address(addr)?))
        },
        "bool" => {
            let b = value
                .as_bool()
                .ok_or_else(|| typed_data_error(format!("Expected bool, got {value}")))?;
            Ok(pad_bool(b))
        },
        t if t.starts_with("bytes") => {
            let hex_str = value
                .as_str()
                .ok_or_else(|| typed_data_error(format!("Expected hex string, got {value}")))?;
            parse_bytes32(hex_str)
        },
        t if t.starts_with("uint") || t.starts_with("int") => encode_integer(value),
        other => Err(typed_data_error(format!("Unsupported type: {other}"))),
    }
}

/// 타입 인코딩 문자열 생성
///
/// 주 타입 다음에 의존성 타입을 알파벳 순으로 이어 붙입니다.
pub fn encode_type(type_name: &str, types: &TypeTable) -> RegistryResult<String> {
    let mut deps = Vec::new();
    collect_dependencies(type_name, types, &mut deps);
    deps.sort();

    let mut result = format_type(type_name, types)?;
    for dep in deps.iter().filter(|dep| dep.as_str() != type_name) {
        result.push_str(&format_type(dep, types)?);
    }

    Ok(result)
}

fn format_type(type_name: &str, types: &TypeTable) -> RegistryResult<String> {
    let fields = types
        .get(type_name)
        .ok_or_else(|| typed_data_error(format!("Type not found: {type_name}")))?;

    let field_strings: Vec<String> = fields
        .iter()
        .map(|f| format!("{} {}", f.field_type, f.name))
        .collect();

    Ok(format!("{}({})", type_name, field_strings.join(",")))
}

fn collect_dependencies(type_name: &str, types: &TypeTable, deps: &mut Vec<String>) {
    if deps.iter().any(|d| d == type_name) {
        return;
    }

    // 기본 타입
    let Some(fields) = types.get(type_name) else {
        return;
    };

    deps.push(type_name.to_string());

    for field in fields {
        let base_type = field.field_type.trim_end_matches("[]");
        if types.contains_key(base_type) {
            collect_dependencies(base_type, types, deps);
        }
    }
}

/// 타입 해시 계산
pub fn hash_type(type_name: &str, types: &TypeTable) -> RegistryResult<[u8; 32]> {
    let encoded = encode_type(type_name, types)?;
    Ok(keccak256(encoded.as_bytes()))
}

// 유틸리티 함수들

fn parse_address(address: &str) -> RegistryResult<[u8; 20]> {
    let hex_str = address.strip_prefix("0x").unwrap_or(address);
    let bytes = hex::decode(hex_str).map_err(|e| RegistryError::InvalidAddress {
        address: address.to_string(),
        message: format!("Invalid address hex: {e}"),
    })?;

    bytes
        .as_slice()
        .try_into()
        .map_err(|_| RegistryError::InvalidAddress {
            address: address.to_string(),
            message: format!("Address must be 20 bytes, got {}", bytes.len()),
        })
}

fn parse_bytes32(hex_str: &str) -> RegistryResult<[u8; 32]> {
    let bytes = parse_hex_bytes(hex_str)?;

    if bytes.len() > 32 {
        return Err(typed_data_error(format!(
            "Bytes must be <= 32, got {}",
            bytes.len()
        )));
    }

    let mut result = [0u8; 32];
    result[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(result)
}

fn parse_hex_bytes(hex_str: &str) -> RegistryResult<Vec<u8>> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(hex_str).map_err(|e| typed_data_error(format!("Invalid hex: {e}")))
}

fn encode_integer(value: &serde_json::Value) -> RegistryResult<[u8; 32]> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(pad_u256(u))
            } else if let Some(i) = n.as_i64() {
                Ok(pad_i256(i))
            } else {
                Err(typed_data_error(format!("Number out of range: {n}")))
            }
        },
        serde_json::Value::String(s) => {
            // Hex 문자열이거나 10진수 문자열
            if s.starts_with("0x") {
                parse_bytes32(s)
            } else if let Ok(u) = s.parse::<u64>() {
                Ok(pad_u256(u))
            } else {
                let i: i64 = s
                    .parse()
                    .map_err(|e| typed_data_error(format!("Invalid integer string {s:?}: {e}")))?;
                Ok(pad_i256(i))
            }
        },
        _ => Err(typed_data_error(format!("Expected number, got {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail_types() -> TypeTable {
        let mut types = TypeTable::new();
        types.insert(
            "Person".to_string(),
            vec![
                TypedDataField::new("name", "string"),
                TypedDataField::new("wallet", "address"),
            ],
        );
        types.insert(
            "Mail".to_string(),
            vec![
                TypedDataField::new("from", "Person"),
                TypedDataField::new("to", "Person"),
                TypedDataField::new("contents", "string"),
            ],
        );
        types
    }

    fn mail_typed_data() -> Eip712TypedData {
        let domain = Eip712Domain::new("Ether Mail", "1", 1)
            .with_verifying_contract("0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC");

        let message = serde_json::json!({
            "from": {
                "name": "Cow",
                "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"
            },
            "to": {
                "name": "Bob",
                "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"
            },
            "contents": "Hello, Bob!"
        });

        Eip712TypedData::new(domain, "Mail", mail_types(), message)
    }

    #[test]
    fn test_encode_type_with_deps() {
        let encoded = encode_type("Mail", &mail_types()).unwrap();
        assert_eq!(
            encoded,
            "Mail(Person from,Person to,string contents)Person(string name,address wallet)"
        );
    }

    #[test]
    fn test_eip712_mail_example() {
        let typed_data = mail_typed_data();

        assert_eq!(
            hex::encode(typed_data.domain_separator().unwrap()),
            "f2cee375fa42b42143804025fc449deafd50cc031ca257e0b194a650a912090f"
        );
        assert_eq!(
            hex::encode(typed_data.hash_struct().unwrap()),
            "c52c0ee5d84264471806290a3f2c4cecfc5490626bf912d01f240d7a274b371e"
        );
        assert_eq!(
            hex::encode(typed_data.sign_hash().unwrap()),
            "be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2"
        );
    }

    #[test]
    fn test_domain_hashed_with_type_table() {
        let domain = Eip712Domain::new("Cosmos Web3", "1.0.0", 9000)
            .with_verifying_contract("cosmos")
            .with_salt("0");

        let mut types = TypeTable::new();
        types.insert(
            DOMAIN_TYPE.to_string(),
            vec![
                TypedDataField::new("name", "string"),
                TypedDataField::new("version", "string"),
                TypedDataField::new("chainId", "uint256"),
                TypedDataField::new("verifyingContract", "string"),
                TypedDataField::new("salt", "string"),
            ],
        );
        types.insert("Empty".to_string(), vec![]);

        let typed_data =
            Eip712TypedData::new(domain.clone(), "Empty", types, serde_json::json!({}));
        let separator = typed_data.domain_separator().unwrap();

        let expected_type_hash = keccak256(
            b"EIP712Domain(string name,string version,uint256 chainId,string verifyingContract,string salt)",
        );
        let words = [
            expected_type_hash,
            keccak256(b"Cosmos Web3"),
            keccak256(b"1.0.0"),
            pad_u256(9000),
            keccak256(b"cosmos"),
            keccak256(b"0"),
        ];
        let expected = keccak256(&words.concat());
        assert_eq!(separator, expected);

        // 표준 필드 유도 경로는 "cosmos"를 주소로 해석할 수 없으므로 실패
        let fallback = Eip712TypedData::new(domain, "Empty", TypeTable::new(), serde_json::json!({}));
        assert!(fallback.domain_separator().is_err());
    }

    #[test]
    fn test_integer_encoding() {
        assert_eq!(encode_integer(&serde_json::json!(7)).unwrap(), pad_u256(7));
        assert_eq!(encode_integer(&serde_json::json!("7")).unwrap(), pad_u256(7));
        assert_eq!(encode_integer(&serde_json::json!(-2)).unwrap(), pad_i256(-2));
        assert_eq!(encode_integer(&serde_json::json!("-2")).unwrap(), pad_i256(-2));
        assert!(encode_integer(&serde_json::json!(1.5)).is_err());
    }

    #[test]
    fn test_missing_field_is_encoding_error() {
        let mut typed_data = mail_typed_data();
        typed_data.message = serde_json::json!({ "contents": "x" });
        let err = typed_data.hash_struct().unwrap_err();
        assert_eq!(err.code(), "ENCODING_ERROR");
    }
}
