//! Registry Transaction Messages
//!
//! The closed set of messages the registry chain accepts, each described by a
//! static [`MessageSchema`]: its legacy-amino type, its protobuf type URL and
//! one [`FieldSpec`] per field carrying both the EIP-712 type and the
//! protobuf field number.
//!
//! [`TxMessage::fields`] produces the semantic values once. The typed-data
//! JSON and the protobuf bytes are both derived from those values through the
//! same schema (see [`codec`]), so a field can't be present in one encoding
//! and missing from the other.
//!
//! # Modules
//!
//! | Module | Messages |
//! |--------|----------|
//! | `bond` | CreateBond, RefillBond, WithdrawBond, CancelBond, AssociateBond, DissociateBond, DissociateRecords, ReassociateRecords |
//! | `nameservice` | ReserveAuthority, SetName, SetRecord, SetAuthorityBond, DeleteName |
//! | `auction` | CommitBid, RevealBid |
//! | `bank` | Send |
//! | `gov` | Deposit, Vote |

pub mod auction;
pub mod bank;
pub mod bond;
pub mod codec;
pub mod gov;
pub mod nameservice;

pub use auction::{CommitBid, RevealBid};
pub use bank::Send;
pub use bond::{
    AssociateBond, CancelBond, CreateBond, DissociateBond, DissociateRecords, ReassociateRecords,
    RefillBond, WithdrawBond,
};
pub use gov::{Deposit, Vote, VoteOption};
pub use nameservice::{DeleteName, ReserveAuthority, SetAuthorityBond, SetName, SetRecord};

use crate::crypto::evm::{TypeTable, TypedDataField};
use crate::record::WirePayload;
use serde::{Deserialize, Serialize};

/// EIP-712 type name of a message's value struct
pub const MSG_VALUE_TYPE: &str = "MsgValue";

// ============================================================================
// Schema
// ============================================================================

/// One message field: EIP-712 name and type, protobuf field number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// EIP-712 type (e.g. "string", "uint64", "TypeCoins[]")
    pub eip712_type: &'static str,
    pub proto_tag: u32,
}

impl FieldSpec {
    /// Nested struct name referenced by this field, with any `[]` removed
    pub fn struct_name(&self) -> &'static str {
        self.eip712_type.trim_end_matches("[]")
    }

    /// True if this field is a repeated struct
    pub fn is_list(&self) -> bool {
        self.eip712_type.ends_with("[]")
    }
}

/// A nested struct referenced from a message's fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructSpec {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Static description of one message variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSchema {
    /// Variant name (e.g. "CreateBond")
    pub variant: &'static str,
    /// Legacy amino type (e.g. "bond/MsgCreateBond")
    pub amino_type: &'static str,
    /// Protobuf Any type URL (e.g. "/vulcanize.bond.v1beta1.MsgCreateBond")
    pub type_url: &'static str,
    /// Top-level fields in EIP-712 order
    pub fields: &'static [FieldSpec],
    /// Nested struct types
    pub nested: &'static [StructSpec],
}

impl MessageSchema {
    /// Look up the nested struct referenced by an EIP-712 type
    pub fn nested_struct(&self, eip712_type: &str) -> Option<&'static StructSpec> {
        let name = eip712_type.trim_end_matches("[]");
        self.nested.iter().find(|s| s.name == name)
    }

    /// EIP-712 type entries contributed by this variant (`MsgValue` and nested types)
    pub fn eip712_types(&self) -> TypeTable {
        let mut types = TypeTable::new();
        types.insert(MSG_VALUE_TYPE.to_string(), typed_fields(self.fields));
        for nested in self.nested {
            types.insert(nested.name.to_string(), typed_fields(nested.fields));
        }
        types
    }
}

fn typed_fields(fields: &[FieldSpec]) -> Vec<TypedDataField> {
    fields
        .iter()
        .map(|f| TypedDataField::new(f.name, f.eip712_type))
        .collect()
}

/// Params of one message variant
pub trait MessageParams {
    /// Static schema of the variant
    fn schema() -> &'static MessageSchema;

    /// Semantic values in schema order, with `signer` as the sending account
    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)>;
}

// ============================================================================
// Values
// ============================================================================

/// A coin amount (decimal string, as transported on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// A semantic field value, shared by both encoders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    Uint64(u64),
    Int32(i32),
    Bool(bool),
    /// Nested struct, fields in the nested type's order
    Struct(Vec<(&'static str, FieldValue)>),
    /// Repeated nested struct
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// `TypeCoins[]` / `TypeAmount[]` value
    pub fn coins(coins: &[Coin]) -> Self {
        FieldValue::List(
            coins
                .iter()
                .map(|coin| {
                    FieldValue::Struct(vec![
                        ("denom", FieldValue::Str(coin.denom.clone())),
                        ("amount", FieldValue::Str(coin.amount.clone())),
                    ])
                })
                .collect(),
        )
    }

    /// `TypePayload` value
    pub fn payload(payload: &WirePayload) -> Self {
        let record = &payload.record;
        FieldValue::Struct(vec![
            (
                "record",
                FieldValue::Struct(vec![
                    ("id", FieldValue::Str(record.id.clone())),
                    ("bond_id", FieldValue::Str(record.bond_id.clone())),
                    ("create_time", FieldValue::Str(record.create_time.clone())),
                    ("expiry_time", FieldValue::Str(record.expiry_time.clone())),
                    ("deleted", FieldValue::Bool(record.deleted)),
                    ("attributes", FieldValue::Str(record.attributes.clone())),
                ]),
            ),
            (
                "signatures",
                FieldValue::List(
                    payload
                        .signatures
                        .iter()
                        .map(|s| {
                            FieldValue::Struct(vec![
                                ("sig", FieldValue::Str(s.sig.clone())),
                                ("pub_key", FieldValue::Str(s.pub_key.clone())),
                            ])
                        })
                        .collect(),
                ),
            ),
        ])
    }

    pub(crate) fn str(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }

    /// Short name of the value kind, used in mismatch reports
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Uint64(_) => "uint64",
            FieldValue::Int32(_) => "int32",
            FieldValue::Bool(_) => "bool",
            FieldValue::Struct(_) => "struct",
            FieldValue::List(_) => "list",
        }
    }
}

// ============================================================================
// TxMessage
// ============================================================================

tx_messages! {
    CreateBond(bond::CreateBond),
    RefillBond(bond::RefillBond),
    WithdrawBond(bond::WithdrawBond),
    CancelBond(bond::CancelBond),
    AssociateBond(bond::AssociateBond),
    DissociateBond(bond::DissociateBond),
    DissociateRecords(bond::DissociateRecords),
    ReassociateRecords(bond::ReassociateRecords),
    ReserveAuthority(nameservice::ReserveAuthority),
    SetName(nameservice::SetName),
    SetRecord(nameservice::SetRecord),
    SetAuthorityBond(nameservice::SetAuthorityBond),
    DeleteName(nameservice::DeleteName),
    CommitBid(auction::CommitBid),
    RevealBid(auction::RevealBid),
    Send(bank::Send),
    Deposit(gov::Deposit),
    Vote(gov::Vote),
}

impl TxMessage {
    /// Variant name
    pub fn variant(&self) -> &'static str {
        self.schema().variant
    }

    /// Legacy amino type
    pub fn amino_type(&self) -> &'static str {
        self.schema().amino_type
    }

    /// Protobuf type URL
    pub fn type_url(&self) -> &'static str {
        self.schema().type_url
    }
}
