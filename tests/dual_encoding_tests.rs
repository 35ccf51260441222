//! Integration tests for the dual transaction encoding
//!
//! Every registered message variant must produce the same set of fields in
//! its EIP-712 typed data and in its protobuf bytes, and its typed data must
//! hash under the declared types.

use proptest::prelude::*;
use registry_sdk::crypto::cosmos::protobuf::{decode_fields, ProtoValue};
use registry_sdk::crypto::cosmos::ChainConfig;
use registry_sdk::crypto::TypedDataHasher;
use registry_sdk::messages::{
    AssociateBond, CancelBond, Coin, CommitBid, CreateBond, DeleteName, Deposit, DissociateBond,
    DissociateRecords, FieldSpec, MessageSchema, ReassociateRecords, RefillBond, ReserveAuthority, RevealBid,
    Send, SetAuthorityBond, SetName, SetRecord, Vote, VoteOption, WithdrawBond,
};
use registry_sdk::record::{RecordSignature, WirePayload, WireRecord};
use registry_sdk::tx::{encode, typed_data, Fee, Sender};
use registry_sdk::TxMessage;
use serde_json::Value;
use std::collections::BTreeSet;

const SIGNER: &str = "ethm19n3je0lhuk0w9kmkftsuw4etn8lmpu3jjfayeh";
const BOND_ID: &str = "8e340dd7cf6fc91c27eeefce9cca1406c262e93fd6f3a4f3b1e99b01161fcef3";
const RECORD_ID: &str = "bafyreihhpu2hb6hkaxb6olcvdwrbtwlpujcfmhyrd4xqefnqt4uvxa3uoi";

fn coins() -> Vec<Coin> {
    vec![Coin::new("aphoton", "1000000000")]
}

fn payload() -> WirePayload {
    WirePayload {
        record: WireRecord::placeholder("eyJ0eXBlIjoiV2Vic2l0ZVJlZ2lzdHJhdGlvblJlY29yZCJ9".to_string()),
        signatures: vec![RecordSignature {
            pub_key: "61rphyECIxy4cSshlIrMi2ZFyZjqlQnbwzxTQbr9Ov9SH17Ywrs=".to_string(),
            sig: "c2lnbmF0dXJl".to_string(),
        }],
    }
}

/// A message for `variant` with every field set to a non-default value
fn sample(variant: &str) -> TxMessage {
    match variant {
        "CreateBond" => CreateBond { coins: coins() }.into(),
        "RefillBond" => RefillBond {
            id: BOND_ID.into(),
            coins: coins(),
        }
        .into(),
        "WithdrawBond" => WithdrawBond {
            id: BOND_ID.into(),
            coins: coins(),
        }
        .into(),
        "CancelBond" => CancelBond { id: BOND_ID.into() }.into(),
        "AssociateBond" => AssociateBond {
            record_id: RECORD_ID.into(),
            bond_id: BOND_ID.into(),
        }
        .into(),
        "DissociateBond" => DissociateBond {
            record_id: RECORD_ID.into(),
        }
        .into(),
        "DissociateRecords" => DissociateRecords {
            bond_id: BOND_ID.into(),
        }
        .into(),
        "ReassociateRecords" => ReassociateRecords {
            new_bond_id: BOND_ID.into(),
            old_bond_id: "0b4c".into(),
        }
        .into(),
        "ReserveAuthority" => ReserveAuthority {
            name: "laconic".into(),
            owner: SIGNER.into(),
        }
        .into(),
        "SetName" => SetName {
            wrn: "wrn://laconic/watcher/erc20".into(),
            cid: RECORD_ID.into(),
        }
        .into(),
        "SetRecord" => SetRecord {
            bond_id: BOND_ID.into(),
            payload: payload(),
        }
        .into(),
        "SetAuthorityBond" => SetAuthorityBond {
            name: "laconic".into(),
            bond_id: BOND_ID.into(),
        }
        .into(),
        "DeleteName" => DeleteName {
            wrn: "wrn://laconic/watcher/erc20".into(),
        }
        .into(),
        "CommitBid" => CommitBid {
            auction_id: "auction-1".into(),
            commit_hash: RECORD_ID.into(),
        }
        .into(),
        "RevealBid" => RevealBid {
            auction_id: "auction-1".into(),
            reveal: "7b7d".into(),
        }
        .into(),
        "Send" => Send::new("ethm1recipient", "5000", "aphoton").into(),
        "Deposit" => Deposit {
            proposal_id: 3,
            amount: coins(),
        }
        .into(),
        "Vote" => Vote {
            proposal_id: 3,
            option: VoteOption::Yes,
        }
        .into(),
        other => panic!("no sample for {other}"),
    }
}

fn sender() -> Sender {
    Sender::new(SIGNER, 7, 2, [2u8; 33])
}

fn schema_tags(schema: &MessageSchema) -> BTreeSet<u32> {
    schema.fields.iter().map(|f| f.proto_tag).collect()
}

fn schema_names(schema: &MessageSchema) -> BTreeSet<String> {
    schema.fields.iter().map(|f| f.name.to_string()).collect()
}

/// Checks that every field in `json` is carried with the same value in `bytes`
fn assert_same_values(schema: &MessageSchema, specs: &[FieldSpec], bytes: &[u8], json: &Value, path: &str) {
    let fields = decode_fields(bytes).unwrap();
    let tags: Vec<u32> = fields.iter().map(|(tag, _)| *tag).collect();
    assert!(tags.windows(2).all(|w| w[0] <= w[1]), "{path}: tags out of order {tags:?}");

    for spec in specs {
        let path = format!("{path}.{}", spec.name);
        let entries: Vec<&ProtoValue> = fields
            .iter()
            .filter(|(tag, _)| *tag == spec.proto_tag)
            .map(|(_, value)| value)
            .collect();
        let expected = &json[spec.name];

        match spec.eip712_type {
            "string" => {
                let s = expected.as_str().unwrap_or_else(|| panic!("{path} is not a string"));
                let actual: Vec<Option<&str>> = entries.iter().map(|v| v.as_str()).collect();
                if s.is_empty() {
                    assert!(actual.is_empty(), "{path}: empty string was encoded");
                } else {
                    assert_eq!(actual, vec![Some(s)], "{path}");
                }
            },
            "uint64" => {
                let n: u64 = expected
                    .as_str()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| panic!("{path} is not a decimal string"));
                let actual: Vec<Option<u64>> = entries.iter().map(|v| v.as_varint()).collect();
                assert_eq!(actual, if n == 0 { vec![] } else { vec![Some(n)] }, "{path}");
            },
            "int32" => {
                let n = expected.as_i64().unwrap_or_else(|| panic!("{path} is not a number"));
                let actual: Vec<Option<i64>> = entries.iter().map(|v| v.as_varint().map(|v| v as i64)).collect();
                assert_eq!(actual, if n == 0 { vec![] } else { vec![Some(n)] }, "{path}");
            },
            "bool" => {
                let b = expected.as_bool().unwrap_or_else(|| panic!("{path} is not a bool"));
                let actual: Vec<Option<u64>> = entries.iter().map(|v| v.as_varint()).collect();
                assert_eq!(actual, if b { vec![Some(1)] } else { vec![] }, "{path}");
            },
            _ => {
                let nested = schema
                    .nested_struct(spec.eip712_type)
                    .unwrap_or_else(|| panic!("{path}: undeclared {}", spec.eip712_type));
                let items: Vec<&Value> = if spec.is_list() {
                    expected
                        .as_array()
                        .unwrap_or_else(|| panic!("{path} is not an array"))
                        .iter()
                        .collect()
                } else {
                    vec![expected]
                };
                assert_eq!(entries.len(), items.len(), "{path}: entry count");
                for (index, (entry, item)) in entries.iter().zip(items).enumerate() {
                    let inner = entry.as_bytes().unwrap_or_else(|| panic!("{path}[{index}] is not embedded"));
                    assert_same_values(schema, nested.fields, inner, item, &format!("{path}[{index}]"));
                }
            },
        }
    }
}

// === Parity ===

#[test]
fn test_every_variant_has_a_sample() {
    for schema in TxMessage::schemas() {
        let message = sample(schema.variant);
        assert_eq!(message.variant(), schema.variant);
    }
}

#[test]
fn test_typed_data_keys_match_schema() {
    let chain = ChainConfig::ethermint_local();
    for schema in TxMessage::schemas() {
        let message = sample(schema.variant);
        let data = typed_data(&chain, &sender(), &Fee::default(), "", &message);

        let msg = &data.message["msgs"][0];
        assert_eq!(msg["type"], schema.amino_type);

        let keys: BTreeSet<String> = msg["value"]
            .as_object()
            .unwrap_or_else(|| panic!("{} value is not an object", schema.variant))
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, schema_names(schema), "typed data keys for {}", schema.variant);

        let declared: BTreeSet<String> = data.types["MsgValue"]
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(declared, schema_names(schema), "MsgValue fields for {}", schema.variant);
    }
}

#[test]
fn test_proto_tags_match_schema() {
    for schema in TxMessage::schemas() {
        let message = sample(schema.variant);
        let fields = decode_fields(&message.to_proto(SIGNER)).unwrap();

        let tags: BTreeSet<u32> = fields.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(tags, schema_tags(schema), "proto tags for {}", schema.variant);
    }
}

#[test]
fn test_proto_tags_ascend_for_every_variant() {
    fn ascending(bytes: &[u8], path: &str) {
        let fields = decode_fields(bytes).unwrap();
        let tags: Vec<u32> = fields.iter().map(|(tag, _)| *tag).collect();
        assert!(tags.windows(2).all(|w| w[0] <= w[1]), "{path}: tags {tags:?}");
    }

    for schema in TxMessage::schemas() {
        let message = sample(schema.variant);
        let bytes = message.to_proto(SIGNER);
        ascending(&bytes, schema.variant);

        // one level down: coins, amounts and the record payload
        for (tag, value) in decode_fields(&bytes).unwrap() {
            let Some(spec) = schema.fields.iter().find(|f| f.proto_tag == tag) else {
                continue;
            };
            if schema.nested_struct(spec.eip712_type).is_some() {
                ascending(value.as_bytes().unwrap(), &format!("{}.{}", schema.variant, spec.name));
            }
        }
    }
}

#[test]
fn test_create_bond_writes_coins_before_signer() {
    let message = TxMessage::from(CreateBond { coins: coins() });
    let fields = decode_fields(&message.to_proto(SIGNER)).unwrap();

    let tags: Vec<u32> = fields.iter().map(|(tag, _)| *tag).collect();
    assert_eq!(tags, vec![1, 2]);
    assert_eq!(fields[1].1.as_str(), Some(SIGNER));
}

#[test]
fn test_field_values_match_across_encodings() {
    for schema in TxMessage::schemas() {
        let message = sample(schema.variant);
        let amino = message.to_amino(SIGNER);
        assert_same_values(schema, schema.fields, &message.to_proto(SIGNER), &amino["value"], schema.variant);
    }
}

#[test]
fn test_default_values_are_left_out_of_proto() {
    let message = TxMessage::from(ReserveAuthority {
        name: "laconic".into(),
        owner: String::new(),
    });
    let schema = message.schema();
    let amino = message.to_amino(SIGNER);
    assert_eq!(amino["value"]["owner"], "");

    assert_same_values(schema, schema.fields, &message.to_proto(SIGNER), &amino["value"], "ReserveAuthority");
}

#[test]
fn test_signer_is_sender_in_both_encodings() {
    for schema in TxMessage::schemas() {
        let Some(spec) = schema
            .fields
            .iter()
            .find(|f| f.name == "signer" || f.name == "from_address" || f.name == "depositor" || f.name == "voter")
        else {
            continue;
        };

        let message = sample(schema.variant);
        assert_eq!(message.to_amino(SIGNER)["value"][spec.name], SIGNER);

        let fields = decode_fields(&message.to_proto(SIGNER)).unwrap();
        let value = fields
            .iter()
            .find(|(tag, _)| *tag == spec.proto_tag)
            .and_then(|(_, v)| v.as_str());
        assert_eq!(value, Some(SIGNER), "signer field of {}", schema.variant);
    }
}

#[test]
fn test_every_variant_hashes() {
    let chain = ChainConfig::ethermint_local();
    for schema in TxMessage::schemas() {
        let message = sample(schema.variant);
        let encoding = encode(&chain, &sender(), &Fee::default(), "memo", &message)
            .unwrap_or_else(|e| panic!("{} failed to encode: {e}", schema.variant));

        assert_eq!(encoding.typed_data().sign_hash().unwrap(), *encoding.digest());
        assert!(!encoding.body_bytes().is_empty());
    }
}

#[test]
fn test_digests_differ_across_variants() {
    let chain = ChainConfig::ethermint_local();
    let digests: BTreeSet<[u8; 32]> = TxMessage::schemas()
        .iter()
        .map(|schema| {
            *encode(&chain, &sender(), &Fee::default(), "", &sample(schema.variant))
                .unwrap()
                .digest()
        })
        .collect();

    assert_eq!(digests.len(), TxMessage::schemas().len());
}

// === Amino round trip ===

#[test]
fn test_from_amino_rebuilds_every_variant() {
    for schema in TxMessage::schemas() {
        let message = sample(schema.variant);
        let amino = message.to_amino(SIGNER);

        let parsed = TxMessage::from_amino(schema.amino_type, &amino["value"])
            .unwrap_or_else(|e| panic!("{} failed to parse: {e}", schema.variant));
        assert_eq!(parsed, message);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_bond_messages_stay_in_lockstep(
        id in "[0-9a-f]{1,64}",
        amount in 1u64..u64::MAX,
        denom in "[a-z]{3,12}",
        sequence in 0u64..1_000_000,
    ) {
        let message = TxMessage::from(RefillBond {
            id: id.clone(),
            coins: vec![Coin::new(denom.clone(), amount.to_string())],
        });
        let sender = Sender::new(SIGNER, 1, sequence, [2u8; 33]);

        let amount = amount.to_string();
        let encoding = encode(&ChainConfig::ethermint_local(), &sender, &Fee::default(), "", &message).unwrap();
        let value = &encoding.typed_data().message["msgs"][0]["value"];
        prop_assert_eq!(value["id"].as_str(), Some(id.as_str()));
        prop_assert_eq!(value["coins"][0]["amount"].as_str(), Some(amount.as_str()));

        // id = 1, signer = 2, coins = 3
        let fields = decode_fields(&message.to_proto(SIGNER)).unwrap();
        prop_assert_eq!(fields[0].1.as_str(), Some(id.as_str()));
        prop_assert_eq!(fields[1].1.as_str(), Some(SIGNER));
        let coin = decode_fields(fields[2].1.as_bytes().unwrap()).unwrap();
        prop_assert_eq!(coin[0].1.as_str(), Some(denom.as_str()));
        prop_assert_eq!(coin[1].1.as_str(), Some(amount.as_str()));
    }

    #[test]
    fn prop_values_match_across_encodings(
        text in "[a-zA-Z0-9:/._-]{0,48}",
        number in 0u64..u64::MAX,
        yes in any::<bool>(),
    ) {
        let messages = [
            TxMessage::from(Deposit {
                proposal_id: number,
                amount: vec![Coin::new(text.clone(), number.to_string())],
            }),
            TxMessage::from(SetName { wrn: text.clone(), cid: RECORD_ID.into() }),
            TxMessage::from(ReassociateRecords { new_bond_id: text.clone(), old_bond_id: BOND_ID.into() }),
            TxMessage::from(Vote {
                proposal_id: number,
                option: if yes { VoteOption::Yes } else { VoteOption::No },
            }),
            TxMessage::from(SetRecord {
                bond_id: text.clone(),
                payload: payload(),
            }),
        ];

        for message in &messages {
            let schema = message.schema();
            let amino = message.to_amino(SIGNER);
            assert_same_values(schema, schema.fields, &message.to_proto(SIGNER), &amino["value"], schema.variant);
        }
    }
}
