//! Integration tests for record signing and sealed bids
//!
//! Covers the path from a record JSON to a signed `SetRecord` message and the
//! commit / reveal lifecycle of an auction bid.

use base64::{engine::general_purpose::STANDARD, Engine};
use registry_sdk::auction::{commit, open_reveal, verify_reveal, BidState, RevealToken};
use registry_sdk::client::SchemaValidator;
use registry_sdk::content::content_id_of;
use registry_sdk::messages::SetRecord;
use registry_sdk::record::{BasicRecordSchema, Record, RecordPayload, RecordSigner, PLACEHOLDER};
use registry_sdk::{Account, RegistryError, TxMessage};
use serde_json::{json, Value};

const MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const TEST_PRIVATE_KEY: &str = "0451f0bd95c855d52e76cdc8dd06f29097b944bfef26d3455725157f9133f4e0";

fn watcher_record() -> Value {
    json!({
        "type": "WatcherRecord",
        "version": "0.1.0",
        "name": "erc20-watcher",
        "repo": { "url": "https://github.com/vulcanize/watcher-ts" },
        "ports": [3001, 9001]
    })
}

/// Requires a semver `version`
struct VersionedSchema;

impl SchemaValidator for VersionedSchema {
    fn validate(&self, record: &Value) -> Result<(), Vec<String>> {
        match record.get("version").and_then(Value::as_str) {
            Some(v) if v.split('.').count() == 3 => Ok(()),
            Some(v) => Err(vec![format!("version '{v}' is not semver")]),
            None => Err(vec!["version is required".to_string()]),
        }
    }
}

// === Records ===

#[test]
fn test_record_signed_by_two_accounts() {
    let record = Record::new(watcher_record(), &BasicRecordSchema).unwrap();
    let mut payload = RecordPayload::new(record);

    let first = Account::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
    let second = Account::from_mnemonic(MNEMONIC).unwrap();
    payload.sign_with(&first);
    payload.sign_with(&second);

    assert_eq!(payload.signatures().len(), 2);
    assert_eq!(payload.signatures()[0].pub_key, first.addresses().registry_public_key);
    assert_eq!(payload.signatures()[1].pub_key, second.addresses().registry_public_key);
    assert!(payload.verify_all().unwrap());
}

#[test]
fn test_signature_does_not_cover_other_record() {
    let account = Account::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
    let record = Record::new(watcher_record(), &BasicRecordSchema).unwrap();
    let signature = RecordSigner::sign(&record, &account);

    let mut changed = watcher_record();
    changed["version"] = json!("0.1.1");
    let other = Record::new(changed, &BasicRecordSchema).unwrap();

    assert!(RecordSigner::verify(&record, &signature).unwrap());
    assert!(!RecordSigner::verify(&other, &signature).unwrap());
}

#[test]
fn test_signature_is_independent_of_key_order() {
    let account = Account::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
    let a = Record::new(json!({ "type": "T", "b": 1, "a": 2 }), &BasicRecordSchema).unwrap();
    let b = Record::new(json!({ "a": 2, "type": "T", "b": 1 }), &BasicRecordSchema).unwrap();

    let signature = RecordSigner::sign(&a, &account);
    assert!(RecordSigner::verify(&b, &signature).unwrap());
    assert_eq!(a.attributes(), b.attributes());
}

#[test]
fn test_custom_validator_rejects_before_signing() {
    let mut record = watcher_record();
    record["version"] = json!("latest");

    let err = Record::new(record, &VersionedSchema).unwrap_err();
    assert_eq!(err.code(), "INVALID_RECORD_SCHEMA");
    assert!(err.to_string().contains("'latest' is not semver"));

    assert!(Record::new(watcher_record(), &VersionedSchema).is_ok());
}

#[test]
fn test_set_record_message() {
    let account = Account::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
    let record = Record::new(watcher_record(), &BasicRecordSchema).unwrap();
    let mut payload = RecordPayload::new(record.clone());
    payload.sign_with(&account);

    let message = TxMessage::from(SetRecord {
        bond_id: "8e34".to_string(),
        payload: payload.to_wire(),
    });

    let amino = message.to_amino(account.address());
    assert_eq!(amino["type"], "nameservice/SetRecord");

    let wire = &amino["value"]["payload"]["record"];
    assert_eq!(wire["id"], PLACEHOLDER);
    assert_eq!(wire["bond_id"], PLACEHOLDER);

    let attributes = STANDARD.decode(wire["attributes"].as_str().unwrap()).unwrap();
    let decoded: Value = serde_json::from_slice(&attributes).unwrap();
    assert_eq!(&decoded, record.value());

    let signatures = amino["value"]["payload"]["signatures"].as_array().unwrap();
    assert_eq!(signatures.len(), 1);
    assert_eq!(signatures[0]["pub_key"], account.addresses().registry_public_key.as_str());
}

// === Sealed bids ===

#[test]
fn test_bid_lifecycle() {
    let bidder = Account::from_mnemonic(MNEMONIC).unwrap();
    let mut bid = commit(
        "ethermint_9000-1",
        "auction-42",
        bidder.address(),
        "25000000aphoton",
        None,
    )
    .unwrap();
    assert_eq!(bid.state(), BidState::Unrevealed);

    let commit_msg = bid.commit_message();
    assert_eq!(commit_msg.amino_type(), "auction/MsgCommitBid");
    assert_eq!(
        commit_msg.to_amino(bidder.address())["value"]["commit_hash"],
        bid.commitment.to_string().as_str()
    );

    bid.mark_committed().unwrap();
    assert_eq!(bid.state(), BidState::Committed);

    let reveal_msg = bid.reveal_message();
    let token = reveal_msg.to_amino(bidder.address())["value"]["reveal"]
        .as_str()
        .unwrap()
        .to_string();
    let reveal = open_reveal(&token).unwrap();
    assert_eq!(reveal.bidder_address, bidder.address());
    assert_eq!(reveal.bid_amount, "25000000aphoton");
    assert!(verify_reveal(&bid.commitment, &RevealToken::from(token)).unwrap());

    bid.mark_revealed().unwrap();
    assert_eq!(bid.state(), BidState::Revealed);
}

#[test]
fn test_bid_cannot_reveal_before_commit() {
    let mut bid = commit("c", "a", "b", "1aphoton", Some("fixed noise")).unwrap();

    let err = bid.mark_revealed().unwrap_err();
    assert!(matches!(err, RegistryError::InvalidBidState { .. }));
    assert_eq!(bid.state(), BidState::Unrevealed);
}

#[test]
fn test_fresh_noise_per_bid() {
    let a = commit("c", "a", "b", "1aphoton", None).unwrap();
    let b = commit("c", "a", "b", "1aphoton", None).unwrap();

    assert_ne!(a.reveal.noise, b.reveal.noise);
    assert_ne!(a.commitment, b.commitment);
}

#[test]
fn test_commitment_is_content_id_of_reveal() {
    let bid = commit("c", "auction-1", "bidder", "10aphoton", Some("noise")).unwrap();
    assert_eq!(bid.commitment, content_id_of(&bid.reveal).unwrap());
}

#[test]
fn test_tampered_reveal_fails_verification() {
    let bid = commit("c", "auction-1", "bidder", "10aphoton", Some("noise")).unwrap();

    let mut reveal = bid.reveal.clone();
    reveal.bid_amount = "99aphoton".to_string();
    let forged = RevealToken::from_reveal(&reveal).unwrap();

    assert!(!verify_reveal(&bid.commitment, &forged).unwrap());
}

#[test]
fn test_malformed_reveal_token() {
    let err = open_reveal("not hex").unwrap_err();
    assert_eq!(err.code(), "MALFORMED_REVEAL");

    let err = open_reveal(&hex::encode("{\"chainId\": 1}")).unwrap_err();
    assert_eq!(err.code(), "MALFORMED_REVEAL");
}
