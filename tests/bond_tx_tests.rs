//! Integration tests for a complete signed transaction
//!
//! Builds a CreateBond transaction from a known key, signs it and checks the
//! broadcast envelope field by field.

use base64::{engine::general_purpose::STANDARD, Engine};
use registry_sdk::crypto::cosmos::protobuf::{decode_fields, ProtoValue};
use registry_sdk::crypto::cosmos::ChainConfig;
use registry_sdk::crypto::evm::recover_address;
use registry_sdk::crypto::Signature;
use registry_sdk::messages::{Coin, CreateBond};
use registry_sdk::tx::{encode, predict_next_id, BroadcastMode, Fee, Web3Extension};
use registry_sdk::{Account, Sender, TxMessage};

const TEST_PRIVATE_KEY: &str = "0451f0bd95c855d52e76cdc8dd06f29097b944bfef26d3455725157f9133f4e0";

fn setup() -> (Account, Sender, TxMessage) {
    let account = Account::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
    let sender = Sender::new(account.address(), 12, 4, account.addresses().public_key);
    let message = TxMessage::from(CreateBond {
        coins: vec![Coin::new("aphoton", "1000000000")],
    });
    (account, sender, message)
}

fn field(fields: &[(u32, ProtoValue)], tag: u32) -> &ProtoValue {
    &fields
        .iter()
        .find(|(t, _)| *t == tag)
        .unwrap_or_else(|| panic!("field {tag} missing"))
        .1
}

#[test]
fn test_account_addresses() {
    let (account, _, _) = setup();
    let addresses = account.addresses();

    assert_eq!(addresses.cosmos_address, "ethm19n3je0lhuk0w9kmkftsuw4etn8lmpu3jjfayeh");
    assert_eq!(
        addresses.registry_public_key,
        "61rphyECIxy4cSshlIrMi2ZFyZjqlQnbwzxTQbr9Ov9SH17Ywrs="
    );
    assert_eq!(addresses.registry_address, "3beddaf8be7164642f8328641fee58206703be79");
}

#[test]
fn test_signature_recovers_to_account() {
    let (account, sender, message) = setup();
    let chain = ChainConfig::ethermint_local();

    let encoding = encode(&chain, &sender, &Fee::default(), "", &message).unwrap();
    let signature = account.sign_digest(encoding.digest()).unwrap();

    let recovered = recover_address(encoding.digest(), &signature).unwrap();
    assert_eq!(recovered, account.addresses().eth_address);
}

#[test]
fn test_signed_tx_envelope() {
    let (account, sender, message) = setup();
    let chain = ChainConfig::ethermint_local();

    let encoding = encode(&chain, &sender, &Fee::default(), "", &message).unwrap();
    let signed = encoding.sign_and_finish(&account).unwrap();

    // TxRaw: body = 1, auth_info = 2, signatures = 3
    let raw = decode_fields(&signed.to_bytes()).unwrap();
    assert_eq!(field(&raw, 3), &ProtoValue::Bytes(Vec::new()));
    assert_eq!(field(&raw, 2).as_bytes(), Some(encoding.auth_info_bytes().as_slice()));

    let body = decode_fields(field(&raw, 1).as_bytes().unwrap()).unwrap();

    let any = decode_fields(field(&body, 1).as_bytes().unwrap()).unwrap();
    assert_eq!(field(&any, 1).as_str(), Some("/vulcanize.bond.v1beta1.MsgCreateBond"));

    let extension = decode_fields(field(&body, 1023).as_bytes().unwrap()).unwrap();
    assert_eq!(field(&extension, 1).as_str(), Some(Web3Extension::TYPE_URL));

    let web3 = decode_fields(field(&extension, 2).as_bytes().unwrap()).unwrap();
    assert_eq!(field(&web3, 1), &ProtoValue::Varint(chain.chain_id));
    assert_eq!(field(&web3, 2).as_str(), Some(account.address()));

    let sig_bytes: [u8; 65] = field(&web3, 3).as_bytes().unwrap().try_into().unwrap();
    let signature = Signature::from_bytes(&sig_bytes);
    assert_eq!(
        recover_address(encoding.digest(), &signature).unwrap(),
        account.addresses().eth_address
    );
}

#[test]
fn test_auth_info_carries_fee_and_sequence() {
    let (_, sender, message) = setup();
    let fee = Fee::new("35", "aphoton", 250_000);

    let encoding = encode(&ChainConfig::ethermint_local(), &sender, &fee, "", &message).unwrap();
    let auth_info = decode_fields(&encoding.auth_info_bytes()).unwrap();

    // signer_infos = 1: public_key = 1, mode_info = 2, sequence = 3
    let signer_info = decode_fields(field(&auth_info, 1).as_bytes().unwrap()).unwrap();
    assert_eq!(field(&signer_info, 3), &ProtoValue::Varint(4));

    // fee = 2: amount = 1, gas_limit = 2
    let fee_fields = decode_fields(field(&auth_info, 2).as_bytes().unwrap()).unwrap();
    assert_eq!(field(&fee_fields, 2), &ProtoValue::Varint(250_000));

    let coin = decode_fields(field(&fee_fields, 1).as_bytes().unwrap()).unwrap();
    assert_eq!(field(&coin, 1).as_str(), Some("aphoton"));
    assert_eq!(field(&coin, 2).as_str(), Some("35"));
}

#[test]
fn test_typed_data_sign_doc() {
    let (_, sender, message) = setup();
    let encoding = encode(
        &ChainConfig::ethermint_local(),
        &sender,
        &Fee::default(),
        "bond for laconic",
        &message,
    )
    .unwrap();

    let doc = &encoding.typed_data().message;
    assert_eq!(doc["account_number"], "12");
    assert_eq!(doc["sequence"], "4");
    assert_eq!(doc["chain_id"], "ethermint_9000-1");
    assert_eq!(doc["memo"], "bond for laconic");
    assert_eq!(doc["fee"]["feePayer"], sender.address.as_str());
    assert_eq!(doc["fee"]["gas"], "200000");
    assert_eq!(doc["msgs"][0]["type"], "bond/MsgCreateBond");
    assert_eq!(doc["msgs"][0]["value"]["coins"][0]["amount"], "1000000000");
}

#[test]
fn test_broadcast_body() {
    let (account, sender, message) = setup();
    let encoding = encode(&ChainConfig::ethermint_local(), &sender, &Fee::default(), "", &message).unwrap();
    let signed = encoding.sign_and_finish(&account).unwrap();

    let request = signed.broadcast_body(BroadcastMode::Block);
    assert_eq!(STANDARD.decode(&request.tx_bytes).unwrap(), signed.to_bytes());

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["mode"], "BROADCAST_MODE_BLOCK");
}

#[test]
fn test_next_bond_id_prediction() {
    let (account, sender, _) = setup();
    let id = predict_next_id(account.address(), sender.account_number, sender.sequence).unwrap();

    assert_eq!(id.len(), 64);
    assert_ne!(
        id,
        predict_next_id(account.address(), sender.account_number, sender.sequence + 1).unwrap()
    );
}
