//! Sign Bond Example
//!
//! Builds and signs a CreateBond transaction offline and prints the
//! broadcast body:
//! - account from a mnemonic (or `REGISTRY_MNEMONIC`)
//! - chain and fee from `REGISTRY_*` environment variables
//! - typed-data digest and signed `TxRaw`
//!
//! Run with `RUST_LOG=registry_sdk=debug cargo run --example sign_bond`.

use registry_sdk::messages::{Coin, CreateBond};
use registry_sdk::tx::{encode, predict_next_id};
use registry_sdk::{Account, RegistryConfig, RegistryResult, Sender, TxMessage};
use tracing_subscriber::EnvFilter;

const DEMO_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn main() -> RegistryResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Registry SDK: Sign Bond ===\n");

    let mnemonic = std::env::var("REGISTRY_MNEMONIC").unwrap_or_else(|_| DEMO_MNEMONIC.to_string());
    let account = Account::from_mnemonic(&mnemonic)?;
    let config = RegistryConfig::from_env();

    println!("--- Account ---");
    println!("address:          {}", account.address());
    println!("eth address:      {}", account.addresses().eth_address);
    println!("registry address: {}", account.addresses().registry_address);

    // A fresh account: number and sequence would normally come from the chain
    let sender = Sender::new(account.address(), 0, 0, account.addresses().public_key);
    let message = TxMessage::from(CreateBond {
        coins: vec![Coin::new("aphoton", "1000000000")],
    });

    let encoding = encode(config.chain(), &sender, config.fee(), config.memo(), &message)?;
    let signed = encoding.sign_and_finish(&account)?;

    println!("\n--- Transaction ---");
    println!("chain:     {}", config.chain().cosmos_chain_id);
    println!("digest:    0x{}", hex::encode(encoding.digest()));
    println!("bond id:   {}", predict_next_id(account.address(), sender.account_number, sender.sequence)?);

    let body = signed.broadcast_body(config.broadcast_mode());
    println!("\n--- Broadcast body ---");
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
