//! Registry SDK: transaction construction and signing for the registry chain
//!
//! Every registry transaction is signed once with EIP-712 typed data and
//! broadcast as a Cosmos SDK protobuf transaction. Both encodings are derived
//! from one [`messages::TxMessage`], so the signature always covers the
//! message the chain executes.
//!
//! Also included:
//! - account keys and addresses from a BIP-39 mnemonic or raw key ([`Account`])
//! - canonical JSON and DAG-CBOR content identifiers ([`canonical`], [`content`])
//! - record signatures ([`record`])
//! - sealed-bid commit / reveal ([`auction`])
//!
//! Network access is left to the caller; see [`client`].

#[macro_use]
mod macros;

pub mod account;
pub mod auction;
pub mod canonical;
pub mod client;
pub mod content;
pub mod crypto;
pub mod errors;
pub mod messages;
pub mod record;
pub mod tx;

// Re-exports
pub use account::{AddressSet, Account};
pub use canonical::{canonicalize, CanonicalValue};
pub use client::{Registry, RegistryConfig};
pub use content::ContentId;
pub use errors::{RegistryError, RegistryResult};
pub use messages::TxMessage;
pub use tx::{DualEncoding, Fee, Sender, SignedTx};
