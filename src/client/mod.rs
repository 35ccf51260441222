//! External collaborators and configuration
//!
//! The crate performs no I/O. Account lookup and broadcasting are supplied by
//! the caller through [`AccountSource`] and [`Broadcaster`]; [`Registry`]
//! combines them with the encoder.

mod config;
mod registry;
mod response;

pub use config::{
    RegistryConfig, ENV_CHAIN_ID, ENV_COSMOS_CHAIN_ID, ENV_FEE_AMOUNT, ENV_FEE_DENOM, ENV_FEE_GAS,
};
pub use registry::{AccountSource, Broadcaster, Registry, SchemaValidator};
pub use response::{AccountInfo, EventAttribute, TxEvent, TxResponse};
