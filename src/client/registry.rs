//! Registry facade
//!
//! Ties the encoder to the two network collaborators: fetch the sender's
//! account state, encode, sign, finish and broadcast.

use super::config::RegistryConfig;
use super::response::{AccountInfo, TxResponse};
use crate::account::Account;
use crate::errors::RegistryResult;
use crate::messages::TxMessage;
use crate::tx::{encode, predict_next_id, BroadcastRequest, Fee, Sender};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Looks up on-chain account state
#[async_trait]
pub trait AccountSource: Send + Sync {
    async fn account(&self, address: &str) -> RegistryResult<AccountInfo>;
}

/// Submits signed transactions
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn broadcast(&self, request: &BroadcastRequest) -> RegistryResult<TxResponse>;
}

/// Validates record JSON before it is signed
pub trait SchemaValidator: Send + Sync {
    /// `Err` carries one message per violation
    fn validate(&self, record: &Value) -> Result<(), Vec<String>>;
}

/// High-level registry client over an account source and a broadcaster
///
/// Transactions from one account must be sent one at a time: each call reads
/// the account sequence and the chain rejects a second transaction built on
/// the same sequence.
#[derive(Debug, Clone)]
pub struct Registry<A, B> {
    config: RegistryConfig,
    accounts: A,
    broadcaster: B,
}

impl<A: AccountSource, B: Broadcaster> Registry<A, B> {
    pub fn new(config: RegistryConfig, accounts: A, broadcaster: B) -> Self {
        Self {
            config,
            accounts,
            broadcaster,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    /// Current sender state for `account`
    pub async fn sender(&self, account: &Account) -> RegistryResult<Sender> {
        let info = self.accounts.account(account.address()).await?;
        Ok(Sender::from_account(&info, &account.addresses().public_key))
    }

    /// Build, sign and broadcast one message
    ///
    /// Uses the configured fee when `fee` is `None`. Collaborator errors are
    /// returned as is; nothing is retried.
    pub async fn send_message(
        &self,
        message: &TxMessage,
        account: &Account,
        fee: Option<&Fee>,
    ) -> RegistryResult<TxResponse> {
        let sender = self.sender(account).await?;
        let fee = fee.unwrap_or(self.config.fee());

        let encoding = encode(self.config.chain(), &sender, fee, self.config.memo(), message)?;
        let signed = encoding.sign_and_finish(account)?;
        let request = signed.broadcast_body(self.config.broadcast_mode());

        debug!(
            variant = message.variant(),
            sequence = sender.sequence,
            mode = %request.mode,
            "broadcasting registry tx"
        );

        let response = self.broadcaster.broadcast(&request).await?;
        if response.is_success() {
            info!(hash = %response.hash, height = response.height, "registry tx committed");
        } else {
            warn!(hash = %response.hash, code = response.code, raw_log = %response.raw_log, "registry tx failed");
        }

        Ok(response)
    }

    /// Predicted id of the next bond created by `address`
    ///
    /// Only valid if no other transaction from the account lands first.
    pub async fn next_bond_id(&self, address: &str) -> RegistryResult<String> {
        let info = self.accounts.account(address).await?;
        predict_next_id(&info.address, info.account_number, info.sequence)
    }
}
