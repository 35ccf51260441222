//! Dual transaction encoder

use super::{BroadcastMode, BroadcastRequest, Fee, Sender, Web3Extension};
use crate::crypto::common::{Signature, Signer, TypedDataHasher};
use crate::crypto::cosmos::transaction::{
    CosmosAuthInfo, CosmosCoin, CosmosFee, CosmosSignerInfo, CosmosTxBody, CosmosTxRaw,
};
use crate::crypto::cosmos::ChainConfig;
use crate::crypto::evm::{Eip712Domain, Eip712TypedData, TypeTable, TypedDataField, DOMAIN_TYPE};
use crate::errors::RegistryResult;
use crate::messages::TxMessage;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use tracing::{debug, trace};

pub const DOMAIN_NAME: &str = "Cosmos Web3";
pub const DOMAIN_VERSION: &str = "1.0.0";
const DOMAIN_VERIFYING_CONTRACT: &str = "cosmos";
const DOMAIN_SALT: &str = "0";
const PRIMARY_TYPE: &str = "Tx";

fn fields(entries: &[(&str, &str)]) -> Vec<TypedDataField> {
    entries
        .iter()
        .map(|(name, ty)| TypedDataField::new(*name, *ty))
        .collect()
}

/// Type entries shared by every registry transaction
pub fn base_types() -> TypeTable {
    let mut types = TypeTable::new();
    types.insert(
        DOMAIN_TYPE.to_string(),
        fields(&[
            ("name", "string"),
            ("version", "string"),
            ("chainId", "uint256"),
            ("verifyingContract", "string"),
            ("salt", "string"),
        ]),
    );
    types.insert(
        PRIMARY_TYPE.to_string(),
        fields(&[
            ("account_number", "string"),
            ("chain_id", "string"),
            ("fee", "Fee"),
            ("memo", "string"),
            ("msgs", "Msg[]"),
            ("sequence", "string"),
        ]),
    );
    types.insert(
        "Fee".to_string(),
        fields(&[("feePayer", "string"), ("amount", "Coin[]"), ("gas", "string")]),
    );
    types.insert(
        "Coin".to_string(),
        fields(&[("denom", "string"), ("amount", "string")]),
    );
    types.insert(
        "Msg".to_string(),
        fields(&[("type", "string"), ("value", "MsgValue")]),
    );
    types
}

/// EIP-712 typed data for one message
pub fn typed_data(
    chain: &ChainConfig,
    sender: &Sender,
    fee: &Fee,
    memo: &str,
    message: &TxMessage,
) -> Eip712TypedData {
    let mut types = base_types();
    types.extend(message.schema().eip712_types());

    let domain = Eip712Domain::new(DOMAIN_NAME, DOMAIN_VERSION, chain.chain_id)
        .with_verifying_contract(DOMAIN_VERIFYING_CONTRACT)
        .with_salt(DOMAIN_SALT);

    let sign_doc = json!({
        "account_number": sender.account_number.to_string(),
        "chain_id": chain.cosmos_chain_id,
        "fee": {
            "amount": [{ "amount": fee.amount, "denom": fee.denom }],
            "gas": fee.gas.to_string(),
            "feePayer": sender.address,
        },
        "memo": memo,
        "msgs": [message.to_amino(&sender.address)],
        "sequence": sender.sequence.to_string(),
    });

    Eip712TypedData::new(domain, PRIMARY_TYPE, types, sign_doc)
}

/// Encode a message into its typed data, digest and unsigned binary envelope
///
/// Panics with the `FieldMappingMismatch` text if the message's values don't
/// cover its schema; see [`crate::messages::codec`].
pub fn encode(
    chain: &ChainConfig,
    sender: &Sender,
    fee: &Fee,
    memo: &str,
    message: &TxMessage,
) -> RegistryResult<DualEncoding> {
    let typed_data = typed_data(chain, sender, fee, memo, message);
    let digest = typed_data.sign_hash()?;

    let body = CosmosTxBody::new(vec![message.to_any(&sender.address)], memo);
    let auth_info = CosmosAuthInfo::new(
        vec![CosmosSignerInfo::new(&sender.public_key, sender.sequence)],
        CosmosFee::new(vec![CosmosCoin::new(&fee.denom, &fee.amount)], fee.gas),
    );

    debug!(
        variant = message.variant(),
        sequence = sender.sequence,
        digest = %hex::encode(&digest[..4]),
        "encoded registry tx"
    );

    Ok(DualEncoding {
        typed_data_chain_id: chain.chain_id,
        fee_payer: sender.address.clone(),
        typed_data,
        digest,
        body,
        auth_info,
    })
}

/// Both encodings of one unsigned transaction
#[derive(Debug, Clone, PartialEq)]
pub struct DualEncoding {
    typed_data_chain_id: u64,
    fee_payer: String,
    typed_data: Eip712TypedData,
    digest: [u8; 32],
    body: CosmosTxBody,
    auth_info: CosmosAuthInfo,
}

impl DualEncoding {
    pub fn typed_data(&self) -> &Eip712TypedData {
        &self.typed_data
    }

    /// EIP-712 digest to sign
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// TxBody bytes without the signature extension
    pub fn body_bytes(&self) -> Vec<u8> {
        self.body.encode()
    }

    pub fn auth_info_bytes(&self) -> Vec<u8> {
        self.auth_info.encode()
    }

    /// Attach a digest signature and produce the broadcastable tx
    pub fn finish(&self, signature: &Signature) -> SignedTx {
        let extension = Web3Extension::new(self.typed_data_chain_id, &self.fee_payer, signature);
        let body = self.body.clone().with_extension_option(extension.to_any());

        SignedTx {
            raw: CosmosTxRaw::new(body.encode(), self.auth_info.encode(), vec![Vec::new()]),
        }
    }

    /// Sign the digest and finish
    pub fn sign_and_finish<S: Signer + ?Sized>(&self, signer: &S) -> RegistryResult<SignedTx> {
        let signature = signer.sign_digest(&self.digest)?;
        trace!(signer = signer.address(), "signed typed data");
        Ok(self.finish(&signature))
    }
}

/// A signed, broadcastable transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTx {
    raw: CosmosTxRaw,
}

impl SignedTx {
    pub fn raw(&self) -> &CosmosTxRaw {
        &self.raw
    }

    /// TxRaw bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.raw.encode()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Broadcast request body
    pub fn broadcast_body(&self, mode: BroadcastMode) -> BroadcastRequest {
        BroadcastRequest {
            tx_bytes: self.to_base64(),
            mode,
        }
    }
}
