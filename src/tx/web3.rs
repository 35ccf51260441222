//! Ethermint Web3 extension option
//!
//! An EIP-712 signed transaction carries its signature in
//! `TxBody.extension_options` rather than in `TxRaw.signatures`.

use crate::crypto::common::Signature;
use crate::crypto::cosmos::protobuf::{encode_bytes, encode_string, encode_uint64};
use crate::crypto::cosmos::transaction::CosmosAny;

/// ethermint.types.v1.ExtensionOptionsWeb3Tx
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Web3Extension {
    /// EVM chain id the typed data was signed for
    pub typed_data_chain_id: u64,
    /// Bech32 address of the fee payer
    pub fee_payer: String,
    /// 65-byte `r || s || v` signature
    pub fee_payer_sig: Vec<u8>,
}

impl Web3Extension {
    pub const TYPE_URL: &'static str = "/ethermint.types.v1.ExtensionOptionsWeb3Tx";

    pub fn new(typed_data_chain_id: u64, fee_payer: impl Into<String>, signature: &Signature) -> Self {
        Self {
            typed_data_chain_id,
            fee_payer: fee_payer.into(),
            fee_payer_sig: signature.to_bytes().to_vec(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_uint64(&mut buf, 1, self.typed_data_chain_id);
        encode_string(&mut buf, 2, &self.fee_payer);
        encode_bytes(&mut buf, 3, &self.fee_payer_sig);
        buf
    }

    pub fn to_any(&self) -> CosmosAny {
        CosmosAny::new(Self::TYPE_URL, self.encode())
    }
}
