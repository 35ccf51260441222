//! Bank messages

use super::{Coin, FieldValue, MessageParams, MessageSchema, StructSpec};
use serde::{Deserialize, Serialize};

pub(super) const TYPE_AMOUNT: StructSpec = StructSpec {
    name: "TypeAmount",
    fields: field_specs! {
        denom: "string" => 1,
        amount: "string" => 2,
    },
};

static SEND: MessageSchema = MessageSchema {
    variant: "Send",
    amino_type: "cosmos-sdk/MsgSend",
    type_url: "/cosmos.bank.v1beta1.MsgSend",
    fields: field_specs! {
        from_address: "string" => 1,
        to_address: "string" => 2,
        amount: "TypeAmount[]" => 3,
    },
    nested: &[TYPE_AMOUNT],
};

/// Transfer coins from the sender to `to_address`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Send {
    pub to_address: String,
    pub amount: Vec<Coin>,
}

impl Send {
    /// Single-denomination transfer
    pub fn new(to_address: impl Into<String>, amount: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            to_address: to_address.into(),
            amount: vec![Coin::new(denom, amount)],
        }
    }
}

impl MessageParams for Send {
    fn schema() -> &'static MessageSchema {
        &SEND
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("from_address", FieldValue::str(signer)),
            ("to_address", FieldValue::str(&self.to_address)),
            ("amount", FieldValue::coins(&self.amount)),
        ]
    }
}
