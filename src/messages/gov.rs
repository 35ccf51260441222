//! Governance messages

use super::bank::TYPE_AMOUNT;
use super::{Coin, FieldValue, MessageParams, MessageSchema};
use serde::{Deserialize, Serialize};

static DEPOSIT: MessageSchema = MessageSchema {
    variant: "Deposit",
    amino_type: "cosmos-sdk/MsgDeposit",
    type_url: "/cosmos.gov.v1beta1.MsgDeposit",
    fields: field_specs! {
        proposal_id: "uint64" => 1,
        depositor: "string" => 2,
        amount: "TypeAmount[]" => 3,
    },
    nested: &[TYPE_AMOUNT],
};

static VOTE: MessageSchema = MessageSchema {
    variant: "Vote",
    amino_type: "cosmos-sdk/MsgVote",
    type_url: "/cosmos.gov.v1beta1.MsgVote",
    fields: field_specs! {
        proposal_id: "uint64" => 1,
        voter: "string" => 2,
        option: "int32" => 3,
    },
    nested: &[],
};

/// Deposit on a governance proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    #[serde(with = "u64_string")]
    pub proposal_id: u64,
    pub amount: Vec<Coin>,
}

impl MessageParams for Deposit {
    fn schema() -> &'static MessageSchema {
        &DEPOSIT
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("proposal_id", FieldValue::Uint64(self.proposal_id)),
            ("depositor", FieldValue::str(signer)),
            ("amount", FieldValue::coins(&self.amount)),
        ]
    }
}

/// cosmos.gov.v1beta1.VoteOption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum VoteOption {
    Unspecified = 0,
    Yes = 1,
    Abstain = 2,
    No = 3,
    NoWithVeto = 4,
}

impl From<VoteOption> for i32 {
    fn from(option: VoteOption) -> Self {
        option as i32
    }
}

impl TryFrom<i32> for VoteOption {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VoteOption::Unspecified),
            1 => Ok(VoteOption::Yes),
            2 => Ok(VoteOption::Abstain),
            3 => Ok(VoteOption::No),
            4 => Ok(VoteOption::NoWithVeto),
            other => Err(format!("unknown vote option {other}")),
        }
    }
}

/// Vote on a governance proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(with = "u64_string")]
    pub proposal_id: u64,
    pub option: VoteOption,
}

impl MessageParams for Vote {
    fn schema() -> &'static MessageSchema {
        &VOTE
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("proposal_id", FieldValue::Uint64(self.proposal_id)),
            ("voter", FieldValue::str(signer)),
            ("option", FieldValue::Int32(self.option.into())),
        ]
    }
}

/// Amino JSON carries uint64 as a decimal string; plain numbers are accepted too.
mod u64_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text.parse().map_err(D::Error::custom),
            Raw::Number(n) => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cosmos::protobuf::{decode_fields, ProtoValue};
    use crate::messages::TxMessage;

    #[test]
    fn test_vote_encodings() {
        let message = TxMessage::from(Vote {
            proposal_id: 12,
            option: VoteOption::NoWithVeto,
        });

        let value = &message.to_amino("ethm1voter")["value"];
        assert_eq!(value["proposal_id"], "12");
        assert_eq!(value["option"], 4);

        let fields = decode_fields(&message.to_proto("ethm1voter")).unwrap();
        assert_eq!(fields[0], (1, ProtoValue::Varint(12)));
        assert_eq!(fields[2], (3, ProtoValue::Varint(4)));
    }

    #[test]
    fn test_vote_from_amino() {
        let message = TxMessage::from_amino(
            "cosmos-sdk/MsgVote",
            &serde_json::json!({ "proposal_id": "3", "voter": "x", "option": 1 }),
        )
        .unwrap();
        assert_eq!(
            message,
            TxMessage::Vote(Vote {
                proposal_id: 3,
                option: VoteOption::Yes
            })
        );

        let err = TxMessage::from_amino(
            "cosmos-sdk/MsgVote",
            &serde_json::json!({ "proposal_id": 3, "option": 9 }),
        )
        .unwrap_err();
        assert_eq!(err.code(), "JSON_ERROR");
    }
}
