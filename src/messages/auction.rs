//! Auction messages
//!
//! Sealed-bid commit and reveal. Build them from a sealed bid with
//! [`crate::auction::SealedBid::commit_message`] and
//! [`crate::auction::SealedBid::reveal_message`].

use super::{FieldValue, MessageParams, MessageSchema};
use serde::{Deserialize, Serialize};

static COMMIT_BID: MessageSchema = MessageSchema {
    variant: "CommitBid",
    amino_type: "auction/MsgCommitBid",
    type_url: "/vulcanize.auction.v1beta1.MsgCommitBid",
    fields: field_specs! {
        auction_id: "string" => 1,
        commit_hash: "string" => 2,
        signer: "string" => 3,
    },
    nested: &[],
};

static REVEAL_BID: MessageSchema = MessageSchema {
    variant: "RevealBid",
    amino_type: "auction/MsgRevealBid",
    type_url: "/vulcanize.auction.v1beta1.MsgRevealBid",
    fields: field_specs! {
        auction_id: "string" => 1,
        reveal: "string" => 2,
        signer: "string" => 3,
    },
    nested: &[],
};

/// Commit to a sealed bid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitBid {
    pub auction_id: String,
    /// Content identifier of the bid reveal
    pub commit_hash: String,
}

impl MessageParams for CommitBid {
    fn schema() -> &'static MessageSchema {
        &COMMIT_BID
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("auction_id", FieldValue::str(&self.auction_id)),
            ("commit_hash", FieldValue::str(&self.commit_hash)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}

/// Reveal a committed bid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealBid {
    pub auction_id: String,
    /// Hex-encoded reveal JSON
    pub reveal: String,
}

impl MessageParams for RevealBid {
    fn schema() -> &'static MessageSchema {
        &REVEAL_BID
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("auction_id", FieldValue::str(&self.auction_id)),
            ("reveal", FieldValue::str(&self.reveal)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}
