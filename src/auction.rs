//! Sealed-bid commit and reveal
//!
//! A bidder commits to the content identifier of a [`BidReveal`] and later
//! publishes the reveal itself. The reveal carries a noise phrase so the
//! commitment can't be brute-forced over the small space of plausible bid
//! amounts.
//!
//! ```
//! use registry_sdk::auction::{commit, open_reveal, verify_reveal};
//!
//! let bid = commit("chain-1", "auction-7", "bidder-a", "10000000aphoton", None).unwrap();
//! let reveal = open_reveal(bid.token.as_str()).unwrap();
//! assert_eq!(reveal.bid_amount, "10000000aphoton");
//! assert!(verify_reveal(&bid.commitment, &bid.token).unwrap());
//! ```

use crate::content::{content_id_of, ContentId};
use crate::crypto::cosmos::generate_mnemonic;
use crate::errors::{RegistryError, RegistryResult};
use crate::messages::{CommitBid, RevealBid, TxMessage};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// The revealed content of a bid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidReveal {
    pub chain_id: String,
    pub auction_id: String,
    pub bidder_address: String,
    /// Amount with denomination, e.g. "10000000aphoton"
    pub bid_amount: String,
    pub noise: String,
}

impl BidReveal {
    /// Commitment to this reveal
    pub fn commitment(&self) -> RegistryResult<ContentId> {
        content_id_of(self)
    }
}

/// Hex of the reveal JSON, submitted with `RevealBid`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealToken(String);

impl RevealToken {
    pub fn from_reveal(reveal: &BidReveal) -> RegistryResult<Self> {
        let json = serde_json::to_string(reveal)?;
        Ok(Self(hex::encode(json)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevealToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RevealToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Lifecycle of one bid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidState {
    #[default]
    Unrevealed,
    Committed,
    Revealed,
}

impl fmt::Display for BidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BidState::Unrevealed => "unrevealed",
            BidState::Committed => "committed",
            BidState::Revealed => "revealed",
        };
        f.write_str(name)
    }
}

/// A sealed bid: commitment, reveal and the token that opens it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBid {
    pub commitment: ContentId,
    pub reveal: BidReveal,
    pub token: RevealToken,
    state: BidState,
}

impl SealedBid {
    pub fn state(&self) -> BidState {
        self.state
    }

    /// Record that the commit transaction was accepted
    pub fn mark_committed(&mut self) -> RegistryResult<()> {
        self.transition(BidState::Unrevealed, BidState::Committed)
    }

    /// Record that the reveal transaction was accepted
    pub fn mark_revealed(&mut self) -> RegistryResult<()> {
        self.transition(BidState::Committed, BidState::Revealed)
    }

    fn transition(&mut self, from: BidState, to: BidState) -> RegistryResult<()> {
        if self.state != from {
            return Err(RegistryError::InvalidBidState {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        debug!(auction = %self.reveal.auction_id, state = %to, "bid state changed");
        self.state = to;
        Ok(())
    }

    /// `CommitBid` message for this bid
    pub fn commit_message(&self) -> TxMessage {
        TxMessage::CommitBid(CommitBid {
            auction_id: self.reveal.auction_id.clone(),
            commit_hash: self.commitment.to_string(),
        })
    }

    /// `RevealBid` message for this bid
    pub fn reveal_message(&self) -> TxMessage {
        TxMessage::RevealBid(RevealBid {
            auction_id: self.reveal.auction_id.clone(),
            reveal: self.token.to_string(),
        })
    }
}

/// Seal a bid
///
/// Without `noise` a fresh 12-word mnemonic from the OS RNG is used.
pub fn commit(
    chain_id: &str,
    auction_id: &str,
    bidder_address: &str,
    bid_amount: &str,
    noise: Option<&str>,
) -> RegistryResult<SealedBid> {
    let noise = match noise {
        Some(noise) => noise.to_string(),
        None => generate_mnemonic()?,
    };

    let reveal = BidReveal {
        chain_id: chain_id.to_string(),
        auction_id: auction_id.to_string(),
        bidder_address: bidder_address.to_string(),
        bid_amount: bid_amount.to_string(),
        noise,
    };

    let commitment = reveal.commitment()?;
    let token = RevealToken::from_reveal(&reveal)?;

    debug!(auction = auction_id, commitment = %commitment, "bid sealed");

    Ok(SealedBid {
        commitment,
        reveal,
        token,
        state: BidState::Unrevealed,
    })
}

/// Decode a reveal token
pub fn open_reveal(token: &str) -> RegistryResult<BidReveal> {
    let bytes = hex::decode(token).map_err(|e| RegistryError::MalformedReveal {
        message: format!("reveal token is not hex: {e}"),
    })?;

    serde_json::from_slice(&bytes).map_err(|e| RegistryError::MalformedReveal {
        message: format!("reveal token is not a bid reveal: {e}"),
    })
}

/// Check a reveal token against a published commitment
pub fn verify_reveal(commitment: &ContentId, token: &RevealToken) -> RegistryResult<bool> {
    let reveal = open_reveal(token.as_str())?;
    Ok(reveal.commitment()? == *commitment)
}
