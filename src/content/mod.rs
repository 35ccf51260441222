//! Content addressing
//!
//! Deterministic DAG-CBOR serialization of canonical values and the CIDv1
//! identifiers computed over it. Bid commitments are content identifiers of
//! the bid reveal.

pub mod cbor;
pub mod cid;

pub use cid::{content_id, content_id_of, ContentId};
