//! Nameservice messages
//!
//! Authorities, names and record publication.

use super::{FieldValue, MessageParams, MessageSchema, StructSpec};
use crate::record::WirePayload;
use serde::{Deserialize, Serialize};

static RESERVE_AUTHORITY: MessageSchema = MessageSchema {
    variant: "ReserveAuthority",
    amino_type: "nameservice/ReserveAuthority",
    type_url: "/vulcanize.nameservice.v1beta1.MsgReserveAuthority",
    fields: field_specs! {
        name: "string" => 1,
        signer: "string" => 2,
        owner: "string" => 3,
    },
    nested: &[],
};

static SET_NAME: MessageSchema = MessageSchema {
    variant: "SetName",
    amino_type: "nameservice/SetName",
    type_url: "/vulcanize.nameservice.v1beta1.MsgSetName",
    fields: field_specs! {
        wrn: "string" => 1,
        cid: "string" => 2,
        signer: "string" => 3,
    },
    nested: &[],
};

// Record field 6 (names) is chain-populated and never sent.
static SET_RECORD: MessageSchema = MessageSchema {
    variant: "SetRecord",
    amino_type: "nameservice/SetRecord",
    type_url: "/vulcanize.nameservice.v1beta1.MsgSetRecord",
    fields: field_specs! {
        bond_id: "string" => 1,
        signer: "string" => 2,
        payload: "TypePayload" => 3,
    },
    nested: &[
        StructSpec {
            name: "TypePayload",
            fields: field_specs! {
                record: "TypePayloadRecord" => 1,
                signatures: "TypePayloadSignatures[]" => 2,
            },
        },
        StructSpec {
            name: "TypePayloadRecord",
            fields: field_specs! {
                id: "string" => 1,
                bond_id: "string" => 2,
                create_time: "string" => 3,
                expiry_time: "string" => 4,
                deleted: "bool" => 5,
                attributes: "string" => 7,
            },
        },
        StructSpec {
            name: "TypePayloadSignatures",
            fields: field_specs! {
                sig: "string" => 1,
                pub_key: "string" => 2,
            },
        },
    ],
};

static SET_AUTHORITY_BOND: MessageSchema = MessageSchema {
    variant: "SetAuthorityBond",
    amino_type: "nameservice/SetAuthorityBond",
    type_url: "/vulcanize.nameservice.v1beta1.MsgSetAuthorityBond",
    fields: field_specs! {
        name: "string" => 1,
        bond_id: "string" => 2,
        signer: "string" => 3,
    },
    nested: &[],
};

static DELETE_NAME: MessageSchema = MessageSchema {
    variant: "DeleteName",
    amino_type: "nameservice/DeleteAuthority",
    type_url: "/vulcanize.nameservice.v1beta1.MsgDeleteNameAuthority",
    fields: field_specs! {
        wrn: "string" => 1,
        signer: "string" => 2,
    },
    nested: &[],
};

/// Reserve an authority (top-level name), optionally for another owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveAuthority {
    pub name: String,
    #[serde(default)]
    pub owner: String,
}

impl MessageParams for ReserveAuthority {
    fn schema() -> &'static MessageSchema {
        &RESERVE_AUTHORITY
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", FieldValue::str(&self.name)),
            ("signer", FieldValue::str(signer)),
            ("owner", FieldValue::str(&self.owner)),
        ]
    }
}

/// Point a WRN at a record id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetName {
    pub wrn: String,
    pub cid: String,
}

impl MessageParams for SetName {
    fn schema() -> &'static MessageSchema {
        &SET_NAME
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("wrn", FieldValue::str(&self.wrn)),
            ("cid", FieldValue::str(&self.cid)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}

/// Publish a signed record under a bond
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord {
    pub bond_id: String,
    pub payload: WirePayload,
}

impl MessageParams for SetRecord {
    fn schema() -> &'static MessageSchema {
        &SET_RECORD
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("bond_id", FieldValue::str(&self.bond_id)),
            ("signer", FieldValue::str(signer)),
            ("payload", FieldValue::payload(&self.payload)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAuthorityBond {
    pub name: String,
    pub bond_id: String,
}

impl MessageParams for SetAuthorityBond {
    fn schema() -> &'static MessageSchema {
        &SET_AUTHORITY_BOND
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", FieldValue::str(&self.name)),
            ("bond_id", FieldValue::str(&self.bond_id)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}

/// Remove a WRN mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteName {
    pub wrn: String,
}

impl MessageParams for DeleteName {
    fn schema() -> &'static MessageSchema {
        &DELETE_NAME
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("wrn", FieldValue::str(&self.wrn)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}
