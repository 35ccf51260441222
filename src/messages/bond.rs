//! Bond messages
//!
//! Bond lifecycle (create / refill / withdraw / cancel) and the association
//! between records and bonds. Association messages are routed through the
//! nameservice module on chain.

use super::{Coin, FieldValue, MessageParams, MessageSchema, StructSpec};
use serde::{Deserialize, Serialize};

const TYPE_COINS: StructSpec = StructSpec {
    name: "TypeCoins",
    fields: field_specs! {
        denom: "string" => 1,
        amount: "string" => 2,
    },
};

static CREATE_BOND: MessageSchema = MessageSchema {
    variant: "CreateBond",
    amino_type: "bond/MsgCreateBond",
    type_url: "/vulcanize.bond.v1beta1.MsgCreateBond",
    fields: field_specs! {
        signer: "string" => 2,
        coins: "TypeCoins[]" => 1,
    },
    nested: &[TYPE_COINS],
};

static REFILL_BOND: MessageSchema = MessageSchema {
    variant: "RefillBond",
    amino_type: "bond/MsgRefillBond",
    type_url: "/vulcanize.bond.v1beta1.MsgRefillBond",
    fields: field_specs! {
        id: "string" => 1,
        signer: "string" => 2,
        coins: "TypeCoins[]" => 3,
    },
    nested: &[TYPE_COINS],
};

static WITHDRAW_BOND: MessageSchema = MessageSchema {
    variant: "WithdrawBond",
    amino_type: "bond/MsgWithdrawBond",
    type_url: "/vulcanize.bond.v1beta1.MsgWithdrawBond",
    fields: field_specs! {
        id: "string" => 1,
        signer: "string" => 2,
        coins: "TypeCoins[]" => 3,
    },
    nested: &[TYPE_COINS],
};

static CANCEL_BOND: MessageSchema = MessageSchema {
    variant: "CancelBond",
    amino_type: "bond/MsgCancelBond",
    type_url: "/vulcanize.bond.v1beta1.MsgCancelBond",
    fields: field_specs! {
        id: "string" => 1,
        signer: "string" => 2,
    },
    nested: &[],
};

static ASSOCIATE_BOND: MessageSchema = MessageSchema {
    variant: "AssociateBond",
    amino_type: "nameservice/AssociateBond",
    type_url: "/vulcanize.nameservice.v1beta1.MsgAssociateBond",
    fields: field_specs! {
        record_id: "string" => 1,
        bond_id: "string" => 2,
        signer: "string" => 3,
    },
    nested: &[],
};

static DISSOCIATE_BOND: MessageSchema = MessageSchema {
    variant: "DissociateBond",
    amino_type: "nameservice/DissociateBond",
    type_url: "/vulcanize.nameservice.v1beta1.MsgDissociateBond",
    fields: field_specs! {
        record_id: "string" => 1,
        signer: "string" => 2,
    },
    nested: &[],
};

static DISSOCIATE_RECORDS: MessageSchema = MessageSchema {
    variant: "DissociateRecords",
    amino_type: "nameservice/DissociateRecords",
    type_url: "/vulcanize.nameservice.v1beta1.MsgDissociateRecords",
    fields: field_specs! {
        bond_id: "string" => 1,
        signer: "string" => 2,
    },
    nested: &[],
};

static REASSOCIATE_RECORDS: MessageSchema = MessageSchema {
    variant: "ReassociateRecords",
    amino_type: "nameservice/ReassociateRecords",
    type_url: "/vulcanize.nameservice.v1beta1.MsgReAssociateRecords",
    fields: field_specs! {
        new_bond_id: "string" => 1,
        old_bond_id: "string" => 2,
        signer: "string" => 3,
    },
    nested: &[],
};

/// Create a bond funded with `coins`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBond {
    pub coins: Vec<Coin>,
}

impl MessageParams for CreateBond {
    fn schema() -> &'static MessageSchema {
        &CREATE_BOND
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("signer", FieldValue::str(signer)),
            ("coins", FieldValue::coins(&self.coins)),
        ]
    }
}

/// Add funds to an existing bond
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefillBond {
    pub id: String,
    pub coins: Vec<Coin>,
}

impl MessageParams for RefillBond {
    fn schema() -> &'static MessageSchema {
        &REFILL_BOND
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::str(&self.id)),
            ("signer", FieldValue::str(signer)),
            ("coins", FieldValue::coins(&self.coins)),
        ]
    }
}

/// Withdraw funds from a bond
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawBond {
    pub id: String,
    pub coins: Vec<Coin>,
}

impl MessageParams for WithdrawBond {
    fn schema() -> &'static MessageSchema {
        &WITHDRAW_BOND
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::str(&self.id)),
            ("signer", FieldValue::str(signer)),
            ("coins", FieldValue::coins(&self.coins)),
        ]
    }
}

/// Cancel a bond and return its balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelBond {
    pub id: String,
}

impl MessageParams for CancelBond {
    fn schema() -> &'static MessageSchema {
        &CANCEL_BOND
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::str(&self.id)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociateBond {
    pub record_id: String,
    pub bond_id: String,
}

impl MessageParams for AssociateBond {
    fn schema() -> &'static MessageSchema {
        &ASSOCIATE_BOND
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("record_id", FieldValue::str(&self.record_id)),
            ("bond_id", FieldValue::str(&self.bond_id)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissociateBond {
    pub record_id: String,
}

impl MessageParams for DissociateBond {
    fn schema() -> &'static MessageSchema {
        &DISSOCIATE_BOND
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("record_id", FieldValue::str(&self.record_id)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}

/// Detach every record from a bond
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissociateRecords {
    pub bond_id: String,
}

impl MessageParams for DissociateRecords {
    fn schema() -> &'static MessageSchema {
        &DISSOCIATE_RECORDS
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("bond_id", FieldValue::str(&self.bond_id)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}

/// Move every record from `old_bond_id` to `new_bond_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassociateRecords {
    pub new_bond_id: String,
    pub old_bond_id: String,
}

impl MessageParams for ReassociateRecords {
    fn schema() -> &'static MessageSchema {
        &REASSOCIATE_RECORDS
    }

    fn fields(&self, signer: &str) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("new_bond_id", FieldValue::str(&self.new_bond_id)),
            ("old_bond_id", FieldValue::str(&self.old_bond_id)),
            ("signer", FieldValue::str(signer)),
        ]
    }
}
