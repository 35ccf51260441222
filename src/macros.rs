//! Message Definition Macros
//!
//! Provides macros to reduce boilerplate in the message schema tables.
//!
//! # Available Macros
//!
//! - [`field_specs!`] - Create a `&'static [FieldSpec]` table with minimal syntax
//! - [`tx_messages!`] - Declare the closed `TxMessage` enum and its dispatch

/// Creates a static field table in EIP-712 order.
///
/// Each entry is `name: "eip712 type" => proto_tag`.
///
/// # Example
///
/// ```ignore
/// const FIELDS: &[FieldSpec] = field_specs! {
///     signer: "string" => 2,
///     coins: "TypeCoins[]" => 1,
/// };
/// ```
macro_rules! field_specs {
    ($($name:ident : $ty:literal => $tag:literal),* $(,)?) => {
        &[
            $(
                $crate::messages::FieldSpec {
                    name: stringify!($name),
                    eip712_type: $ty,
                    proto_tag: $tag,
                },
            )*
        ]
    };
}

/// Declares the `TxMessage` enum over a list of params types.
///
/// Generates the enum, `From` conversions, the exhaustive schema / field
/// dispatch and the amino-type lookup used by `TxMessage::from_amino`.
///
/// # Example
///
/// ```ignore
/// tx_messages! {
///     CreateBond(bond::CreateBond),
///     Send(bank::Send),
/// }
/// ```
macro_rules! tx_messages {
    ($($variant:ident($params:ty)),* $(,)?) => {
        /// One registry transaction message
        ///
        /// A closed set: adding a variant means adding its params type, its
        /// schema and its field values.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum TxMessage {
            $(
                $variant($params),
            )*
        }

        $(
            impl From<$params> for TxMessage {
                fn from(params: $params) -> Self {
                    TxMessage::$variant(params)
                }
            }
        )*

        impl TxMessage {
            /// Static schema of this variant
            pub fn schema(&self) -> &'static $crate::messages::MessageSchema {
                match self {
                    $(
                        TxMessage::$variant(_) => <$params as $crate::messages::MessageParams>::schema(),
                    )*
                }
            }

            /// Semantic field values in EIP-712 order
            ///
            /// This is the only place the encoders read message content from.
            pub fn fields(&self, signer: &str) -> Vec<(&'static str, $crate::messages::FieldValue)> {
                match self {
                    $(
                        TxMessage::$variant(params) => $crate::messages::MessageParams::fields(params, signer),
                    )*
                }
            }

            /// Schemas of every registered variant
            pub fn schemas() -> &'static [&'static $crate::messages::MessageSchema] {
                static SCHEMAS: std::sync::OnceLock<Vec<&'static $crate::messages::MessageSchema>> =
                    std::sync::OnceLock::new();
                SCHEMAS.get_or_init(|| {
                    vec![
                        $(
                            <$params as $crate::messages::MessageParams>::schema(),
                        )*
                    ]
                })
            }

            /// Parse a legacy-amino `{type, value}` message body
            ///
            /// The `signer` field (when present) is ignored; the sender is
            /// supplied at encoding time.
            pub fn from_amino(
                amino_type: &str,
                value: &serde_json::Value,
            ) -> $crate::errors::RegistryResult<Self> {
                $(
                    if amino_type == <$params as $crate::messages::MessageParams>::schema().amino_type {
                        let params: $params = serde_json::from_value(value.clone())?;
                        return Ok(TxMessage::$variant(params));
                    }
                )*
                Err($crate::errors::RegistryError::UnknownMessageVariant {
                    variant: amino_type.to_string(),
                })
            }
        }
    };
}
