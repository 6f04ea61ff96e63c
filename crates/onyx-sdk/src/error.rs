//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// No type matcher accepted an ABI type signature
    #[error("unresolved type: {0}")]
    UnresolvedType(String),

    /// A generic type parameter was still unbound when a concrete type was needed
    #[error("unresolved generic type parameter: {0}")]
    UnresolvedGeneric(String),

    /// Value shape does not match its type descriptor
    #[error("encode error: {0}")]
    Encode(String),

    /// Buffer does not decode against its type descriptor
    #[error("decode error: {0}")]
    Decode(String),

    /// Enum discriminant outside the declared variant range
    #[error("invalid discriminant {discriminant} for enum {enum_name}")]
    InvalidEnumDiscriminant {
        /// Enum being decoded
        enum_name: String,
        /// Discriminant found in the buffer
        discriminant: u64,
    },

    /// Sum of forwarded gas exceeds the transaction gas limit
    #[error("Transaction gasLimit can't be lower than the sum of the forwarded gas of each call")]
    GasLimitExceeded,

    /// The resource provider could not cover a requested quantity.
    /// Carries the provider's message verbatim.
    #[error("{0}")]
    InsufficientFunds(String),

    /// The resource provider hit its spendable-resource cap.
    /// Carries the provider's message verbatim.
    #[error("{0}")]
    TooManyResources(String),

    /// A write-mode call was dispatched on a read-only scope
    #[error("account is required to submit a transaction")]
    MissingAccount,

    /// Function name not present in the ABI
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Transport/network error
    #[error("transport error: {0}")]
    Transport(String),

    /// RPC error from the node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Primitive parsing error
    #[error("primitive error: {0}")]
    Primitive(#[from] onyx_primitives::PrimitiveError),
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}
