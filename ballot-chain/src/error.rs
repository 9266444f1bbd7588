//! Error types for ballot-chain.

use thiserror::Error;

/// All errors that can arise from talking to the external contract.
///
/// Remote-call errors are caught at their call site and surfaced as
/// transient status messages; nothing here triggers a retry.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The transport failed before a response was produced.
    #[error("transport error calling {method}: {message}")]
    Transport { method: String, message: String },

    /// The remote node answered with a JSON-RPC error object. For write
    /// operations this is how a rejected or reverted call surfaces.
    #[error("{message}")]
    Rejected {
        method: String,
        code: i64,
        message: String,
    },

    /// The response arrived but did not decode into the expected shape.
    #[error("malformed response from {method}: {message}")]
    MalformedResponse { method: String, message: String },

    /// The operation is not part of the bound interface description.
    #[error("operation '{0}' is not part of the bound contract interface")]
    UnsupportedOperation(String),

    /// Refused to bind a handle to the zero-identifier sentinel.
    #[error("contract address is the zero sentinel; configure a deployed contract address")]
    ZeroAddress,

    /// A write was attempted without an authorized identity.
    #[error("no authorized identity; connect a wallet account first")]
    NoIdentity,
}
