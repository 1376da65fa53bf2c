//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions. The
//! user-facing variants carry messages meant to be shown as-is.

use alloy::primitives::TxHash;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// No node connection has been established.
    #[error("You are using an unsupported browser or your connection is down")]
    NotConnected,

    /// A raw RPC call was attempted without a method name.
    #[error("You need to indicate a method")]
    MissingMethod,

    /// The node exposes no accounts.
    #[error("Please, unlock your wallet or create an account")]
    NoAccounts,

    /// The node is on a different network than required.
    #[error("Please, switch to the {expected} network")]
    WrongNetwork { expected: String, actual: String },

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// ABI encoding or decoding failed.
    #[error("ABI error: {0}")]
    Abi(String),

    /// The contract ABI has no matching function.
    #[error("Unknown contract method: {0}")]
    UnknownMethod(String),

    /// Gas estimate is above the configured ceiling.
    #[error("Gas estimate {estimate} exceeds the ceiling of {ceiling}")]
    GasCeilingExceeded { estimate: u64, ceiling: u64 },

    /// Transaction was mined but reverted.
    #[error("Transaction {0} failed")]
    TransactionFailed(TxHash),

    /// Pending transaction error.
    #[error("Pending transaction error: {0}")]
    PendingTransaction(String),

    /// An operation needed a Tokio runtime and none was running.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<alloy::providers::PendingTransactionError> for AppError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        AppError::PendingTransaction(err.to_string())
    }
}

impl From<alloy::dyn_abi::Error> for AppError {
    fn from(err: alloy::dyn_abi::Error) -> Self {
        AppError::Abi(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Abi(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
