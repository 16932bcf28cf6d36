//! Wallet error types

use thiserror::Error;

/// Errors that can occur during wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    /// Signature bytes are malformed or do not verify
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Verifying key bytes are malformed
    #[error("Invalid verifying key: {0}")]
    InvalidKey(String),

    /// The statement's declared identity does not match its key
    #[error("Statement identity does not match the signing key")]
    IdentityMismatch,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
