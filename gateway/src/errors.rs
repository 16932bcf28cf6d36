//! Gateway error types

use cauldron_fhe::FheError;
use thiserror::Error;

/// Errors that can occur on the decryption path. None of these mutate
/// leaderboard state; they only deny the requester a read.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No grant exists for this (handle, requester) pair
    #[error("No decrypt grant for this handle and requester")]
    UnauthorizedDecryption,

    /// The request's validity window excludes the current ledger time
    #[error("Decrypt window expired")]
    WindowExpired,

    /// The grant itself has expired
    #[error("Decrypt grant expired")]
    GrantExpired,

    /// Signature invalid, or the statement's bound identity or
    /// contract set disagrees with the grant
    #[error("Signature mismatch: {0}")]
    SignatureMismatch(String),

    /// Handle is not a live leaderboard entry
    #[error("Unknown handle: {0}")]
    UnknownHandle(String),

    /// Backend operation failed
    #[error("FHE backend error: {0}")]
    Fhe(#[from] FheError),
}
