//! Error types for the board state machine

use cauldron_fhe::FheError;
use thiserror::Error;

/// Errors that can occur during submission processing
#[derive(Error, Debug)]
pub enum BoardError {
    /// Bundle does not carry exactly the required number of inputs
    #[error("Invalid bundle shape: expected {expected} inputs, got {got}")]
    InvalidBundleShape { expected: usize, got: usize },

    /// Proof failed verification or targets a different (contract,
    /// caller) pair, or a type tag does not match
    #[error("Invalid input proof: {0}")]
    InvalidProof(String),

    /// Scoring table could overflow the output class for a legal brew
    #[error("Scoring table overflows the output bit-width")]
    AggregationOverflow,

    /// Backend operation failed
    #[error("FHE backend error: {0}")]
    Fhe(#[from] FheError),
}
