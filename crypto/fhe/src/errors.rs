//! FHE error types

use crate::handle::FheType;
use thiserror::Error;

/// Errors that can occur during FHE backend operations
#[derive(Error, Debug)]
pub enum FheError {
    /// Handle does not reference a ciphertext known to the backend
    #[error("Unknown ciphertext handle: {0}")]
    UnknownHandle(String),

    /// Operand type tag does not match the operation's requirement
    #[error("Type mismatch: expected {expected:?}, got {got:?}")]
    TypeMismatch { expected: FheType, got: FheType },

    /// Plaintext does not fit the declared bit-width class
    #[error("Value {value} out of range for {ty:?}")]
    ValueOutOfRange { value: u64, ty: FheType },

    /// Input proof failed verification or targets a different binding
    #[error("Invalid input proof: {0}")]
    InvalidProof(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
