//! Homomorphic backend capability interface
//!
//! The backend contract the core relies on:
//! - every operation is deterministic over its ciphertext inputs,
//! - `select` is a data-independent circuit (both arms are always
//!   evaluated, the execution path never depends on the condition),
//! - `add` saturates at the output class bound, it never wraps,
//! - decryption primitives perform no authorization; callers gate them.

use crate::handle::{EncryptedValue, FheType, Handle};
use crate::FheResult;
use serde::{Deserialize, Serialize};

/// Attestation binding a set of encrypted inputs to one
/// (contract address, caller identity) pair
#[derive(Clone, Serialize, Deserialize)]
pub struct InputProof {
    bytes: Vec<u8>,
}

impl InputProof {
    /// Create from raw proof bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the raw proof bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for InputProof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputProof")
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Encrypted inputs submitted atomically with their binding proof
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputBundle {
    /// Encrypted input values, in submission order
    pub inputs: Vec<EncryptedValue>,
    /// Proof binding every input to (contract, caller)
    pub proof: InputProof,
}

/// Capability interface over the external homomorphic encryption service
pub trait FheBackend {
    /// Encrypt plaintext inputs for (contract, caller), returning handles
    /// plus the binding proof. This is the client-side primitive; the
    /// core only ever consumes its output.
    fn create_input(
        &self,
        contract: &[u8; 32],
        caller: &[u8; 32],
        plaintexts: &[u8],
    ) -> FheResult<InputBundle>;

    /// Verify that a bundle's proof attests every input was encrypted
    /// for exactly this (contract, caller) pair and that each declared
    /// type tag matches the ciphertext. No side effects.
    fn verify_input(
        &self,
        bundle: &InputBundle,
        contract: &[u8; 32],
        caller: &[u8; 32],
    ) -> FheResult<()>;

    /// Encrypt a publicly-known constant (trivial ciphertext)
    fn trivial_encrypt(&self, value: u64, ty: FheType) -> FheResult<EncryptedValue>;

    /// Homomorphic addition of two values of the same numeric class,
    /// saturating at the class bound
    fn add(&self, a: &EncryptedValue, b: &EncryptedValue) -> FheResult<EncryptedValue>;

    /// Homomorphic equality against a plaintext scalar, returns an ebool
    fn eq_scalar(&self, a: &EncryptedValue, scalar: u64) -> FheResult<EncryptedValue>;

    /// Homomorphic strict greater-than, returns an ebool
    fn gt(&self, a: &EncryptedValue, b: &EncryptedValue) -> FheResult<EncryptedValue>;

    /// Oblivious select: `if cond then if_true else if_false` as a
    /// data-independent circuit over same-class arms
    fn select(
        &self,
        cond: &EncryptedValue,
        if_true: &EncryptedValue,
        if_false: &EncryptedValue,
    ) -> FheResult<EncryptedValue>;

    /// Decrypt a single handle for an authorized requester.
    /// Authorization is the caller's responsibility.
    fn user_decrypt(&self, handle: &Handle) -> FheResult<u64>;

    /// Decrypt a batch of handles in one call, results aligned by index.
    /// Authorization is the caller's responsibility.
    fn public_decrypt(&self, handles: &[Handle]) -> FheResult<Vec<u64>>;
}
