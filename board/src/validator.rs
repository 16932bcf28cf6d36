//! Submission bundle validation
//!
//! A bundle is accepted only if it carries exactly [`BREW_SIZE`] inputs,
//! every input declares the 8-bit class, and the backend confirms the
//! proof binds each handle to (this contract, this caller). Proof
//! binding is what stops a bundle recorded against one deployment from
//! being replayed against another.

use crate::{BoardError, BoardResult};
use cauldron_fhe::{EncryptedValue, FheBackend, FheError, FheType, InputBundle};
use cauldron_wallet::Identity;
use tracing::debug;

/// Number of potion picks in one brew
pub const BREW_SIZE: usize = 5;

/// A bundle that passed shape, tag and proof checks.
///
/// Constructed only by [`CiphertextValidator::validate`]; downstream
/// stages take this type so an unvalidated bundle cannot reach them.
#[derive(Clone, Debug)]
pub struct ValidatedBundle {
    inputs: [EncryptedValue; BREW_SIZE],
}

impl ValidatedBundle {
    /// The validated inputs, in submission order
    pub fn inputs(&self) -> &[EncryptedValue; BREW_SIZE] {
        &self.inputs
    }
}

/// Validates submission bundles against a contract instance
pub struct CiphertextValidator {
    contract: [u8; 32],
}

impl CiphertextValidator {
    /// Create a validator for one contract address
    pub fn new(contract: [u8; 32]) -> Self {
        Self { contract }
    }

    /// The contract address bundles must be bound to
    pub fn contract(&self) -> &[u8; 32] {
        &self.contract
    }

    /// Validate a bundle submitted by `caller`. No side effects on
    /// failure; on success the bundle passes through unchanged.
    pub fn validate<B: FheBackend>(
        &self,
        backend: &B,
        bundle: &InputBundle,
        caller: &Identity,
    ) -> BoardResult<ValidatedBundle> {
        if bundle.inputs.len() != BREW_SIZE {
            return Err(BoardError::InvalidBundleShape {
                expected: BREW_SIZE,
                got: bundle.inputs.len(),
            });
        }

        for (index, input) in bundle.inputs.iter().enumerate() {
            if input.ty != FheType::Euint8 {
                return Err(BoardError::InvalidProof(format!(
                    "input {} declares {:?}, expected Euint8",
                    index, input.ty
                )));
            }
        }

        backend
            .verify_input(bundle, &self.contract, caller.as_bytes())
            .map_err(|err| match err {
                FheError::InvalidProof(msg) => BoardError::InvalidProof(msg),
                FheError::TypeMismatch { expected, got } => BoardError::InvalidProof(format!(
                    "type tag mismatch: expected {:?}, got {:?}",
                    expected, got
                )),
                other => BoardError::Fhe(other),
            })?;

        debug!(caller = %caller, "input bundle validated");

        match bundle.inputs.clone().try_into() {
            Ok(inputs) => Ok(ValidatedBundle { inputs }),
            Err(_) => Err(BoardError::InvalidBundleShape {
                expected: BREW_SIZE,
                got: bundle.inputs.len(),
            }),
        }
    }
}
