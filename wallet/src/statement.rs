//! Typed decrypt-request statement
//!
//! A player authorizes decryption of one handle by signing a statement
//! that binds a fresh response key, the handle, the contract addresses
//! the grant may target and a validity window. Binding the statement to
//! the requester prevents replay by another identity or against another
//! contract.

use crate::keypair::{verify_signature, Identity};
use crate::{WalletError, WalletResult};
use cauldron_fhe::Handle;
use serde::{Deserialize, Serialize};

const STATEMENT_DOMAIN: &[u8] = b"cauldron_decrypt_statement";

/// The statement a requester signs to authorize one decryption
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecryptStatement {
    /// Fresh response keypair's public half; the decryption result is
    /// encrypted to this key by the external service
    pub response_key: [u8; 32],
    /// Ciphertext handle the requester wants decrypted
    pub handle: Handle,
    /// Contract addresses this authorization may be used against
    pub contracts: Vec<[u8; 32]>,
    /// Start of the validity window (ledger time, seconds)
    pub valid_from: u64,
    /// End of the validity window (ledger time, seconds)
    pub valid_until: u64,
}

impl DecryptStatement {
    /// Canonical, domain-separated digest of the statement
    pub fn digest(&self) -> WalletResult<[u8; 32]> {
        let encoded = bincode::serialize(self)
            .map_err(|e| WalletError::SerializationError(e.to_string()))?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(STATEMENT_DOMAIN);
        hasher.update(&encoded);
        Ok(*hasher.finalize().as_bytes())
    }

    /// Whether `now` falls inside the validity window
    pub fn window_contains(&self, now: u64) -> bool {
        self.valid_from <= now && now <= self.valid_until
    }

    /// Whether the statement declares this contract address
    pub fn covers_contract(&self, contract: &[u8; 32]) -> bool {
        self.contracts.iter().any(|c| c == contract)
    }
}

/// A statement together with the requester's identity and signature
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignedDecryptRequest {
    /// The signed statement
    pub statement: DecryptStatement,
    /// Identity claiming this request
    pub requester: Identity,
    /// Ed25519 verifying key of the requester
    pub verifying_key: [u8; 32],
    /// Ed25519 signature over the statement digest
    pub signature: Vec<u8>,
}

impl SignedDecryptRequest {
    /// Verify the signature and that the signing key matches the
    /// claimed requester identity
    pub fn verify(&self) -> WalletResult<()> {
        let digest = self.statement.digest()?;
        let key = verify_signature(&self.verifying_key, &digest, &self.signature)?;
        if Identity::from_verifying_key(&key) != self.requester {
            return Err(WalletError::IdentityMismatch);
        }
        Ok(())
    }
}
