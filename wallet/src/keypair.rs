//! Player keypair and identity

use crate::statement::{DecryptStatement, SignedDecryptRequest};
use crate::{WalletError, WalletResult};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

const IDENTITY_DOMAIN: &[u8] = b"cauldron_identity";

/// A player identity derived from an Ed25519 verifying key
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Derive an identity from a verifying key
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(IDENTITY_DOMAIN);
        hasher.update(key.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({}…)", hex::encode(&self.0[..8]))
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

/// Player signing keypair
pub struct PlayerKeypair {
    signing: SigningKey,
}

impl PlayerKeypair {
    /// Generate a new keypair
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create from a seed (deterministic, for tests and key recovery)
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing: SigningKey::from_bytes(&seed),
        }
    }

    /// The player's identity
    pub fn identity(&self) -> Identity {
        Identity::from_verifying_key(&self.signing.verifying_key())
    }

    /// The player's verifying key
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }

    /// Sign a decrypt statement, producing a complete request
    pub fn sign_statement(&self, statement: DecryptStatement) -> WalletResult<SignedDecryptRequest> {
        let digest = statement.digest()?;
        let signature = self.signing.sign(&digest);
        Ok(SignedDecryptRequest {
            statement,
            requester: self.identity(),
            verifying_key: self.signing.verifying_key().to_bytes(),
            signature: signature.to_bytes().to_vec(),
        })
    }
}

/// Verify a signature over a statement digest
pub(crate) fn verify_signature(
    verifying_key: &[u8; 32],
    digest: &[u8; 32],
    signature: &[u8],
) -> WalletResult<VerifyingKey> {
    let key = VerifyingKey::from_bytes(verifying_key)
        .map_err(|e| WalletError::InvalidKey(e.to_string()))?;
    let signature = Signature::from_slice(signature)
        .map_err(|e| WalletError::InvalidSignature(e.to_string()))?;
    key.verify(digest, &signature)
        .map_err(|e| WalletError::InvalidSignature(e.to_string()))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_stable() {
        let keypair = PlayerKeypair::from_seed([1u8; 32]);
        assert_eq!(keypair.identity(), keypair.identity());
    }

    #[test]
    fn test_distinct_keys_distinct_identities() {
        let a = PlayerKeypair::from_seed([1u8; 32]);
        let b = PlayerKeypair::from_seed([2u8; 32]);
        assert_ne!(a.identity(), b.identity());
    }
}
