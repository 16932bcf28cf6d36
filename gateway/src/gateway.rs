//! Two-tier decryption gateway
//!
//! Both protocols delegate the actual decryption to the external
//! backend; everything enforced here is authorization. Ledger time is
//! passed in by the environment, never read from a wall clock, so the
//! checks are deterministic within a serialized call.

use crate::grants::AccessGrantManager;
use crate::{GatewayError, GatewayResult};
use cauldron_board::LeaderboardStore;
use cauldron_fhe::{FheBackend, Handle};
use cauldron_wallet::SignedDecryptRequest;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fronts the external decryption service for one contract instance
pub struct DecryptionGateway {
    contract: [u8; 32],
}

impl DecryptionGateway {
    /// Create a gateway for one contract address
    pub fn new(contract: [u8; 32]) -> Self {
        Self { contract }
    }

    /// Authenticated single-handle decryption.
    ///
    /// Order of checks: statement signature and identity binding, grant
    /// existence for (handle, requester), grant and statement windows
    /// against `now`, statement contract set against this gateway's
    /// address and the grant's target. Only then is the backend asked
    /// to decrypt.
    pub fn user_decrypt<B: FheBackend>(
        &self,
        backend: &B,
        grants: &AccessGrantManager,
        request: &SignedDecryptRequest,
        now: u64,
    ) -> GatewayResult<u64> {
        request.verify().map_err(|err| {
            warn!(requester = %request.requester, "decrypt request signature rejected");
            GatewayError::SignatureMismatch(err.to_string())
        })?;

        let statement = &request.statement;
        let grant = grants
            .lookup(&statement.handle, &request.requester)
            .ok_or(GatewayError::UnauthorizedDecryption)?;

        if !grant.window_contains(now) || !statement.window_contains(now) {
            return Err(GatewayError::WindowExpired);
        }

        if !statement.covers_contract(&self.contract) || !statement.covers_contract(&grant.contract)
        {
            return Err(GatewayError::SignatureMismatch(
                "statement does not declare this contract".into(),
            ));
        }

        debug!(requester = %request.requester, handle = ?statement.handle, "user decrypt authorized");
        Ok(backend.user_decrypt(&statement.handle)?)
    }

    /// Public batch decryption of live leaderboard entries.
    ///
    /// The only authorization is liveness: every handle must currently
    /// be a stored best score. A stale or foreign handle fails the
    /// whole batch with `UnknownHandle`.
    pub fn public_decrypt<B: FheBackend>(
        &self,
        backend: &B,
        store: &LeaderboardStore,
        handles: &[Handle],
    ) -> GatewayResult<HashMap<Handle, u64>> {
        for handle in handles {
            if !store.is_live_handle(handle) {
                return Err(GatewayError::UnknownHandle(handle.to_hex()));
            }
        }

        // One call to the external service for the whole batch
        let plaintexts = backend.public_decrypt(handles)?;
        debug!(count = handles.len(), "public batch decrypted");
        Ok(handles.iter().copied().zip(plaintexts).collect())
    }

    /// The contract address this gateway fronts
    pub fn contract(&self) -> &[u8; 32] {
        &self.contract
    }
}
