//! Decrypt-permission grants
//!
//! A private grant authorizes one identity to decrypt one fresh result
//! handle for a bounded window. Grants are issued at submission time,
//! are never renewable, and never cover stored best scores; those are
//! reached only through the public path, which needs no grant record.

use crate::{GatewayError, GatewayResult};
use cauldron_fhe::Handle;
use cauldron_wallet::Identity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Default grant validity: ten days of ledger time, in seconds
pub const DEFAULT_GRANT_WINDOW_SECS: u64 = 10 * 24 * 60 * 60;

/// A private, time-boxed decrypt right
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecryptGrant {
    /// Handle the grant covers
    pub handle: Handle,
    /// Identity allowed to decrypt
    pub grantee: Identity,
    /// Contract instance the handle belongs to
    pub contract: [u8; 32],
    /// Start of validity (ledger time, seconds)
    pub valid_from: u64,
    /// End of validity (ledger time, seconds)
    pub valid_until: u64,
}

impl DecryptGrant {
    /// Whether `now` falls inside the grant window
    pub fn window_contains(&self, now: u64) -> bool {
        self.valid_from <= now && now <= self.valid_until
    }
}

/// Issues and checks private decrypt grants
pub struct AccessGrantManager {
    grants: HashMap<(Handle, Identity), DecryptGrant>,
    window_secs: u64,
}

impl AccessGrantManager {
    /// Create a manager with the default grant window
    pub fn new() -> Self {
        Self::with_window(DEFAULT_GRANT_WINDOW_SECS)
    }

    /// Create a manager with a custom grant window
    pub fn with_window(window_secs: u64) -> Self {
        Self {
            grants: HashMap::new(),
            window_secs,
        }
    }

    /// Issue a grant over `handle` to `grantee`, valid from `now`.
    /// Grants are not renewable: re-issuing for the same pair keeps the
    /// original window.
    pub fn issue(
        &mut self,
        handle: Handle,
        grantee: Identity,
        contract: [u8; 32],
        now: u64,
    ) -> &DecryptGrant {
        let window_secs = self.window_secs;
        let grant = self
            .grants
            .entry((handle, grantee))
            .or_insert_with(|| DecryptGrant {
                handle,
                grantee,
                contract,
                valid_from: now,
                valid_until: now.saturating_add(window_secs),
            });
        debug!(grantee = %grantee, handle = ?handle, "decrypt grant issued");
        grant
    }

    /// Look up the grant for a (handle, grantee) pair
    pub fn lookup(&self, handle: &Handle, grantee: &Identity) -> Option<&DecryptGrant> {
        self.grants.get(&(*handle, *grantee))
    }

    /// Authorize a read: the grant must exist and its window must
    /// contain `now`
    pub fn authorize(
        &self,
        handle: &Handle,
        grantee: &Identity,
        now: u64,
    ) -> GatewayResult<&DecryptGrant> {
        let grant = self
            .lookup(handle, grantee)
            .ok_or(GatewayError::UnauthorizedDecryption)?;
        if !grant.window_contains(now) {
            return Err(GatewayError::GrantExpired);
        }
        Ok(grant)
    }

    /// Number of outstanding grants
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Whether any grant exists
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl Default for AccessGrantManager {
    fn default() -> Self {
        Self::new()
    }
}
