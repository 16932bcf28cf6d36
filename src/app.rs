//! Leaderboard application integration
//!
//! Ties together bundle validation, homomorphic scoring, the encrypted
//! leaderboard store, grant issuance and the decryption gateway into a
//! single application instance.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        BrewApp                           │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌────────────────┐   │
//! │  │ Ciphertext │──▶│   Score    │──▶│  Leaderboard   │   │
//! │  │ Validator  │   │ Aggregator │   │     Store      │   │
//! │  └────────────┘   └────────────┘   └───────┬────────┘   │
//! │                                            │             │
//! │  ┌────────────┐   ┌────────────┐   ┌──────▼────────┐    │
//! │  │  Event Log │◀──│   Grants   │◀──│  Decryption   │    │
//! │  │            │   │            │   │   Gateway     │    │
//! │  └────────────┘   └────────────┘   └───────────────┘    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The environment serializes submissions, so `compute` takes `&mut
//! self` and runs to completion before the next call. All fallible work
//! in a submission happens before the first state mutation; a rejected
//! submission leaves the board, the grants and the event log untouched.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use cauldron_board::{
    BoardError, CiphertextValidator, ComputeResult, EventLog, LeaderboardStore, ScoreAggregator,
    ScoringTable,
};
use cauldron_fhe::{EncryptedValue, FheBackend, Handle, InputBundle};
use cauldron_gateway::{
    AccessGrantManager, DecryptionGateway, GatewayError, DEFAULT_GRANT_WINDOW_SECS,
};
use cauldron_wallet::{Identity, SignedDecryptRequest};

/// Errors surfaced by the application layer
#[derive(Debug, Error)]
pub enum BrewError {
    /// Submission rejected before any state change
    #[error("Submission rejected: {0}")]
    Board(#[from] BoardError),
    /// Decryption denied
    #[error("Decryption denied: {0}")]
    Gateway(#[from] GatewayError),
}

/// Result type for application operations
pub type BrewResult<T> = Result<T, BrewError>;

/// Application configuration
#[derive(Clone, Debug)]
pub struct BrewConfig {
    /// Contract address this instance answers for
    pub address: [u8; 32],
    /// Hidden per-potion value table
    pub table: ScoringTable,
    /// Private grant validity window (ledger seconds)
    pub grant_window_secs: u64,
}

impl BrewConfig {
    /// Standard configuration for a contract address
    pub fn new(address: [u8; 32]) -> Self {
        Self {
            address,
            table: ScoringTable::standard(),
            grant_window_secs: DEFAULT_GRANT_WINDOW_SECS,
        }
    }

    /// Replace the scoring table
    pub fn with_table(mut self, table: ScoringTable) -> Self {
        self.table = table;
        self
    }

    /// Replace the grant window
    pub fn with_grant_window(mut self, secs: u64) -> Self {
        self.grant_window_secs = secs;
        self
    }
}

/// The confidential leaderboard application
pub struct BrewApp<B: FheBackend> {
    address: [u8; 32],
    backend: Arc<B>,
    validator: CiphertextValidator,
    aggregator: ScoreAggregator,
    store: LeaderboardStore,
    grants: AccessGrantManager,
    events: EventLog,
    gateway: DecryptionGateway,
}

impl<B: FheBackend> BrewApp<B> {
    /// Create an application instance over a backend
    pub fn new(config: BrewConfig, backend: Arc<B>) -> Self {
        Self {
            address: config.address,
            validator: CiphertextValidator::new(config.address),
            aggregator: ScoreAggregator::new(config.table),
            store: LeaderboardStore::new(),
            grants: AccessGrantManager::with_window(config.grant_window_secs),
            events: EventLog::new(),
            gateway: DecryptionGateway::new(config.address),
            backend,
        }
    }

    /// The contract address this instance answers for
    pub fn address(&self) -> &[u8; 32] {
        &self.address
    }

    /// Process one brew submission at ledger time `now`.
    ///
    /// Validates the bundle, scores it homomorphically, folds the score
    /// into the caller's record, issues private decrypt grants over the
    /// fresh result and the encrypted comparison flag, and emits the
    /// compute event. Any failure happens before the first mutation.
    pub fn compute(
        &mut self,
        caller: Identity,
        bundle: &InputBundle,
        now: u64,
    ) -> BrewResult<ComputeResult> {
        let validated = self.validator.validate(self.backend.as_ref(), bundle, &caller)?;
        let score = self.aggregator.aggregate(self.backend.as_ref(), &validated)?;
        let outcome = self.store.update(self.backend.as_ref(), caller, &score)?;

        self.grants.issue(score.handle, caller, self.address, now);
        self.grants
            .issue(outcome.is_highest.handle, caller, self.address, now);

        let event = self.events.append(caller, score, outcome.is_highest).clone();
        info!(
            submitter = %caller,
            sequence = event.sequence,
            "brew scored and folded into the board"
        );
        Ok(event)
    }

    /// Enumerate every player's encrypted best score, parallel vectors
    /// aligned by index, in first-submission order
    pub fn all_highest_scores(&self) -> (Vec<Identity>, Vec<EncryptedValue>) {
        self.store.list_all().into_iter().unzip()
    }

    /// Authenticated decryption of a granted handle
    pub fn user_decrypt(&self, request: &SignedDecryptRequest, now: u64) -> BrewResult<u64> {
        Ok(self
            .gateway
            .user_decrypt(self.backend.as_ref(), &self.grants, request, now)?)
    }

    /// Public batch decryption of stored best scores
    pub fn public_decrypt(&self, handles: &[Handle]) -> BrewResult<HashMap<Handle, u64>> {
        Ok(self
            .gateway
            .public_decrypt(self.backend.as_ref(), &self.store, handles)?)
    }

    /// The leaderboard store (read-only)
    pub fn board(&self) -> &LeaderboardStore {
        &self.store
    }

    /// The compute-event log (read-only)
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Number of players on the board
    pub fn player_count(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cauldron_fhe::Coprocessor;
    use cauldron_wallet::PlayerKeypair;

    const ADDRESS: [u8; 32] = [7u8; 32];

    fn app() -> BrewApp<Coprocessor> {
        BrewApp::new(
            BrewConfig::new(ADDRESS),
            Arc::new(Coprocessor::with_secret([1u8; 32])),
        )
    }

    fn submit(app: &mut BrewApp<Coprocessor>, player: &PlayerKeypair, picks: &[u8], now: u64) -> BrewResult<ComputeResult> {
        let bundle = app
            .backend
            .create_input(&ADDRESS, player.identity().as_bytes(), picks)
            .unwrap();
        app.compute(player.identity(), &bundle, now)
    }

    #[test]
    fn test_standard_config_uses_default_grant_window() {
        let config = BrewConfig::new(ADDRESS);
        assert_eq!(config.grant_window_secs, DEFAULT_GRANT_WINDOW_SECS);
    }

    #[test]
    fn test_compute_emits_event_and_grants() {
        let mut app = app();
        let player = PlayerKeypair::from_seed([5u8; 32]);

        let event = submit(&mut app, &player, &[1, 2, 3, 4, 5], 100).unwrap();
        assert_eq!(event.sequence, 0);
        assert_eq!(event.submitter, player.identity());
        assert_eq!(app.player_count(), 1);
        assert_eq!(app.events().len(), 1);
    }

    #[test]
    fn test_rejected_submission_leaves_no_state() {
        let mut app = app();
        let player = PlayerKeypair::from_seed([5u8; 32]);

        let err = submit(&mut app, &player, &[1, 2, 3], 100).unwrap_err();
        assert!(matches!(
            err,
            BrewError::Board(BoardError::InvalidBundleShape { expected: 5, got: 3 })
        ));
        assert_eq!(app.player_count(), 0);
        assert!(app.events().is_empty());
    }

    #[test]
    fn test_all_highest_scores_parallel_vectors() {
        let mut app = app();
        let alice = PlayerKeypair::from_seed([5u8; 32]);
        let bob = PlayerKeypair::from_seed([6u8; 32]);

        submit(&mut app, &alice, &[1, 1, 1, 1, 1], 100).unwrap();
        submit(&mut app, &bob, &[8, 8, 8, 8, 8], 110).unwrap();

        let (players, scores) = app.all_highest_scores();
        assert_eq!(players.len(), scores.len());
        assert_eq!(players, vec![alice.identity(), bob.identity()]);
    }
}
