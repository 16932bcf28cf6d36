//! Encrypted leaderboard store
//!
//! One record per identity, created on first submission and mutated in
//! place, never deleted. A first submission always wins, whatever the
//! score; thereafter the update is oblivious: the new slot value is
//! `select(candidate > incumbent, candidate, incumbent)` and the slot
//! is rewritten on every submission, winning or not, so neither control
//! flow nor write-presence reveals the comparison outcome. Enumeration
//! is in first-submission order.

use crate::BoardResult;
use cauldron_fhe::{EncryptedValue, FheBackend, FheType, Handle};
use cauldron_wallet::Identity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Per-player leaderboard record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player identity
    pub identity: Identity,
    /// Encrypted best score (euint16)
    pub best_score: EncryptedValue,
    /// Position in first-submission order
    pub first_seen: u64,
}

/// Result of one conditional update
#[derive(Clone, Debug)]
pub struct UpdateOutcome {
    /// The slot value after the update (select output)
    pub new_best: EncryptedValue,
    /// Encrypted boolean: candidate was strictly higher
    pub is_highest: EncryptedValue,
}

/// Insertion-ordered, identity-keyed store of encrypted best scores
#[derive(Default)]
pub struct LeaderboardStore {
    records: HashMap<Identity, PlayerRecord>,
    order: Vec<Identity>,
}

impl LeaderboardStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Conditionally fold a candidate score into a player's record.
    ///
    /// Policy: strict greater-than; ties keep the incumbent. A first
    /// submission creates the record and always wins, even with a score
    /// of zero; record existence is public state, so taking that branch
    /// reveals nothing about any score. All fallible work happens
    /// before the write; once the backend calls succeed the write
    /// cannot fail.
    pub fn update<B: FheBackend>(
        &mut self,
        backend: &B,
        identity: Identity,
        candidate: &EncryptedValue,
    ) -> BoardResult<UpdateOutcome> {
        let incumbent = self.records.get(&identity).map(|record| record.best_score);

        let (new_best, is_highest) = match incumbent {
            Some(incumbent) => {
                let is_highest = backend.gt(candidate, &incumbent)?;
                let new_best = backend.select(&is_highest, candidate, &incumbent)?;
                (new_best, is_highest)
            }
            None => (*candidate, backend.trivial_encrypt(1, FheType::Ebool)?),
        };

        match self.records.get_mut(&identity) {
            Some(record) => {
                // Unconditional rewrite, even when the incumbent won
                record.best_score = new_best;
            }
            None => {
                let first_seen = self.order.len() as u64;
                self.order.push(identity);
                self.records.insert(
                    identity,
                    PlayerRecord {
                        identity,
                        best_score: new_best,
                        first_seen,
                    },
                );
            }
        }

        debug!(player = %identity, "best score slot rewritten");
        Ok(UpdateOutcome { new_best, is_highest })
    }

    /// Get a player's record
    pub fn get(&self, identity: &Identity) -> Option<&PlayerRecord> {
        self.records.get(identity)
    }

    /// Enumerate `(identity, best_score)` in first-submission order.
    /// This is the only read path exposed to public decryption.
    pub fn list_all(&self) -> Vec<(Identity, EncryptedValue)> {
        self.order
            .iter()
            .filter_map(|identity| {
                self.records
                    .get(identity)
                    .map(|record| (record.identity, record.best_score))
            })
            .collect()
    }

    /// Whether a handle is a currently stored best score
    pub fn is_live_handle(&self, handle: &Handle) -> bool {
        self.records
            .values()
            .any(|record| record.best_score.handle == *handle)
    }

    /// Number of players on the board
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the board is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
