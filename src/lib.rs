//! CAULDRON: Confidential Potion-Brew Leaderboard
//!
//! This is the root crate that re-exports all CAULDRON components for
//! integration testing and provides the assembled application.
//!
//! ## Architecture Overview
//!
//! CAULDRON keeps a competitive leaderboard without ever holding a
//! plaintext score:
//!
//! - **Opaque Ciphertexts**: every score is a backend-owned handle
//! - **Bound Inputs**: submissions carry a proof binding them to one
//!   (contract, caller) pair, defeating cross-deployment replay
//! - **Oblivious Updates**: best-score slots are rewritten on every
//!   submission through a data-independent select
//! - **Two-Tier Decryption**: signed, time-boxed private grants for
//!   fresh results; a public batch path for stored board entries
//!
//! ## Crate Organization
//!
//! - `cauldron-fhe`: ciphertext handles and the backend capability trait
//! - `cauldron-wallet`: player identities and signed decrypt statements
//! - `cauldron-board`: validation, scoring, the store and the event log
//! - `cauldron-gateway`: decrypt grants and the decryption gateway

pub mod app;

// Re-export all crates for integration testing
pub use cauldron_board as board;
pub use cauldron_fhe as fhe;
pub use cauldron_gateway as gateway;
pub use cauldron_wallet as wallet;

/// CAULDRON protocol version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::{BrewApp, BrewConfig, BrewError, BrewResult};
    pub use cauldron_board::{
        ComputeResult, LeaderboardStore, ScoreAggregator, ScoringTable, BREW_SIZE,
    };
    pub use cauldron_fhe::{
        Coprocessor, EncryptedValue, FheBackend, FheType, Handle, InputBundle,
    };
    pub use cauldron_gateway::{AccessGrantManager, DecryptGrant, DecryptionGateway};
    pub use cauldron_wallet::{DecryptStatement, Identity, PlayerKeypair, SignedDecryptRequest};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
