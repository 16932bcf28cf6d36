//! CAULDRON Board Layer
//!
//! The scoring-and-leaderboard state machine:
//! - `validator`: shape and proof checks on submitted bundles
//! - `scoring`: configurable table and homomorphic aggregation
//! - `store`: per-player encrypted best score with oblivious updates
//! - `events`: append-only compute-result log
//!
//! Everything operates on ciphertext handles; no plaintext score ever
//! exists in this crate's state.

pub mod errors;
pub mod events;
pub mod scoring;
pub mod store;
pub mod validator;

pub use errors::BoardError;
pub use events::{ComputeResult, EventLog};
pub use scoring::{ScoreAggregator, ScoringTable};
pub use store::{LeaderboardStore, PlayerRecord, UpdateOutcome};
pub use validator::{CiphertextValidator, ValidatedBundle, BREW_SIZE};

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
