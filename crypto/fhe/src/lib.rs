//! CAULDRON FHE Layer
//!
//! Ciphertext handles and the homomorphic backend capability interface.
//! The core never sees plaintext: every encrypted value is an opaque
//! handle managed by a backend implementing [`FheBackend`].
//!
//! # Key Features:
//! - Opaque ciphertext handles with bit-width type tags
//! - Input bundles bound to a (contract, caller) pair by proof
//! - Homomorphic add, equality, comparison and oblivious select
//! - User decryption and public batch decryption primitives
//!
//! # Architecture:
//! - `FheBackend`: capability trait carrying the full backend contract
//! - `Coprocessor`: in-process backend used by tests; a production
//!   TFHE backend substitutes behind the same trait

pub mod errors;
pub mod handle;
pub mod backend;
pub mod coprocessor;

pub use errors::FheError;
pub use handle::{EncryptedValue, FheType, Handle};
pub use backend::{FheBackend, InputBundle, InputProof};
pub use coprocessor::Coprocessor;

/// Result type for FHE operations
pub type FheResult<T> = Result<T, FheError>;
