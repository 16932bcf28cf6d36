//! CAULDRON Wallet Layer
//!
//! Player identities and the typed-data statement a player signs to
//! authorize decryption of a fresh result. The wallet produces an
//! authenticated identity plus a signature over a canonical statement;
//! verification lives here, enforcement lives in the gateway.

pub mod errors;
pub mod keypair;
pub mod statement;

pub use errors::WalletError;
pub use keypair::{Identity, PlayerKeypair};
pub use statement::{DecryptStatement, SignedDecryptRequest};

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;
