//! CAULDRON Gateway Layer
//!
//! Authorization in front of the external decryption service:
//! - `grants`: private, time-boxed decrypt rights over fresh results
//! - `gateway`: the authenticated-decrypt and public-batch-decrypt
//!   protocols
//!
//! The gateway never decrypts anything itself; it decides whether the
//! backend may be asked to.

pub mod errors;
pub mod gateway;
pub mod grants;

pub use errors::GatewayError;
pub use gateway::DecryptionGateway;
pub use grants::{AccessGrantManager, DecryptGrant, DEFAULT_GRANT_WINDOW_SECS};

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
