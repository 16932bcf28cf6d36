//! Compute-result event log
//!
//! Append-only, one entry per successful submission, immutable once
//! emitted. The event is the submitter's read-after-write channel: it
//! carries the fresh result handle and the encrypted comparison
//! outcome, both reachable through the private decrypt path.

use cauldron_fhe::EncryptedValue;
use cauldron_wallet::Identity;
use serde::{Deserialize, Serialize};

/// Emitted once per successful submission
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComputeResult {
    /// Monotonic per-log sequence number
    pub sequence: u64,
    /// Submitting identity
    pub submitter: Identity,
    /// Fresh encrypted score (euint16)
    pub result: EncryptedValue,
    /// Encrypted boolean: this score beat the stored best
    pub is_highest: EncryptedValue,
}

/// Append-only log of compute results
#[derive(Default)]
pub struct EventLog {
    events: Vec<ComputeResult>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, assigning the next sequence number
    pub fn append(
        &mut self,
        submitter: Identity,
        result: EncryptedValue,
        is_highest: EncryptedValue,
    ) -> &ComputeResult {
        let sequence = self.events.len() as u64;
        self.events.push(ComputeResult {
            sequence,
            submitter,
            result,
            is_highest,
        });
        // Just pushed, the log is never empty here
        &self.events[sequence as usize]
    }

    /// All events in emission order
    pub fn iter(&self) -> impl Iterator<Item = &ComputeResult> {
        self.events.iter()
    }

    /// Number of emitted events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether any event has been emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
