//! Homomorphic brew scoring
//!
//! The score of a brew is the sum of the hidden per-potion values of its
//! five picks. The per-pick value is resolved obliviously: for every
//! table entry the circuit computes `eq_scalar(pick, id)` and folds the
//! entry's value in with a select, so the same circuit runs for every
//! pick regardless of which potion it names. Unknown ids contribute
//! zero. Aggregation is order-insensitive (a sum) and the output class
//! is the 16-bit domain, validated at table construction so no legal
//! brew can overflow it.

use crate::validator::{ValidatedBundle, BREW_SIZE};
use crate::{BoardError, BoardResult};
use cauldron_fhe::{EncryptedValue, FheBackend, FheType};
use std::collections::BTreeMap;
use tracing::debug;

/// Hidden per-potion value table, id -> value
#[derive(Clone, Debug)]
pub struct ScoringTable {
    entries: BTreeMap<u8, u16>,
}

impl ScoringTable {
    /// Create a table, rejecting one whose five most valuable picks
    /// could overflow the 16-bit output class
    pub fn new(entries: BTreeMap<u8, u16>) -> BoardResult<Self> {
        let max = entries.values().copied().max().unwrap_or(0) as u64;
        if max * BREW_SIZE as u64 > FheType::Euint16.max_value() {
            return Err(BoardError::AggregationOverflow);
        }
        Ok(Self { entries })
    }

    /// The standard eight-potion table. Any five-pick brew of known
    /// potions scores within [300, 1000]. Phantom Essence outranks
    /// Lightning Serum despite the lower id.
    pub fn standard() -> Self {
        let entries = BTreeMap::from([
            (1, 60),  // Health Elixir
            (2, 68),  // Mana Draught
            (3, 92),  // Strength Brew
            (4, 100), // Toxic Vial
            (5, 140), // Phantom Essence
            (6, 132), // Lightning Serum
            (7, 180), // Frost Tincture
            (8, 200), // Inferno Catalyst
        ]);
        // Bound holds by construction: 5 * 200 < u16::MAX
        Self { entries }
    }

    /// Number of potions in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score any brew of known potions can reach
    pub fn max_brew_score(&self) -> u64 {
        self.entries.values().copied().max().unwrap_or(0) as u64 * BREW_SIZE as u64
    }

    /// Lowest score a brew of five known potions can reach
    pub fn min_brew_score(&self) -> u64 {
        self.entries.values().copied().min().unwrap_or(0) as u64 * BREW_SIZE as u64
    }

    /// Plaintext scoring of known ids, for tests and callers that hold
    /// the cleartext picks anyway
    pub fn score_plain(&self, picks: &[u8; BREW_SIZE]) -> u64 {
        picks
            .iter()
            .map(|id| self.entries.get(id).copied().unwrap_or(0) as u64)
            .sum()
    }

    fn iter(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        self.entries.iter().map(|(&id, &value)| (id, value))
    }
}

/// Aggregates five validated inputs into one encrypted score
pub struct ScoreAggregator {
    table: ScoringTable,
}

impl ScoreAggregator {
    /// Create an aggregator over a scoring table
    pub fn new(table: ScoringTable) -> Self {
        Self { table }
    }

    /// The table in use
    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Homomorphically score a validated brew, producing one euint16.
    /// The plaintext picks never exist in this component's state.
    pub fn aggregate<B: FheBackend>(
        &self,
        backend: &B,
        bundle: &ValidatedBundle,
    ) -> BoardResult<EncryptedValue> {
        let mut total = backend.trivial_encrypt(0, FheType::Euint16)?;

        for pick in bundle.inputs() {
            let mut item_value = backend.trivial_encrypt(0, FheType::Euint16)?;
            for (id, value) in self.table.iter() {
                let matches = backend.eq_scalar(pick, id as u64)?;
                let entry = backend.trivial_encrypt(value as u64, FheType::Euint16)?;
                item_value = backend.select(&matches, &entry, &item_value)?;
            }
            total = backend.add(&total, &item_value)?;
        }

        debug!(score_handle = ?total.handle, "brew aggregated");
        Ok(total)
    }
}
