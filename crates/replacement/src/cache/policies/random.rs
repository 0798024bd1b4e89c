//! Random Replacement Policy.
//!
//! This policy evicts a random cache line from the set. It uses a xorshift
//! register to generate pseudo-random numbers, avoiding the overhead of a
//! general-purpose RNG, and carries no per-line state.

use super::{Event, ReplacementPolicy};
use crate::cache::lines::LineStore;
use crate::cache::{Fill, Victim};
use crate::common::{AccessInfo, Xorshift64};

/// Random Policy state.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    /// Number of ways in the cache.
    ways: usize,
    /// Internal state for the pseudo-random number generator.
    rng: Xorshift64,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the cache.
    /// * `seed` - Generator seed; equal seeds give equal victim sequences.
    pub const fn new(ways: usize, seed: u64) -> Self {
        Self {
            ways,
            rng: Xorshift64::new(seed),
        }
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Generates a pseudo-random number and maps it to a valid way index.
    fn get_victim(&mut self, _lines: &LineStore, set: usize, _access: &AccessInfo) -> Victim {
        let way = self.rng.below(self.ways as u64) as usize;
        Victim::Fill(Fill::new(set, way, None))
    }

    /// Access patterns do not affect the state, so this is a no-op.
    fn update(
        &mut self,
        _lines: &mut LineStore,
        _set: usize,
        _way: usize,
        _access: &AccessInfo,
        _event: Event,
    ) {
    }
}
