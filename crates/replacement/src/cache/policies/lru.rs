//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been accessed for the longest time.
//! It uses the LRU rank of each slot: an access moves the line to rank 0 (Most
//! Recently Used) and pushes every more recent line down one position. The line
//! at rank `assoc - 1` is the Least Recently Used.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(W)
//! - **Space Complexity:** O(S × W) where S is the number of sets (held by the line store)
//! - **Hardware Cost:** High - requires priority encoding and shifting
//! - **Best Case:** Working sets that fit in the cache, strong temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{Event, ReplacementPolicy};
use crate::cache::lines::{LineStore, Stack};
use crate::cache::{Fill, Victim};
use crate::common::AccessInfo;

/// LRU Policy. Stateless; the ranks live in the line store.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates a new LRU policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Returns the way at the bottom of the LRU stack.
    fn get_victim(&mut self, lines: &LineStore, set: usize, _access: &AccessInfo) -> Victim {
        Victim::Fill(Fill::new(set, lines.bottom(set, Stack::Lru), None))
    }

    /// Moves the accessed `way` to the MRU position, hit or fill alike.
    fn update(
        &mut self,
        lines: &mut LineStore,
        set: usize,
        way: usize,
        _access: &AccessInfo,
        _event: Event,
    ) {
        lines.promote(set, way, Stack::Lru);
    }
}
