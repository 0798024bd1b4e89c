//! Line Metadata Store.
//!
//! Holds the replacement state of every line slot in the cache: two independent
//! recency ranks, the reuse classification of the occupant, and the instruction
//! that installed it. Slots are stored in one flat vector indexed by
//! `set * assoc + way`, so a set is a contiguous slice.
//!
//! # Recency stacks
//!
//! Each rank dimension ([`Stack::Lru`], [`Stack::Biased`]) is a per-set permutation
//! of `0..assoc`, with 0 the most recently used position and `assoc - 1` the
//! eviction candidate. Every policy manipulates ranks through the three
//! primitives here ([`LineStore::bottom`], [`LineStore::promote`],
//! [`LineStore::promote_one`]), which preserve the permutation.
//!
//! # Performance
//!
//! - `bottom()`: O(W) where W is the associativity
//! - `promote()` / `promote_one()`: O(W)
//! - **Space Complexity:** O(S × W)

use crate::common::constants::CRITICALITY_UNCLASSIFIED;

/// Reuse classification of a line's occupant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Criticality {
    /// Filled and not yet hit by a critical access.
    Low,
    /// Hit by a critical access since it was filled.
    High,
    /// Never classified: a slot that has not been filled since construction.
    #[default]
    Unclassified,
}

impl Criticality {
    /// Raw encoding: 0 = low, 1 = high, 4 = unclassified.
    pub const fn raw(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
            Self::Unclassified => CRITICALITY_UNCLASSIFIED,
        }
    }
}

/// Which recency ranking an operation acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stack {
    /// True LRU order; every access promotes to MRU.
    Lru,
    /// Bimodal order; fills usually stay at the LRU end and hits climb one step.
    Biased,
}

/// Replacement state of one line slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMeta {
    /// Position in the LRU stack (0 = MRU).
    pub lru_rank: u16,
    /// Position in the bimodal stack (0 = MRU).
    pub biased_rank: u16,
    /// Reuse classification of the occupant.
    pub criticality: Criticality,
    /// Instruction key that installed the occupant.
    pub owner: u32,
}

impl LineMeta {
    const fn fresh(way: u16) -> Self {
        Self {
            lru_rank: way,
            biased_rank: way,
            criticality: Criticality::Unclassified,
            owner: 0,
        }
    }

    /// Rank of this slot in `stack`.
    #[inline]
    pub const fn rank(&self, stack: Stack) -> u16 {
        match stack {
            Stack::Lru => self.lru_rank,
            Stack::Biased => self.biased_rank,
        }
    }

    #[inline]
    const fn rank_mut(&mut self, stack: Stack) -> &mut u16 {
        match stack {
            Stack::Lru => &mut self.lru_rank,
            Stack::Biased => &mut self.biased_rank,
        }
    }
}

/// Per-(set, way) replacement state for a whole cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<LineMeta>,
    num_sets: usize,
    assoc: usize,
}

impl LineStore {
    /// Allocates `num_sets × assoc` slots with ranks equal to the way index and
    /// every slot unclassified.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or `assoc` does not fit a `u16` rank.
    /// Engines validate geometry before getting here.
    pub fn new(num_sets: usize, assoc: usize) -> Self {
        assert!(num_sets > 0 && assoc > 0, "empty cache geometry");
        assert!(
            u16::try_from(assoc).is_ok(),
            "associativity {assoc} exceeds rank width"
        );

        let mut lines = Vec::with_capacity(num_sets * assoc);
        for _ in 0..num_sets {
            lines.extend((0..assoc).map(|way| LineMeta::fresh(way as u16)));
        }

        Self {
            lines,
            num_sets,
            assoc,
        }
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Ways per set.
    pub const fn assoc(&self) -> usize {
        self.assoc
    }

    /// Slots of one set, indexed by way.
    ///
    /// # Panics
    ///
    /// Panics if `set` is out of range.
    #[inline]
    pub fn set(&self, set: usize) -> &[LineMeta] {
        assert!(set < self.num_sets, "set index {set} out of range");
        let base = set * self.assoc;
        &self.lines[base..base + self.assoc]
    }

    /// Mutable slots of one set, indexed by way.
    ///
    /// # Panics
    ///
    /// Panics if `set` is out of range.
    #[inline]
    pub fn set_mut(&mut self, set: usize) -> &mut [LineMeta] {
        assert!(set < self.num_sets, "set index {set} out of range");
        let base = set * self.assoc;
        &mut self.lines[base..base + self.assoc]
    }

    /// One slot.
    ///
    /// # Panics
    ///
    /// Panics if `set` or `way` is out of range.
    #[inline]
    pub fn slot(&self, set: usize, way: usize) -> &LineMeta {
        &self.set(set)[way]
    }

    /// One mutable slot.
    ///
    /// # Panics
    ///
    /// Panics if `set` or `way` is out of range.
    #[inline]
    pub fn slot_mut(&mut self, set: usize, way: usize) -> &mut LineMeta {
        &mut self.set_mut(set)[way]
    }

    /// Ranks of a set in `stack`, indexed by way.
    pub fn ranks(&self, set: usize, stack: Stack) -> Vec<u16> {
        self.set(set).iter().map(|m| m.rank(stack)).collect()
    }

    /// The way at the bottom (`assoc - 1`) of `stack`.
    ///
    /// Falls back to way 0 if no slot holds the bottom rank, which cannot happen
    /// while the permutation invariant holds.
    #[inline]
    pub fn bottom(&self, set: usize, stack: Stack) -> usize {
        let last = (self.assoc - 1) as u16;
        self.set(set)
            .iter()
            .position(|m| m.rank(stack) == last)
            .unwrap_or(0)
    }

    /// Promotes `way` to rank 0 of `stack`.
    ///
    /// Every slot ranked above (more recent than) `way` moves down one position;
    /// slots ranked below it keep their rank.
    #[inline]
    pub fn promote(&mut self, set: usize, way: usize, stack: Stack) {
        let lines = self.set_mut(set);
        let current = lines[way].rank(stack);

        for meta in lines.iter_mut() {
            let rank = meta.rank_mut(stack);
            if *rank < current {
                *rank += 1;
            }
        }
        *lines[way].rank_mut(stack) = 0;
    }

    /// Moves `way` one position towards rank 0 of `stack`, swapping with the slot
    /// that held that position. No-op at rank 0.
    #[inline]
    pub fn promote_one(&mut self, set: usize, way: usize, stack: Stack) {
        let lines = self.set_mut(set);
        let current = lines[way].rank(stack);
        if current == 0 {
            return;
        }

        if let Some(neighbour) = lines.iter().position(|m| m.rank(stack) + 1 == current) {
            *lines[neighbour].rank_mut(stack) += 1;
            *lines[way].rank_mut(stack) -= 1;
        }
    }

    /// Whether the ranks of `set` in `stack` are exactly `{0, .., assoc - 1}`.
    pub fn is_permutation(&self, set: usize, stack: Stack) -> bool {
        let mut seen = vec![false; self.assoc];
        for meta in self.set(set) {
            let rank = usize::from(meta.rank(stack));
            if rank >= self.assoc || seen[rank] {
                return false;
            }
            seen[rank] = true;
        }
        true
    }
}
