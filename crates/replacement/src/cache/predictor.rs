//! Reuse Predictor.
//!
//! A table of 3-bit saturating counters indexed by instruction key. The counter of an
//! instruction is credited each time a line it installed is evicted after being hit
//! by a critical access, and debited each time a line it installed is evicted
//! without one. An instruction whose counter reaches zero is predicted to install
//! dead lines, and its fills are bypassed.
//!
//! The table has a fixed number of entries and is indexed by `key % len`. Distinct
//! instructions that collide share a counter; this is a capacity trade-off, in the
//! same way a branch predictor's pattern table aliases branches.
//!
//! # Performance
//!
//! - `predict_reuse()` / `credit()` / `debit()`: O(1)
//! - **Space Complexity:** O(N) bytes where N is the number of entries

use crate::common::constants::{PREDICTOR_INIT, PREDICTOR_MAX};

/// Per-instruction reuse predictor.
#[derive(Clone, Debug)]
pub struct ReusePredictor {
    /// Saturating counters in `[0, PREDICTOR_MAX]`.
    table: Vec<u8>,
}

impl ReusePredictor {
    /// Creates a predictor with `entries` counters, all at the neutral value.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is zero. Configurations are validated before this.
    pub fn new(entries: usize) -> Self {
        assert!(entries > 0, "reuse predictor needs at least one entry");
        Self {
            table: vec![PREDICTOR_INIT; entries],
        }
    }

    #[inline]
    fn index(&self, key: u32) -> usize {
        key as usize % self.table.len()
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false; the table has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current counter value for `key`.
    #[inline]
    pub fn counter(&self, key: u32) -> u8 {
        self.table[self.index(key)]
    }

    /// Whether lines installed by `key` are expected to be reused.
    ///
    /// True unless the counter is exactly zero.
    #[inline]
    pub fn predict_reuse(&self, key: u32) -> bool {
        self.counter(key) != 0
    }

    /// Increments the counter for `key`, saturating at the maximum.
    ///
    /// Returns `true` if the counter changed.
    #[inline]
    pub fn credit(&mut self, key: u32) -> bool {
        let idx = self.index(key);
        if self.table[idx] < PREDICTOR_MAX {
            self.table[idx] += 1;
            true
        } else {
            false
        }
    }

    /// Decrements the counter for `key`, saturating at zero.
    ///
    /// Returns `true` if the counter changed.
    #[inline]
    pub fn debit(&mut self, key: u32) -> bool {
        let idx = self.index(key);
        if self.table[idx] > 0 {
            self.table[idx] -= 1;
            true
        } else {
            false
        }
    }

    /// Number of counters currently at zero, i.e. table slots whose fills bypass.
    pub fn dead_entries(&self) -> usize {
        self.table.iter().filter(|&&c| c == 0).count()
    }
}
