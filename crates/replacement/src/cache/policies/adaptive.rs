//! Adaptive Dueling Replacement Policy.
//!
//! Combines three mechanisms:
//!
//! 1. **Reuse-predicted bypass.** A [`ReusePredictor`] tracks, per instruction, whether
//!    the lines it installs are hit by a critical access before being evicted. A miss
//!    from an instruction whose counter is zero is not installed at all.
//! 2. **Two recency disciplines.** Every set keeps a true LRU stack and a bimodal
//!    (BIP) stack. In the bimodal stack a fill is only promoted to MRU with a small
//!    probability and otherwise stays at the LRU end; a hit climbs one position
//!    instead of jumping to MRU. The bimodal stack resists thrashing by scans; the
//!    LRU stack favours recency.
//! 3. **Selector.** A saturating counter picks which stack supplies the victim, and
//!    every fill moves it one step towards the discipline that was not used.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `get_victim()`: O(W)
//!   - `update()`: O(W)
//! - **Space Complexity:** O(S × W) line metadata + O(P) predictor bytes
//! - **Best Case:** Mixed workloads where a few instructions stream through dead data
//! - **Worst Case:** Heavy predictor aliasing between reused and dead instructions

use tracing::{debug, trace};

use super::{Event, ReplacementPolicy};
use crate::cache::lines::{Criticality, LineStore, Stack};
use crate::cache::predictor::ReusePredictor;
use crate::cache::selector::{Discipline, Selector};
use crate::cache::{Fill, Victim};
use crate::common::{AccessInfo, Xorshift64};
use crate::config::AdaptiveConfig;
use crate::stats::AdaptiveStats;

/// Adaptive dueling policy state.
#[derive(Clone, Debug)]
pub struct AdaptivePolicy {
    predictor: ReusePredictor,
    selector: Selector,
    rng: Xorshift64,
    /// Chances out of `bimodal_denominator` of an MRU insertion in the bimodal stack.
    bimodal_numerator: u32,
    bimodal_denominator: u32,
    stats: AdaptiveStats,
}

impl AdaptivePolicy {
    /// Creates a new adaptive policy.
    ///
    /// # Arguments
    ///
    /// * `config` - Predictor size, bimodal insertion ratio and selector mode.
    ///   Must already be validated.
    /// * `seed` - Seed for the bimodal insertion draw.
    pub fn new(config: &AdaptiveConfig, seed: u64) -> Self {
        Self {
            predictor: ReusePredictor::new(config.predictor_entries),
            selector: Selector::new(config.psel_threshold),
            rng: Xorshift64::new(seed),
            bimodal_numerator: config.bimodal_numerator,
            bimodal_denominator: config.bimodal_denominator,
            stats: AdaptiveStats::default(),
        }
    }

    /// The reuse predictor.
    pub const fn predictor(&self) -> &ReusePredictor {
        &self.predictor
    }

    /// Mutable access to the reuse predictor, for warm-starting or tests.
    pub const fn predictor_mut(&mut self) -> &mut ReusePredictor {
        &mut self.predictor
    }

    /// The policy selector.
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Trains the predictor with the fate of the line about to be replaced.
    fn retire(&mut self, lines: &LineStore, set: usize, way: usize) {
        let evicted = lines.slot(set, way);
        let owner = evicted.owner;

        match evicted.criticality {
            Criticality::Unclassified => {}
            Criticality::High => {
                if self.predictor.credit(owner) {
                    self.stats.predictor_credits += 1;
                }
            }
            Criticality::Low => {
                if self.predictor.debit(owner) {
                    self.stats.predictor_debits += 1;
                    if !self.predictor.predict_reuse(owner) {
                        debug!(instr_key = owner, "instruction predicted dead, fills will bypass");
                    }
                }
            }
        }
    }

    fn charge_selector(&mut self, used: Discipline) {
        let before = self.selector.choose();
        if self.selector.record_fill(used) {
            match used {
                Discipline::Biased => self.stats.psel_decrements += 1,
                Discipline::Lru => self.stats.psel_increments += 1,
            }
        }

        let after = self.selector.choose();
        if before != after {
            trace!(psel = self.selector.value(), ?after, "selector switched discipline");
        }
    }
}

impl ReplacementPolicy for AdaptivePolicy {
    /// Bypasses predicted-dead fills; otherwise returns the bottom of whichever
    /// stack the selector currently favours.
    fn get_victim(&mut self, lines: &LineStore, set: usize, access: &AccessInfo) -> Victim {
        let key = access.instr_key();
        if !self.predictor.predict_reuse(key) {
            trace!(set, instr_key = key, "bypassing fill");
            return Victim::Bypass;
        }

        let discipline = self.selector.choose();
        let way = match discipline {
            Discipline::Biased => {
                self.stats.biased_victims += 1;
                lines.bottom(set, Stack::Biased)
            }
            Discipline::Lru => {
                self.stats.lru_victims += 1;
                lines.bottom(set, Stack::Lru)
            }
        };

        Victim::Fill(Fill::new(set, way, Some(discipline)))
    }

    /// Classifies hits, trains the predictor and selector on fills, and maintains
    /// both recency stacks.
    fn update(
        &mut self,
        lines: &mut LineStore,
        set: usize,
        way: usize,
        access: &AccessInfo,
        event: Event,
    ) {
        match event {
            Event::Hit => {
                if access.kind.is_critical() {
                    lines.slot_mut(set, way).criticality = Criticality::High;
                }
                lines.promote_one(set, way, Stack::Biased);
            }
            Event::Fill(discipline) => {
                if let Some(used) = discipline {
                    self.charge_selector(used);
                }

                self.retire(lines, set, way);
                let slot = lines.slot_mut(set, way);
                slot.criticality = Criticality::Low;
                slot.owner = access.instr_key();

                if self.rng.chance(self.bimodal_numerator, self.bimodal_denominator) {
                    self.stats.bimodal_inserts += 1;
                    lines.promote(set, way, Stack::Biased);
                }
            }
        }

        lines.promote(set, way, Stack::Lru);
    }

    fn stats(&self) -> Option<AdaptiveStats> {
        Some(AdaptiveStats {
            psel: self.selector.value(),
            dead_entries: self.predictor.dead_entries(),
            ..self.stats.clone()
        })
    }

    fn reuse_counter(&self, key: u32) -> Option<u8> {
        Some(self.predictor.counter(key))
    }
}
