//! Policy selector (PSEL).
//!
//! A 10-bit saturating counter that decides which recency discipline supplies
//! victims for the adaptive policy. Each fill made with a discipline's victim
//! moves the counter one step towards the other discipline, so the counter
//! settles where both disciplines miss at a similar rate.

use crate::common::constants::{PSEL_INIT, PSEL_MAX, PSEL_MIDPOINT};
use crate::config::PselThreshold;

/// Recency discipline that supplied a victim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// True LRU stack.
    Lru,
    /// Bimodal-insertion stack.
    Biased,
}

/// Saturating policy selector.
#[derive(Clone, Debug)]
pub struct Selector {
    value: u16,
    threshold: PselThreshold,
}

impl Selector {
    /// Creates a selector at the initial bias.
    pub const fn new(threshold: PselThreshold) -> Self {
        Self {
            value: PSEL_INIT,
            threshold,
        }
    }

    /// Current counter value, always in `[0, PSEL_MAX]`.
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Discipline that should supply the next victim.
    #[inline]
    pub const fn choose(&self) -> Discipline {
        let limit = match self.threshold {
            PselThreshold::Midpoint => PSEL_MIDPOINT,
            PselThreshold::Saturated => PSEL_MAX,
        };
        if self.value > limit {
            Discipline::Biased
        } else {
            Discipline::Lru
        }
    }

    /// Charges a fill to the discipline that chose its victim.
    ///
    /// A bimodal victim moves the counter down, an LRU victim moves it up.
    /// Returns `true` if the counter changed.
    #[inline]
    pub const fn record_fill(&mut self, used: Discipline) -> bool {
        match used {
            Discipline::Biased if self.value > 0 => {
                self.value -= 1;
                true
            }
            Discipline::Lru if self.value < PSEL_MAX => {
                self.value += 1;
                true
            }
            _ => false,
        }
    }
}
