//! Cache Replacement Policies.
//!
//! Implements the algorithms that choose a victim way within a set and maintain the
//! line metadata they depend on.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Random`: Random selection.
//! - `Adaptive`: Set-dueling between LRU and bimodal insertion, with reuse-predicted bypass.

/// Adaptive dueling replacement policy.
pub mod adaptive;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use adaptive::AdaptivePolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use std::fmt;

use super::lines::LineStore;
use super::selector::Discipline;
use super::Victim;
use crate::common::AccessInfo;
use crate::stats::AdaptiveStats;

/// What happened to the line an update refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The access hit a resident line.
    Hit,
    /// A new line was installed in a victim way. Carries the discipline that
    /// supplied the victim, if the policy recorded one.
    Fill(Option<Discipline>),
}

/// Trait for cache replacement policies.
///
/// Policies keep their own predictor and counter state, but line metadata lives in
/// the [`LineStore`] owned by the engine and is handed in on every call.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `lines` - Line metadata of the whole cache.
    /// * `set` - The cache set index.
    /// * `access` - The missing access.
    ///
    /// # Returns
    ///
    /// The way to fill, or [`Victim::Bypass`] if the line should not be installed.
    fn get_victim(&mut self, lines: &LineStore, set: usize, access: &AccessInfo) -> Victim;

    /// Updates the policy state after an access.
    ///
    /// # Arguments
    ///
    /// * `lines` - Line metadata of the whole cache.
    /// * `set` - The cache set index.
    /// * `way` - The way that hit or was filled.
    /// * `access` - The access.
    /// * `event` - Whether the access hit or filled the way.
    fn update(
        &mut self,
        lines: &mut LineStore,
        set: usize,
        way: usize,
        access: &AccessInfo,
        event: Event,
    );

    /// Policy-specific counters, if the policy keeps any.
    fn stats(&self) -> Option<AdaptiveStats> {
        None
    }

    /// Reuse predictor counter for an instruction key, if the policy predicts reuse.
    fn reuse_counter(&self, _key: u32) -> Option<u8> {
        None
    }
}
