//! Cache-line replacement engine for trace-driven cache simulators.
//!
//! This crate decides which line of a set-associative cache set to evict on a miss,
//! and keeps the per-line bookkeeping that decision depends on. It provides:
//! 1. **Line metadata:** Per-(set, way) recency ranks, reuse classification and owner.
//! 2. **Policies:** True LRU, random, and an adaptive set-dueling policy with a
//!    per-instruction reuse predictor that can bypass dead-on-arrival fills.
//! 3. **Dispatch:** A [`ReplacementEngine`] that owns the state and routes calls to the
//!    policy chosen at construction.
//! 4. **Configuration and statistics:** Serde-deserializable tuning and counters.
//!
//! The tag array, trace reader and driver loop live in the host simulator, which calls
//! [`ReplacementEngine::select_victim`] on every miss and [`ReplacementEngine::update`]
//! on every access.
//!
//! ```
//! use replsim_core::{
//!     AccessInfo, AccessKind, LineState, Outcome, PolicyKind, ReplacementEngine, Victim,
//! };
//!
//! let mut engine = ReplacementEngine::new(64, 4, PolicyKind::Lru)?;
//! let lines = [LineState::default(); 4];
//! let access = AccessInfo::new(0x40_1000, 0x8000_0040, AccessKind::Load);
//!
//! if let Victim::Fill(fill) = engine.select_victim(3, &lines, &access) {
//!     assert_eq!(fill.way(), 3);
//!     engine.update(Outcome::Miss(fill), &access);
//! }
//! engine.update(Outcome::Hit { set: 3, way: 3 }, &access);
//! # Ok::<(), replsim_core::ConfigError>(())
//! ```

/// Common types (access descriptors, errors, random source).
pub mod common;
/// Engine configuration (defaults, policy selection, adaptive tuning).
pub mod config;
/// Line metadata, replacement policies and the dispatching engine.
pub mod cache;
/// Replacement statistics collection and reporting.
pub mod stats;

pub use crate::cache::lines::{Criticality, LineMeta, LineStore, Stack};
pub use crate::cache::{Discipline, Fill, Outcome, ReplacementEngine, Victim};
pub use crate::common::{AccessInfo, AccessKind, ConfigError, LineState};
pub use crate::config::{PolicyKind, ReplacementConfig};
pub use crate::stats::EngineStats;
