//! Replacement engine.
//!
//! This module holds the replacement state of one set-associative cache and the
//! policy that drives it. The host simulator keeps the tag array; on every miss it
//! asks the engine for a victim, and after every access it reports where the line
//! ended up.
//!
//! # Protocol
//!
//! A miss is a pair of calls. [`ReplacementEngine::select_victim`] returns either
//! [`Victim::Bypass`] (do not install the line) or a [`Fill`] token naming the way to
//! replace. The token is handed back in [`Outcome::Miss`] once the fill is done, and
//! carries whatever the policy decided during selection. A hit is a single
//! [`ReplacementEngine::update`] with [`Outcome::Hit`].

/// Per-(set, way) replacement metadata and recency stack primitives.
pub mod lines;

/// Replacement policy implementations (LRU, Random, Adaptive).
pub mod policies;

/// Per-instruction reuse predictor.
pub mod predictor;

/// Saturating policy selector.
pub mod selector;

use std::io::{self, Write};

use tracing::debug;

use self::lines::LineStore;
use self::policies::{AdaptivePolicy, Event, LruPolicy, RandomPolicy, ReplacementPolicy};
pub use self::selector::Discipline;
use crate::common::{AccessInfo, ConfigError, LineState};
use crate::config::{PolicyKind, ReplacementConfig};
use crate::stats::{self, EngineStats, StatsReport};

/// Permission to fill one way, issued by victim selection.
///
/// Deliberately neither `Clone` nor `Copy`: each token pays for exactly one fill.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a fill token must be returned to the engine through Outcome::Miss"]
pub struct Fill {
    set: usize,
    way: usize,
    discipline: Option<Discipline>,
}

impl Fill {
    pub(crate) const fn new(set: usize, way: usize, discipline: Option<Discipline>) -> Self {
        Self {
            set,
            way,
            discipline,
        }
    }

    /// Set the victim belongs to.
    pub const fn set(&self) -> usize {
        self.set
    }

    /// Way to replace.
    pub const fn way(&self) -> usize {
        self.way
    }

    /// Recency discipline that supplied the victim (adaptive policy only).
    pub const fn discipline(&self) -> Option<Discipline> {
        self.discipline
    }
}

/// Result of victim selection.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub enum Victim {
    /// Replace the way named by the token.
    Fill(Fill),
    /// Do not install the missing line.
    Bypass,
}

impl Victim {
    /// Way to replace, or `None` for a bypass.
    pub const fn way(&self) -> Option<usize> {
        match self {
            Self::Fill(fill) => Some(fill.way),
            Self::Bypass => None,
        }
    }

    /// Whether the line should not be installed.
    pub const fn is_bypass(&self) -> bool {
        matches!(self, Self::Bypass)
    }
}

/// Where an access ended up, as reported to [`ReplacementEngine::update`].
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The access hit `way` of `set`.
    Hit {
        /// Cache set index.
        set: usize,
        /// Way that hit.
        way: usize,
    },
    /// The access missed and the line was installed as the token directed.
    Miss(Fill),
}

/// Replacement state and policy dispatch for one cache.
///
/// Each simulated cache owns one engine; engines share nothing.
#[derive(Debug)]
pub struct ReplacementEngine {
    kind: PolicyKind,
    lines: LineStore,
    policy: Box<dyn ReplacementPolicy>,
    stats: EngineStats,
}

impl ReplacementEngine {
    /// Creates an engine with default tuning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `num_sets` or `assoc` is zero, or `assoc` is too
    /// wide for a recency rank.
    pub fn new(num_sets: usize, assoc: usize, policy: PolicyKind) -> Result<Self, ConfigError> {
        Self::with_config(&ReplacementConfig::new(num_sets, assoc, policy))
    }

    /// Creates an engine from a championship policy code (0 = LRU, 1 = RANDOM,
    /// 2 = CONTESTANT).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPolicy`] for any other code, and the geometry
    /// errors of [`ReplacementEngine::new`].
    pub fn from_code(num_sets: usize, assoc: usize, code: u32) -> Result<Self, ConfigError> {
        Self::new(num_sets, assoc, PolicyKind::try_from(code)?)
    }

    /// Creates an engine from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error found by [`ReplacementConfig::validate`].
    pub fn with_config(config: &ReplacementConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyKind::Lru => Box::new(LruPolicy::new()),
            PolicyKind::Random => Box::new(RandomPolicy::new(config.assoc, config.seed)),
            PolicyKind::Adaptive => Box::new(AdaptivePolicy::new(&config.adaptive, config.seed)),
        };

        debug!(
            sets = config.num_sets,
            assoc = config.assoc,
            policy = %config.policy,
            "replacement engine ready"
        );

        Ok(Self {
            kind: config.policy,
            lines: LineStore::new(config.num_sets, config.assoc),
            policy,
            stats: EngineStats::default(),
        })
    }

    /// Configured policy.
    pub const fn policy(&self) -> PolicyKind {
        self.kind
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.lines.num_sets()
    }

    /// Ways per set.
    pub const fn assoc(&self) -> usize {
        self.lines.assoc()
    }

    /// Line metadata, for inspection.
    pub const fn lines(&self) -> &LineStore {
        &self.lines
    }

    /// Engine counters.
    pub const fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Reuse predictor counter of the instruction that issued `access`.
    ///
    /// `None` unless the policy is adaptive.
    pub fn reuse_counter(&self, access: &AccessInfo) -> Option<u8> {
        self.policy.reuse_counter(access.instr_key())
    }

    /// Chooses the way to replace on a miss in `set`.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `set_lines` - The caller's view of the set; its length must equal the
    ///   associativity.
    /// * `access` - The missing access.
    ///
    /// # Panics
    ///
    /// Panics if `set` is out of range or `set_lines` has the wrong length. Both
    /// mean the caller and engine disagree on the cache geometry.
    pub fn select_victim(
        &mut self,
        set: usize,
        set_lines: &[LineState],
        access: &AccessInfo,
    ) -> Victim {
        assert!(
            set < self.lines.num_sets(),
            "set index {set} out of range for {} sets",
            self.lines.num_sets()
        );
        assert_eq!(
            set_lines.len(),
            self.lines.assoc(),
            "caller set has {} lines, engine associativity is {}",
            set_lines.len(),
            self.lines.assoc()
        );

        let victim = self.policy.get_victim(&self.lines, set, access);
        if victim.is_bypass() {
            self.stats.bypasses += 1;
        }
        victim
    }

    /// Updates replacement state after an access.
    ///
    /// # Panics
    ///
    /// Panics if the set or way is out of range.
    pub fn update(&mut self, outcome: Outcome, access: &AccessInfo) {
        let (set, way, event) = match outcome {
            Outcome::Hit { set, way } => (set, way, Event::Hit),
            Outcome::Miss(fill) => (fill.set, fill.way, Event::Fill(fill.discipline)),
        };
        assert!(
            set < self.lines.num_sets(),
            "set index {set} out of range for {} sets",
            self.lines.num_sets()
        );
        assert!(
            way < self.lines.assoc(),
            "way {way} out of range for associativity {}",
            self.lines.assoc()
        );

        match event {
            Event::Hit => self.stats.hits += 1,
            Event::Fill(_) => self.stats.fills += 1,
        }
        self.stats.accesses += 1;
        self.policy.update(&mut self.lines, set, way, access, event);
    }

    /// Writes the statistics block.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn print_stats<W: Write>(&self, out: &mut W) -> io::Result<()> {
        stats::write_banner(out)?;
        self.stats.write_to(self.kind.name(), out)?;
        if let Some(adaptive) = self.policy.stats() {
            adaptive.write_to(out)?;
        }
        Ok(())
    }

    /// Serializes the statistics as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which does not occur for these plain counters.
    pub fn stats_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&StatsReport {
            policy: self.kind.name(),
            engine: &self.stats,
            adaptive: self.policy.stats(),
        })
    }
}
