//! Replacement statistics collection and reporting.
//!
//! This module tracks what the engine did over a simulation. It provides:
//! 1. **Engine counters:** Accesses, hits, fills and bypassed misses, for every policy.
//! 2. **Adaptive counters:** Victims per discipline, selector movement, predictor
//!    training and bimodal MRU insertions.
//! 3. **Reporting:** A text block for the simulator's statistics dump, and JSON export.

use std::io::{self, Write};

use serde::Serialize;

/// Separator used by the text report.
const RULE: &str = "==========================================================";

/// Counters maintained by the engine for every policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Calls to `update` (hits plus fills).
    pub accesses: u64,
    /// Updates reporting a hit.
    pub hits: u64,
    /// Updates reporting a fill after a victim was chosen.
    pub fills: u64,
    /// Victim selections that declined to install the line.
    pub bypasses: u64,
}

impl EngineStats {
    /// Misses seen by the engine (fills plus bypasses).
    pub const fn misses(&self) -> u64 {
        self.fills + self.bypasses
    }

    /// Hit rate over all accesses, or 0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Counters of the adaptive dueling policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AdaptiveStats {
    /// Victims supplied by the LRU stack.
    pub lru_victims: u64,
    /// Victims supplied by the bimodal stack.
    pub biased_victims: u64,
    /// Selector steps towards the bimodal discipline.
    pub psel_increments: u64,
    /// Selector steps towards the LRU discipline.
    pub psel_decrements: u64,
    /// Predictor counters raised by a reused line being evicted.
    pub predictor_credits: u64,
    /// Predictor counters lowered by a dead line being evicted.
    pub predictor_debits: u64,
    /// Fills promoted straight to MRU in the bimodal stack.
    pub bimodal_inserts: u64,
    /// Selector value at the time of the snapshot.
    pub psel: u16,
    /// Predictor entries at zero at the time of the snapshot.
    pub dead_entries: usize,
}

/// Writes the report header.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn write_banner(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "=========== Replacement Policy Statistics ================")?;
    writeln!(out, "{RULE}")
}

impl EngineStats {
    /// Writes the engine counters as a text block.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn write_to(&self, policy: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "repl.policy              {policy}")?;
        writeln!(out, "repl.accesses            {}", self.accesses)?;
        writeln!(out, "repl.hits                {}", self.hits)?;
        writeln!(out, "repl.misses              {}", self.misses())?;
        writeln!(out, "repl.fills               {}", self.fills)?;
        writeln!(out, "repl.bypasses            {}", self.bypasses)?;
        writeln!(out, "repl.hit_rate            {:.2}%", self.hit_rate() * 100.0)?;
        writeln!(out, "----------------------------------------------------------")
    }
}

impl AdaptiveStats {
    /// Writes the adaptive policy counters as a text block.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        let victims = self.lru_victims + self.biased_victims;
        let biased_pct = if victims == 0 {
            0.0
        } else {
            100.0 * (self.biased_victims as f64 / victims as f64)
        };

        writeln!(out, "ADAPTIVE DUELING")?;
        writeln!(out, "  victims.lru            {}", self.lru_victims)?;
        writeln!(
            out,
            "  victims.biased         {} ({biased_pct:.2}%)",
            self.biased_victims
        )?;
        writeln!(out, "  psel.value             {}", self.psel)?;
        writeln!(out, "  psel.increments        {}", self.psel_increments)?;
        writeln!(out, "  psel.decrements        {}", self.psel_decrements)?;
        writeln!(out, "  predictor.credits      {}", self.predictor_credits)?;
        writeln!(out, "  predictor.debits       {}", self.predictor_debits)?;
        writeln!(out, "  predictor.dead         {}", self.dead_entries)?;
        writeln!(out, "  bimodal.mru_inserts    {}", self.bimodal_inserts)?;
        writeln!(out, "----------------------------------------------------------")
    }
}

/// Serializable snapshot of everything the engine reports.
#[derive(Debug, Serialize)]
pub struct StatsReport<'a> {
    /// Policy name.
    pub policy: &'a str,
    /// Engine counters.
    pub engine: &'a EngineStats,
    /// Adaptive counters, present only for the adaptive policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptive: Option<AdaptiveStats>,
}
