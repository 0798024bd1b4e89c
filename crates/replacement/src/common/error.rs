//! Configuration errors.
//!
//! The engine has no recoverable runtime errors. Everything that can be wrong is
//! wrong at construction time, and is reported here so the driver can abort with
//! a readable message instead of a silent default.

use thiserror::Error;

/// Reasons an engine cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The cache was configured with no sets.
    #[error("cache must have at least one set")]
    ZeroSets,

    /// The cache was configured with no ways.
    #[error("cache associativity must be at least 1")]
    ZeroAssociativity,

    /// The cache has more ways than a recency rank can number.
    #[error("cache associativity {0} exceeds the maximum of 65535")]
    AssociativityTooWide(usize),

    /// A numeric policy code does not name a known policy.
    #[error("unknown replacement policy code {0}")]
    UnknownPolicy(u32),

    /// A policy name does not name a known policy.
    #[error("unknown replacement policy name {0:?}")]
    UnknownPolicyName(String),

    /// The reuse predictor was given no entries.
    #[error("reuse predictor table must have at least one entry")]
    EmptyPredictor,

    /// The bimodal insertion probability is not a proper fraction.
    #[error("bimodal insertion ratio {numerator}/{denominator} is not within [0, 1]")]
    BimodalRatio {
        /// Chances out of `denominator` that a fill is inserted at MRU.
        numerator: u32,
        /// Size of the draw.
        denominator: u32,
    },
}
