//! Counter widths and initial values.
//!
//! The predictor and selector are modeled as small hardware counters; these constants
//! fix their ranges so the rest of the engine never hardcodes them.

/// Maximum value of a reuse predictor counter (3-bit saturating).
pub const PREDICTOR_MAX: u8 = 7;

/// Initial value of every reuse predictor counter.
///
/// Sits in the middle of the range so a new instruction is neither trusted nor bypassed.
pub const PREDICTOR_INIT: u8 = 4;

/// Maximum value of the policy selector (10-bit saturating).
pub const PSEL_MAX: u16 = 1023;

/// Initial value of the policy selector.
pub const PSEL_INIT: u16 = 512;

/// Selector value above which the bimodal discipline supplies victims.
pub const PSEL_MIDPOINT: u16 = PSEL_MAX / 2;

/// Raw encoding of an unclassified line's criticality.
pub const CRITICALITY_UNCLASSIFIED: u8 = 4;

/// Width of the instruction key used to index the predictor.
pub const INSTR_KEY_BITS: u32 = 32;
