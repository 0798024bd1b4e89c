//! Common types shared by the replacement engine and its callers.
//!
//! This module provides:
//! 1. **Access descriptors:** What the simulator tells the engine about each access.
//! 2. **Constants:** Counter widths and initial values of the predictor and selector.
//! 3. **Error handling:** Construction-time configuration errors.
//! 4. **Random source:** The xorshift generator used by randomized decisions.

/// Counter widths, initial values and encodings.
pub mod constants;

/// Access kinds, access descriptors and the caller's line view.
pub mod data;

/// Configuration error type.
pub mod error;

/// Xorshift pseudo-random generator.
pub mod rng;

pub use data::{AccessInfo, AccessKind, LineState};
pub use error::ConfigError;
pub use rng::Xorshift64;
