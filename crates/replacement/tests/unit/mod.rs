//! # Unit Components
//!
//! Tests grouped by the module they exercise.
