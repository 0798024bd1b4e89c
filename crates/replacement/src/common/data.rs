//! Access descriptors.
//!
//! This module defines what the host simulator passes to the engine for every access:
//! 1. **Access kind:** The championship access-type encoding (fetch, load, store, ...).
//! 2. **Access info:** Thread, instruction address, physical address and kind.
//! 3. **Line view:** The caller's read-only view of a tag-array line.

use serde::{Deserialize, Serialize};

use super::constants::INSTR_KEY_BITS;

/// Type of memory access that reached the cache.
///
/// Discriminants match the access-type codes used by trace-driven replacement
/// championship drivers, so raw codes can be converted with [`AccessKind::from_code`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessKind {
    /// Instruction fetch.
    Ifetch = 0,

    /// Demand data load.
    ///
    /// The only kind treated as critical: a load that hits marks its line as
    /// worth keeping.
    Load = 1,

    /// Demand data store.
    Store = 2,

    /// Hardware prefetch.
    Prefetch = 3,

    /// Writeback from an upper cache level.
    Writeback = 4,
}

impl AccessKind {
    /// Converts a raw access-type code into an `AccessKind`.
    ///
    /// Returns `None` for codes outside `0..=4`.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Ifetch),
            1 => Some(Self::Load),
            2 => Some(Self::Store),
            3 => Some(Self::Prefetch),
            4 => Some(Self::Writeback),
            _ => None,
        }
    }

    /// Returns the raw access-type code.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Whether a hit of this kind classifies the line as high reuse value.
    #[inline]
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Load)
    }
}

/// Everything the engine is told about one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessInfo {
    /// Hardware thread that issued the access.
    pub thread_id: u32,
    /// Address of the instruction that issued the access.
    pub pc: u64,
    /// Physical address of the accessed line.
    pub paddr: u64,
    /// Access kind.
    pub kind: AccessKind,
}

impl AccessInfo {
    /// Creates an access descriptor for thread 0.
    pub const fn new(pc: u64, paddr: u64, kind: AccessKind) -> Self {
        Self {
            thread_id: 0,
            pc,
            paddr,
            kind,
        }
    }

    /// Returns a copy issued by `thread_id`.
    #[must_use]
    pub const fn with_thread(mut self, thread_id: u32) -> Self {
        self.thread_id = thread_id;
        self
    }

    /// Instruction key used by the reuse predictor: the low 32 bits of the PC.
    #[inline]
    pub const fn instr_key(&self) -> u32 {
        (self.pc & ((1u64 << INSTR_KEY_BITS) - 1)) as u32
    }
}

/// The caller's view of one line in the tag array.
///
/// The engine never stores lines; it only checks that the set handed to
/// victim selection has the configured associativity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineState {
    /// Tag bits of the resident line.
    pub tag: u64,
    /// Line holds valid data.
    pub valid: bool,
    /// Line has been written since it was filled.
    pub dirty: bool,
}
