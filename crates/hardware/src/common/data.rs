//! Access kinds and outcomes.
//!
//! This module defines how trace accesses are classified on the way in and on the way out:
//! 1. **Access Kind:** The operation letter from a trace line (`I`, `L`, `S`, `M`).
//! 2. **Access Outcome:** The result of one cache lookup (hit, miss, or miss with eviction).

use std::fmt;

/// Kind of memory access recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Instruction fetch. Ignored by the data cache model.
    Instruction,
    /// Data load.
    Load,
    /// Data store. Behaves exactly like a load.
    Store,
    /// Data modify: a load immediately followed by a store to the same address.
    Modify,
}

impl AccessKind {
    /// Parses a trace operation letter.
    ///
    /// # Returns
    ///
    /// The matching kind, or `None` for any letter other than `I`, `L`, `S`, `M`.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::Instruction),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// Returns the trace operation letter for this kind.
    pub const fn as_char(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of cache lookups this kind performs (0 for instruction fetches, 2 for modifies).
    pub const fn lookups(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Result of a single cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// The tag was present in the set.
    Hit,
    /// The tag was absent and was installed into a free line.
    Miss,
    /// The tag was absent, the set was full, and a line was replaced.
    MissWithEviction,
}

impl AccessOutcome {
    /// Returns `true` for a hit.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns `true` when a valid line was replaced.
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissWithEviction)
    }
}

impl fmt::Display for AccessOutcome {
    /// Formats the outcome as its verbose-trace tokens (`hit`, `miss`, `miss eviction`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::MissWithEviction => write!(f, "miss eviction"),
        }
    }
}
