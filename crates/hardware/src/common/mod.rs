//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache, trace reader,
//! and driver. It includes:
//! 1. **Address Decoding:** Splitting a 64-bit address into set index and tag.
//! 2. **Access Classification:** Trace access kinds and per-access outcomes.
//! 3. **Error Handling:** The crate-wide `SimError` type.

/// Address decomposition (set index and tag extraction).
pub mod addr;

/// Access kind and outcome definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{ADDRESS_BITS, DecodedAddr, decode};
pub use data::{AccessKind, AccessOutcome};
pub use error::SimError;
