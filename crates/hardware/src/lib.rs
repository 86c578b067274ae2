//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays memory-access traces against a functional cache model with the following:
//! 1. **Decoding:** Splitting raw addresses into set index and tag.
//! 2. **Cache:** Per-set line storage with rank-based LRU replacement.
//! 3. **Trace:** Parsing `<kind> <hex-address>,<size>` trace lines into access records.
//! 4. **Simulation:** Dispatching records by access kind and accumulating hit/miss/eviction counts.
//! 5. **Reporting:** Summary lines, results files, and detailed statistics.
//!
//! The model tracks line presence and recency only; no data is stored and no
//! timing is modeled.

/// Cache state store and the rank-update access algorithm.
pub mod cache;
/// Common types (address decoding, access kinds, errors).
pub mod common;
/// Simulator configuration (defaults, validation, JSON loading).
pub mod config;
/// Trace driver that dispatches access records against a cache.
pub mod sim;
/// Hit/miss/eviction counters and reporting.
pub mod stats;
/// Trace file parsing.
pub mod trace;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate-wide error type.
pub use crate::common::SimError;
/// Trace driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Counters accumulated during a run.
pub use crate::stats::SimStats;
