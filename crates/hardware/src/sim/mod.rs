//! Trace replay.
//!
//! Provides the driver that dispatches decoded access records against a
//! cache and accumulates outcome counters.

pub mod simulator;

pub use simulator::{AccessReport, Simulator};
