//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome counters for a trace replay. It provides:
//! 1. **Counters:** Hits, misses, and evictions, incremented once per cache lookup.
//! 2. **Summary:** The `hits:H misses:M evictions:E` line and the `.csim_results` file.
//! 3. **Detailed report:** Access totals and hit/miss rates.

use std::fs;
use std::path::Path;

use crate::common::{AccessOutcome, SimError};

/// File name the cache-lab driver reads results from.
pub const RESULTS_FILE: &str = ".csim_results";

/// Outcome counters for one run.
///
/// Counters only ever increase during a run; `reset` zeroes them between runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Lookups that found their block.
    pub hits: u64,
    /// Lookups that did not find their block (including evicting ones).
    pub misses: u64,
    /// Misses that replaced a valid line.
    pub evictions: u64,
}

impl SimStats {
    /// Applies one lookup outcome.
    pub const fn record(&mut self, outcome: AccessOutcome) {
        if outcome.is_hit() {
            self.hits += 1;
            return;
        }
        self.misses += 1;
        if outcome.is_eviction() {
            self.evictions += 1;
        }
    }

    /// Total lookups (hits + misses).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of lookups that missed, or 0.0 before any lookup.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// Zeroes all counters.
    pub const fn reset(&mut self) {
        *self = Self {
            hits: 0,
            misses: 0,
            evictions: 0,
        };
    }

    /// Summary line in the cache-lab format.
    pub fn summary(&self) -> String {
        format!(
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }

    /// Prints the summary line to stdout.
    pub fn print_summary(&self) {
        println!("{}", self.summary());
    }

    /// Writes `hits misses evictions` on one line to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Output` if the file cannot be written.
    pub fn write_results(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        fs::write(
            path,
            format!("{} {} {}\n", self.hits, self.misses, self.evictions),
        )?;
        Ok(())
    }

    /// Prints access totals and hit/miss rates to stdout.
    pub fn print_detailed(&self) {
        println!("==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("accesses                 {}", self.accesses());
        println!("hits                     {}", self.hits);
        println!("misses                   {}", self.misses);
        println!("evictions                {}", self.evictions);
        println!("hit_rate                 {:.2}%", self.hit_rate() * 100.0);
        println!("miss_rate                {:.2}%", self.miss_rate() * 100.0);
        println!("==========================================================");
    }
}
