//! Simulator: owns the cache and its counters side-by-side.
//!
//! Records are dispatched by kind. Loads and stores perform one lookup through
//! the same path, modifies perform two, and instruction fetches are ignored.

use std::fmt;
use std::io::Write;

use tracing::{debug, info};

use crate::cache::Cache;
use crate::common::{AccessOutcome, SimError};
use crate::config::Config;
use crate::stats::SimStats;
use crate::trace::AccessRecord;

/// Outcome of dispatching one data access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessReport {
    /// The access that was dispatched.
    pub record: AccessRecord,
    /// Outcome of the first (or only) lookup.
    pub first: AccessOutcome,
    /// Outcome of the store half of a modify.
    pub second: Option<AccessOutcome>,
}

impl AccessReport {
    /// Lookup outcomes in the order they happened.
    pub fn outcomes(&self) -> impl Iterator<Item = AccessOutcome> {
        std::iter::once(self.first).chain(self.second)
    }
}

impl fmt::Display for AccessReport {
    /// Formats the verbose trace line, without the newline: the record, then
    /// each event token, every field followed by a space (`L 10,1 miss `).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.record)?;
        for outcome in self.outcomes() {
            write!(f, "{outcome} ")?;
        }
        Ok(())
    }
}

/// Top-level trace driver: cache state + counters.
#[derive(Clone, Debug)]
pub struct Simulator {
    cache: Cache,
    stats: SimStats,
    /// Emit one line per data access from [`Simulator::run`].
    pub verbose: bool,
}

impl Simulator {
    /// Creates a simulator with an empty cache built from `config`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ConfigurationInvalid` if the cache geometry is rejected.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        Ok(Self::with_cache(
            Cache::new(&config.cache)?,
            config.general.verbose,
        ))
    }

    /// Wraps an existing cache with zeroed counters.
    pub const fn with_cache(cache: Cache, verbose: bool) -> Self {
        Self {
            cache,
            stats: SimStats {
                hits: 0,
                misses: 0,
                evictions: 0,
            },
            verbose,
        }
    }

    /// Current cache state.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Invalidates the cache and zeroes the counters.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.stats.reset();
    }

    /// Dispatches one record.
    ///
    /// # Returns
    ///
    /// The lookup outcomes, or `None` for an instruction fetch, which leaves
    /// both cache and counters untouched.
    pub fn step(&mut self, record: &AccessRecord) -> Option<AccessReport> {
        let lookups = record.kind.lookups();
        if lookups == 0 {
            return None;
        }

        let first = self.lookup(record.address);
        let second = (lookups > 1).then(|| self.lookup(record.address));
        Some(AccessReport {
            record: *record,
            first,
            second,
        })
    }

    /// Replays `records` to exhaustion.
    ///
    /// In verbose mode every data access writes its report line to `out`.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error yielded by `records`, or
    /// `SimError::Output` if writing to `out` fails. Counters reflect the
    /// records processed before the error, but a failed run has no valid summary.
    pub fn run<I, W>(&mut self, records: I, out: &mut W) -> Result<SimStats, SimError>
    where
        I: IntoIterator<Item = Result<AccessRecord, SimError>>,
        W: Write,
    {
        debug!(verbose = self.verbose, "replaying trace");
        let mut replayed = 0u64;
        for record in records {
            let record = record?;
            replayed += 1;
            if let Some(report) = self.step(&record) {
                if self.verbose {
                    writeln!(out, "{report}")?;
                }
            }
        }
        out.flush()?;

        info!(
            records = replayed,
            hits = self.stats.hits,
            misses = self.stats.misses,
            evictions = self.stats.evictions,
            "trace replay finished"
        );
        Ok(self.stats)
    }

    /// One lookup: decode, update the addressed set, count the outcome.
    fn lookup(&mut self, address: u64) -> AccessOutcome {
        let outcome = self.cache.access(address);
        self.stats.record(outcome);
        outcome
    }
}
