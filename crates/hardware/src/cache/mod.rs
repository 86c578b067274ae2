//! Set-Associative Cache State Store.
//!
//! This module holds every set and line of a simulated cache and routes an
//! address to the set that owns it. The replacement algorithm itself lives
//! in [`set`]; this level only decodes addresses and selects sets.

/// Cache sets, lines, and the rank-update algorithm.
pub mod set;

pub use set::{CacheLine, CacheSet};

use tracing::{debug, trace};

use crate::common::{AccessOutcome, DecodedAddr, SimError, decode};
use crate::config::CacheConfig;

/// Functional set-associative cache model.
///
/// Tracks presence and recency of blocks only. Created once per run from a
/// validated [`CacheConfig`] and mutated by every data access.
#[derive(Clone, Debug)]
pub struct Cache {
    sets: Vec<CacheSet>,
    associativity: usize,
    set_index_bits: u32,
    block_offset_bits: u32,
}

impl Cache {
    /// Builds an empty cache for `config`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ConfigurationInvalid` if `config` fails
    /// [`CacheConfig::validate`]; no sets are allocated in that case.
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        config.validate()?;

        let num_sets = config.num_sets();
        debug!(
            sets = num_sets,
            ways = config.associativity,
            s = config.set_index_bits,
            b = config.block_offset_bits,
            block_bytes = config.block_bytes(),
            allocation = ?config.set_allocation,
            "building cache"
        );

        Ok(Self {
            sets: vec![CacheSet::new(config.associativity); num_sets],
            associativity: config.associativity,
            set_index_bits: config.set_index_bits,
            block_offset_bits: config.block_offset_bits,
        })
    }

    /// Number of allocated sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Lines per set.
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Number of set index bits (`s`).
    pub const fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    /// Number of block offset bits (`b`).
    pub const fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// Splits `addr` using this cache's geometry.
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        decode(addr, self.set_index_bits, self.block_offset_bits)
    }

    /// Set at `index`, if allocated.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// All allocated sets.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Checks whether the block containing `addr` is present. Does not update ranks.
    pub fn contains(&self, addr: u64) -> bool {
        let DecodedAddr { set_index, tag } = self.decode(addr);
        self.set(set_index as usize)
            .is_some_and(|set| set.find(tag).is_some())
    }

    /// Performs one lookup for `addr`, installing the block on a miss.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        let DecodedAddr { set_index, tag } = self.decode(addr);
        // The decoder masks the index to `s` bits and at least `2^s` sets exist.
        let set = &mut self.sets[set_index as usize];
        let outcome = set.process(tag);
        trace!(set_index, tag, ?outcome, "cache lookup");
        outcome
    }

    /// Performs one lookup for an already decoded `(set_index, tag)`.
    ///
    /// Returns `None`, leaving the cache untouched, if `set_index` is not an allocated set.
    pub fn process(&mut self, set_index: usize, tag: u64) -> Option<AccessOutcome> {
        let outcome = self.sets.get_mut(set_index)?.process(tag);
        trace!(set_index, tag, ?outcome, "cache lookup");
        Some(outcome)
    }

    /// Invalidates every line, returning the cache to its initial state.
    pub fn reset(&mut self) {
        for set in &mut self.sets {
            set.clear();
        }
    }
}
