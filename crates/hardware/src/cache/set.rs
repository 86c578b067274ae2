//! Cache sets and the rank-based replacement algorithm.
//!
//! Each line carries an integer rank approximating recency: rank 0 is the
//! most recently used line and rank `ways - 1` the least recently used.
//! Three update rules apply, one per outcome:
//!
//! - **Hit:** lines ranked strictly below the hit line's old rank move up by
//!   one; the hit line drops to 0. Lines ranked at or above it are untouched.
//! - **Miss into a free line:** the first invalid line is filled at rank 0 and
//!   every other line, valid or not, moves up by one.
//! - **Miss into a full set:** the first line at rank `ways - 1` is replaced at
//!   rank 0 and every other line moves up by one.
//!
//! Starting from an empty set these rules keep the ranks of a full set a
//! permutation of `0..ways`, so exactly one line is ever at the victim rank.

use tracing::warn;

use crate::common::AccessOutcome;

/// A single cache line: presence, tag, and recency rank. No data is stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line currently holds a block.
    pub valid: bool,
    /// Block identifier; meaningful only when `valid`.
    pub tag: u64,
    /// Recency rank; 0 is most recently used.
    pub rank: usize,
}

/// A fixed-size group of lines sharing one set index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines, all at rank 0.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    /// Associativity of the set.
    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// Lines in way order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|l| l.valid).count()
    }

    /// Returns `true` when every line is valid.
    pub fn is_full(&self) -> bool {
        self.lines.iter().all(|l| l.valid)
    }

    /// Way holding `tag`, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|l| l.valid && l.tag == tag)
    }

    /// Invalidates every line and resets ranks to 0.
    pub fn clear(&mut self) {
        self.lines.fill(CacheLine::default());
    }

    /// Looks up `tag`, installs it on a miss, and updates ranks.
    ///
    /// # Returns
    ///
    /// `Hit` if the tag was present, `Miss` if it was installed into a free
    /// line, or `MissWithEviction` if a valid line was replaced.
    pub fn process(&mut self, tag: u64) -> AccessOutcome {
        if let Some(way) = self.find(tag) {
            self.touch(way);
            return AccessOutcome::Hit;
        }

        if let Some(way) = self.lines.iter().position(|l| !l.valid) {
            self.install(way, tag);
            return AccessOutcome::Miss;
        }

        let way = self.victim();
        self.install(way, tag);
        AccessOutcome::MissWithEviction
    }

    /// Hit update: only lines more recent than the hit line age.
    fn touch(&mut self, way: usize) {
        let old_rank = self.lines[way].rank;
        for (i, line) in self.lines.iter_mut().enumerate() {
            if i == way {
                line.rank = 0;
            } else if line.rank < old_rank {
                line.rank += 1;
            }
        }
    }

    /// Miss update: fill `way` at rank 0 and age every other line.
    fn install(&mut self, way: usize, tag: u64) {
        for (i, line) in self.lines.iter_mut().enumerate() {
            if i == way {
                *line = CacheLine {
                    valid: true,
                    tag,
                    rank: 0,
                };
            } else {
                line.rank += 1;
            }
        }
    }

    /// First way at the least-recently-used rank.
    ///
    /// Falls back to the first line with the highest rank if no line sits at
    /// `ways - 1`, which only happens if the ranks were edited from outside.
    fn victim(&self) -> usize {
        let lru_rank = self.ways() - 1;
        if let Some(way) = self.lines.iter().position(|l| l.rank == lru_rank) {
            return way;
        }

        let max_rank = self.lines.iter().map(|l| l.rank).max().unwrap_or(0);
        let way = self
            .lines
            .iter()
            .position(|l| l.rank == max_rank)
            .unwrap_or(0);
        warn!(
            lru_rank,
            max_rank, way, "no line at the LRU rank; evicting the highest-ranked line"
        );
        way
    }

    /// Overwrites a line directly. Used to build specific states in tests.
    #[doc(hidden)]
    pub fn set_line(&mut self, way: usize, line: CacheLine) {
        self.lines[way] = line;
    }
}
