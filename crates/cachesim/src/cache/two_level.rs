//! The strictly-inclusive L1/L2 two-level cache.
//!
//! Both levels are touched unconditionally on every access; classification
//! follows the priority *(L1 hit) → (L2 hit) → miss-to-memory*. L1 is
//! single-bank; L2 is banked exactly as in [`crate::SingleLevelCache`].
//! Neither level runs a write-only-allocate policy or maintains a miss log
//! — see [`crate::config::TwoLevelConfig`].
//!
//! ## Design note: the inclusivity gap
//!
//! Because L2 is touched (and can evict) independently of whether L1 also
//! holds the line, a line can fall out of L2 while L1 still holds it. This
//! simulator does not invalidate L1 on an L2 eviction: L1 lookups happen
//! first in the access order, so the only effect is that the reported L2
//! hit rate is a slight overestimate of what strict inclusion would show.
//! This is specified behavior, reproduced from the source this crate
//! models, not a defect to be fixed.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::hash::fast_hash;
use super::set::Set;
use crate::config::TwoLevelConfig;
use crate::error::ConfigurationError;
use crate::stats::{TwoLevelCounters, TwoLevelStats};

/// A strictly inclusive two-level (L1/L2) set-associative LRU cache.
///
/// Construct with [`TwoLevelCache::new`], drive with
/// [`TwoLevelCache::access`], and read results with
/// [`TwoLevelCache::stats`] after [`TwoLevelCache::compute_stats`].
#[derive(Debug)]
pub struct TwoLevelCache {
    config: TwoLevelConfig,
    line_shift: u32,
    l1_sets: usize,
    l1: Vec<Set>,
    l2_sets_per_bank: usize,
    l2: Vec<Vec<Set>>,
    counters: TwoLevelCounters,
    stats: TwoLevelStats,
    computed: bool,
}

impl TwoLevelCache {
    /// Builds a new two-level cache from validated construction parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `config` fails
    /// [`TwoLevelConfig::validate`].
    pub fn new(config: TwoLevelConfig) -> Result<Self, ConfigurationError> {
        let dims = config.dims()?;
        tracing::debug!(
            l1_sets = dims.l1_sets,
            l1_ways = config.l1_ways,
            l2_sets_per_bank = dims.l2_sets_per_bank,
            l2_ways = config.l2_ways,
            l2_banks = config.l2_banks,
            "constructing two-level cache"
        );
        let l1 = (0..dims.l1_sets).map(|_| Set::new(config.l1_ways)).collect();
        let l2 = (0..config.l2_banks)
            .map(|_| {
                (0..dims.l2_sets_per_bank)
                    .map(|_| Set::new(config.l2_ways))
                    .collect()
            })
            .collect();
        Ok(Self {
            config,
            line_shift: config.line_bytes.trailing_zeros(),
            l1_sets: dims.l1_sets,
            l1,
            l2_sets_per_bank: dims.l2_sets_per_bank,
            l2,
            counters: TwoLevelCounters::default(),
            stats: TwoLevelStats::default(),
            computed: false,
        })
    }

    /// Simulates one memory access against both levels. Infallible.
    ///
    /// Touches L1 and L2 unconditionally (see the module design note),
    /// then classifies the access as an L1 hit, else an L2 hit, else a
    /// miss to memory, incrementing exactly one of the six counters.
    pub fn access(&mut self, address: u64, is_write: bool) {
        let line = address >> self.line_shift;

        let l1_set_idx = (line as usize) & (self.l1_sets - 1);
        let l1_result = self.l1[l1_set_idx].touch(line, true);

        let l2_bank_idx = fast_hash(line, self.config.l2_banks);
        let l2_set_idx = (line as usize) & (self.l2_sets_per_bank - 1);
        let l2_result = self.l2[l2_bank_idx][l2_set_idx].touch(line, true);

        match (is_write, l1_result.present, l2_result.present) {
            (false, true, _) => self.counters.l1_read_hits += 1,
            (false, false, true) => self.counters.l2_read_hits += 1,
            (false, false, false) => self.counters.l2_read_misses += 1,
            (true, true, _) => self.counters.l1_write_hits += 1,
            (true, false, true) => self.counters.l2_write_hits += 1,
            (true, false, false) => self.counters.l2_write_misses += 1,
        }

        self.computed = false;
    }

    /// Resets counters, leaving both levels' contents untouched. There is
    /// no miss log at this level to clear.
    pub fn zero_counters(&mut self) {
        self.counters = TwoLevelCounters::default();
        self.stats = TwoLevelStats::default();
        self.computed = false;
    }

    /// Derives percentage and total fields from the raw counters.
    /// Idempotent: a second call with no intervening `access()` leaves
    /// [`TwoLevelCache::stats`]'s result unchanged.
    pub fn compute_stats(&mut self) {
        if self.computed {
            return;
        }
        self.stats = TwoLevelStats::from_counters(&self.counters);
        self.computed = true;
    }

    /// Returns a snapshot of the current statistics, computing them first
    /// if they are stale.
    pub fn stats(&mut self) -> TwoLevelStats {
        self.compute_stats();
        self.stats
    }

    /// Writes the three-level (`L1:`, `L2:`, `Mem:`) text statistics block
    /// to `writer`, computing stats first if they are stale.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `writer`.
    pub fn dump_text<W: Write>(&mut self, writer: W) -> io::Result<()> {
        self.compute_stats();
        self.stats.dump_text(writer)
    }

    /// Appends the text statistics block to the file at `path`, creating
    /// it if necessary.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from opening or writing the file.
    pub fn dump_text_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let file = File::options().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.dump_text(&mut writer)?;
        writer.flush()
    }
}
