//! The single-level, banked, set-associative LRU cache.
//!
//! This is the hot-path engine: every simulated memory reference passes
//! through [`SingleLevelCache::access`], which derives line/set/bank
//! coordinates, consults the per-set recency structure in [`super::set`],
//! and updates the counters in [`crate::stats`] and, if the line missed or
//! was evicted, the histogram in [`crate::misslog`].
//!
//! ## Design note: miss-log write-counting on evictions
//!
//! An evicted victim is tallied in the miss log's *write* channel, not a
//! separate eviction channel. The intent (preserved from the source this
//! crate reproduces) is dirty-victim write-back accounting: a line that
//! falls out of the cache is assumed to require a write-back to the next
//! level, which is a write-shaped event even though the access that
//! triggered the eviction may itself have been a read. This conflation is
//! deliberate and must be preserved for binary-log compatibility; see
//! [`crate::misslog`].
//!
//! ## Design note: two-level inclusivity gap
//!
//! This module has no knowledge of [`crate::TwoLevelCache`] — inclusivity
//! is a property of how that type composes two instances of the structure
//! here, not of this module itself.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::hash::fast_hash;
use super::set::Set;
use crate::config::SingleLevelConfig;
use crate::error::ConfigurationError;
use crate::misslog::MissLog;
use crate::stats::{Counters, Stats};

/// A single-level, set-associative, banked LRU cache with an optional
/// write-only allocation policy.
///
/// Construct with [`SingleLevelCache::new`], drive with
/// [`SingleLevelCache::access`] on every simulated memory reference, and
/// read results with [`SingleLevelCache::stats`] after
/// [`SingleLevelCache::compute_stats`].
#[derive(Debug)]
pub struct SingleLevelCache {
    config: SingleLevelConfig,
    line_shift: u32,
    sets_per_bank: usize,
    banks: Vec<Vec<Set>>,
    counters: Counters,
    miss_log: MissLog,
    stats: Stats,
    computed: bool,
}

impl SingleLevelCache {
    /// Builds a new cache from validated construction parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `config` fails
    /// [`SingleLevelConfig::validate`].
    pub fn new(config: SingleLevelConfig) -> Result<Self, ConfigurationError> {
        let sets_per_bank = config.validate()?;
        tracing::debug!(
            n_lines = config.n_lines,
            ways = config.ways,
            banks = config.banks,
            sets_per_bank,
            allocate_on_write_only = config.allocate_on_write_only,
            "constructing single-level cache"
        );
        let ways = config.ways;
        let banks = (0..config.banks)
            .map(|_| (0..sets_per_bank).map(|_| Set::new(ways)).collect())
            .collect();
        Ok(Self {
            config,
            line_shift: config.line_bytes.trailing_zeros(),
            sets_per_bank,
            banks,
            counters: Counters::default(),
            miss_log: MissLog::new(),
            stats: Stats::default(),
            computed: false,
        })
    }

    /// Derives `(bank_index, set_index)` for a line address.
    fn coordinates(&self, line: u64) -> (usize, usize) {
        let set_idx = (line as usize) & (self.sets_per_bank - 1);
        let bank_idx = fast_hash(line, self.config.banks);
        (bank_idx, set_idx)
    }

    /// Simulates one memory access. Infallible: the hot path never fails.
    ///
    /// Derives the line address from `address`, locates its set, and
    /// applies the `touch` contract: in
    /// [`SingleLevelConfig::allocate_on_write_only`] mode, a read miss
    /// neither admits the line nor evicts an incumbent; a resident line is
    /// always moved to the most-recently-used position regardless of mode.
    pub fn access(&mut self, address: u64, is_write: bool) {
        let line = address >> self.line_shift;
        let (bank_idx, set_idx) = self.coordinates(line);
        let should_admit = !self.config.allocate_on_write_only || is_write;

        let result = self.banks[bank_idx][set_idx].touch(line, should_admit);

        if let Some(victim) = result.evicted {
            self.counters.evictions += 1;
            self.miss_log.record_eviction(victim);
        }

        if !result.present && !is_write {
            self.miss_log.record_read_miss(line);
        }

        match (is_write, result.present) {
            (false, true) => self.counters.read_hits += 1,
            (false, false) => self.counters.read_misses += 1,
            (true, true) => self.counters.write_hits += 1,
            (true, false) => self.counters.write_misses += 1,
        }

        self.computed = false;
    }

    /// Resets counters and clears the miss log, leaving set contents
    /// untouched. Marks the end of a warm-up phase.
    pub fn zero_counters(&mut self) {
        self.counters = Counters::default();
        self.miss_log.clear();
        self.stats = Stats::default();
        self.computed = false;
    }

    /// Derives percentage and total fields from the raw counters.
    /// Idempotent: a second call with no intervening `access()` leaves
    /// [`SingleLevelCache::stats`]'s result unchanged.
    pub fn compute_stats(&mut self) {
        if self.computed {
            return;
        }
        self.stats = Stats::from_counters(&self.counters);
        self.computed = true;
    }

    /// Returns a snapshot of the current statistics, computing them first
    /// if they are stale.
    pub fn stats(&mut self) -> Stats {
        self.compute_stats();
        self.stats
    }

    /// Read-only access to the per-line miss histogram.
    #[must_use]
    pub fn miss_log(&self) -> &MissLog {
        &self.miss_log
    }

    /// Writes the text statistics block (see [`crate::stats::Stats::dump_text`])
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

    /// Writes the flat binary miss-log record format to `path`.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from creating or writing the file.
    pub fn dump_binary<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        self.miss_log.dump_binary_file(path)
    }
}
