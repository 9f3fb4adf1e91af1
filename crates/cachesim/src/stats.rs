//! Derived statistics and their text/binary serialization.
//!
//! Both engines keep a small set of raw counters on the hot path and derive
//! percentages only when asked, via `compute_stats()`. The derivation is
//! idempotent: a second call with no intervening `access()` leaves the
//! fields unchanged.

use std::io::{self, Write};

/// Raw hit/miss/eviction counters for a [`crate::SingleLevelCache`].
///
/// These are the only fields touched on the hot path. Every other field on
/// [`Stats`] is derived from these four plus `evictions`, and only when
/// [`crate::SingleLevelCache::compute_stats`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Counters {
    pub(crate) read_hits: u64,
    pub(crate) read_misses: u64,
    pub(crate) write_hits: u64,
    pub(crate) write_misses: u64,
    pub(crate) evictions: u64,
}

/// A snapshot of a [`crate::SingleLevelCache`]'s statistics, including
/// derived totals and percentages.
///
/// Percentages (`read_hit_pct`, `write_hit_pct`, `read_miss_pct`,
/// `write_miss_pct`) are each counter's share of total accesses
/// (`reads + writes`). `eviction_pct` is instead the eviction ratio: the
/// fraction of misses that had to evict an incumbent line, i.e.
/// `evictions / (read_misses + write_misses)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    /// Number of reads that hit a resident line.
    pub read_hits: u64,
    /// Number of reads that missed.
    pub read_misses: u64,
    /// Number of writes that hit a resident line.
    pub write_hits: u64,
    /// Number of writes that missed.
    pub write_misses: u64,
    /// Number of admissions that had to evict an incumbent line.
    pub evictions: u64,
    /// `read_hits + read_misses`.
    pub reads: u64,
    /// `write_hits + write_misses`.
    pub writes: u64,
    /// `read_hits` as a percentage of `reads + writes`.
    pub read_hit_pct: f64,
    /// `write_hits` as a percentage of `reads + writes`.
    pub write_hit_pct: f64,
    /// `read_misses` as a percentage of `reads + writes`.
    pub read_miss_pct: f64,
    /// `write_misses` as a percentage of `reads + writes`.
    pub write_miss_pct: f64,
    /// `evictions / (read_misses + write_misses)`, as a percentage.
    pub eviction_pct: f64,
}

impl Stats {
    pub(crate) fn from_counters(c: &Counters) -> Self {
        let reads = c.read_hits + c.read_misses;
        let writes = c.write_hits + c.write_misses;
        let total = reads + writes;
        let misses = c.read_misses + c.write_misses;

        let pct = |n: u64, d: u64| if d == 0 { 0.0 } else { 100.0 * n as f64 / d as f64 };

        Self {
            read_hits: c.read_hits,
            read_misses: c.read_misses,
            write_hits: c.write_hits,
            write_misses: c.write_misses,
            evictions: c.evictions,
            reads,
            writes,
            read_hit_pct: pct(c.read_hits, total),
            write_hit_pct: pct(c.write_hits, total),
            read_miss_pct: pct(c.read_misses, total),
            write_miss_pct: pct(c.write_misses, total),
            eviction_pct: pct(c.evictions, misses),
        }
    }

    /// Writes the standard text statistics block to `writer`, appending
    /// rather than truncating.
    ///
    /// ```text
    /// ------------ Cache Statistics ------------
    /// READ_HITS<TAB>{RH} ({RHP}%)
    /// WRITE_HITS<TAB>{WH} ({WHP}%)
    /// READ_MISSES<TAB>{RM} ({RMP}%)
    /// WRITE_MISSES<TAB>{WM} ({WMP}%)
    /// EVICTIONS<TAB>{nE} ({EP}%)
    /// ```
    pub fn dump_text<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "------------ Cache Statistics ------------")?;
        writeln!(
            writer,
            "READ_HITS\t{} ({:.2}%)",
            self.read_hits, self.read_hit_pct
        )?;
        writeln!(
            writer,
            "WRITE_HITS\t{} ({:.2}%)",
            self.write_hits, self.write_hit_pct
        )?;
        writeln!(
            writer,
            "READ_MISSES\t{} ({:.2}%)",
            self.read_misses, self.read_miss_pct
        )?;
        writeln!(
            writer,
            "WRITE_MISSES\t{} ({:.2}%)",
            self.write_misses, self.write_miss_pct
        )?;
        writeln!(
            writer,
            "EVICTIONS\t{} ({:.2}%)",
            self.evictions, self.eviction_pct
        )
    }
}

/// Raw counters for a [`crate::TwoLevelCache`].
///
/// There is no eviction counter and no miss log at this level: §4.2 does
/// not maintain either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TwoLevelCounters {
    pub(crate) l1_read_hits: u64,
    pub(crate) l1_write_hits: u64,
    pub(crate) l2_read_hits: u64,
    pub(crate) l2_write_hits: u64,
    pub(crate) l2_read_misses: u64,
    pub(crate) l2_write_misses: u64,
}

/// A snapshot of a [`crate::TwoLevelCache`]'s statistics.
///
/// Classification per access is mutually exclusive: exactly one of
/// `l1_read_hits`, `l2_read_hits`, `l2_read_misses` advances per read, and
/// likewise for the three write counters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TwoLevelStats {
    /// Reads that hit in L1.
    pub l1_read_hits: u64,
    /// Writes that hit in L1.
    pub l1_write_hits: u64,
    /// Reads that missed L1 but hit in L2.
    pub l2_read_hits: u64,
    /// Writes that missed L1 but hit in L2.
    pub l2_write_hits: u64,
    /// Reads that missed both levels (went to memory).
    pub l2_read_misses: u64,
    /// Writes that missed both levels (went to memory).
    pub l2_write_misses: u64,
    /// Total reads issued.
    pub reads: u64,
    /// Total writes issued.
    pub writes: u64,
    /// `l1_read_hits` as a percentage of `reads`.
    pub l1_read_hit_pct: f64,
    /// `l1_write_hits` as a percentage of `writes`.
    pub l1_write_hit_pct: f64,
    /// `l2_read_hits` as a percentage of `reads`.
    pub l2_read_hit_pct: f64,
    /// `l2_write_hits` as a percentage of `writes`.
    pub l2_write_hit_pct: f64,
    /// `l2_read_misses` as a percentage of `reads`.
    pub l2_read_miss_pct: f64,
    /// `l2_write_misses` as a percentage of `writes`.
    pub l2_write_miss_pct: f64,
}

impl TwoLevelStats {
    pub(crate) fn from_counters(c: &TwoLevelCounters) -> Self {
        let reads = c.l1_read_hits + c.l2_read_hits + c.l2_read_misses;
        let writes = c.l1_write_hits + c.l2_write_hits + c.l2_write_misses;

        let pct = |n: u64, d: u64| if d == 0 { 0.0 } else { 100.0 * n as f64 / d as f64 };

        Self {
            l1_read_hits: c.l1_read_hits,
            l1_write_hits: c.l1_write_hits,
            l2_read_hits: c.l2_read_hits,
            l2_write_hits: c.l2_write_hits,
            l2_read_misses: c.l2_read_misses,
            l2_write_misses: c.l2_write_misses,
            reads,
            writes,
            l1_read_hit_pct: pct(c.l1_read_hits, reads),
            l1_write_hit_pct: pct(c.l1_write_hits, writes),
            l2_read_hit_pct: pct(c.l2_read_hits, reads),
            l2_write_hit_pct: pct(c.l2_write_hits, writes),
            l2_read_miss_pct: pct(c.l2_read_misses, reads),
            l2_write_miss_pct: pct(c.l2_write_misses, writes),
        }
    }

    /// Writes the three-level text statistics block (`L1:`, `L2:`, `Mem:`)
    /// to `writer`, appending rather than truncating.
    pub fn dump_text<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "------------ Cache Statistics ------------")?;
        writeln!(
            writer,
            "L1:\tREAD_HITS\t{} ({:.2}%)\tWRITE_HITS\t{} ({:.2}%)",
            self.l1_read_hits, self.l1_read_hit_pct, self.l1_write_hits, self.l1_write_hit_pct
        )?;
        writeln!(
            writer,
            "L2:\tREAD_HITS\t{} ({:.2}%)\tWRITE_HITS\t{} ({:.2}%)",
            self.l2_read_hits, self.l2_read_hit_pct, self.l2_write_hits, self.l2_write_hit_pct
        )?;
        writeln!(
            writer,
            "Mem:\tREAD_MISSES\t{} ({:.2}%)\tWRITE_MISSES\t{} ({:.2}%)",
            self.l2_read_misses,
            self.l2_read_miss_pct,
            self.l2_write_misses,
            self.l2_write_miss_pct
        )
    }
}
