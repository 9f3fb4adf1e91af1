//! Per-line miss histogram.
//!
//! The miss log records, for every line that ever missed on a read or was
//! evicted, how many times each of those two events happened. Eviction of a
//! victim is recorded in the *write* channel: the original intent is
//! dirty-victim write-back accounting, and it is preserved here for
//! binary-log compatibility even though it conflates "this line needs a
//! write-back" with an actual write-miss event. See the module-level note
//! on [`crate::cache::single`] for the rest of that design discussion.
//!
//! The log grows monotonically between
//! [`zero_counters`](crate::SingleLevelCache::zero_counters) calls: it is
//! never pruned by `stats()` or `dump_*`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One line's accumulated read-miss and eviction ("write-miss") counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MissEntry {
    /// Number of read misses recorded for this line.
    pub read_misses: u64,
    /// Number of evictions of this line recorded as write-back events.
    pub write_misses: u64,
}

/// A mapping from line address to its accumulated miss counts.
///
/// Iteration order is the underlying hash map's native (unspecified) order,
/// matching the source's behavior of writing the binary log by iterating an
/// unordered map with no sort pass.
#[derive(Debug, Clone, Default)]
pub struct MissLog {
    entries: HashMap<u64, MissEntry>,
}

impl MissLog {
    /// Creates an empty miss log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a read miss for `line`.
    pub(crate) fn record_read_miss(&mut self, line: u64) {
        self.entries.entry(line).or_default().read_misses += 1;
    }

    /// Records an eviction of `line` (tallied in the write channel).
    pub(crate) fn record_eviction(&mut self, line: u64) {
        self.entries.entry(line).or_default().write_misses += 1;
    }

    /// Clears every entry. Called by `zero_counters()`.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct lines with at least one recorded event.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no recorded events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the accumulated counts for one line.
    #[must_use]
    pub fn get(&self, line: u64) -> Option<MissEntry> {
        self.entries.get(&line).copied()
    }

    /// Iterates `(line_address, entry)` pairs in the map's native order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, MissEntry)> + '_ {
        self.entries.iter().map(|(&line, &entry)| (line, entry))
    }

    /// Writes the flat binary record format to `writer`:
    /// `line_address (u64) ‖ n_reads (i64) ‖ n_writes (i64)`, host byte
    /// order, no header and no record count — readers consume until EOF.
    pub fn dump_binary<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for (line, entry) in self.iter() {
            writer.write_all(&line.to_ne_bytes())?;
            writer.write_all(&(entry.read_misses as i64).to_ne_bytes())?;
            writer.write_all(&(entry.write_misses as i64).to_ne_bytes())?;
        }
        Ok(())
    }

    /// Creates (or truncates) the file at `path` and writes the binary log
    /// to it.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from creating or writing the file.
    pub fn dump_binary_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.dump_binary(&mut writer)?;
        writer.flush()
    }
}
