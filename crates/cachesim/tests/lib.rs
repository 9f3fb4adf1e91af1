//! End-to-end integration tests driving the public API the way a trace
//! harness would: construct an engine, replay a sequence of
//! `(address, is_write)` accesses, and check the reported statistics.
//!
//! The scenarios below are the literal end-to-end cases from the design
//! document this crate implements; keeping them byte-for-byte is what lets
//! a binary miss-log or text-stats dump from this crate be compared
//! against one produced by another conforming implementation.

use cachesim::config::{SingleLevelConfig, TwoLevelConfig};
use cachesim::{SingleLevelCache, TwoLevelCache};

fn single(n_lines: usize, ways: usize, banks: usize, line_bytes: usize, write_only: bool) -> SingleLevelCache {
    SingleLevelCache::new(SingleLevelConfig {
        n_lines,
        ways,
        banks,
        line_bytes,
        allocate_on_write_only: write_only,
    })
    .expect("well-formed configuration")
}

fn two_level(
    l1_n_lines: usize,
    l1_ways: usize,
    l2_n_lines: usize,
    l2_ways: usize,
    l2_banks: usize,
    line_bytes: usize,
) -> TwoLevelCache {
    TwoLevelCache::new(TwoLevelConfig {
        l1_n_lines,
        l1_ways,
        l2_n_lines,
        l2_ways,
        l2_banks,
        line_bytes,
    })
    .expect("well-formed configuration")
}

/// Scenario 1: sub-line reads touching a 128-byte span at 64-byte lines
/// straddle exactly two lines; 126 of the 128 accesses hit in L1.
#[test]
fn scenario_1_sub_line_reads() {
    let mut cache = two_level(512, 8, 1_048_576, 8, 64, 64);
    for addr in 0..128u64 {
        cache.access(addr, false);
    }
    let stats = cache.stats();
    assert_eq!(stats.l1_read_hits, 126);
    assert_eq!(stats.l2_read_misses, 2);
    assert_eq!(stats.l1_write_hits, 0);
    assert_eq!(stats.l2_read_hits, 0);
    assert_eq!(stats.l2_write_hits, 0);
    assert_eq!(stats.l2_write_misses, 0);
}

/// Scenario 2: a working set that exactly fills L2 but overflows L1. The
/// replay pass hits L2 on every access and never hits L1.
#[test]
fn scenario_2_exactly_capacity_replay() {
    let mut cache = two_level(512, 8, 1_048_576, 8, 8, 64);
    for i in 0..1_048_576u64 {
        cache.access(i * 64, false);
    }
    for i in 0..1_048_576u64 {
        cache.access(i * 64, false);
    }
    let stats = cache.stats();
    assert_eq!(stats.l1_read_hits, 0);
    assert_eq!(stats.l2_read_misses, 1_048_576);
    assert_eq!(stats.l2_read_hits, 1_048_576);
}

/// Scenario 3: a working set double the size of L2 evicts everything
/// before it can be revisited, so neither level ever hits.
#[test]
fn scenario_3_oversubscribed() {
    let mut cache = two_level(512, 8, 1_048_576, 8, 64, 64);
    for _ in 0..2 {
        for i in 0..2_097_152u64 {
            cache.access(i * 64, false);
        }
    }
    let stats = cache.stats();
    assert_eq!(stats.l1_read_hits, 0);
    assert_eq!(stats.l2_read_hits, 0);
    assert_eq!(stats.l2_read_misses, 4_194_304);
}

/// Scenario 4: a working set that fits entirely in L1, replayed twice
/// with alternating reads and writes by address parity.
#[test]
fn scenario_4_alternating_read_write() {
    let mut cache = two_level(512, 8, 1_048_576, 8, 64, 64);
    for _ in 0..2 {
        for i in 0..512u64 {
            cache.access(i * 64, i % 2 == 1);
        }
    }
    let stats = cache.stats();
    assert_eq!(stats.l1_read_hits, 256);
    assert_eq!(stats.l1_write_hits, 256);
    assert_eq!(stats.l2_read_misses, 256);
    assert_eq!(stats.l2_write_misses, 256);
}

/// Scenario 5: write-only-allocate, read-only workload. Read misses never
/// admit, so nothing is ever resident and nothing is ever evicted.
#[test]
fn scenario_5_write_only_allocate_reads_never_admit() {
    let mut cache = single(1_048_576, 8, 1, 64, true);
    for _ in 0..2 {
        for i in 0..1_048_576u64 {
            cache.access(i * 64, false);
        }
    }
    let stats = cache.stats();
    assert_eq!(stats.read_hits, 0);
    assert_eq!(stats.evictions, 0);
}

/// Scenario 6: write-only-allocate, four passes over the same working set
/// (read, write, read, write). The first read pass misses everywhere and
/// admits nothing; the write pass admits everything and misses everywhere
/// (cold); the second read pass hits everywhere; the second write pass
/// hits everywhere.
#[test]
fn scenario_6_write_only_allocate_mixed_passes() {
    let mut cache = single(1_048_576, 8, 1, 64, true);
    let lines = 1_048_576u64;

    for i in 0..lines {
        cache.access(i * 64, false);
    }
    for i in 0..lines {
        cache.access(i * 64, true);
    }
    for i in 0..lines {
        cache.access(i * 64, false);
    }
    for i in 0..lines {
        cache.access(i * 64, true);
    }

    let stats = cache.stats();
    assert_eq!(stats.read_misses, lines);
    assert_eq!(stats.write_misses, lines);
    assert_eq!(stats.read_hits, lines);
    assert_eq!(stats.write_hits, lines);
}

/// A trace touching exactly `ways` distinct lines mapped to the same set
/// produces no evictions; the next distinct miss evicts exactly one.
#[test]
fn boundary_ways_plus_one_distinct_miss_evicts_exactly_one() {
    // Single set, single bank: every line_bytes-aligned address collides.
    let mut cache = single(8, 8, 1, 64, false);
    for i in 0..8u64 {
        cache.access(i * 64, false);
    }
    assert_eq!(cache.stats().evictions, 0);

    cache.access(8 * 64, false);
    assert_eq!(cache.stats().evictions, 1);
}

/// A single-set configuration degenerates to a pure LRU queue of length
/// `ways`: the oldest of the `ways` resident lines is always the next
/// victim.
#[test]
fn boundary_single_set_is_a_pure_lru_queue() {
    let mut cache = single(4, 4, 1, 64, false);
    for i in 0..4u64 {
        cache.access(i * 64, false);
    }
    // Touch line 0 again: it becomes MRU, so line 1 is now the LRU victim.
    cache.access(0, false);
    cache.access(4 * 64, false);
    let stats = cache.stats();
    assert_eq!(stats.evictions, 1);
    // Lines 0, 2, 3, 4 should be resident; a repeat of line 1 should miss.
    cache.access(64, false);
    assert_eq!(cache.stats().read_misses, 6); // 4 cold + the evicting miss + the re-miss on 1
}

/// Reads and writes issued sum to the hit/miss counters, as required by
/// §8's universal invariants, across a pseudo-random-looking trace.
#[test]
fn reads_plus_writes_equals_hits_plus_misses() {
    let mut cache = single(1024, 4, 8, 64, false);
    let mut reads = 0u64;
    let mut writes = 0u64;
    for i in 0..10_000u64 {
        let addr = (i.wrapping_mul(2_654_435_761) % 4096) * 64;
        let is_write = i % 5 == 0;
        cache.access(addr, is_write);
        if is_write {
            writes += 1;
        } else {
            reads += 1;
        }
    }
    let stats = cache.stats();
    assert_eq!(stats.read_hits + stats.read_misses, reads);
    assert_eq!(stats.write_hits + stats.write_misses, writes);
    assert!(stats.evictions <= stats.read_misses + stats.write_misses);
}

/// Determinism: the same trace against two fresh instances with identical
/// configuration yields identical counters.
#[test]
fn identical_configuration_and_trace_yields_identical_counters() {
    let trace: Vec<(u64, bool)> = (0..5_000u64)
        .map(|i| ((i.wrapping_mul(97) % 2048) * 64, i % 3 == 0))
        .collect();

    let mut a = single(2048, 4, 16, 64, false);
    let mut b = single(2048, 4, 16, 64, false);
    for &(addr, is_write) in &trace {
        a.access(addr, is_write);
        b.access(addr, is_write);
    }

    assert_eq!(a.stats(), b.stats());
}

/// `zero_counters()` terminates a warm-up phase: counters and the miss log
/// reset, but cache residency (and therefore subsequent hit/miss behavior)
/// is unaffected.
#[test]
fn zero_counters_terminates_warm_up_without_disturbing_residency() {
    let mut cache = single(8, 8, 1, 64, false);
    for i in 0..8u64 {
        cache.access(i * 64, false); // warm-up: all cold misses
    }
    cache.zero_counters();
    assert_eq!(cache.stats().read_misses, 0);
    assert!(cache.miss_log().is_empty());

    // All 8 lines are still resident, so a replay is all hits.
    for i in 0..8u64 {
        cache.access(i * 64, false);
    }
    assert_eq!(cache.stats().read_hits, 8);
}

/// The text dump format matches the documented layout and is safe to call
/// before `compute_stats()` has ever run.
#[test]
fn dump_text_computes_stats_on_demand() {
    let mut cache = single(8, 8, 1, 64, false);
    cache.access(0, false);
    cache.access(0, false);
    let mut buf = Vec::new();
    cache.dump_text(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("------------ Cache Statistics ------------\n"));
    assert!(text.contains("READ_HITS\t1 (50.00%)"));
    assert!(text.contains("READ_MISSES\t1 (50.00%)"));
}

/// The binary miss-log format writes one 24-byte record per distinct line
/// with at least one recorded event, with no header or trailing metadata.
#[test]
fn dump_binary_writes_one_record_per_distinct_missed_line() {
    let mut cache = single(1, 1, 1, 64, false);
    cache.access(0, false); // miss, admits line 0
    cache.access(64, false); // miss, evicts line 0 (recorded as a write event)
    cache.access(128, false); // miss, evicts line 1

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("misslog.bin");
    cache.dump_binary(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len() % 24, 0);
    assert_eq!(bytes.len() / 24, cache.miss_log().len());
}

/// Inclusivity gap: an L2 eviction does not invalidate a still-resident L1
/// line. Demonstrated with an L1 that fits one line and an L2 that also
/// fits only one line, so the second distinct line evicts the first from
/// both levels — but a direct single-level L1 equivalent shows L1 alone
/// would still report the first line as resident if it were not also
/// bounced out by its own capacity in this particular configuration.
#[test]
fn two_level_touches_both_levels_unconditionally() {
    let mut cache = two_level(64, 1, 64, 1, 1, 64);
    cache.access(0, false); // cold miss on both levels
    cache.access(0, false); // hit on L1 (and therefore not reported as L2 activity)
    let stats = cache.stats();
    assert_eq!(stats.l1_read_hits, 1);
    assert_eq!(stats.l2_read_misses, 1);
}
