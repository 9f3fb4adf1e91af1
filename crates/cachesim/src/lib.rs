//! Set-associative LRU cache simulator.
//!
//! This crate models the behavior of set-associative, write-allocate CPU
//! caches against an externally supplied stream of memory accesses. It is a
//! measurement tool for characterizing the working-set behavior of
//! application traces: it does not execute programs, move data, or model
//! timing. The caller is responsible for trace ingestion, CLI wiring, and
//! any statistics presentation beyond the plain-text format produced here.
//!
//! Two composable engines are provided:
//! 1. **[`SingleLevelCache`]** — one level of set-associative LRU storage,
//!    partitioned into independent banks, with an optional write-only
//!    allocation policy and a per-line miss histogram.
//! 2. **[`TwoLevelCache`]** — a strictly inclusive L1/L2 pair. Both levels
//!    are touched on every access; classification follows L1 hit, else L2
//!    hit, else miss.
//!
//! Supporting modules:
//! - [`config`] — construction parameters and their validation.
//! - [`error`] — the configuration error type.
//! - [`stats`] — derived hit/miss percentages and text/binary serialization.
//! - [`misslog`] — the per-line miss histogram shared by the single-level
//!   engine's text and binary dumps.

/// Cache engines: the LRU set-associative core and its two-level composition.
pub mod cache;
/// Construction parameters and their validation.
pub mod config;
/// The configuration error type.
pub mod error;
/// Per-line miss histogram.
pub mod misslog;
/// Derived statistics and their text/binary serialization.
pub mod stats;

pub use cache::{SingleLevelCache, TwoLevelCache};
pub use config::{SingleLevelConfig, TwoLevelConfig};
pub use error::ConfigurationError;
pub use misslog::MissLog;
pub use stats::{Stats, TwoLevelStats};
