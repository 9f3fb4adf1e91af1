//! Construction parameters for the cache engines.
//!
//! Both [`SingleLevelConfig`] and [`TwoLevelConfig`] are plain data — they
//! carry no behavior beyond [`validate`](SingleLevelConfig::validate). The
//! engines call `validate` once, at construction, and never again: the
//! hot path never re-checks a precondition it already proved.

use crate::error::ConfigurationError;

/// Construction parameters for a [`crate::SingleLevelCache`].
///
/// # Examples
///
/// ```
/// use cachesim::config::SingleLevelConfig;
///
/// let config = SingleLevelConfig {
///     n_lines: 1024,
///     ways: 8,
///     banks: 4,
///     line_bytes: 64,
///     allocate_on_write_only: false,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct SingleLevelConfig {
    /// Total number of cache lines across all banks and ways.
    pub n_lines: usize,
    /// Associativity: number of ways (resident lines) per set.
    pub ways: usize,
    /// Number of independent banks the lines are partitioned into.
    pub banks: usize,
    /// Size of one cache line, in bytes. Must be a power of two.
    pub line_bytes: usize,
    /// When `true`, a read that misses neither admits the line nor evicts
    /// an incumbent ("write buffer" mode). Writes always admit.
    pub allocate_on_write_only: bool,
}

impl SingleLevelConfig {
    /// Validates the divisibility and power-of-two constraints required by
    /// the bit-mask set-index derivation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `n_lines` is not evenly divisible
    /// by `ways` or `banks`, if the resulting sets-per-bank is not a power
    /// of two, if `line_bytes` is not a power of two, or if any of `ways`,
    /// `banks`, `line_bytes` is zero.
    pub fn validate(&self) -> Result<usize, ConfigurationError> {
        validate_dims(self.n_lines, self.ways, self.banks, self.line_bytes)
    }
}

/// Construction parameters for a [`crate::TwoLevelCache`].
///
/// L1 is always single-bank and always allocates on any access; only L2 is
/// banked. Both levels are hard-coded to LRU.
///
/// # Examples
///
/// ```
/// use cachesim::config::TwoLevelConfig;
///
/// let config = TwoLevelConfig {
///     l1_n_lines: 512,
///     l1_ways: 8,
///     l2_n_lines: 1_048_576,
///     l2_ways: 8,
///     l2_banks: 64,
///     line_bytes: 64,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct TwoLevelConfig {
    /// Total number of L1 cache lines (single bank).
    pub l1_n_lines: usize,
    /// L1 associativity.
    pub l1_ways: usize,
    /// Total number of L2 cache lines across all banks.
    pub l2_n_lines: usize,
    /// L2 associativity.
    pub l2_ways: usize,
    /// Number of L2 banks.
    pub l2_banks: usize,
    /// Size of one cache line, in bytes, shared by both levels.
    pub line_bytes: usize,
}

/// Both levels' derived (sets-per-bank) dimensions, returned together so a
/// single validation pass produces everything [`crate::TwoLevelCache::new`]
/// needs to preallocate.
pub(crate) struct TwoLevelDims {
    pub(crate) l1_sets: usize,
    pub(crate) l2_sets_per_bank: usize,
}

impl TwoLevelConfig {
    /// Validates both levels' divisibility and power-of-two constraints.
    ///
    /// # Errors
    ///
    /// See [`SingleLevelConfig::validate`]; the same constraints apply to
    /// L1 (with `banks = 1`) and to L2.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_dims(self.l1_n_lines, self.l1_ways, 1, self.line_bytes)?;
        validate_dims(self.l2_n_lines, self.l2_ways, self.l2_banks, self.line_bytes)?;
        Ok(())
    }

    pub(crate) fn dims(&self) -> Result<TwoLevelDims, ConfigurationError> {
        let l1_sets = validate_dims(self.l1_n_lines, self.l1_ways, 1, self.line_bytes)?;
        let l2_sets_per_bank =
            validate_dims(self.l2_n_lines, self.l2_ways, self.l2_banks, self.line_bytes)?;
        Ok(TwoLevelDims {
            l1_sets,
            l2_sets_per_bank,
        })
    }
}

/// Shared validation for both engines. Returns the sets-per-bank value on
/// success, since every caller immediately needs it to size its banks.
fn validate_dims(
    n_lines: usize,
    ways: usize,
    banks: usize,
    line_bytes: usize,
) -> Result<usize, ConfigurationError> {
    if ways == 0 {
        return Err(ConfigurationError::ZeroParameter { field: "ways" });
    }
    if banks == 0 {
        return Err(ConfigurationError::ZeroParameter { field: "banks" });
    }
    if line_bytes == 0 {
        return Err(ConfigurationError::ZeroParameter { field: "line_bytes" });
    }
    if !line_bytes.is_power_of_two() {
        return Err(ConfigurationError::LineBytesNotPowerOfTwo { line_bytes });
    }
    if n_lines % ways != 0 {
        return Err(ConfigurationError::LinesNotDivisibleByWays { n_lines, ways });
    }
    if n_lines % banks != 0 {
        return Err(ConfigurationError::LinesNotDivisibleByBanks { n_lines, banks });
    }
    let lines_per_bank = n_lines / banks;
    if lines_per_bank % ways != 0 {
        return Err(ConfigurationError::LinesNotDivisibleByWays { n_lines, ways });
    }
    let sets_per_bank = lines_per_bank / ways;
    if !sets_per_bank.is_power_of_two() {
        return Err(ConfigurationError::SetsPerBankNotPowerOfTwo { sets_per_bank });
    }
    Ok(sets_per_bank)
}
