//! Configuration error definitions.
//!
//! Construction-time validation is the only fallible surface of this crate:
//! once a cache is built, `access()` is infallible by contract. Any
//! inconsistency discovered after construction would be an implementation
//! bug, not a data-driven failure, and is caught with `debug_assert!`
//! instead of a `Result`.

/// Errors raised while validating cache construction parameters.
///
/// These are all detected at construction time, before any set or bank is
/// allocated. None of them are recoverable for the instance being built —
/// the caller must supply a corrected configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// `n_lines` must be evenly divisible by `ways`.
    #[error("n_lines ({n_lines}) is not divisible by ways ({ways})")]
    LinesNotDivisibleByWays {
        /// Total number of cache lines requested.
        n_lines: usize,
        /// Associativity (ways per set) requested.
        ways: usize,
    },

    /// `n_lines` must be evenly divisible by `banks`.
    #[error("n_lines ({n_lines}) is not divisible by banks ({banks})")]
    LinesNotDivisibleByBanks {
        /// Total number of cache lines requested.
        n_lines: usize,
        /// Number of banks requested.
        banks: usize,
    },

    /// `(n_lines / banks) / ways`, the number of sets per bank, must be a
    /// power of two: the set index is derived with a bit mask.
    #[error("sets per bank ({sets_per_bank}) is not a power of two")]
    SetsPerBankNotPowerOfTwo {
        /// The computed (non-power-of-two) sets-per-bank value.
        sets_per_bank: usize,
    },

    /// `line_bytes` must be a power of two: the line address is derived by
    /// shifting out `log2(line_bytes)` low bits.
    #[error("line_bytes ({line_bytes}) is not a power of two")]
    LineBytesNotPowerOfTwo {
        /// The offending line size, in bytes.
        line_bytes: usize,
    },

    /// `ways`, `banks`, and `line_bytes` must all be non-zero.
    #[error("{field} must be non-zero")]
    ZeroParameter {
        /// Name of the offending construction parameter.
        field: &'static str,
    },
}
