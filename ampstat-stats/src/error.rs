//! Input validation errors
//!
//! Raised at the boundary of each engine contract before any computation runs.
//! Zero denominators are not errors; see [`crate::Estimate::NotComputable`].

use thiserror::Error;

/// Invalid input rejected by an engine contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A signed count was below zero
    #[error("{field} must be non-negative, got {value}")]
    NegativeCount {
        /// Which count
        field: &'static str,
        /// Value supplied
        value: i64,
    },

    /// A count was fractional, infinite or NaN
    #[error("{field} must be a non-negative integer, got {value}")]
    NonIntegerCount {
        /// Which count
        field: &'static str,
        /// Value supplied
        value: f64,
    },

    /// The four counts sum past `u64::MAX`
    #[error("Counts too large: TP + FN + TN + FP must not exceed 18446744073709551615")]
    CountOverflow,

    /// Paired sequences of different lengths
    #[error("Paired outcome sequences differ in length: {first} vs {second}")]
    LengthMismatch {
        /// Length of the first sequence
        first: usize,
        /// Length of the second sequence
        second: usize,
    },

    /// An outcome other than 0 or 1
    #[error("Outcome at index {index} must be 0 or 1, got {value}")]
    NonBinaryOutcome {
        /// Position in the sequence
        index: usize,
        /// Value supplied
        value: u8,
    },

    /// Confidence level outside (0, 1)
    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    /// Metric name not recognised
    #[error("Unknown metric: {0} (expected sensitivity, specificity, ppv, npv or accuracy)")]
    UnknownMetric(String),
}
