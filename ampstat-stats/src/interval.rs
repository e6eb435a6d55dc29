//! Wilson Score Intervals
//!
//! Confidence intervals for binomial proportions. The Wilson score interval
//! stays inside [0, 1] and keeps sensible coverage for small denominators and
//! for proportions at or near 0 and 1, where the Wald interval collapses.

use crate::error::InputError;
use crate::estimate::Estimate;
use crate::{DEFAULT_CONFIDENCE_LEVEL, Z_95};
use serde::{Deserialize, Serialize};

/// Confidence interval bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound, at least 0
    pub lower: f64,
    /// Upper bound, at most 1
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Interval width
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies inside the closed interval
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Confidence level and the matching two-sided critical value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalConfig {
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// Standard normal critical value for `confidence_level`
    pub z: f64,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            z: Z_95,
        }
    }
}

impl IntervalConfig {
    /// Build a config for an arbitrary confidence level
    ///
    /// The critical value is derived from the standard normal quantile.
    pub fn with_confidence_level(confidence_level: f64) -> Result<Self, InputError> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(InputError::InvalidConfidenceLevel(confidence_level));
        }
        if (confidence_level - DEFAULT_CONFIDENCE_LEVEL).abs() < 1e-12 {
            return Ok(Self::default());
        }
        let alpha = 1.0 - confidence_level;
        Ok(Self {
            confidence_level,
            z: normal_quantile(1.0 - alpha / 2.0),
        })
    }
}

/// Wilson score interval for `successes` out of `trials`
///
/// `successes` must not exceed `trials`. Returns `NotComputable` when
/// `trials` is zero. Bounds are clamped to [0, 1].
pub fn wilson_interval(successes: u64, trials: u64, z: f64) -> Estimate<ConfidenceInterval> {
    debug_assert!(successes <= trials, "successes exceed trials");
    if trials == 0 {
        return Estimate::NotComputable;
    }

    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;

    let denominator = 1.0 + z2 / n;
    let centre = (p + z2 / (2.0 * n)) / denominator;
    let half_width = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denominator;

    let lower = centre - half_width;
    let upper = centre + half_width;
    if lower < 0.0 || upper > 1.0 {
        tracing::trace!(lower, upper, successes, trials, "clamping Wilson bounds");
    }

    // At p = 0 or p = 1 the matching bound is exact; pin it so rounding
    // cannot push the point estimate outside the interval.
    Estimate::Computable(ConfidenceInterval {
        lower: if successes == 0 { 0.0 } else { lower.max(0.0) },
        upper: if successes == trials { 1.0 } else { upper.min(1.0) },
    })
}

/// Standard normal quantile (inverse CDF)
///
/// Acklam's rational approximation, relative error below 1.2e-9.
pub fn normal_quantile(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}
