//! Diagnostic Metrics
//!
//! Point estimates and Wilson intervals for the five standard measures of a
//! binary assay against a reference standard:
//! - Sensitivity = TP / (TP + FN)
//! - Specificity = TN / (TN + FP)
//! - PPV = TP / (TP + FP)
//! - NPV = TN / (TN + FN)
//! - Accuracy = (TP + TN) / N

use crate::error::InputError;
use crate::estimate::Estimate;
use crate::interval::{IntervalConfig, wilson_interval};
use serde::{Deserialize, Serialize};

/// 2x2 confusion-matrix counts for one technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConfusionCounts {
    /// TP
    pub true_positives: u64,
    /// FN
    pub false_negatives: u64,
    /// TN
    pub true_negatives: u64,
    /// FP
    pub false_positives: u64,
}

impl ConfusionCounts {
    /// Counts in TP, FN, TN, FP order
    pub const fn new(
        true_positives: u64,
        false_negatives: u64,
        true_negatives: u64,
        false_positives: u64,
    ) -> Self {
        Self {
            true_positives,
            false_negatives,
            true_negatives,
            false_positives,
        }
    }

    /// Validate signed counts, rejecting negatives and totals past `u64::MAX`
    pub fn try_new(tp: i64, fn_: i64, tn: i64, fp: i64) -> Result<Self, InputError> {
        Self::new(
            non_negative("TP", tp)?,
            non_negative("FN", fn_)?,
            non_negative("TN", tn)?,
            non_negative("FP", fp)?,
        )
        .checked()
    }

    /// Validate real-valued counts, rejecting negatives, fractions and
    /// totals past `u64::MAX`
    pub fn from_reals(tp: f64, fn_: f64, tn: f64, fp: f64) -> Result<Self, InputError> {
        Self::new(
            integral("TP", tp)?,
            integral("FN", fn_)?,
            integral("TN", tn)?,
            integral("FP", fp)?,
        )
        .checked()
    }

    /// Ensure N fits in a `u64`, so every partial sum does too
    pub fn checked(self) -> Result<Self, InputError> {
        self.true_positives
            .checked_add(self.false_negatives)
            .and_then(|s| s.checked_add(self.true_negatives))
            .and_then(|s| s.checked_add(self.false_positives))
            .map(|_| self)
            .ok_or(InputError::CountOverflow)
    }

    /// N = TP + FN + TN + FP
    ///
    /// Saturates for counts built with [`ConfusionCounts::new`] that skip
    /// [`ConfusionCounts::checked`].
    pub fn total(&self) -> u64 {
        self.true_positives
            .saturating_add(self.false_negatives)
            .saturating_add(self.true_negatives)
            .saturating_add(self.false_positives)
    }

    /// Reference-positive samples (TP + FN)
    pub fn actually_positive(&self) -> u64 {
        self.true_positives.saturating_add(self.false_negatives)
    }

    /// Reference-negative samples (TN + FP)
    pub fn actually_negative(&self) -> u64 {
        self.true_negatives.saturating_add(self.false_positives)
    }

    /// Test-positive samples (TP + FP)
    pub fn predicted_positive(&self) -> u64 {
        self.true_positives.saturating_add(self.false_positives)
    }

    /// Test-negative samples (TN + FN)
    pub fn predicted_negative(&self) -> u64 {
        self.true_negatives.saturating_add(self.false_negatives)
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, InputError> {
    u64::try_from(value).map_err(|_| InputError::NegativeCount { field, value })
}

fn integral(field: &'static str, value: f64) -> Result<u64, InputError> {
    // 2^64; `u64::MAX as f64` rounds up to this value
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;

    if !value.is_finite() || value.fract() != 0.0 {
        return Err(InputError::NonIntegerCount { field, value });
    }
    if value < 0.0 {
        return Err(InputError::NegativeCount {
            field,
            value: value as i64,
        });
    }
    if value >= LIMIT {
        return Err(InputError::CountOverflow);
    }
    Ok(value as u64)
}

/// Diagnostic performance measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// True positive rate
    Sensitivity,
    /// True negative rate
    Specificity,
    /// Positive predictive value
    Ppv,
    /// Negative predictive value
    Npv,
    /// Proportion of correct results
    Accuracy,
}

impl Metric {
    /// All metrics in display order
    pub const ALL: [Metric; 5] = [
        Metric::Sensitivity,
        Metric::Specificity,
        Metric::Ppv,
        Metric::Npv,
        Metric::Accuracy,
    ];

    /// Machine-readable key
    pub fn key(self) -> &'static str {
        match self {
            Metric::Sensitivity => "sensitivity",
            Metric::Specificity => "specificity",
            Metric::Ppv => "ppv",
            Metric::Npv => "npv",
            Metric::Accuracy => "accuracy",
        }
    }

    /// Numerator and denominator of the proportion
    pub fn successes_and_trials(self, counts: &ConfusionCounts) -> (u64, u64) {
        match self {
            Metric::Sensitivity => (counts.true_positives, counts.actually_positive()),
            Metric::Specificity => (counts.true_negatives, counts.actually_negative()),
            Metric::Ppv => (counts.true_positives, counts.predicted_positive()),
            Metric::Npv => (counts.true_negatives, counts.predicted_negative()),
            Metric::Accuracy => (
                counts.true_positives.saturating_add(counts.true_negatives),
                counts.total(),
            ),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Sensitivity => write!(f, "Sensitivity"),
            Metric::Specificity => write!(f, "Specificity"),
            Metric::Ppv => write!(f, "PPV"),
            Metric::Npv => write!(f, "NPV"),
            Metric::Accuracy => write!(f, "Accuracy"),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sensitivity" | "sens" | "tpr" | "recall" => Ok(Metric::Sensitivity),
            "specificity" | "spec" | "tnr" => Ok(Metric::Specificity),
            "ppv" | "precision" => Ok(Metric::Ppv),
            "npv" => Ok(Metric::Npv),
            "accuracy" | "acc" => Ok(Metric::Accuracy),
            other => Err(InputError::UnknownMetric(other.to_string())),
        }
    }
}

/// Point estimate with its confidence bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricEstimate {
    /// Observed proportion
    pub point_estimate: f64,
    /// Wilson lower bound
    pub ci_low: f64,
    /// Wilson upper bound
    pub ci_high: f64,
}

impl MetricEstimate {
    /// Proportion `successes / trials` with a Wilson interval
    pub fn proportion(successes: u64, trials: u64, z: f64) -> Estimate<Self> {
        wilson_interval(successes, trials, z).map(|ci| MetricEstimate {
            point_estimate: successes as f64 / trials as f64,
            ci_low: ci.lower,
            ci_high: ci.upper,
        })
    }
}

/// All five diagnostic measures for one set of counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMetrics {
    /// TP / (TP + FN)
    pub sensitivity: Estimate<MetricEstimate>,
    /// TN / (TN + FP)
    pub specificity: Estimate<MetricEstimate>,
    /// TP / (TP + FP)
    pub ppv: Estimate<MetricEstimate>,
    /// TN / (TN + FN)
    pub npv: Estimate<MetricEstimate>,
    /// (TP + TN) / N
    pub accuracy: Estimate<MetricEstimate>,
}

impl DiagnosticMetrics {
    /// Look up one measure
    pub fn get(&self, metric: Metric) -> Estimate<MetricEstimate> {
        match metric {
            Metric::Sensitivity => self.sensitivity,
            Metric::Specificity => self.specificity,
            Metric::Ppv => self.ppv,
            Metric::Npv => self.npv,
            Metric::Accuracy => self.accuracy,
        }
    }

    /// Iterate measures in display order
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Estimate<MetricEstimate>)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

/// Compute all measures with 95% Wilson intervals
pub fn compute_metrics(counts: &ConfusionCounts) -> DiagnosticMetrics {
    compute_metrics_with(counts, &IntervalConfig::default())
}

/// Compute all measures at the configured confidence level
pub fn compute_metrics_with(counts: &ConfusionCounts, config: &IntervalConfig) -> DiagnosticMetrics {
    let estimate = |metric: Metric| {
        let (successes, trials) = metric.successes_and_trials(counts);
        let result = MetricEstimate::proportion(successes, trials, config.z);
        if !result.is_computable() {
            tracing::debug!(%metric, ?counts, "zero denominator, metric not computable");
        }
        result
    };

    DiagnosticMetrics {
        sensitivity: estimate(Metric::Sensitivity),
        specificity: estimate(Metric::Specificity),
        ppv: estimate(Metric::Ppv),
        npv: estimate(Metric::Npv),
        accuracy: estimate(Metric::Accuracy),
    }
}

/// A named technique with its counts and derived measures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueResult {
    /// Technique label
    pub name: String,
    /// Counts the metrics were computed from
    pub counts: ConfusionCounts,
    /// All five estimates
    pub metrics: DiagnosticMetrics,
}

impl TechniqueResult {
    /// Compute a result at the default 95% level
    pub fn new(name: impl Into<String>, counts: ConfusionCounts) -> Self {
        Self::with_config(name, counts, &IntervalConfig::default())
    }

    /// Compute a result at the configured confidence level
    pub fn with_config(
        name: impl Into<String>,
        counts: ConfusionCounts,
        config: &IntervalConfig,
    ) -> Self {
        Self {
            name: name.into(),
            counts,
            metrics: compute_metrics_with(&counts, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(e: Estimate<MetricEstimate>) -> f64 {
        e.into_option().expect("computable").point_estimate
    }

    #[test]
    fn test_reference_counts() {
        let metrics = compute_metrics(&ConfusionCounts::new(95, 5, 90, 10));

        assert!((point(metrics.sensitivity) - 0.95).abs() < 1e-12);
        assert!((point(metrics.specificity) - 0.90).abs() < 1e-12);
        assert!((point(metrics.ppv) - 95.0 / 105.0).abs() < 1e-12);
        assert!((point(metrics.npv) - 90.0 / 95.0).abs() < 1e-12);
        assert!((point(metrics.accuracy) - 0.925).abs() < 1e-12);

        let sens = metrics.sensitivity.into_option().unwrap();
        assert!((sens.ci_low - 0.8883).abs() < 1e-3);
        assert!((sens.ci_high - 0.9785).abs() < 1e-3);
    }

    #[test]
    fn test_no_positives_sensitivity_not_computable() {
        let metrics = compute_metrics(&ConfusionCounts::new(0, 0, 50, 5));

        assert_eq!(metrics.sensitivity, Estimate::NotComputable);

        let spec = metrics.specificity.into_option().unwrap();
        assert!((spec.point_estimate - 50.0 / 55.0).abs() < 1e-12);
        assert!(spec.ci_low <= spec.point_estimate && spec.point_estimate <= spec.ci_high);

        // TP + FP = 5, so PPV is defined (and zero)
        assert!(point(metrics.ppv).abs() < f64::EPSILON);
        assert!((point(metrics.npv) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_zero_counts() {
        let metrics = compute_metrics(&ConfusionCounts::default());
        assert!(metrics.iter().all(|(_, e)| !e.is_computable()));
    }

    #[test]
    fn test_bounds_contain_point() {
        let metrics = compute_metrics(&ConfusionCounts::new(3, 0, 0, 1));
        for (metric, estimate) in metrics.iter() {
            if let Estimate::Computable(e) = estimate {
                assert!(e.ci_low >= 0.0 && e.ci_high <= 1.0, "{metric}");
                assert!(e.ci_low <= e.point_estimate, "{metric}");
                assert!(e.point_estimate <= e.ci_high, "{metric}");
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let counts = ConfusionCounts::new(85, 7, 97, 11);
        let first = compute_metrics(&counts);
        let second = compute_metrics(&counts);
        for (metric, a) in first.iter() {
            let b = second.get(metric);
            match (a, b) {
                (Estimate::Computable(a), Estimate::Computable(b)) => {
                    assert_eq!(a.point_estimate.to_bits(), b.point_estimate.to_bits());
                    assert_eq!(a.ci_low.to_bits(), b.ci_low.to_bits());
                    assert_eq!(a.ci_high.to_bits(), b.ci_high.to_bits());
                }
                _ => panic!("{metric} should be computable"),
            }
        }
    }

    #[test]
    fn test_wider_level_widens_interval() {
        let counts = ConfusionCounts::new(40, 10, 45, 5);
        let narrow = compute_metrics_with(&counts, &IntervalConfig::with_confidence_level(0.90).unwrap());
        let wide = compute_metrics_with(&counts, &IntervalConfig::with_confidence_level(0.99).unwrap());

        let n = narrow.accuracy.into_option().unwrap();
        let w = wide.accuracy.into_option().unwrap();
        assert!((n.point_estimate - w.point_estimate).abs() < f64::EPSILON);
        assert!(w.ci_high - w.ci_low > n.ci_high - n.ci_low);
    }

    #[test]
    fn test_counts_validation() {
        assert_eq!(
            ConfusionCounts::try_new(1, -2, 3, 4),
            Err(InputError::NegativeCount {
                field: "FN",
                value: -2
            })
        );
        assert_eq!(
            ConfusionCounts::try_new(1, 2, 3, 4),
            Ok(ConfusionCounts::new(1, 2, 3, 4))
        );

        assert!(matches!(
            ConfusionCounts::from_reals(1.5, 2.0, 3.0, 4.0),
            Err(InputError::NonIntegerCount { field: "TP", .. })
        ));
        assert!(matches!(
            ConfusionCounts::from_reals(1.0, 2.0, f64::NAN, 4.0),
            Err(InputError::NonIntegerCount { field: "TN", .. })
        ));
        assert!(matches!(
            ConfusionCounts::from_reals(1.0, 2.0, 3.0, -4.0),
            Err(InputError::NegativeCount { field: "FP", value: -4 })
        ));
        assert_eq!(
            ConfusionCounts::from_reals(85.0, 7.0, 97.0, 11.0).map(|c| c.total()),
            Ok(200)
        );
    }

    #[test]
    fn test_counts_overflow_rejected() {
        assert_eq!(
            ConfusionCounts::from_reals(1.8e19, 1.0e18, 0.0, 0.0),
            Err(InputError::CountOverflow)
        );
        // 2^64 itself would saturate in the cast
        assert_eq!(
            ConfusionCounts::from_reals(18_446_744_073_709_551_616.0, 0.0, 0.0, 0.0),
            Err(InputError::CountOverflow)
        );
        assert_eq!(
            ConfusionCounts::try_new(i64::MAX, i64::MAX, 2, 0),
            Err(InputError::CountOverflow)
        );

        let at_limit = ConfusionCounts::try_new(i64::MAX, i64::MAX, 1, 0).unwrap();
        assert_eq!(at_limit.total(), u64::MAX);
        assert!(compute_metrics(&at_limit).accuracy.is_computable());

        let unchecked = ConfusionCounts::new(u64::MAX, 1, 0, 0);
        assert_eq!(unchecked.checked(), Err(InputError::CountOverflow));
        assert_eq!(unchecked.total(), u64::MAX);
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("Sensitivity".parse::<Metric>(), Ok(Metric::Sensitivity));
        assert_eq!("spec".parse::<Metric>(), Ok(Metric::Specificity));
        assert_eq!("PPV".parse::<Metric>(), Ok(Metric::Ppv));
        assert_eq!("npv".parse::<Metric>(), Ok(Metric::Npv));
        assert_eq!(" accuracy ".parse::<Metric>(), Ok(Metric::Accuracy));
        assert!(matches!(
            "f1".parse::<Metric>(),
            Err(InputError::UnknownMetric(_))
        ));
        assert_eq!(Metric::Ppv.to_string(), "PPV");
        assert_eq!(Metric::Ppv.key(), "ppv");
    }
}
