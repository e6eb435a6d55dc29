#![warn(missing_docs)]
//! Ampstat Statistical Engine
//!
//! Turns 2x2 confusion-matrix counts into diagnostic performance statistics:
//! - Sensitivity, specificity, PPV, NPV and accuracy with Wilson score intervals
//! - Likelihood ratios and the diagnostic odds ratio
//! - Cohen's Kappa agreement between two techniques over paired outcomes
//! - Ranking of techniques by a chosen metric
//! - Checks against use-case performance requirements
//!
//! Every function is pure: no I/O, no shared state, no randomness. Undefined
//! ratios are reported as [`Estimate::NotComputable`] instead of NaN.

mod agreement;
mod comparison;
mod error;
mod estimate;
mod interval;
mod metrics;
mod ratios;
mod requirements;

pub use agreement::{
    AgreementTable, KappaInterpretation, KappaResult, PairedOutcomes, compute_kappa,
    compute_kappa_with, interpret_kappa, kappa_from_table,
};
pub use comparison::{TechniqueInput, compute_technique_results, rank_techniques};
pub use error::InputError;
pub use estimate::Estimate;
pub use interval::{ConfidenceInterval, IntervalConfig, normal_quantile, wilson_interval};
pub use metrics::{
    ConfusionCounts, DiagnosticMetrics, Metric, MetricEstimate, TechniqueResult, compute_metrics,
    compute_metrics_with,
};
pub use ratios::{LikelihoodRatios, diagnostic_odds_ratio, likelihood_ratios};
pub use requirements::{
    PerformanceRequirements, RequirementCheck, RequirementReport, check_requirements,
};

/// Two-sided 95% standard normal critical value used for Wilson intervals
pub const Z_95: f64 = 1.95996;

/// Critical value used for the large-sample kappa interval
pub const KAPPA_Z: f64 = 1.96;

/// Default confidence level (95%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!((Z_95 - 1.95996).abs() < f64::EPSILON);
        assert!((KAPPA_Z - 1.96).abs() < f64::EPSILON);
        assert!((DEFAULT_CONFIDENCE_LEVEL - 0.95).abs() < f64::EPSILON);
    }
}
