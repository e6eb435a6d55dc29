#![warn(missing_docs)]
//! # Ampstat
//!
//! Diagnostic accuracy statistics for nucleic-acid amplification assays
//! (PCR, qPCR, LAMP, RPA and friends).
//!
//! - **Diagnostic Metrics**: Sensitivity, specificity, PPV, NPV and accuracy with Wilson score intervals
//! - **Not-Computable Values**: A metric whose denominator is zero is reported as such, never as 0 or NaN
//! - **Agreement**: Cohen's Kappa between two techniques with a standard-error interval
//! - **Ranking**: Stable, descending ordering of techniques by any metric
//! - **Requirements**: Use-case thresholds for clinical, screening, research and point-of-care work
//! - **Reports**: Human, JSON and CSV output
//!
//! ## Quick Start
//!
//! ```
//! use ampstat::{ConfusionCounts, Metric, compute_metrics};
//!
//! let counts = ConfusionCounts::new(95, 5, 90, 10);
//! let metrics = compute_metrics(&counts);
//! let sens = metrics.get(Metric::Sensitivity).into_option().unwrap();
//! assert!((sens.point_estimate - 0.95).abs() < 1e-12);
//! ```
//!
//! ## Agreement
//!
//! ```
//! use ampstat::{PairedOutcomes, compute_kappa};
//!
//! let paired = PairedOutcomes::new(&[1, 1, 0, 0], &[1, 1, 0, 0]).unwrap();
//! let kappa = compute_kappa(&paired).into_option().unwrap();
//! assert_eq!(kappa.kappa, 1.0);
//! ```

// Re-export the engine
pub use ampstat_stats::{
    AgreementTable, ConfidenceInterval, ConfusionCounts, DEFAULT_CONFIDENCE_LEVEL,
    DiagnosticMetrics, Estimate, InputError, IntervalConfig, KAPPA_Z, KappaInterpretation,
    KappaResult, LikelihoodRatios, Metric, MetricEstimate, PairedOutcomes,
    PerformanceRequirements, RequirementCheck, RequirementReport, TechniqueInput,
    TechniqueResult, Z_95, check_requirements, compute_kappa, compute_kappa_with,
    compute_metrics, compute_metrics_with, compute_technique_results, diagnostic_odds_ratio,
    interpret_kappa, kappa_from_table, likelihood_ratios, normal_quantile, rank_techniques,
    wilson_interval,
};

// Re-export report types
pub use ampstat_report::{
    AgreementReport, MetricReport, OutputFormat, Report, ReportError, generate_csv_report,
    generate_json_report,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ConfusionCounts, Estimate, Metric, PairedOutcomes, TechniqueInput, TechniqueResult,
        compute_kappa, compute_metrics, rank_techniques,
    };
}

/// Run the Ampstat CLI.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     ampstat::run()
/// }
/// ```
pub use ampstat_cli::run;
