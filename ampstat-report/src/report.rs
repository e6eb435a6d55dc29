//! Report Data Structures

use ampstat_stats::{
    AgreementTable, ConfusionCounts, Estimate, KappaInterpretation, KappaResult, Metric,
    MetricEstimate, RequirementReport,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current JSON schema version
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report metadata
    pub meta: ReportMeta,
    /// Techniques in ranked order
    pub techniques: Vec<TechniqueReport>,
    /// Kappa analysis, when requested
    pub agreement: Option<AgreementReport>,
    /// Totals and best technique
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Schema of this JSON layout
    pub schema_version: u32,
    /// Crate version that produced the report
    pub version: String,
    /// Generation time
    pub timestamp: DateTime<Utc>,
    /// Confidence level of every interval
    pub confidence_level: f64,
    /// Metric used for ranking, if techniques were ranked
    pub ranked_by: Option<Metric>,
    /// Name of the requirement profile applied, if any
    pub requirements: Option<String>,
}

/// One technique's row in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechniqueReport {
    /// 1-based position after ranking
    pub rank: usize,
    /// Technique label
    pub name: String,
    /// Confusion counts
    pub counts: ConfusionCounts,
    /// N = TP + FN + TN + FP
    pub total: u64,
    /// One entry per metric, in display order
    pub metrics: Vec<MetricReport>,
    /// LR+ (`None` = not computable)
    pub positive_likelihood_ratio: Option<f64>,
    /// LR- (`None` = not computable)
    pub negative_likelihood_ratio: Option<f64>,
    /// (TP x TN) / (FN x FP)
    pub diagnostic_odds_ratio: Option<f64>,
    /// Threshold checks, when a profile was applied
    pub requirements: Option<RequirementReport>,
}

impl TechniqueReport {
    /// Find the entry for one metric
    pub fn metric(&self, metric: Metric) -> Option<&MetricReport> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

/// A metric estimate flattened for output (`None` = not computable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Which measure
    pub metric: Metric,
    /// Point estimate
    pub estimate: Option<f64>,
    /// Lower interval bound
    pub ci_low: Option<f64>,
    /// Upper interval bound
    pub ci_high: Option<f64>,
}

impl MetricReport {
    /// Flatten an engine estimate
    pub fn new(metric: Metric, estimate: Estimate<MetricEstimate>) -> Self {
        match estimate {
            Estimate::Computable(e) => Self {
                metric,
                estimate: Some(e.point_estimate),
                ci_low: Some(e.ci_low),
                ci_high: Some(e.ci_high),
            },
            Estimate::NotComputable => Self {
                metric,
                estimate: None,
                ci_low: None,
                ci_high: None,
            },
        }
    }
}

/// Cohen's Kappa between two techniques
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementReport {
    /// First technique's name
    pub first: String,
    /// Second technique's name
    pub second: String,
    /// 2x2 agreement table
    pub table: AgreementTable,
    /// Paired samples
    pub n: u64,
    /// Cohen's Kappa
    pub kappa: Option<f64>,
    /// Lower interval bound
    pub ci_low: Option<f64>,
    /// Upper interval bound
    pub ci_high: Option<f64>,
    /// Large-sample standard error
    pub standard_error: Option<f64>,
    /// p_o
    pub observed_agreement: Option<f64>,
    /// p_e
    pub expected_agreement: Option<f64>,
    /// Landis-Koch band
    pub interpretation: Option<KappaInterpretation>,
}

impl AgreementReport {
    /// Flatten an engine kappa result
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        table: AgreementTable,
        kappa: Estimate<KappaResult>,
    ) -> Self {
        let k = kappa.into_option();
        Self {
            first: first.into(),
            second: second.into(),
            table,
            n: table.n(),
            kappa: k.map(|k| k.kappa),
            ci_low: k.map(|k| k.ci_low),
            ci_high: k.map(|k| k.ci_high),
            standard_error: k.map(|k| k.standard_error),
            observed_agreement: k.map(|k| k.observed_agreement),
            expected_agreement: k.map(|k| k.expected_agreement),
            interpretation: k.map(|k| k.interpretation()),
        }
    }
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of techniques reported
    pub total_techniques: usize,
    /// Techniques with all five metrics computable
    pub fully_computable: usize,
    /// Techniques meeting every requirement (when a profile was applied)
    pub meeting_requirements: Option<usize>,
    /// Top-ranked technique
    pub best: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampstat_stats::{KAPPA_Z, compute_metrics, kappa_from_table};

    #[test]
    fn test_metric_report_flattening() {
        let metrics = compute_metrics(&ConfusionCounts::new(0, 0, 50, 5));

        let sens = MetricReport::new(Metric::Sensitivity, metrics.sensitivity);
        assert_eq!(sens.estimate, None);
        assert_eq!(sens.ci_low, None);

        let spec = MetricReport::new(Metric::Specificity, metrics.specificity);
        assert!((spec.estimate.unwrap() - 50.0 / 55.0).abs() < 1e-12);
        assert!(spec.ci_low.unwrap() < spec.ci_high.unwrap());
    }

    #[test]
    fn test_agreement_report() {
        let table = AgreementTable::from_counts(20, 5, 10, 15);
        let report = AgreementReport::new("A", "B", table, kappa_from_table(&table, KAPPA_Z));
        assert_eq!(report.n, 50);
        assert!((report.kappa.unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(report.interpretation, Some(KappaInterpretation::Moderate));

        let degenerate = AgreementTable::from_counts(10, 0, 0, 0);
        let report = AgreementReport::new(
            "A",
            "B",
            degenerate,
            kappa_from_table(&degenerate, KAPPA_Z),
        );
        assert_eq!(report.kappa, None);
        assert_eq!(report.interpretation, None);
    }
}
