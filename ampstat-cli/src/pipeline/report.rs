//! Report Building
//!
//! Constructs the complete report from engine results: flattened metric
//! estimates, likelihood ratios, the diagnostic odds ratio, requirement checks
//! and the summary block.

use ampstat_report::{
    AgreementReport, MetricReport, REPORT_SCHEMA_VERSION, Report, ReportMeta, ReportSummary,
    TechniqueReport,
};
use ampstat_stats::{
    Metric, PerformanceRequirements, TechniqueResult, check_requirements, diagnostic_odds_ratio,
    likelihood_ratios,
};

/// Settings captured in report metadata
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Confidence level of every interval in the report
    pub confidence_level: f64,
    /// Metric the techniques are ordered by, if ranked
    pub ranked_by: Option<Metric>,
    /// Profile to check each technique against
    pub requirements: Option<&'a PerformanceRequirements>,
}

/// Build a complete Report
///
/// # Arguments
/// * `results` - Technique results, already in display order
/// * `agreement` - Kappa analysis, if one was requested
/// * `context` - Confidence level, ranking metric and requirement profile
pub fn build_report(
    results: &[TechniqueResult],
    agreement: Option<AgreementReport>,
    context: &ReportContext<'_>,
) -> Report {
    let techniques: Vec<TechniqueReport> = results
        .iter()
        .enumerate()
        .map(|(idx, result)| technique_report(idx + 1, result, context.requirements))
        .collect();

    let fully_computable = results
        .iter()
        .filter(|r| r.metrics.iter().all(|(_, e)| e.is_computable()))
        .count();
    let meeting_requirements = context.requirements.map(|_| {
        techniques
            .iter()
            .filter(|t| t.requirements.as_ref().is_some_and(|r| r.all_met))
            .count()
    });
    let best = context
        .ranked_by
        .and_then(|_| techniques.first())
        .map(|t| t.name.clone());

    let summary = ReportSummary {
        total_techniques: techniques.len(),
        fully_computable,
        meeting_requirements,
        best,
    };

    Report {
        meta: ReportMeta {
            schema_version: REPORT_SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
            confidence_level: context.confidence_level,
            ranked_by: context.ranked_by,
            requirements: context.requirements.map(|r| r.name.clone()),
        },
        techniques,
        agreement,
        summary,
    }
}

fn technique_report(
    rank: usize,
    result: &TechniqueResult,
    requirements: Option<&PerformanceRequirements>,
) -> TechniqueReport {
    let ratios = likelihood_ratios(&result.counts);

    TechniqueReport {
        rank,
        name: result.name.clone(),
        counts: result.counts,
        total: result.counts.total(),
        metrics: result
            .metrics
            .iter()
            .map(|(metric, estimate)| MetricReport::new(metric, estimate))
            .collect(),
        positive_likelihood_ratio: ratios.positive.into_option(),
        negative_likelihood_ratio: ratios.negative.into_option(),
        diagnostic_odds_ratio: diagnostic_odds_ratio(&result.counts).into_option(),
        requirements: requirements.map(|r| check_requirements(result, r)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::UseCase;
    use ampstat_stats::ConfusionCounts;

    fn results() -> Vec<TechniqueResult> {
        vec![
            TechniqueResult::new("strong", ConfusionCounts::new(98, 2, 97, 3)),
            TechniqueResult::new("no-positives", ConfusionCounts::new(0, 0, 50, 5)),
        ]
    }

    #[test]
    fn test_build_report() {
        let requirements = UseCase::ClinicalDiagnostics.requirements();
        let context = ReportContext {
            confidence_level: 0.95,
            ranked_by: Some(Metric::Sensitivity),
            requirements: Some(&requirements),
        };

        let report = build_report(&results(), None, &context);

        assert_eq!(report.techniques.len(), 2);
        assert_eq!(report.techniques[0].rank, 1);
        assert_eq!(report.techniques[1].rank, 2);
        assert_eq!(report.techniques[0].metrics.len(), 5);
        assert_eq!(report.summary.total_techniques, 2);
        assert_eq!(report.summary.fully_computable, 1);
        assert_eq!(report.summary.meeting_requirements, Some(1));
        assert_eq!(report.summary.best.as_deref(), Some("strong"));
        assert_eq!(report.meta.requirements.as_deref(), Some("clinical diagnostics"));
        assert_eq!(report.meta.ranked_by, Some(Metric::Sensitivity));

        let undefined = &report.techniques[1];
        assert_eq!(undefined.metric(Metric::Sensitivity).unwrap().estimate, None);
        assert_eq!(undefined.positive_likelihood_ratio, None);
        assert_eq!(undefined.diagnostic_odds_ratio, None);
    }

    #[test]
    fn test_build_report_without_ranking() {
        let context = ReportContext {
            confidence_level: 0.90,
            ranked_by: None,
            requirements: None,
        };
        let report = build_report(&results(), None, &context);

        assert_eq!(report.summary.best, None);
        assert_eq!(report.summary.meeting_requirements, None);
        assert!(report.techniques.iter().all(|t| t.requirements.is_none()));
        assert!((report.meta.confidence_level - 0.90).abs() < f64::EPSILON);
    }
}
