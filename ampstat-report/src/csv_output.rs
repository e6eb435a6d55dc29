//! CSV Output
//!
//! One row per technique. Not-computable values are left empty so the file
//! opens cleanly in a spreadsheet.

use crate::report::{AgreementReport, Report, TechniqueReport};
use ampstat_stats::Metric;
use serde::Serialize;
use thiserror::Error;

/// Errors while encoding a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV writer failure
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoded bytes were not UTF-8
    #[error("Report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct TechniqueRow<'a> {
    rank: usize,
    technique: &'a str,
    tp: u64,
    #[serde(rename = "fn")]
    false_negatives: u64,
    tn: u64,
    fp: u64,
    total: u64,
    sensitivity: Option<f64>,
    sensitivity_ci_low: Option<f64>,
    sensitivity_ci_high: Option<f64>,
    specificity: Option<f64>,
    specificity_ci_low: Option<f64>,
    specificity_ci_high: Option<f64>,
    ppv: Option<f64>,
    ppv_ci_low: Option<f64>,
    ppv_ci_high: Option<f64>,
    npv: Option<f64>,
    npv_ci_low: Option<f64>,
    npv_ci_high: Option<f64>,
    accuracy: Option<f64>,
    accuracy_ci_low: Option<f64>,
    accuracy_ci_high: Option<f64>,
    lr_positive: Option<f64>,
    lr_negative: Option<f64>,
    diagnostic_odds_ratio: Option<f64>,
    requirements_met: Option<bool>,
}

impl<'a> From<&'a TechniqueReport> for TechniqueRow<'a> {
    fn from(t: &'a TechniqueReport) -> Self {
        let get = |metric: Metric| {
            t.metric(metric)
                .map(|m| (m.estimate, m.ci_low, m.ci_high))
                .unwrap_or((None, None, None))
        };
        let (sensitivity, sensitivity_ci_low, sensitivity_ci_high) = get(Metric::Sensitivity);
        let (specificity, specificity_ci_low, specificity_ci_high) = get(Metric::Specificity);
        let (ppv, ppv_ci_low, ppv_ci_high) = get(Metric::Ppv);
        let (npv, npv_ci_low, npv_ci_high) = get(Metric::Npv);
        let (accuracy, accuracy_ci_low, accuracy_ci_high) = get(Metric::Accuracy);

        Self {
            rank: t.rank,
            technique: &t.name,
            tp: t.counts.true_positives,
            false_negatives: t.counts.false_negatives,
            tn: t.counts.true_negatives,
            fp: t.counts.false_positives,
            total: t.total,
            sensitivity,
            sensitivity_ci_low,
            sensitivity_ci_high,
            specificity,
            specificity_ci_low,
            specificity_ci_high,
            ppv,
            ppv_ci_low,
            ppv_ci_high,
            npv,
            npv_ci_low,
            npv_ci_high,
            accuracy,
            accuracy_ci_low,
            accuracy_ci_high,
            lr_positive: t.positive_likelihood_ratio,
            lr_negative: t.negative_likelihood_ratio,
            diagnostic_odds_ratio: t.diagnostic_odds_ratio,
            requirements_met: t.requirements.as_ref().map(|r| r.all_met),
        }
    }
}

#[derive(Serialize)]
struct AgreementRow<'a> {
    first: &'a str,
    second: &'a str,
    n: u64,
    a: u64,
    b: u64,
    c: u64,
    d: u64,
    kappa: Option<f64>,
    ci_low: Option<f64>,
    ci_high: Option<f64>,
    observed_agreement: Option<f64>,
    expected_agreement: Option<f64>,
    interpretation: Option<String>,
}

impl<'a> From<&'a AgreementReport> for AgreementRow<'a> {
    fn from(r: &'a AgreementReport) -> Self {
        Self {
            first: &r.first,
            second: &r.second,
            n: r.n,
            a: r.table.a,
            b: r.table.b,
            c: r.table.c,
            d: r.table.d,
            kappa: r.kappa,
            ci_low: r.ci_low,
            ci_high: r.ci_high,
            observed_agreement: r.observed_agreement,
            expected_agreement: r.expected_agreement,
            interpretation: r.interpretation.map(|i| i.to_string()),
        }
    }
}

fn write_rows<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Generate a CSV report
///
/// Technique rows come first; a kappa table, if present, follows after a
/// blank line.
pub fn generate_csv_report(report: &Report) -> Result<String, ReportError> {
    let mut output = String::new();

    if !report.techniques.is_empty() {
        output.push_str(&write_rows(report.techniques.iter().map(TechniqueRow::from))?);
    }

    if let Some(agreement) = &report.agreement {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&write_rows(std::iter::once(AgreementRow::from(agreement)))?);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MetricReport, ReportMeta, ReportSummary};
    use ampstat_stats::{AgreementTable, ConfusionCounts, KAPPA_Z, compute_metrics, kappa_from_table};

    fn technique(rank: usize, name: &str, counts: ConfusionCounts) -> TechniqueReport {
        let metrics = compute_metrics(&counts);
        TechniqueReport {
            rank,
            name: name.to_string(),
            counts,
            total: counts.total(),
            metrics: metrics.iter().map(|(m, e)| MetricReport::new(m, e)).collect(),
            positive_likelihood_ratio: None,
            negative_likelihood_ratio: None,
            diagnostic_odds_ratio: None,
            requirements: None,
        }
    }

    fn report(techniques: Vec<TechniqueReport>, agreement: Option<AgreementReport>) -> Report {
        Report {
            meta: ReportMeta {
                schema_version: crate::REPORT_SCHEMA_VERSION,
                version: "test".to_string(),
                timestamp: chrono::Utc::now(),
                confidence_level: 0.95,
                ranked_by: None,
                requirements: None,
            },
            techniques,
            agreement,
            summary: ReportSummary::default(),
        }
    }

    #[test]
    fn test_csv_rows() {
        let csv = generate_csv_report(&report(
            vec![
                technique(1, "LAMP", ConfusionCounts::new(89, 4, 106, 6)),
                technique(2, "Empty, positives", ConfusionCounts::new(0, 0, 50, 5)),
            ],
            None,
        ))
        .unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank,technique,tp,fn,tn,fp,total,sensitivity,"));
        assert!(lines[1].starts_with("1,LAMP,89,4,106,6,205,"));
        // Name with a comma is quoted; missing sensitivity is empty
        assert!(lines[2].starts_with("2,\"Empty, positives\",0,0,50,5,55,,,,"));
    }

    #[test]
    fn test_csv_agreement_only() {
        let table = AgreementTable::from_counts(50, 0, 0, 50);
        let agreement = AgreementReport::new("PCR", "LAMP", table, kappa_from_table(&table, KAPPA_Z));
        let csv = generate_csv_report(&report(Vec::new(), Some(agreement))).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("first,second,n,a,b,c,d,kappa"));
        assert!(lines[1].starts_with("PCR,LAMP,100,50,0,0,50,1.0,"));
        assert!(lines[1].ends_with("Almost perfect agreement"));
    }
}
