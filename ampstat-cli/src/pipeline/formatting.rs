//! Output Formatting
//!
//! Human-readable output formatting for analysis reports.
//!
//! Generates terminal-friendly output with:
//! - A comparison table of point estimates across techniques
//! - Per-technique detail blocks with Wilson intervals and likelihood ratios
//! - Requirement checks with pass/fail icons (✓/✗)
//! - Cohen's Kappa with its interval and interpretation

use ampstat_report::{AgreementReport, MetricReport, Report, TechniqueReport};
use ampstat_stats::Metric;

const NOT_AVAILABLE: &str = "N/A";

/// Format a report for human-readable terminal display
///
/// # Arguments
/// * `report` - Complete analysis report
/// * `decimals` - Decimal places for percentages
///
/// # Returns
/// Formatted string suitable for terminal output
pub fn format_human_output(report: &Report, decimals: usize) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Ampstat Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Confidence level: {:.0}%",
        report.meta.confidence_level * 100.0
    ));
    if let Some(metric) = report.meta.ranked_by {
        output.push_str(&format!("   Ranked by: {}", metric));
    }
    if let Some(requirements) = &report.meta.requirements {
        output.push_str(&format!("   Requirements: {}", requirements));
    }
    output.push_str("\n\n");

    if report.techniques.len() > 1 {
        push_comparison_table(&mut output, &report.techniques, decimals);
    }

    for technique in &report.techniques {
        push_technique(&mut output, technique, decimals);
    }

    if let Some(agreement) = &report.agreement {
        push_agreement(&mut output, agreement);
    }

    if !report.techniques.is_empty() {
        output.push_str(&format!("\n{}\n", "-".repeat(60)));
        output.push_str(&format!(
            "Techniques: {}  Fully computable: {}",
            report.summary.total_techniques, report.summary.fully_computable
        ));
        if let Some(meeting) = report.summary.meeting_requirements {
            output.push_str(&format!("  Meeting requirements: {}", meeting));
        }
        output.push('\n');
        if let Some(best) = &report.summary.best {
            output.push_str(&format!("Best: {}\n", best));
        }
    }

    output
}

fn push_comparison_table(output: &mut String, techniques: &[TechniqueReport], decimals: usize) {
    let name_width = techniques
        .iter()
        .map(|t| t.name.len())
        .max()
        .unwrap_or(20)
        .max("Technique".len());
    let col_width = (decimals + 5).max(11);

    output.push_str("Comparison\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');

    output.push_str(&format!("  {:>4}  {:<width$}", "Rank", "Technique", width = name_width));
    for metric in Metric::ALL {
        output.push_str(&format!("  {:>w$}", metric.to_string(), w = col_width));
    }
    output.push('\n');
    output.push_str(&format!(
        "  {}\n",
        "-".repeat(6 + name_width + Metric::ALL.len() * (col_width + 2))
    ));

    for technique in techniques {
        output.push_str(&format!(
            "  {:>4}  {:<width$}",
            technique.rank,
            technique.name,
            width = name_width
        ));
        for metric in Metric::ALL {
            let value = technique.metric(metric).and_then(|m| m.estimate);
            output.push_str(&format!(
                "  {:>w$}",
                format_percent(value, decimals),
                w = col_width
            ));
        }
        output.push('\n');
    }
    output.push('\n');
}

fn push_technique(output: &mut String, technique: &TechniqueReport, decimals: usize) {
    let counts = &technique.counts;
    output.push_str(&format!("{}\n", technique.name));
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "      TP: {}  FN: {}  TN: {}  FP: {}  (n = {})\n",
        counts.true_positives,
        counts.false_negatives,
        counts.true_negatives,
        counts.false_positives,
        technique.total
    ));

    for metric in &technique.metrics {
        output.push_str(&format!("      {}\n", format_metric_line(metric, decimals)));
    }

    output.push_str(&format!(
        "      LR+: {}  LR-: {}  DOR: {}\n",
        format_ratio(technique.positive_likelihood_ratio),
        format_ratio(technique.negative_likelihood_ratio),
        format_ratio(technique.diagnostic_odds_ratio)
    ));

    if let Some(requirements) = &technique.requirements {
        let icon = if requirements.all_met { "✓" } else { "✗" };
        output.push_str(&format!(
            "  {} Requirements ({})\n",
            icon, requirements.requirements
        ));
        for check in &requirements.checks {
            let icon = if check.met { "✓" } else { "✗" };
            output.push_str(&format!(
                "      {} {:<12} {:>w$} (min {})\n",
                icon,
                check.metric.to_string(),
                format_percent(check.observed.into_option(), decimals),
                format_percent(Some(check.required), decimals),
                w = decimals + 5
            ));
        }
    }
    output.push('\n');
}

fn push_agreement(output: &mut String, agreement: &AgreementReport) {
    output.push_str(&format!(
        "Agreement: {} vs {}\n",
        agreement.first, agreement.second
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    let table = &agreement.table;
    output.push_str(&format!(
        "      both +: {}  first only: {}  second only: {}  both -: {}  (n = {})\n",
        table.a, table.b, table.c, table.d, agreement.n
    ));

    match (agreement.kappa, agreement.ci_low, agreement.ci_high) {
        (Some(kappa), Some(low), Some(high)) => {
            output.push_str(&format!(
                "      kappa: {:.3}  CI: [{:.3}, {:.3}]\n",
                kappa, low, high
            ));
            if let (Some(observed), Some(expected)) =
                (agreement.observed_agreement, agreement.expected_agreement)
            {
                output.push_str(&format!(
                    "      observed: {:.3}  expected: {:.3}\n",
                    observed, expected
                ));
            }
            if let Some(interpretation) = agreement.interpretation {
                output.push_str(&format!("      {}\n", interpretation));
            }
        }
        _ => output.push_str(&format!("      kappa: {}\n", NOT_AVAILABLE)),
    }
}

fn format_metric_line(metric: &MetricReport, decimals: usize) -> String {
    match (metric.estimate, metric.ci_low, metric.ci_high) {
        (Some(estimate), Some(low), Some(high)) => format!(
            "{:<12} {}  CI: [{}, {}]",
            metric.metric.to_string(),
            format_percent(Some(estimate), decimals),
            format_percent(Some(low), decimals),
            format_percent(Some(high), decimals)
        ),
        _ => format!("{:<12} {}", metric.metric.to_string(), NOT_AVAILABLE),
    }
}

/// Format a proportion as a percentage, "N/A" when missing
fn format_percent(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}%", decimals, v * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}
