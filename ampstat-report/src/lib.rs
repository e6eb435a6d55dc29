#![warn(missing_docs)]
//! Ampstat Report - Reporting and Export
//!
//! Generates machine-readable output formats:
//! - JSON (full report with metadata)
//! - CSV (one row per technique, spreadsheet-compatible)
//!
//! Human-readable terminal output lives in the CLI crate.

mod csv_output;
mod json;
mod report;

pub use csv_output::{ReportError, generate_csv_report};
pub use json::generate_json_report;
pub use report::{
    AgreementReport, MetricReport, REPORT_SCHEMA_VERSION, Report, ReportMeta, ReportSummary,
    TechniqueReport,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
