//! Input Parsing
//!
//! Reads technique counts and paired outcomes from CSV files or inline lists.
//! Values are validated by the engine's constructors so bad input is rejected
//! before any statistic is computed.

use ampstat_stats::{ConfusionCounts, PairedOutcomes, TechniqueInput};
use anyhow::{Context, bail};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of a counts CSV: TP, FN, TN, FP and an optional technique name
#[derive(Debug, Deserialize)]
struct CountsRow {
    #[serde(rename = "TP", alias = "tp")]
    tp: f64,
    #[serde(rename = "FN", alias = "fn")]
    fn_: f64,
    #[serde(rename = "TN", alias = "tn")]
    tn: f64,
    #[serde(rename = "FP", alias = "fp")]
    fp: f64,
    #[serde(rename = "Technique", alias = "technique")]
    technique: Option<String>,
}

/// Read technique counts from CSV
///
/// Rows without a technique name are called `Technique_<row>`.
pub fn read_counts<R: Read>(reader: R) -> anyhow::Result<Vec<TechniqueInput>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut inputs = Vec::new();

    for (idx, row) in reader.deserialize::<CountsRow>().enumerate() {
        let row_number = idx + 1;
        let row = row.with_context(|| format!("Invalid counts row {}", row_number))?;
        let counts = ConfusionCounts::from_reals(row.tp, row.fn_, row.tn, row.fp)
            .with_context(|| format!("Invalid counts row {}", row_number))?;
        let name = row
            .technique
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Technique_{}", row_number));
        inputs.push(TechniqueInput::new(name, counts));
    }

    tracing::debug!(techniques = inputs.len(), "read counts");
    Ok(inputs)
}

/// Read technique counts from a CSV file
pub fn read_counts_file(path: &Path) -> anyhow::Result<Vec<TechniqueInput>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_counts(file).with_context(|| format!("Failed to read {}", path.display()))
}

/// Paired outcomes with the technique names taken from the CSV header
#[derive(Debug)]
pub struct NamedPairs {
    /// Header of the first column
    pub first_name: String,
    /// Header of the second column
    pub second_name: String,
    /// Validated paired outcomes
    pub outcomes: PairedOutcomes,
}

/// Read two columns of 0/1 outcomes from CSV
pub fn read_paired<R: Read>(reader: R) -> anyhow::Result<NamedPairs> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    if headers.len() != 2 {
        bail!(
            "Expected exactly 2 outcome columns, found {}",
            headers.len()
        );
    }

    let mut first = Vec::new();
    let mut second = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Invalid outcome row {}", idx + 1))?;
        first.push(parse_outcome(&record[0]).with_context(|| format!("Row {}", idx + 1))?);
        second.push(parse_outcome(&record[1]).with_context(|| format!("Row {}", idx + 1))?);
    }

    Ok(NamedPairs {
        first_name: headers[0].trim().to_string(),
        second_name: headers[1].trim().to_string(),
        outcomes: PairedOutcomes::new(&first, &second)?,
    })
}

/// Read paired outcomes from a CSV file
pub fn read_paired_file(path: &Path) -> anyhow::Result<NamedPairs> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_paired(file).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse an inline outcome list such as "1,0,1,1" or "1 0 1 1"
pub fn parse_outcome_list(s: &str) -> anyhow::Result<Vec<u8>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(idx, token)| {
            parse_outcome(token).with_context(|| format!("Outcome {} in list", idx + 1))
        })
        .collect()
}

fn parse_outcome(token: &str) -> anyhow::Result<u8> {
    token
        .trim()
        .parse::<u8>()
        .with_context(|| format!("'{}' is not a 0/1 outcome", token.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampstat_stats::{AgreementTable, InputError};

    #[test]
    fn test_read_counts() {
        let data = "Technique,TP,FN,TN,FP\nLAMP,89,4,106,6\n,10,2,30,1\n";
        let inputs = read_counts(data.as_bytes()).unwrap();

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].name, "LAMP");
        assert_eq!(inputs[0].counts, ConfusionCounts::new(89, 4, 106, 6));
        assert_eq!(inputs[1].name, "Technique_2");
    }

    #[test]
    fn test_read_counts_without_name_column() {
        let data = "tp,fn,tn,fp\n1,2,3,4\n";
        let inputs = read_counts(data.as_bytes()).unwrap();
        assert_eq!(inputs[0].name, "Technique_1");
        assert_eq!(inputs[0].counts.total(), 10);
    }

    #[test]
    fn test_read_counts_rejects_negative() {
        let data = "TP,FN,TN,FP\n1,-2,3,4\n";
        let err = read_counts(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::NegativeCount { field: "FN", .. })
        ));
    }

    #[test]
    fn test_read_counts_rejects_fraction() {
        let data = "TP,FN,TN,FP\n1.5,2,3,4\n";
        let err = read_counts(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::NonIntegerCount { field: "TP", .. })
        ));
    }

    #[test]
    fn test_read_counts_rejects_oversized_total() {
        let data = "TP,FN,TN,FP\n1.8e19,1e18,0,0\n";
        let err = read_counts(data.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::CountOverflow)
        );
    }

    #[test]
    fn test_read_counts_missing_column() {
        let data = "TP,FN,TN\n1,2,3\n";
        assert!(read_counts(data.as_bytes()).is_err());
    }

    #[test]
    fn test_read_paired() {
        let data = "PCR,LAMP\n1,1\n1,0\n0,1\n0,0\n1,1\n";
        let pairs = read_paired(data.as_bytes()).unwrap();
        assert_eq!(pairs.first_name, "PCR");
        assert_eq!(pairs.second_name, "LAMP");
        assert_eq!(pairs.outcomes.table(), AgreementTable::from_counts(2, 1, 1, 1));
    }

    #[test]
    fn test_read_paired_rejects_non_binary() {
        let data = "A,B\n1,2\n";
        let err = read_paired(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::NonBinaryOutcome { index: 0, value: 2 })
        ));

        assert!(read_paired("A,B,C\n1,0,1\n".as_bytes()).is_err());
    }

    #[test]
    fn test_parse_outcome_list() {
        assert_eq!(parse_outcome_list("1,0, 1 1").unwrap(), vec![1, 0, 1, 1]);
        assert!(parse_outcome_list("").unwrap().is_empty());
        assert!(parse_outcome_list("1,x").is_err());
    }
}
