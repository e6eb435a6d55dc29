#![warn(missing_docs)]
//! Ampstat CLI Library
//!
//! Command-line front end for the ampstat statistics engine. Use
//! `ampstat_cli::run()` (or `ampstat::run()`) from a binary's `main`.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     ampstat_cli::run()
//! }
//! ```
//!
//! ```text
//! ampstat metrics --tp 95 --fn 5 --tn 90 --fp 10
//! ampstat compare "LAMP|RPA" --rank-by specificity --use-case screening
//! ampstat kappa --first 1,1,0,0 --second 1,0,0,0
//! ```

mod config;
mod dataset;
mod input;
mod pipeline;

pub use config::*;
pub use dataset::{SEED_TECHNIQUES, SeedTechnique, UseCase, default_techniques};
pub use input::{
    NamedPairs, parse_outcome_list, read_counts, read_counts_file, read_paired, read_paired_file,
};
pub use pipeline::{ReportContext, analyze_techniques, build_report, format_human_output};

use ampstat_report::{AgreementReport, OutputFormat, generate_csv_report, generate_json_report};
use ampstat_stats::{
    ConfusionCounts, IntervalConfig, Metric, PairedOutcomes, TechniqueInput, compute_kappa,
    compute_kappa_with,
};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rayon::ThreadPoolBuilder;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;

/// Ampstat CLI arguments
#[derive(Parser, Debug)]
#[command(name = "ampstat")]
#[command(
    author,
    version,
    about = "Ampstat - diagnostic accuracy statistics for amplification assays"
)]
pub struct Cli {
    /// Analysis to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: human, json, csv (defaults to ampstat.toml, then human)
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Confidence level for all intervals, e.g. 0.90
    #[arg(long, global = true)]
    pub confidence: Option<f64>,

    /// Configuration file (skips discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads for parallel metric computation
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j', default_value = "0", global = true)]
    pub threads: usize,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Diagnostic metrics for a single confusion matrix
    Metrics {
        /// True positives
        #[arg(long, allow_negative_numbers = true)]
        tp: i64,
        /// False negatives
        #[arg(long = "fn", allow_negative_numbers = true)]
        fn_: i64,
        /// True negatives
        #[arg(long, allow_negative_numbers = true)]
        tn: i64,
        /// False positives
        #[arg(long, allow_negative_numbers = true)]
        fp: i64,
        /// Technique name shown in the report
        #[arg(long, default_value = "Technique")]
        name: String,
        /// Check against an application's minimum requirements
        #[arg(long, value_enum)]
        use_case: Option<UseCase>,
    },
    /// Compare and rank techniques (built-in literature data unless --input is given)
    Compare {
        /// Filter techniques by regex pattern
        #[arg(default_value = ".*")]
        filter: String,
        /// CSV with Technique,TP,FN,TN,FP columns
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Metric to rank by: sensitivity, specificity, ppv, npv, accuracy
        #[arg(long)]
        rank_by: Option<Metric>,
        /// Check against an application's minimum requirements
        #[arg(long, value_enum)]
        use_case: Option<UseCase>,
    },
    /// Cohen's Kappa between two techniques' paired outcomes
    Kappa {
        /// First technique's outcomes, e.g. "1,0,1,1"
        #[arg(long, requires = "second", conflicts_with = "input")]
        first: Option<String>,
        /// Second technique's outcomes
        #[arg(long, requires = "first", conflicts_with = "input")]
        second: Option<String>,
        /// CSV with two 0/1 columns; headers name the techniques
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Name of the first technique
        #[arg(long)]
        first_name: Option<String>,
        /// Name of the second technique
        #[arg(long)]
        second_name: Option<String>,
    },
    /// List the built-in techniques
    List,
    /// Write a default ampstat.toml to the current directory
    Init,
}

/// Run the Ampstat CLI with process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Ampstat CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Logs go to stderr so report output stays clean on stdout
    let filter = if cli.verbose {
        "ampstat=debug,ampstat_stats=debug,ampstat_cli=debug"
    } else {
        "ampstat=info,ampstat_stats=warn,ampstat_cli=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // CLI flags override ampstat.toml
    let config = match &cli.config {
        Some(path) => AmpstatConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AmpstatConfig::discover().unwrap_or_default(),
    };

    let format_name = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_name.parse().unwrap_or_else(|e: String| {
        tracing::warn!(error = %e, "falling back to human output");
        OutputFormat::Human
    });

    let confidence_level = cli.confidence.unwrap_or(config.analysis.confidence_level);
    let interval = IntervalConfig::with_confidence_level(confidence_level)?;

    if cli.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok();
    }

    match &cli.command {
        Commands::Metrics {
            tp,
            fn_,
            tn,
            fp,
            name,
            use_case,
        } => {
            let counts = ConfusionCounts::try_new(*tp, *fn_, *tn, *fp)?;
            let inputs = [TechniqueInput::new(name.clone(), counts)];
            let requirements = use_case
                .or(config.analysis.use_case)
                .map(UseCase::requirements);
            let results = analyze_techniques(&inputs, &interval, None);
            let context = ReportContext {
                confidence_level: interval.confidence_level,
                ranked_by: None,
                requirements: requirements.as_ref(),
            };
            let report = build_report(&results, None, &context);
            emit(&cli, format, config.output.decimals, &report)
        }
        Commands::Compare {
            filter,
            input,
            rank_by,
            use_case,
        } => {
            let filter_re =
                Regex::new(filter).with_context(|| format!("Invalid filter '{}'", filter))?;
            let inputs = match input {
                Some(path) => read_counts_file(path)?,
                None => default_techniques(),
            };
            let inputs: Vec<TechniqueInput> = inputs
                .into_iter()
                .filter(|t| filter_re.is_match(&t.name))
                .collect();
            if inputs.is_empty() {
                bail!("No techniques match filter '{}'", filter);
            }

            let rank_by = rank_by.unwrap_or(config.analysis.rank_by);
            let requirements = use_case
                .or(config.analysis.use_case)
                .map(UseCase::requirements);
            let results = analyze_techniques(&inputs, &interval, Some(rank_by));
            let context = ReportContext {
                confidence_level: interval.confidence_level,
                ranked_by: Some(rank_by),
                requirements: requirements.as_ref(),
            };
            let report = build_report(&results, None, &context);
            emit(&cli, format, config.output.decimals, &report)
        }
        Commands::Kappa {
            first,
            second,
            input,
            first_name,
            second_name,
        } => {
            let pairs = match (input, first, second) {
                (Some(path), _, _) => read_paired_file(path)?,
                (None, Some(first), Some(second)) => NamedPairs {
                    first_name: "First".to_string(),
                    second_name: "Second".to_string(),
                    outcomes: PairedOutcomes::new(
                        &parse_outcome_list(first)?,
                        &parse_outcome_list(second)?,
                    )?,
                },
                _ => bail!("Provide --input or both --first and --second"),
            };
            let first_name = first_name.clone().unwrap_or(pairs.first_name);
            let second_name = second_name.clone().unwrap_or(pairs.second_name);

            // The conventional 1.96 applies unless a different level was asked for
            let kappa = if interval == IntervalConfig::default() {
                compute_kappa(&pairs.outcomes)
            } else {
                compute_kappa_with(&pairs.outcomes, &interval)
            };
            tracing::debug!(n = pairs.outcomes.len(), computable = kappa.is_computable(), "computed kappa");

            let agreement =
                AgreementReport::new(first_name, second_name, pairs.outcomes.table(), kappa);
            let context = ReportContext {
                confidence_level: interval.confidence_level,
                ranked_by: None,
                requirements: None,
            };
            let report = build_report(&[], Some(agreement), &context);
            emit(&cli, format, config.output.decimals, &report)
        }
        Commands::List => {
            list_techniques();
            Ok(())
        }
        Commands::Init => init_config(),
    }
}

fn emit(
    cli: &Cli,
    format: OutputFormat,
    decimals: usize,
    report: &ampstat_report::Report,
) -> anyhow::Result<()> {
    let output = match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report)?,
        OutputFormat::Human => format_human_output(report, decimals),
    };

    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}

fn list_techniques() {
    println!("Built-in techniques:");
    for seed in SEED_TECHNIQUES.iter() {
        let c = seed.counts;
        println!(
            "├── {:<6} {} (TP {}, FN {}, TN {}, FP {})",
            seed.abbreviation,
            seed.name,
            c.true_positives,
            c.false_negatives,
            c.true_negatives,
            c.false_positives
        );
        println!("│       {}", seed.description);
    }
    println!("{} techniques.", SEED_TECHNIQUES.len());
}

fn init_config() -> anyhow::Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    std::fs::write(&path, AmpstatConfig::default_toml())?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_metrics_command() {
        let cli = Cli::try_parse_from([
            "ampstat", "metrics", "--tp", "95", "--fn", "5", "--tn", "90", "--fp", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Metrics { tp, fn_, tn, fp, .. } => {
                assert_eq!((tp, fn_, tn, fp), (95, 5, 90, 10));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_compare_command() {
        let cli = Cli::try_parse_from([
            "ampstat",
            "compare",
            "LAMP",
            "--rank-by",
            "npv",
            "--use-case",
            "point-of-care",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format.as_deref(), Some("json"));
        match cli.command {
            Commands::Compare {
                filter,
                rank_by,
                use_case,
                ..
            } => {
                assert_eq!(filter, "LAMP");
                assert_eq!(rank_by, Some(Metric::Npv));
                assert_eq!(use_case, Some(UseCase::PointOfCare));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        let cli = Cli::try_parse_from([
            "ampstat",
            "metrics",
            "--tp",
            "-1",
            "--fn",
            "5",
            "--tn",
            "90",
            "--fp",
            "10",
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        assert!(run_with_cli(cli).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_compare_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config, AmpstatConfig::default_toml()).unwrap();
        let out = dir.path().join("report.json");
        let cli = Cli::try_parse_from([
            "ampstat",
            "compare",
            "--format",
            "json",
            "--config",
            config.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        run_with_cli(cli).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        let techniques = json["techniques"].as_array().unwrap();
        assert_eq!(techniques.len(), 8);
        assert!(techniques[0]["name"].as_str().unwrap().starts_with("LAMP"));
        assert_eq!(json["meta"]["ranked_by"], "sensitivity");
    }

    #[test]
    fn test_kappa_requires_both_lists() {
        assert!(Cli::try_parse_from(["ampstat", "kappa", "--first", "1,0"]).is_err());
    }

    #[test]
    fn test_invalid_confidence_rejected() {
        let cli = Cli::try_parse_from(["ampstat", "--confidence", "1.5", "list"]).unwrap();
        assert!(run_with_cli(cli).is_err());
    }
}
