//! Configuration loading from ampstat.toml
//!
//! Ampstat configuration can be specified in an `ampstat.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.
//! Command-line flags always override file values.

use crate::dataset::UseCase;
use ampstat_stats::{DEFAULT_CONFIDENCE_LEVEL, Metric};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "ampstat.toml";

/// Ampstat configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AmpstatConfig {
    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Confidence level (e.g., 0.95 for 95%)
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    /// Metric used to rank techniques
    #[serde(default = "default_rank_by")]
    pub rank_by: Metric,
    /// Requirement profile applied to every technique
    #[serde(default)]
    pub use_case: Option<UseCase>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: default_confidence_level(),
            rank_by: default_rank_by(),
            use_case: None,
        }
    }
}

fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}
fn default_rank_by() -> Metric {
    Metric::Sensitivity
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Decimal places for percentages in human output
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            decimals: default_decimals(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_decimals() -> usize {
    2
}

impl AmpstatConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid configuration");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Ampstat Configuration

[analysis]
# Confidence level for Wilson and kappa intervals (0.0 to 1.0, exclusive)
confidence_level = 0.95
# Metric used to rank techniques: sensitivity, specificity, ppv, npv, accuracy
rank_by = "sensitivity"
# Requirement profile (uncomment to enable):
# clinical-diagnostics, screening, research, point-of-care
# use_case = "clinical-diagnostics"

[output]
# Default output format: human, json, csv
format = "human"
# Decimal places for percentages in human output
decimals = 2
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AmpstatConfig::default();
        assert!((config.analysis.confidence_level - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.analysis.rank_by, Metric::Sensitivity);
        assert_eq!(config.analysis.use_case, None);
        assert_eq!(config.output.format, "human");
        assert_eq!(config.output.decimals, 2);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [analysis]
            rank_by = "npv"
            use_case = "point-of-care"
        "#;

        let config: AmpstatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.rank_by, Metric::Npv);
        assert_eq!(config.analysis.use_case, Some(UseCase::PointOfCare));
        // Defaults should still apply
        assert!((config.analysis.confidence_level - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_default_toml_parses() {
        let config: AmpstatConfig = toml::from_str(&AmpstatConfig::default_toml()).unwrap();
        assert_eq!(config.analysis.rank_by, Metric::Sensitivity);
        assert_eq!(config.output.decimals, 2);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

        let config = AmpstatConfig::load(&path).unwrap();
        assert_eq!(config.output.format, "json");

        std::fs::write(&path, "[analysis]\nrank_by = \"f1\"\n").unwrap();
        assert!(AmpstatConfig::load(&path).is_err());
    }
}
