//! Use-case performance requirements
//!
//! Compares a technique's point estimates against minimum thresholds for an
//! application area such as clinical diagnostics or screening.

use crate::estimate::Estimate;
use crate::metrics::{Metric, TechniqueResult};
use serde::{Deserialize, Serialize};

/// Minimum acceptable proportions for an application area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRequirements {
    /// Profile name, e.g. "screening"
    pub name: String,
    /// Minimum sensitivity (proportion)
    pub min_sensitivity: f64,
    /// Minimum specificity
    pub min_specificity: f64,
    /// Minimum PPV
    pub min_ppv: f64,
    /// Minimum NPV
    pub min_npv: f64,
}

impl PerformanceRequirements {
    /// Thresholds paired with the metric they apply to
    pub fn thresholds(&self) -> [(Metric, f64); 4] {
        [
            (Metric::Sensitivity, self.min_sensitivity),
            (Metric::Specificity, self.min_specificity),
            (Metric::Ppv, self.min_ppv),
            (Metric::Npv, self.min_npv),
        ]
    }
}

/// Outcome of one threshold check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequirementCheck {
    /// Which measure
    pub metric: Metric,
    /// Threshold
    pub required: f64,
    /// Point estimate, if computable
    pub observed: Estimate<f64>,
    /// `observed >= required`
    pub met: bool,
}

/// All threshold checks for one technique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementReport {
    /// Name of the profile checked
    pub requirements: String,
    /// One check per threshold
    pub checks: Vec<RequirementCheck>,
    /// Every check passed
    pub all_met: bool,
}

/// Check a technique against use-case thresholds
///
/// A metric that is not computable never meets its threshold.
pub fn check_requirements(
    result: &TechniqueResult,
    requirements: &PerformanceRequirements,
) -> RequirementReport {
    let checks: Vec<RequirementCheck> = requirements
        .thresholds()
        .into_iter()
        .map(|(metric, required)| {
            let observed = result.metrics.get(metric).map(|e| e.point_estimate);
            let met = observed.value().is_some_and(|&v| v >= required);
            RequirementCheck {
                metric,
                required,
                observed,
                met,
            }
        })
        .collect();

    let all_met = checks.iter().all(|c| c.met);
    RequirementReport {
        requirements: requirements.name.clone(),
        checks,
        all_met,
    }
}
