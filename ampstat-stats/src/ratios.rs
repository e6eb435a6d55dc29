//! Likelihood ratios and the diagnostic odds ratio

use crate::estimate::Estimate;
use crate::metrics::ConfusionCounts;
use serde::{Deserialize, Serialize};

/// Positive and negative likelihood ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodRatios {
    /// LR+ = sensitivity / (1 - specificity)
    pub positive: Estimate<f64>,
    /// LR- = (1 - sensitivity) / specificity
    pub negative: Estimate<f64>,
}

fn ratio(numerator: u64, denominator: u64) -> Estimate<f64> {
    if denominator == 0 {
        Estimate::NotComputable
    } else {
        Estimate::Computable(numerator as f64 / denominator as f64)
    }
}

/// Compute LR+ and LR- from counts
///
/// Each ratio is `NotComputable` when sensitivity or specificity is undefined
/// or when its divisor is zero (specificity of 1 for LR+, 0 for LR-).
pub fn likelihood_ratios(counts: &ConfusionCounts) -> LikelihoodRatios {
    let sensitivity = ratio(counts.true_positives, counts.actually_positive());
    let specificity = ratio(counts.true_negatives, counts.actually_negative());

    let positive = sensitivity.and_then(|sens| {
        specificity.and_then(|spec| {
            let fpr = 1.0 - spec;
            if counts.false_positives == 0 {
                Estimate::NotComputable
            } else {
                Estimate::Computable(sens / fpr)
            }
        })
    });

    let negative = sensitivity.and_then(|sens| {
        specificity.and_then(|spec| {
            if counts.true_negatives == 0 {
                Estimate::NotComputable
            } else {
                Estimate::Computable((1.0 - sens) / spec)
            }
        })
    });

    LikelihoodRatios { positive, negative }
}

/// Diagnostic odds ratio (TP x TN) / (FN x FP)
///
/// `NotComputable` when FN or FP is zero.
pub fn diagnostic_odds_ratio(counts: &ConfusionCounts) -> Estimate<f64> {
    if counts.false_negatives == 0 || counts.false_positives == 0 {
        return Estimate::NotComputable;
    }
    let numerator = counts.true_positives as f64 * counts.true_negatives as f64;
    let denominator = counts.false_negatives as f64 * counts.false_positives as f64;
    Estimate::Computable(numerator / denominator)
}
