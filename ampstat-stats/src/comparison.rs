//! Technique Comparison
//!
//! Computes results for several techniques and orders them by a chosen
//! metric. No significance testing is performed; the ranking only orders
//! point estimates.

use crate::interval::IntervalConfig;
use crate::metrics::{ConfusionCounts, Metric, TechniqueResult};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Named counts for one technique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechniqueInput {
    /// Technique label
    pub name: String,
    /// Confusion counts
    pub counts: ConfusionCounts,
}

impl TechniqueInput {
    /// Bind a name to counts
    pub fn new(name: impl Into<String>, counts: ConfusionCounts) -> Self {
        Self {
            name: name.into(),
            counts,
        }
    }
}

/// Compute results for many techniques (parallelized with Rayon)
///
/// Output order matches input order.
pub fn compute_technique_results(
    inputs: &[TechniqueInput],
    config: &IntervalConfig,
) -> Vec<TechniqueResult> {
    inputs
        .par_iter()
        .map(|input| TechniqueResult::with_config(input.name.clone(), input.counts, config))
        .collect()
}

/// Sort techniques by descending point estimate of `key_metric`
///
/// The sort is stable: equal estimates keep their input order. Techniques
/// whose metric is not computable are placed last, also in input order.
pub fn rank_techniques(results: Vec<TechniqueResult>, key_metric: Metric) -> Vec<TechniqueResult> {
    let mut ranked = results;
    ranked.sort_by(|a, b| {
        let a = a.metrics.get(key_metric);
        let b = b.metrics.get(key_metric);
        match (a.value(), b.value()) {
            (Some(x), Some(y)) => y
                .point_estimate
                .partial_cmp(&x.point_estimate)
                .unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    ranked
}
