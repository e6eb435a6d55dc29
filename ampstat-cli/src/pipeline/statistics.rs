//! Statistics Computation
//!
//! Computes diagnostic metrics for every technique and orders them.
//!
//! Techniques are independent, so the engine computes them in parallel with
//! Rayon. Ranking runs afterwards on the collected results.

use ampstat_stats::{
    IntervalConfig, Metric, TechniqueInput, TechniqueResult, compute_technique_results,
    rank_techniques,
};

/// Compute results for all techniques, ranked by `rank_by` when given
///
/// # Arguments
/// * `inputs` - Named confusion counts
/// * `config` - Confidence level and critical value
/// * `rank_by` - Metric to sort by; `None` keeps input order
pub fn analyze_techniques(
    inputs: &[TechniqueInput],
    config: &IntervalConfig,
    rank_by: Option<Metric>,
) -> Vec<TechniqueResult> {
    let results = compute_technique_results(inputs, config);
    tracing::debug!(
        techniques = results.len(),
        confidence_level = config.confidence_level,
        "computed diagnostic metrics"
    );

    match rank_by {
        Some(metric) => {
            let ranked = rank_techniques(results, metric);
            tracing::debug!(%metric, "ranked techniques");
            ranked
        }
        None => results,
    }
}
