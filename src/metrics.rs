//! Turning a bucket table into distribution statistics.

use serde::Serialize;

use crate::bucket::BucketTable;
use crate::error::{AnalysisError, Result, Stage};

/// Per-candidate quality measurements.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunStatistics {
    /// Empirical probability of each bucket.
    pub pmf: Vec<f64>,
    /// Relative entropy of `pmf` against the uniform distribution, in nats.
    pub divergence: f64,
    pub collisions: u64,
    /// Average bucket distance between consecutive inputs.
    pub mean_step_distance: f64,
}

/// Relative entropy `Σ p_i ln(p_i / u)` with `u = 1 / pmf.len()`.
///
/// Empty buckets contribute nothing.
pub fn divergence_from_uniform(pmf: &[f64]) -> f64 {
    let uniform = 1.0 / pmf.len() as f64;
    pmf.iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| p * (p / uniform).ln())
        .sum()
}

/// Normalizes `table` by `sample_size` and derives the run statistics.
pub fn aggregate(
    table: &BucketTable,
    collisions: u64,
    total_step_distance: u64,
    sample_size: usize,
) -> Result<RunStatistics> {
    if sample_size == 0 {
        return Err(AnalysisError::DivisionByZero {
            stage: Stage::Aggregation,
            quantity: "probability mass (sample size is 0)".to_owned(),
        });
    }
    if table.is_empty() {
        return Err(AnalysisError::DivisionByZero {
            stage: Stage::Aggregation,
            quantity: "uniform probability (bucket count is 0)".to_owned(),
        });
    }
    if table.total() != sample_size as u64 {
        return Err(AnalysisError::InvalidArgument {
            stage: Stage::Aggregation,
            name: "sample_size",
            value: sample_size.to_string(),
            reason: "does not match the number of inputs in the bucket table",
        });
    }

    let n = sample_size as f64;
    let pmf: Vec<f64> = table.counts().iter().map(|&c| c as f64 / n).collect();
    let divergence = divergence_from_uniform(&pmf);

    Ok(RunStatistics {
        pmf,
        divergence,
        collisions,
        mean_step_distance: total_step_distance as f64 / n,
    })
}
