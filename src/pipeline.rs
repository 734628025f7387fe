//! Running candidates end to end: generate, map, aggregate, compare.

use crate::bucket::map_to_buckets;
use crate::builtin::baselines;
use crate::candidate::HashCandidate;
use crate::error::{AnalysisError, Result, Stage};
use crate::input::generate;
use crate::metrics::{aggregate, RunStatistics};
use crate::report::{compare, CandidateStatistics, ComparisonReport};

pub const DEFAULT_SAMPLE_SIZE: usize = 100_000;

/// Parameters for one analysis run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    sample_size: usize,
    bucket_count: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

impl AnalysisConfig {
    /// A run over `sample_size` inputs and as many buckets.
    pub const fn new(sample_size: usize) -> Self {
        Self {
            sample_size,
            bucket_count: None,
        }
    }

    /// Overrides the bucket count, which otherwise equals the sample size.
    pub const fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = Some(bucket_count);
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count.unwrap_or(self.sample_size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(AnalysisError::zero_argument(
                Stage::Generation,
                "sample_size",
            ));
        }
        if self.bucket_count() == 0 {
            return Err(AnalysisError::zero_argument(Stage::Mapping, "bucket_count"));
        }
        Ok(())
    }
}

/// Runs the generate, map and aggregate stages for a single candidate.
pub fn analyze<C>(candidate: &C, config: &AnalysisConfig) -> Result<RunStatistics>
where
    C: HashCandidate + ?Sized,
{
    config.validate()?;
    let _span = tracing::info_span!("analyze", candidate = candidate.name()).entered();
    tracing::info!(
        sample_size = config.sample_size(),
        bucket_count = config.bucket_count(),
        "analyzing {}",
        candidate.name()
    );

    tracing::debug!(stage = %Stage::Generation, "entering stage");
    let inputs = generate(config.sample_size())?;

    tracing::debug!(stage = %Stage::Mapping, "entering stage");
    let mapping = map_to_buckets(candidate, inputs, config.bucket_count())?;

    tracing::debug!(stage = %Stage::Aggregation, "entering stage");
    let stats = aggregate(
        &mapping.table,
        mapping.collisions,
        mapping.total_step_distance,
        config.sample_size(),
    )?;

    tracing::debug!(
        divergence = stats.divergence,
        collisions = stats.collisions,
        mean_step_distance = stats.mean_step_distance,
        "candidate done"
    );
    Ok(stats)
}

/// Analyzes every baseline, then `user`, and compares them.
///
/// Stops at the first candidate that fails.
pub fn conduct_analysis<C>(user: &C, config: &AnalysisConfig) -> Result<ComparisonReport>
where
    C: HashCandidate + ?Sized,
{
    config.validate()?;

    let mut baseline_stats = Vec::new();
    for baseline in baselines() {
        let stats = analyze(&*baseline, config)?;
        baseline_stats.push(CandidateStatistics::new(baseline.name(), stats));
    }
    let user_stats = analyze(user, config)?;

    tracing::debug!(stage = %Stage::Comparison, "entering stage");
    Ok(compare(&user_stats, &baseline_stats))
}
