//! Comparing a user candidate against the baselines.

use core::fmt;

use serde::Serialize;

use crate::error::{AnalysisError, Stage};
use crate::metrics::RunStatistics;

/// Name the user candidate is listed under in a report.
pub const USER_LABEL: &str = "user_function";

/// The scalar metrics that get compared. The PMF is not one of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Divergence,
    Collisions,
    MeanStepDistance,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::Divergence,
        Metric::Collisions,
        Metric::MeanStepDistance,
    ];

    pub fn value(self, stats: &RunStatistics) -> f64 {
        match self {
            Metric::Divergence => stats.divergence,
            Metric::Collisions => stats.collisions as f64,
            Metric::MeanStepDistance => stats.mean_step_distance,
        }
    }

    /// Human-readable label used in the text report.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Divergence => "distribution difference",
            Metric::Collisions => "collisions",
            Metric::MeanStepDistance => "expected difference per input",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateStatistics {
    pub name: String,
    pub stats: RunStatistics,
}

impl CandidateStatistics {
    pub fn new(name: impl Into<String>, stats: RunStatistics) -> Self {
        Self {
            name: name.into(),
            stats,
        }
    }
}

/// `user / baseline` for one metric, or `None` when the baseline is zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RatioCell {
    pub metric: Metric,
    pub baseline: String,
    pub ratio: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Grouped by metric in [`Metric::ALL`] order, then by baseline.
    pub ratios: Vec<RatioCell>,
    /// Baselines first, the user candidate last.
    pub candidates: Vec<CandidateStatistics>,
}

/// Builds the ratio table for `user` against every baseline.
///
/// A zero baseline metric does not abort the comparison: that single ratio
/// is left empty and shows up in [`ComparisonReport::warnings`].
pub fn compare(user: &RunStatistics, baselines: &[CandidateStatistics]) -> ComparisonReport {
    let mut ratios = Vec::with_capacity(Metric::ALL.len() * baselines.len());
    for metric in Metric::ALL {
        let numerator = metric.value(user);
        for baseline in baselines {
            let denominator = metric.value(&baseline.stats);
            let ratio = if denominator == 0.0 {
                tracing::warn!(
                    baseline = %baseline.name,
                    %metric,
                    "baseline metric is zero, ratio omitted"
                );
                None
            } else {
                Some(numerator / denominator)
            };
            ratios.push(RatioCell {
                metric,
                baseline: baseline.name.clone(),
                ratio,
            });
        }
    }

    let mut candidates = baselines.to_vec();
    candidates.push(CandidateStatistics::new(USER_LABEL, user.clone()));
    ComparisonReport { ratios, candidates }
}

impl ComparisonReport {
    pub fn ratio(&self, metric: Metric, baseline: &str) -> Option<f64> {
        self.ratios
            .iter()
            .find(|cell| cell.metric == metric && cell.baseline == baseline)
            .and_then(|cell| cell.ratio)
    }

    /// One `DivisionByZero` per ratio that could not be computed.
    pub fn warnings(&self) -> impl Iterator<Item = AnalysisError> + '_ {
        self.ratios
            .iter()
            .filter(|cell| cell.ratio.is_none())
            .map(|cell| AnalysisError::DivisionByZero {
                stage: Stage::Comparison,
                quantity: format!("{} ratio against `{}`", cell.metric, cell.baseline),
            })
    }

    pub fn user(&self) -> Option<&CandidateStatistics> {
        self.candidates.iter().find(|c| c.name == USER_LABEL)
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for metric in Metric::ALL {
            writeln!(f, "Current stat: {metric}")?;
            for cell in self.ratios.iter().filter(|cell| cell.metric == metric) {
                match cell.ratio {
                    Some(ratio) => writeln!(
                        f,
                        "user function is {ratio:.5}x larger than {}",
                        cell.baseline
                    )?,
                    None => writeln!(
                        f,
                        "user function vs {}: undefined, baseline {metric} is zero",
                        cell.baseline
                    )?,
                }
            }
            writeln!(f)?;
        }

        for candidate in &self.candidates {
            writeln!(f, "stats for {}:", candidate.name)?;
            writeln!(f, "distance from uniform = {}", candidate.stats.divergence)?;
            writeln!(f, "number of collisions = {}", candidate.stats.collisions)?;
            writeln!(
                f,
                "expected difference from previous string = {}",
                candidate.stats.mean_step_distance
            )?;
            writeln!(f)?;
        }
        Ok(())
    }
}
