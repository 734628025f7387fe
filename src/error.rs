use core::fmt;

use thiserror::Error;

use crate::candidate::CandidateError;

/// The pipeline stage an error was raised in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Generation,
    Mapping,
    Aggregation,
    Comparison,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Generation => "generation",
            Stage::Mapping => "mapping",
            Stage::Aggregation => "aggregation",
            Stage::Comparison => "comparison",
        })
    }
}

/// Errors produced while analyzing a candidate.
///
/// `InvalidArgument` and `CandidateEvaluation` abort a run. `DivisionByZero`
/// aborts aggregation, but during comparison it is only reported per ratio.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{stage}: invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        stage: Stage,
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("mapping: candidate `{candidate}` failed on input {input:?}: {source}")]
    CandidateEvaluation {
        candidate: String,
        input: String,
        #[source]
        source: CandidateError,
    },

    #[error("{stage}: division by zero while computing {quantity}")]
    DivisionByZero { stage: Stage, quantity: String },
}

impl AnalysisError {
    pub(crate) fn zero_argument(stage: Stage, name: &'static str) -> Self {
        AnalysisError::InvalidArgument {
            stage,
            name,
            value: "0".to_owned(),
            reason: "must be positive",
        }
    }

    /// The stage this error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            AnalysisError::InvalidArgument { stage, .. } => *stage,
            AnalysisError::CandidateEvaluation { .. } => Stage::Mapping,
            AnalysisError::DivisionByZero { stage, .. } => *stage,
        }
    }
}

pub type Result<T, E = AnalysisError> = core::result::Result<T, E>;
