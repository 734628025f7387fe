//! Empirical distribution quality of string hash functions.
//!
//! A run feeds the strings `a`, `b`, ..., `z`, `aa`, `ab`, ... through a hash
//! function, reduces every result into a table of buckets, and measures
//!
//! - how far the bucket distribution is from uniform (relative entropy),
//! - how many inputs land in an already occupied bucket,
//! - how far apart the buckets of consecutive inputs are on average.
//!
//! [`conduct_analysis`] does this for three fixed baselines (a SHA-256
//! derived numeral, sdbm, and a plain letter sum) and for one user supplied
//! [`HashCandidate`], then reports the user's metrics as ratios of each
//! baseline's.
//!
//! ```no_run
//! use hashspread::{conduct_analysis, from_fn, AnalysisConfig};
//!
//! let djb2 = from_fn("djb2", |s: &str| {
//!     s.bytes().fold(5381u32, |h, b| h.wrapping_mul(33).wrapping_add(u32::from(b)))
//! });
//! let report = conduct_analysis(&djb2, &AnalysisConfig::new(10_000)).unwrap();
//! print!("{report}");
//! ```

mod bucket;
mod builtin;
mod candidate;
mod error;
mod input;
mod metrics;
mod pipeline;
mod report;

pub use bucket::{map_to_buckets, BucketMapping, BucketTable};
pub use builtin::{
    baselines, builtin, builtin_names, FoldHash, LetterSum, Sdbm, Sha256Digits,
    WeightedCodepointSum,
};
pub use candidate::{from_fn, CandidateError, FnCandidate, HashCandidate, HashValue};
pub use error::{AnalysisError, Result, Stage};
pub use input::{generate, LetterCombinations, ALPHABET};
pub use metrics::{aggregate, divergence_from_uniform, RunStatistics};
pub use pipeline::{analyze, conduct_analysis, AnalysisConfig, DEFAULT_SAMPLE_SIZE};
pub use report::{compare, CandidateStatistics, ComparisonReport, Metric, RatioCell, USER_LABEL};
