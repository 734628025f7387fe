//! Reducing candidate outputs into a fixed-size bucket table.

use core::num::NonZeroUsize;

use crate::candidate::HashCandidate;
use crate::error::{AnalysisError, Result, Stage};

/// Occurrence count per bucket index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketTable {
    counts: Vec<u64>,
}

impl BucketTable {
    pub fn new(bucket_count: NonZeroUsize) -> Self {
        Self {
            counts: vec![0; bucket_count.get()],
        }
    }

    /// Builds a table from explicit counts. An empty vector is rejected.
    pub fn from_counts(counts: Vec<u64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(AnalysisError::zero_argument(
                Stage::Aggregation,
                "bucket_count",
            ));
        }
        Ok(Self { counts })
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of inputs placed.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Records one occurrence, returning whether the bucket was already taken.
    fn record(&mut self, bucket: usize) -> bool {
        let slot = &mut self.counts[bucket];
        let occupied = *slot != 0;
        *slot += 1;
        occupied
    }
}

/// Everything the mapper learns from one candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketMapping {
    pub table: BucketTable,
    /// Inputs that landed in an already occupied bucket. A bucket holding k
    /// inputs contributes k - 1, not k * (k - 1) / 2.
    pub collisions: u64,
    /// Sum of `|bucket - previous bucket|` over consecutive inputs.
    pub total_step_distance: u64,
}

/// Hashes each input in order and places it into one of `bucket_count`
/// buckets.
pub fn map_to_buckets<C, I>(candidate: &C, inputs: I, bucket_count: usize) -> Result<BucketMapping>
where
    C: HashCandidate + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let bucket_count = NonZeroUsize::new(bucket_count)
        .ok_or_else(|| AnalysisError::zero_argument(Stage::Mapping, "bucket_count"))?;

    let mut table = BucketTable::new(bucket_count);
    let mut collisions = 0u64;
    let mut total_step_distance = 0u64;
    let mut prev: Option<usize> = None;

    for input in inputs {
        let input = input.as_ref();
        let raw = candidate
            .hash(input)
            .map_err(|source| AnalysisError::CandidateEvaluation {
                candidate: candidate.name().to_owned(),
                input: input.to_owned(),
                source,
            })?;
        let bucket = raw.bucket(bucket_count);

        if table.record(bucket) {
            collisions += 1;
        }
        if let Some(prev) = prev {
            total_step_distance += bucket.abs_diff(prev) as u64;
        }
        prev = Some(bucket);
    }

    Ok(BucketMapping {
        table,
        collisions,
        total_step_distance,
    })
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use super::*;
    use crate::builtin::Sdbm;
    use crate::candidate::{from_fn, CandidateError, HashValue};
    use crate::input::generate;

    #[test]
    fn constant_candidate_piles_into_one_bucket() {
        let zero = from_fn("zero", |_: &str| 0u64);
        let m = map_to_buckets(&zero, ["a", "a", "a"], 3).unwrap();
        assert_eq!(m.table.counts(), [3, 0, 0]);
        assert_eq!(m.collisions, 2);
        assert_eq!(m.total_step_distance, 0);
    }

    #[test]
    fn distinct_buckets_have_no_collisions() {
        let identity = from_fn("len", |s: &str| s.len() as u64);
        let m = map_to_buckets(&identity, ["", "x", "xx", "xxx"], 4).unwrap();
        assert_eq!(m.table.counts(), [1, 1, 1, 1]);
        assert_eq!(m.collisions, 0);
        assert_eq!(m.total_step_distance, 3);
    }

    #[test]
    fn step_distance_is_absolute() {
        let table = [3u64, 0, 2, 0];
        let lookup = from_fn("lookup", move |s: &str| table[s.len()]);
        let m = map_to_buckets(&lookup, ["", "x", "xx", "xxx"], 4).unwrap();
        // 3 -> 0 -> 2 -> 0
        assert_eq!(m.total_step_distance, 3 + 2 + 2);
        assert_eq!(m.collisions, 1);
    }

    #[test]
    fn all_inputs_in_one_bucket_collide_n_minus_one_times() {
        let zero = from_fn("zero", |_: &str| 0u64);
        let m = map_to_buckets(&zero, generate(500).unwrap(), 500).unwrap();
        assert_eq!(m.collisions, 499);
        assert_eq!(m.table.counts()[0], 500);
    }

    #[test]
    fn negative_hashes_land_in_range() {
        let neg = from_fn("neg", |s: &str| -(s.len() as i64));
        let m = map_to_buckets(&neg, ["x", "xx"], 5).unwrap();
        assert_eq!(m.table.counts(), [0, 0, 0, 1, 1]);
    }

    #[test]
    fn table_sums_to_sample_size() {
        let mut rng = StdRng::seed_from_u64(0x123456789abcdef);
        for _ in 0..50 {
            let n = rng.gen_range(1..3000);
            let b = rng.gen_range(1..3000);
            let m = map_to_buckets(&Sdbm, generate(n).unwrap(), b).unwrap();
            assert_eq!(m.table.len(), b);
            assert_eq!(m.table.total(), n as u64);
            assert!(m.collisions < n as u64);
        }
    }

    #[test]
    fn zero_buckets_is_rejected() {
        let err = map_to_buckets(&Sdbm, ["a"], 0).unwrap_err();
        assert_eq!(err.stage(), Stage::Mapping);
    }

    struct FailsOn(&'static str);

    impl HashCandidate for FailsOn {
        fn name(&self) -> &str {
            "fails"
        }

        fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
            if input == self.0 {
                Err(CandidateError::new("unsupported input"))
            } else {
                Ok(HashValue::Unsigned(1))
            }
        }
    }

    #[test]
    fn candidate_failure_names_the_input() {
        let err = map_to_buckets(&FailsOn("c"), generate(10).unwrap(), 10).unwrap_err();
        match err {
            AnalysisError::CandidateEvaluation {
                candidate, input, ..
            } => {
                assert_eq!(candidate, "fails");
                assert_eq!(input, "c");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
