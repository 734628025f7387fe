//! The extension point: anything that turns a string into an integer.

use core::fmt;
use core::num::NonZeroUsize;

use num_bigint::BigUint;
use thiserror::Error;

/// The raw output of a [`HashCandidate`].
///
/// Candidates are free to produce integers of any magnitude and sign, so
/// the value is only ever used through [`HashValue::bucket`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashValue {
    Unsigned(u64),
    Signed(i64),
    Wide(BigUint),
}

impl HashValue {
    /// Reduces the value into `[0, bucket_count)`.
    ///
    /// Negative values use the Euclidean remainder, so `-1` lands in the last
    /// bucket rather than outside the table.
    pub fn bucket(&self, bucket_count: NonZeroUsize) -> usize {
        let n = bucket_count.get();
        match self {
            HashValue::Unsigned(v) => (*v % n as u64) as usize,
            HashValue::Signed(v) => i128::from(*v).rem_euclid(n as i128) as usize,
            HashValue::Wide(v) => {
                let rem = v % (n as u64);
                // Little-endian digits, empty for zero; rem < n fits in one.
                rem.to_u64_digits().first().copied().unwrap_or(0) as usize
            }
        }
    }
}

impl From<u32> for HashValue {
    fn from(v: u32) -> Self {
        HashValue::Unsigned(u64::from(v))
    }
}

impl From<u64> for HashValue {
    fn from(v: u64) -> Self {
        HashValue::Unsigned(v)
    }
}

impl From<i64> for HashValue {
    fn from(v: i64) -> Self {
        HashValue::Signed(v)
    }
}

impl From<BigUint> for HashValue {
    fn from(v: BigUint) -> Self {
        HashValue::Wide(v)
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashValue::Unsigned(v) => write!(f, "{v}"),
            HashValue::Signed(v) => write!(f, "{v}"),
            HashValue::Wide(v) => write!(f, "{v}"),
        }
    }
}

/// Failure reported by a candidate for a particular input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CandidateError {
    message: String,
}

impl CandidateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A hash function under evaluation.
///
/// Implementations must be deterministic and free of side effects: the same
/// input always produces the same value.
pub trait HashCandidate {
    fn name(&self) -> &str;
    fn hash(&self, input: &str) -> Result<HashValue, CandidateError>;
}

impl<C: HashCandidate + ?Sized> HashCandidate for &C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
        (**self).hash(input)
    }
}

impl<C: HashCandidate + ?Sized> HashCandidate for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
        (**self).hash(input)
    }
}

/// A [`HashCandidate`] backed by a closure.
#[derive(Clone)]
pub struct FnCandidate<F> {
    name: String,
    func: F,
}

impl<F> fmt::Debug for FnCandidate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCandidate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F, V> HashCandidate for FnCandidate<F>
where
    F: Fn(&str) -> V,
    V: Into<HashValue>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
        Ok((self.func)(input).into())
    }
}

/// Wraps an infallible closure as a named candidate.
pub fn from_fn<F, V>(name: impl Into<String>, func: F) -> FnCandidate<F>
where
    F: Fn(&str) -> V,
    V: Into<HashValue>,
{
    FnCandidate {
        name: name.into(),
        func,
    }
}
