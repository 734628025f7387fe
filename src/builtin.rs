//! The fixed baseline candidates plus a few ready-made user candidates.

use core::hash::BuildHasher;

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::candidate::{CandidateError, HashCandidate, HashValue};

/// Offset of a character from `'a'`, negative for anything below it.
fn letter_offset(c: char) -> i64 {
    i64::from(u32::from(c)) - i64::from(u32::from('a'))
}

/// SHA-256 of the UTF-8 input, rendered as a decimal numeral.
///
/// Every hex digit `0-9` is kept as is and every `a-f` is replaced by its
/// offset from `'a'` (`0-5`), so the numeral is 64 decimal digits long.
/// Digits `0-5` come out twice as often as `6-9`, which skews the value
/// modulo powers of ten.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sha256Digits;

impl Sha256Digits {
    pub fn numeral(input: &str) -> String {
        let digest = Sha256::digest(input.as_bytes());
        let mut numeral = String::with_capacity(2 * digest.len());
        for nibble in digest.iter().flat_map(|b| [b >> 4, b & 0xf]) {
            // Hex a-f becomes 0-5.
            let digit = if nibble < 10 { nibble } else { nibble - 10 };
            numeral.push(char::from(b'0' + digit));
        }
        numeral
    }
}

impl HashCandidate for Sha256Digits {
    fn name(&self) -> &str {
        "SHA256"
    }

    fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
        let numeral = Self::numeral(input);
        numeral
            .parse::<BigUint>()
            .map(HashValue::Wide)
            .map_err(|e| CandidateError::new(format!("digest numeral {numeral:?}: {e}")))
    }
}

/// The classic sdbm hash, `c + (h << 6) + (h << 16) - h`, kept to 32 bits.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sdbm;

impl Sdbm {
    pub fn hash_str(input: &str) -> u32 {
        input.chars().fold(0u32, |h, c| {
            u32::from(c)
                .wrapping_add(h << 6)
                .wrapping_add(h << 16)
                .wrapping_sub(h)
        })
    }
}

impl HashCandidate for Sdbm {
    fn name(&self) -> &str {
        "SDBM"
    }

    fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
        Ok(Self::hash_str(input).into())
    }
}

/// Sum of each character's offset from `'a'`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LetterSum;

impl HashCandidate for LetterSum {
    fn name(&self) -> &str {
        "basic"
    }

    fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
        let mut sum = 0i64;
        for c in input.chars() {
            sum = sum
                .checked_add(letter_offset(c))
                .ok_or_else(|| CandidateError::new("letter sum overflowed i64"))?;
        }
        Ok(sum.into())
    }
}

/// Position-weighted code point sum, `Σ (i + 1) * c_i`, wrapping at 2^64.
#[derive(Copy, Clone, Debug, Default)]
pub struct WeightedCodepointSum;

impl HashCandidate for WeightedCodepointSum {
    fn name(&self) -> &str {
        "weighted-sum"
    }

    fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
        let sum = input.chars().zip(1u64..).fold(0u64, |acc, (c, weight)| {
            acc.wrapping_add(weight.wrapping_mul(u64::from(u32::from(c))))
        });
        Ok(sum.into())
    }
}

/// foldhash with a fixed seed, so runs stay reproducible.
#[derive(Copy, Clone, Debug)]
pub enum FoldHash {
    Fast(foldhash::fast::FixedState),
    Quality(foldhash::quality::FixedState),
}

impl FoldHash {
    pub fn fast(seed: u64) -> Self {
        FoldHash::Fast(foldhash::fast::FixedState::with_seed(seed))
    }

    pub fn quality(seed: u64) -> Self {
        FoldHash::Quality(foldhash::quality::FixedState::with_seed(seed))
    }
}

impl HashCandidate for FoldHash {
    fn name(&self) -> &str {
        match self {
            FoldHash::Fast(_) => "foldhash-fast",
            FoldHash::Quality(_) => "foldhash-quality",
        }
    }

    fn hash(&self, input: &str) -> Result<HashValue, CandidateError> {
        Ok(match self {
            FoldHash::Fast(state) => state.hash_one(input),
            FoldHash::Quality(state) => state.hash_one(input),
        }
        .into())
    }
}

/// The reference candidates every user candidate is compared against, in
/// report order.
pub fn baselines() -> Vec<Box<dyn HashCandidate>> {
    vec![Box::new(Sha256Digits), Box::new(Sdbm), Box::new(LetterSum)]
}

const BUILTIN_NAMES: &[&str] = &[
    "weighted-sum",
    "foldhash-fast",
    "foldhash-quality",
    "sha256",
    "sdbm",
    "basic",
];

/// Names accepted by [`builtin`].
pub fn builtin_names() -> &'static [&'static str] {
    BUILTIN_NAMES
}

/// Looks up a builtin candidate by name, ignoring ASCII case.
pub fn builtin(name: &str) -> Option<Box<dyn HashCandidate>> {
    let candidate: Box<dyn HashCandidate> = match name.to_ascii_lowercase().as_str() {
        "weighted-sum" => Box::new(WeightedCodepointSum),
        "foldhash-fast" => Box::new(FoldHash::fast(0)),
        "foldhash-quality" => Box::new(FoldHash::quality(0)),
        "sha256" => Box::new(Sha256Digits),
        "sdbm" => Box::new(Sdbm),
        "basic" => Box::new(LetterSum),
        _ => return None,
    };
    Some(candidate)
}
