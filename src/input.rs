//! Deterministic input strings: `a`, `b`, ..., `z`, `aa`, `ab`, ...

use crate::error::{AnalysisError, Result, Stage};

/// The letters inputs are built from, in enumeration order.
pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Lazily enumerates every string over [`ALPHABET`], shortest first and in
/// lexicographic order within a length, stopping after a fixed count.
///
/// Cloning restarts nothing: the clone continues from the same position.
/// Call [`generate`] again for a fresh pass.
#[derive(Clone, Debug)]
pub struct LetterCombinations {
    // Alphabet index per position of the next string to emit.
    digits: Vec<u8>,
    remaining: usize,
}

/// Returns the first `sample_size` strings over [`ALPHABET`].
pub fn generate(sample_size: usize) -> Result<LetterCombinations> {
    if sample_size == 0 {
        return Err(AnalysisError::zero_argument(
            Stage::Generation,
            "sample_size",
        ));
    }
    Ok(LetterCombinations {
        digits: vec![0],
        remaining: sample_size,
    })
}

impl LetterCombinations {
    fn advance(&mut self) {
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if usize::from(*digit) < ALPHABET.len() {
                return;
            }
            *digit = 0;
        }
        // Every position wrapped: move on to the next length.
        self.digits.push(0);
    }
}

impl Iterator for LetterCombinations {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let s = self
            .digits
            .iter()
            .map(|&d| char::from(ALPHABET[usize::from(d)]))
            .collect();
        self.advance();
        Some(s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LetterCombinations {}

impl core::iter::FusedIterator for LetterCombinations {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_five_are_single_letters() {
        let v: Vec<_> = generate(5).unwrap().collect();
        assert_eq!(v, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn rolls_over_to_longer_strings() {
        let v: Vec<_> = generate(26 + 26 * 26 + 2).unwrap().collect();
        assert_eq!(v[25], "z");
        assert_eq!(v[26], "aa");
        assert_eq!(v[27], "ab");
        assert_eq!(v[26 + 25], "az");
        assert_eq!(v[26 + 26], "ba");
        assert_eq!(v[26 + 26 * 26 - 1], "zz");
        assert_eq!(v[26 + 26 * 26], "aaa");
        assert_eq!(v[26 + 26 * 26 + 1], "aab");
    }

    #[test]
    fn no_repeats_and_sorted_within_length() {
        let v: Vec<_> = generate(2000).unwrap().collect();
        assert_eq!(v.len(), 2000);
        for w in v.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            assert!(a.len() < b.len() || (a.len() == b.len() && a < b), "{a} {b}");
        }
    }

    #[test]
    fn regenerating_is_deterministic() {
        let a: Vec<_> = generate(100).unwrap().collect();
        let b: Vec<_> = generate(100).unwrap().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn reports_exact_length() {
        let mut it = generate(3).unwrap();
        assert_eq!(it.len(), 3);
        it.next();
        assert_eq!(it.len(), 2);
        assert_eq!(it.by_ref().count(), 2);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn zero_is_rejected() {
        let err = generate(0).unwrap_err();
        assert_eq!(err.stage(), Stage::Generation);
        assert!(matches!(
            err,
            AnalysisError::InvalidArgument {
                name: "sample_size",
                ..
            }
        ));
    }
}
