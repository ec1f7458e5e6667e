//! Streaming delimiter-subsequence matching.
//!
//! Standard streaming substring search: a precomputed failure table plus a
//! single match-position cursor. State is bounded by the delimiter length
//! regardless of how the input arrives, so delimiters spanning chunk
//! boundaries cost nothing extra.

use super::Splitter;
use smallvec::SmallVec;

// Failure tables are delimiter-sized; delimiters are typically a few
// elements (newlines, CRLF, short sentinels).
type FailureTable = SmallVec<[usize; 8]>;

/// [`Splitter`] matching a literal delimiter subsequence.
///
/// `ends_group` returns true on the element completing an occurrence of
/// the delimiter. On a mismatch the cursor falls back along the
/// delimiter's self-overlap (failure function), so overlapping partial
/// occurrences are never missed.
#[derive(Debug, Clone)]
pub struct SeqSplitter<T> {
    pattern: Box<[T]>,
    failure: FailureTable,
    pos: usize,
}

impl<T: Clone + PartialEq> SeqSplitter<T> {
    /// Creates a splitter for `delimiter`, precomputing its failure table.
    #[must_use]
    pub fn new(delimiter: &[T]) -> Self {
        Self {
            pattern: delimiter.to_vec().into_boxed_slice(),
            failure: failure_table(delimiter),
            pos: 0,
        }
    }

    /// Length of the delimiter being matched.
    #[must_use]
    pub fn delimiter_len(&self) -> usize {
        self.pattern.len()
    }
}

impl<T: PartialEq> Splitter<T> for SeqSplitter<T> {
    fn ends_group(&mut self, item: &T) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        while self.pos > 0 && *item != self.pattern[self.pos] {
            self.pos = self.failure[self.pos - 1];
        }
        if *item == self.pattern[self.pos] {
            self.pos += 1;
        }
        if self.pos == self.pattern.len() {
            self.pos = 0;
            true
        } else {
            false
        }
    }
}

// failure[i] = length of the longest proper prefix of pattern[..=i] that is
// also a suffix of it.
fn failure_table<T: PartialEq>(pattern: &[T]) -> FailureTable {
    let mut failure: FailureTable = SmallVec::new();
    failure.resize(pattern.len(), 0);
    let mut k = 0;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = failure[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        failure[i] = k;
    }
    failure
}
