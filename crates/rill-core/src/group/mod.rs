//! # Grouping Module
//!
//! Applies a fresh fold run to each of a sequence of sub-ranges ("groups")
//! of an input stream, yielding one output per group in streaming fashion.
//!
//! ## Boundary sources
//!
//! - [`chunks_of`]: a synthetic boundary every n-th element
//! - [`group_with`]: a caller-supplied splitter tags each element
//! - [`split_on`]: boundaries at occurrences of a literal delimiter
//!   subsequence, which may span underlying read chunks
//!
//! In every mode a boundary-tagged element *ends* its group and belongs to
//! it; the element after a boundary opens the next group. A stream that
//! ends mid-group still finishes and emits that trailing group — elements
//! are never silently dropped. Memory stays constant: exactly one fold
//! accumulator is live at a time, plus the delimiter matcher's bounded
//! match cursor.

mod delimiter;

pub use delimiter::SeqSplitter;


use crate::fold::Fold;
use tracing::trace;

/// Decides, per element, whether that element ends the current group.
///
/// Splitters observe elements by reference before they reach the fold and
/// may keep state of their own (counters, partial-match cursors).
pub trait Splitter<T> {
    /// Returns true if `item` is the last element of the current group.
    fn ends_group(&mut self, item: &T) -> bool;
}

/// Splitter producing a boundary on every n-th element.
#[derive(Debug, Clone)]
pub struct EveryN {
    n: usize,
    seen: usize,
}

impl EveryN {
    /// Creates a splitter that ends a group after every `n` elements.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "group size must be positive");
        Self { n, seen: 0 }
    }
}

impl<T> Splitter<T> for EveryN {
    fn ends_group(&mut self, _item: &T) -> bool {
        self.seen += 1;
        if self.seen == self.n {
            self.seen = 0;
            true
        } else {
            false
        }
    }
}

/// Splitter wrapping a caller-supplied predicate.
#[derive(Debug, Clone)]
pub struct SplitWith<P>(P);

impl<T, P> Splitter<T> for SplitWith<P>
where
    P: FnMut(&T) -> bool,
{
    fn ends_group(&mut self, item: &T) -> bool {
        (self.0)(item)
    }
}

// Group lifecycle: Idle -> Accumulating -> (emit, back to Idle) | Done.
// `Accumulating` is only entered once an element has been stepped, which is
// what guarantees a trailing group is emitted exactly when it is non-empty.
enum GroupState<A> {
    Idle,
    Accumulating(A),
    Done,
}

/// Streaming iterator of per-group fold outputs. See [`chunks_of`],
/// [`group_with`], and [`split_on`].
pub struct Groups<F: Fold, I, S> {
    fold: F,
    iter: I,
    splitter: S,
    state: GroupState<F::Acc>,
    groups_emitted: u64,
}

impl<F, I, S> Groups<F, I, S>
where
    F: Fold,
{
    fn new(fold: F, iter: I, splitter: S) -> Self {
        Self {
            fold,
            iter,
            splitter,
            state: GroupState::Idle,
            groups_emitted: 0,
        }
    }
}

impl<F, I, S> Iterator for Groups<F, I, S>
where
    F: Fold,
    I: Iterator<Item = F::Input>,
    S: Splitter<F::Input>,
{
    type Item = F::Output;

    fn next(&mut self) -> Option<F::Output> {
        loop {
            match self.iter.next() {
                Some(item) => {
                    let acc = match std::mem::replace(&mut self.state, GroupState::Idle) {
                        GroupState::Idle => self.fold.seed(),
                        GroupState::Accumulating(acc) => acc,
                        GroupState::Done => return None,
                    };
                    let ends = self.splitter.ends_group(&item);
                    let acc = self.fold.step(acc, item);
                    if ends {
                        self.groups_emitted += 1;
                        trace!(groups = self.groups_emitted, "group boundary");
                        return Some(self.fold.finish(acc));
                    }
                    self.state = GroupState::Accumulating(acc);
                }
                None => {
                    return match std::mem::replace(&mut self.state, GroupState::Done) {
                        GroupState::Accumulating(acc) => {
                            self.groups_emitted += 1;
                            trace!(groups = self.groups_emitted, "trailing group at end of input");
                            Some(self.fold.finish(acc))
                        }
                        GroupState::Idle | GroupState::Done => None,
                    };
                }
            }
        }
    }
}

/// Applies `fold` to consecutive chunks of `n` elements; a short final
/// chunk is still emitted.
///
/// For an input of length L this yields `ceil(L / n)` outputs, and the
/// inputs behind those outputs, concatenated, reconstruct the stream.
///
/// # Panics
///
/// Panics if `n` is zero.
///
/// # Example
///
/// ```rust
/// use rill_core::fold::stats::Length;
/// use rill_core::group::chunks_of;
///
/// let lens: Vec<u64> = chunks_of(2, Length::new(), [1, 2, 3, 4, 5]).collect();
/// assert_eq!(lens, [2, 2, 1]);
/// ```
pub fn chunks_of<F, I>(n: usize, fold: F, input: I) -> Groups<F, I::IntoIter, EveryN>
where
    F: Fold,
    I: IntoIterator<Item = F::Input>,
{
    Groups::new(fold, input.into_iter(), EveryN::new(n))
}

/// Applies `fold` to groups delimited by a caller-supplied splitter: an
/// element for which `splitter` returns true ends its group and belongs
/// to it.
pub fn group_with<F, I, P>(splitter: P, fold: F, input: I) -> Groups<F, I::IntoIter, SplitWith<P>>
where
    F: Fold,
    I: IntoIterator<Item = F::Input>,
    P: FnMut(&F::Input) -> bool,
{
    Groups::new(fold, input.into_iter(), SplitWith(splitter))
}

/// Applies `fold` to groups ending at each occurrence of the literal
/// `delimiter` subsequence; the delimiter is consumed as the suffix of the
/// group it closes.
///
/// Matching is per-element with bounded state, so a delimiter spanning
/// several underlying read chunks is still recognized. A partial match
/// pending at end of stream belongs to the final (unterminated) group, and
/// that group is emitted. An empty delimiter never matches: the whole
/// stream is one group.
///
/// # Example
///
/// ```rust
/// use rill_core::fold::stats::ToVec;
/// use rill_core::group::split_on;
///
/// let lines: Vec<Vec<u8>> = split_on(b"\n", ToVec::new(), b"ab\ncd\ne".iter().copied()).collect();
/// assert_eq!(lines, [b"ab\n".to_vec(), b"cd\n".to_vec(), b"e".to_vec()]);
/// ```
pub fn split_on<F, I>(
    delimiter: &[F::Input],
    fold: F,
    input: I,
) -> Groups<F, I::IntoIter, SeqSplitter<F::Input>>
where
    F: Fold,
    F::Input: Clone + PartialEq,
    I: IntoIterator<Item = F::Input>,
{
    Groups::new(fold, input.into_iter(), SeqSplitter::new(delimiter))
}
