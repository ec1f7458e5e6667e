//! Running-output views of a fold.
//!
//! A scan turns a fold into an iterator of intermediate outputs aligned
//! with the input stream, instead of a single terminal result. Snapshots
//! are taken by cloning the accumulator and finishing the clone, so the
//! underlying run stays live; no other buffering is added.

use super::Fold;

/// Iterator of running fold outputs. See [`scan`] and [`postscan`].
pub struct Scan<F: Fold, I> {
    fold: F,
    iter: I,
    // `None` once the input is exhausted.
    acc: Option<F::Acc>,
    emit_baseline: bool,
}

/// Emits `finish(acc)` after every step, starting with the freshly seeded
/// accumulator's output as element 0 (the pre-step baseline).
///
/// For an input of k elements the scan yields k + 1 outputs.
///
/// # Example
///
/// ```rust
/// use rill_core::fold::{scan::scan, stats::Sum};
///
/// let running: Vec<i64> = scan(Sum::new(), [1i64, 2, 3]).collect();
/// assert_eq!(running, [0, 1, 3, 6]);
/// ```
pub fn scan<F, I>(fold: F, input: I) -> Scan<F, I::IntoIter>
where
    F: Fold,
    F::Acc: Clone,
    I: IntoIterator<Item = F::Input>,
{
    Scan::new(fold, input, true)
}

/// Like [`scan`] but omits the pre-step baseline: the first output is
/// produced after the first step, so k inputs yield k outputs.
pub fn postscan<F, I>(fold: F, input: I) -> Scan<F, I::IntoIter>
where
    F: Fold,
    F::Acc: Clone,
    I: IntoIterator<Item = F::Input>,
{
    Scan::new(fold, input, false)
}

impl<F, I> Scan<F, I>
where
    F: Fold,
{
    fn new<It>(mut fold: F, input: It, emit_baseline: bool) -> Self
    where
        It: IntoIterator<Item = F::Input, IntoIter = I>,
    {
        let acc = fold.seed();
        Self {
            fold,
            iter: input.into_iter(),
            acc: Some(acc),
            emit_baseline,
        }
    }
}

impl<F, I> Iterator for Scan<F, I>
where
    F: Fold,
    F::Acc: Clone,
    I: Iterator<Item = F::Input>,
{
    type Item = F::Output;

    fn next(&mut self) -> Option<F::Output> {
        let acc = self.acc.take()?;

        if self.emit_baseline {
            self.emit_baseline = false;
            self.acc = Some(acc.clone());
            return Some(self.fold.finish(acc));
        }

        match self.iter.next() {
            Some(item) => {
                let acc = self.fold.step(acc, item);
                self.acc = Some(acc.clone());
                Some(self.fold.finish(acc))
            }
            None => None,
        }
    }
}
