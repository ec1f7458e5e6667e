//! # Fold Module
//!
//! Incremental reducers: a [`Fold`] consumes input elements one at a time,
//! maintains a private running accumulator, and produces its output on
//! demand.
//!
//! ## Composition
//!
//! Folds compose without exposing their accumulator types:
//!
//! - [`tee`]: run two folds over the same input, output both results
//! - [`distribute`]: run N folds of one shape over the same input
//! - [`partition_by`]: route each element to one of two folds
//! - [`unzip_with`]: decompose each element, feed both parts
//! - [`duplicate`]: freeze a run into a fold that resumes where it left off
//! - [`lmap`] / [`lfilter`]: transform or skip elements on the input side
//!
//! The accumulator is an associated type: generic code is written against
//! `Fold<Input = I, Output = O>` and never names `Acc`, so folds with
//! structurally different state compose uniformly.
//!
//! ## Lifecycle
//!
//! A run is one `seed`, zero or more `step` calls in input order, and
//! exactly one `finish`. `step` threads the accumulator by value and must
//! fully compute its result before returning; a fresh run requires a fresh
//! `seed`.

mod compose;
pub mod scan;
pub mod stats;

pub use compose::{
    distribute, duplicate, fold_with, lfilter, lmap, partition_by, tee, unzip_with, Branch,
    Distribute, Duplicate, FnFold, Lfilter, Lmap, PartitionBy, Resumed, Tee, UnzipWith,
};

#[cfg(test)]
mod tests;

/// An incremental reducer over a hidden accumulator.
///
/// Receivers are `&mut self` so that folds built from stateful closures
/// (round-robin classifiers, effectful extractors) fit the same trait.
pub trait Fold {
    /// The element type consumed by this fold.
    type Input;
    /// The private accumulator threaded through `step`.
    type Acc;
    /// The result type produced by `finish`.
    type Output;

    /// Produces a fresh accumulator, beginning a run.
    fn seed(&mut self) -> Self::Acc;

    /// Consumes one element, producing the next accumulator.
    ///
    /// The accumulator moves in and out by value; implementations must
    /// compute the result strictly (no deferred work).
    fn step(&mut self, acc: Self::Acc, item: Self::Input) -> Self::Acc;

    /// Consumes the accumulator, producing the run's output.
    fn finish(&mut self, acc: Self::Acc) -> Self::Output;
}

/// Drives a complete fold run over an iterator, returning the output.
///
/// # Example
///
/// ```rust
/// use rill_core::fold::{self, stats::Length};
///
/// assert_eq!(fold::run(Length::new(), "abc".bytes()), 3);
/// ```
pub fn run<F, I>(mut fold: F, input: I) -> F::Output
where
    F: Fold,
    I: IntoIterator<Item = F::Input>,
{
    let mut acc = fold.seed();
    for item in input {
        acc = fold.step(acc, item);
    }
    fold.finish(acc)
}

/// An in-progress fold run that accepts elements incrementally.
///
/// Holds the fold together with its live accumulator, for callers that
/// receive input in separately-arriving pieces rather than as one iterator.
/// Finishing re-seeds, so a driver can be reused across logical runs.
pub struct Driver<F: Fold> {
    fold: F,
    // Always `Some` between method calls; `Option` only to move the
    // accumulator out during `step`/`finish`.
    acc: Option<F::Acc>,
}

impl<F: Fold> Driver<F> {
    /// Seeds a new run of `fold`.
    pub fn new(mut fold: F) -> Self {
        let acc = fold.seed();
        Self {
            fold,
            acc: Some(acc),
        }
    }

    /// Feeds one element into the run.
    pub fn push(&mut self, item: F::Input) {
        let acc = self.acc.take().expect("driver accumulator missing");
        self.acc = Some(self.fold.step(acc, item));
    }

    /// Feeds every element of `input` into the run, in order.
    pub fn extend<I>(&mut self, input: I)
    where
        I: IntoIterator<Item = F::Input>,
    {
        for item in input {
            self.push(item);
        }
    }

    /// Finishes the current run and seeds the next one.
    pub fn finish(&mut self) -> F::Output {
        let acc = self.acc.take().expect("driver accumulator missing");
        let out = self.fold.finish(acc);
        self.acc = Some(self.fold.seed());
        out
    }

    /// Observes the current output without ending the run.
    ///
    /// Clones the accumulator snapshot and finishes the clone, leaving the
    /// run untouched.
    pub fn snapshot(&mut self) -> F::Output
    where
        F::Acc: Clone,
    {
        let acc = self
            .acc
            .clone()
            .expect("driver accumulator missing");
        self.fold.finish(acc)
    }
}
