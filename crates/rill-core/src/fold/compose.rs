//! Fold composition operators.
//!
//! Each operator is a small adapter struct implementing [`Fold`], with a
//! free-function constructor. Composite accumulators are tuples (or vectors)
//! of the constituents' accumulators, built strictly at every step.

use super::Fold;
use std::marker::PhantomData;

/// A two-way choice produced by a [`partition_by`] classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch<L, R> {
    /// Route the carried value to the left fold.
    Left(L),
    /// Route the carried value to the right fold.
    Right(R),
}

/// A fold built from three closures. See [`fold_with`].
///
/// The trailing type parameter pins the input element type, which the
/// closure bounds alone cannot determine.
#[derive(Debug, Clone)]
pub struct FnFold<Seed, Step, Fin, I> {
    seed: Seed,
    step: Step,
    finish: Fin,
    _input: PhantomData<fn(I)>,
}

/// Builds a fold from `seed`, `step`, and `finish` closures.
///
/// The closures are `FnMut`, so effectful folds (counters, stateful
/// extractors) need no separate constructor.
///
/// # Example
///
/// ```rust
/// use rill_core::fold::{self, fold_with};
///
/// let count_evens = fold_with(|| 0u64, |n, x: i64| n + u64::from(x % 2 == 0), |n| n);
/// assert_eq!(fold::run(count_evens, [1, 2, 3, 4]), 2);
/// ```
pub fn fold_with<A, I, O, Seed, Step, Fin>(
    seed: Seed,
    step: Step,
    finish: Fin,
) -> FnFold<Seed, Step, Fin, I>
where
    Seed: FnMut() -> A,
    Step: FnMut(A, I) -> A,
    Fin: FnMut(A) -> O,
{
    FnFold {
        seed,
        step,
        finish,
        _input: PhantomData,
    }
}

impl<A, I, O, Seed, Step, Fin> Fold for FnFold<Seed, Step, Fin, I>
where
    Seed: FnMut() -> A,
    Step: FnMut(A, I) -> A,
    Fin: FnMut(A) -> O,
{
    type Input = I;
    type Acc = A;
    type Output = O;

    fn seed(&mut self) -> A {
        (self.seed)()
    }

    fn step(&mut self, acc: A, item: I) -> A {
        (self.step)(acc, item)
    }

    fn finish(&mut self, acc: A) -> O {
        (self.finish)(acc)
    }
}

/// Runs two folds over the same input. See [`tee`].
#[derive(Debug, Clone)]
pub struct Tee<F1, F2> {
    left: F1,
    right: F2,
}

/// Pairs two folds: both see every element exactly once, in order, and the
/// output is the pair of both results.
pub fn tee<F1, F2>(left: F1, right: F2) -> Tee<F1, F2>
where
    F1: Fold,
    F2: Fold<Input = F1::Input>,
    F1::Input: Clone,
{
    Tee { left, right }
}

impl<F1, F2> Fold for Tee<F1, F2>
where
    F1: Fold,
    F2: Fold<Input = F1::Input>,
    F1::Input: Clone,
{
    type Input = F1::Input;
    type Acc = (F1::Acc, F2::Acc);
    type Output = (F1::Output, F2::Output);

    fn seed(&mut self) -> Self::Acc {
        (self.left.seed(), self.right.seed())
    }

    fn step(&mut self, (a, b): Self::Acc, item: Self::Input) -> Self::Acc {
        let a = self.left.step(a, item.clone());
        let b = self.right.step(b, item);
        (a, b)
    }

    fn finish(&mut self, (a, b): Self::Acc) -> Self::Output {
        (self.left.finish(a), self.right.finish(b))
    }
}

/// Runs N folds of one shape over the same input. See [`distribute`].
#[derive(Debug, Clone)]
pub struct Distribute<F> {
    folds: Vec<F>,
}

/// Generalizes [`tee`] to a list of folds, producing outputs in list order.
///
/// An empty list yields a fold whose output is always the empty vector.
pub fn distribute<F>(folds: Vec<F>) -> Distribute<F>
where
    F: Fold,
    F::Input: Clone,
{
    Distribute { folds }
}

impl<F> Fold for Distribute<F>
where
    F: Fold,
    F::Input: Clone,
{
    type Input = F::Input;
    type Acc = Vec<F::Acc>;
    type Output = Vec<F::Output>;

    fn seed(&mut self) -> Self::Acc {
        self.folds.iter_mut().map(Fold::seed).collect()
    }

    fn step(&mut self, accs: Self::Acc, item: Self::Input) -> Self::Acc {
        self.folds
            .iter_mut()
            .zip(accs)
            .map(|(fold, acc)| fold.step(acc, item.clone()))
            .collect()
    }

    fn finish(&mut self, accs: Self::Acc) -> Self::Output {
        self.folds
            .iter_mut()
            .zip(accs)
            .map(|(fold, acc)| fold.finish(acc))
            .collect()
    }
}

/// Routes each element to one of two folds. See [`partition_by`].
#[derive(Debug, Clone)]
pub struct PartitionBy<C, F1, F2, I> {
    classify: C,
    left: F1,
    right: F2,
    _input: PhantomData<fn(I)>,
}

/// Classifies each element into a [`Branch`] and updates only the chosen
/// fold's accumulator; the output pairs both results.
///
/// The classifier is `FnMut`, so dynamic policies (round-robin, sampling)
/// can keep state of their own.
pub fn partition_by<C, I, L, R, F1, F2>(
    classify: C,
    left: F1,
    right: F2,
) -> PartitionBy<C, F1, F2, I>
where
    C: FnMut(I) -> Branch<L, R>,
    F1: Fold<Input = L>,
    F2: Fold<Input = R>,
{
    PartitionBy {
        classify,
        left,
        right,
        _input: PhantomData,
    }
}

impl<C, I, L, R, F1, F2> Fold for PartitionBy<C, F1, F2, I>
where
    C: FnMut(I) -> Branch<L, R>,
    F1: Fold<Input = L>,
    F2: Fold<Input = R>,
{
    type Input = I;
    type Acc = (F1::Acc, F2::Acc);
    type Output = (F1::Output, F2::Output);

    fn seed(&mut self) -> Self::Acc {
        (self.left.seed(), self.right.seed())
    }

    fn step(&mut self, (a, b): Self::Acc, item: I) -> Self::Acc {
        match (self.classify)(item) {
            Branch::Left(l) => (self.left.step(a, l), b),
            Branch::Right(r) => (a, self.right.step(b, r)),
        }
    }

    fn finish(&mut self, (a, b): Self::Acc) -> Self::Output {
        (self.left.finish(a), self.right.finish(b))
    }
}

/// Decomposes each element and feeds both parts. See [`unzip_with`].
#[derive(Debug, Clone)]
pub struct UnzipWith<S, F1, F2, I> {
    split: S,
    left: F1,
    right: F2,
    _input: PhantomData<fn(I)>,
}

/// Splits every element into two parts, each part feeding its own fold every
/// step; the output pairs both results.
pub fn unzip_with<S, I, L, R, F1, F2>(split: S, left: F1, right: F2) -> UnzipWith<S, F1, F2, I>
where
    S: FnMut(I) -> (L, R),
    F1: Fold<Input = L>,
    F2: Fold<Input = R>,
{
    UnzipWith {
        split,
        left,
        right,
        _input: PhantomData,
    }
}

impl<S, I, L, R, F1, F2> Fold for UnzipWith<S, F1, F2, I>
where
    S: FnMut(I) -> (L, R),
    F1: Fold<Input = L>,
    F2: Fold<Input = R>,
{
    type Input = I;
    type Acc = (F1::Acc, F2::Acc);
    type Output = (F1::Output, F2::Output);

    fn seed(&mut self) -> Self::Acc {
        (self.left.seed(), self.right.seed())
    }

    fn step(&mut self, (a, b): Self::Acc, item: I) -> Self::Acc {
        let (l, r) = (self.split)(item);
        (self.left.step(a, l), self.right.step(b, r))
    }

    fn finish(&mut self, (a, b): Self::Acc) -> Self::Output {
        (self.left.finish(a), self.right.finish(b))
    }
}

/// A fold whose output is a resumable continuation. See [`duplicate`].
#[derive(Debug, Clone)]
pub struct Duplicate<F> {
    inner: F,
}

/// Turns `fold` into a fold that, on finish, yields a *new* fold seeded
/// with the accumulator as it stood — a frozen continuation.
///
/// Feeding the resumed fold the remainder of the input is observationally
/// identical to one uninterrupted run, so chunks that arrive separately
/// (e.g. network reads) can be folded without replaying prior input.
pub fn duplicate<F>(fold: F) -> Duplicate<F>
where
    F: Fold + Clone,
    F::Acc: Clone,
{
    Duplicate { inner: fold }
}

impl<F> Fold for Duplicate<F>
where
    F: Fold + Clone,
    F::Acc: Clone,
{
    type Input = F::Input;
    type Acc = F::Acc;
    type Output = Resumed<F>;

    fn seed(&mut self) -> Self::Acc {
        self.inner.seed()
    }

    fn step(&mut self, acc: Self::Acc, item: Self::Input) -> Self::Acc {
        self.inner.step(acc, item)
    }

    fn finish(&mut self, acc: Self::Acc) -> Resumed<F> {
        Resumed {
            inner: self.inner.clone(),
            snapshot: acc,
        }
    }
}

/// A fold resumed from a captured accumulator snapshot.
///
/// `seed` yields the snapshot, so every run continues from exactly where
/// the originating [`duplicate`] run left off.
pub struct Resumed<F: Fold> {
    inner: F,
    snapshot: F::Acc,
}

impl<F> Clone for Resumed<F>
where
    F: Fold + Clone,
    F::Acc: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<F> Fold for Resumed<F>
where
    F: Fold,
    F::Acc: Clone,
{
    type Input = F::Input;
    type Acc = F::Acc;
    type Output = F::Output;

    fn seed(&mut self) -> Self::Acc {
        self.snapshot.clone()
    }

    fn step(&mut self, acc: Self::Acc, item: Self::Input) -> Self::Acc {
        self.inner.step(acc, item)
    }

    fn finish(&mut self, acc: Self::Acc) -> Self::Output {
        self.inner.finish(acc)
    }
}

/// Transforms elements before they reach a fold. See [`lmap`].
#[derive(Debug, Clone)]
pub struct Lmap<M, F, I> {
    map: M,
    inner: F,
    _input: PhantomData<fn(I)>,
}

/// Maps every element through `map` before the underlying fold's step;
/// `seed` and `finish` pass through untouched.
pub fn lmap<M, I, F>(map: M, fold: F) -> Lmap<M, F, I>
where
    F: Fold,
    M: FnMut(I) -> F::Input,
{
    Lmap {
        map,
        inner: fold,
        _input: PhantomData,
    }
}

impl<M, I, F> Fold for Lmap<M, F, I>
where
    F: Fold,
    M: FnMut(I) -> F::Input,
{
    type Input = I;
    type Acc = F::Acc;
    type Output = F::Output;

    fn seed(&mut self) -> Self::Acc {
        self.inner.seed()
    }

    fn step(&mut self, acc: Self::Acc, item: I) -> Self::Acc {
        let mapped = (self.map)(item);
        self.inner.step(acc, mapped)
    }

    fn finish(&mut self, acc: Self::Acc) -> Self::Output {
        self.inner.finish(acc)
    }
}

/// Skips elements failing a predicate. See [`lfilter`].
#[derive(Debug, Clone)]
pub struct Lfilter<P, F> {
    pred: P,
    inner: F,
}

/// Feeds only elements satisfying `pred` to the underlying fold; `seed`
/// and `finish` pass through untouched.
pub fn lfilter<P, F>(pred: P, fold: F) -> Lfilter<P, F>
where
    F: Fold,
    P: FnMut(&F::Input) -> bool,
{
    Lfilter { pred, inner: fold }
}

impl<P, F> Fold for Lfilter<P, F>
where
    F: Fold,
    P: FnMut(&F::Input) -> bool,
{
    type Input = F::Input;
    type Acc = F::Acc;
    type Output = F::Output;

    fn seed(&mut self) -> Self::Acc {
        self.inner.seed()
    }

    fn step(&mut self, acc: Self::Acc, item: Self::Input) -> Self::Acc {
        if (self.pred)(&item) {
            self.inner.step(acc, item)
        } else {
            acc
        }
    }

    fn finish(&mut self, acc: Self::Acc) -> Self::Output {
        self.inner.finish(acc)
    }
}
