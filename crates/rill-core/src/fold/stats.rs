//! Terminal folds: counts, sums, extrema, and single-pass statistics.
//!
//! `Mean`, `Variance`, and `StdDev` use numerically stable single-pass
//! recurrences (Welford), not naive sum / sum-of-squares, which lose
//! precision and can overflow.

use super::Fold;
use std::marker::PhantomData;
use std::ops::{Add, Mul};

/// Sums all elements. The sum of an empty input is `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct Sum<T> {
    _elem: PhantomData<fn(T)>,
}

impl<T> Sum<T> {
    /// Creates a sum fold.
    #[must_use]
    pub fn new() -> Self {
        Self { _elem: PhantomData }
    }
}

impl<T> Fold for Sum<T>
where
    T: Copy + Default + Add<Output = T>,
{
    type Input = T;
    type Acc = T;
    type Output = T;

    fn seed(&mut self) -> T {
        T::default()
    }

    fn step(&mut self, acc: T, item: T) -> T {
        acc + item
    }

    fn finish(&mut self, acc: T) -> T {
        acc
    }
}

/// Counts elements.
#[derive(Debug, Clone, Default)]
pub struct Length<T> {
    _elem: PhantomData<fn(T)>,
}

impl<T> Length<T> {
    /// Creates a length fold.
    #[must_use]
    pub fn new() -> Self {
        Self { _elem: PhantomData }
    }
}

impl<T> Fold for Length<T> {
    type Input = T;
    type Acc = u64;
    type Output = u64;

    fn seed(&mut self) -> u64 {
        0
    }

    fn step(&mut self, acc: u64, _item: T) -> u64 {
        acc + 1
    }

    fn finish(&mut self, acc: u64) -> u64 {
        acc
    }
}

/// Multiplies all elements. The product of an empty input is one.
#[derive(Debug, Clone, Default)]
pub struct Product<T> {
    _elem: PhantomData<fn(T)>,
}

impl<T> Product<T> {
    /// Creates a product fold.
    #[must_use]
    pub fn new() -> Self {
        Self { _elem: PhantomData }
    }
}

impl<T> Fold for Product<T>
where
    T: Copy + Mul<Output = T> + From<u8>,
{
    type Input = T;
    type Acc = T;
    type Output = T;

    fn seed(&mut self) -> T {
        T::from(1)
    }

    fn step(&mut self, acc: T, item: T) -> T {
        acc * item
    }

    fn finish(&mut self, acc: T) -> T {
        acc
    }
}

/// Tracks the smallest element seen; `None` for an empty input.
#[derive(Debug, Clone, Default)]
pub struct Minimum<T> {
    _elem: PhantomData<fn(T)>,
}

impl<T> Minimum<T> {
    /// Creates a minimum fold.
    #[must_use]
    pub fn new() -> Self {
        Self { _elem: PhantomData }
    }
}

impl<T> Fold for Minimum<T>
where
    T: Copy + PartialOrd,
{
    type Input = T;
    type Acc = Option<T>;
    type Output = Option<T>;

    fn seed(&mut self) -> Option<T> {
        None
    }

    fn step(&mut self, acc: Option<T>, item: T) -> Option<T> {
        match acc {
            Some(min) if min <= item => Some(min),
            _ => Some(item),
        }
    }

    fn finish(&mut self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/// Tracks the largest element seen; `None` for an empty input.
#[derive(Debug, Clone, Default)]
pub struct Maximum<T> {
    _elem: PhantomData<fn(T)>,
}

impl<T> Maximum<T> {
    /// Creates a maximum fold.
    #[must_use]
    pub fn new() -> Self {
        Self { _elem: PhantomData }
    }
}

impl<T> Fold for Maximum<T>
where
    T: Copy + PartialOrd,
{
    type Input = T;
    type Acc = Option<T>;
    type Output = Option<T>;

    fn seed(&mut self) -> Option<T> {
        None
    }

    fn step(&mut self, acc: Option<T>, item: T) -> Option<T> {
        match acc {
            Some(max) if max >= item => Some(max),
            _ => Some(item),
        }
    }

    fn finish(&mut self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/// Running-mean accumulator: count plus current mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanState {
    /// Number of values folded so far.
    pub count: u64,
    /// Current mean of those values.
    pub mean: f64,
}

/// Arithmetic mean via the incremental recurrence
/// `mean' = mean + (x - mean) / (n + 1)`.
///
/// The mean of an empty input is NaN.
#[derive(Debug, Clone, Default)]
pub struct Mean;

impl Mean {
    /// Creates a mean fold.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Fold for Mean {
    type Input = f64;
    type Acc = MeanState;
    type Output = f64;

    fn seed(&mut self) -> MeanState {
        MeanState::default()
    }

    #[allow(clippy::cast_precision_loss)]
    fn step(&mut self, acc: MeanState, x: f64) -> MeanState {
        let count = acc.count + 1;
        MeanState {
            count,
            mean: acc.mean + (x - acc.mean) / count as f64,
        }
    }

    fn finish(&mut self, acc: MeanState) -> f64 {
        if acc.count == 0 {
            f64::NAN
        } else {
            acc.mean
        }
    }
}

/// Welford accumulator: count, mean, and sum of squared deviations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VarianceState {
    /// Number of values folded so far.
    pub count: u64,
    /// Current mean of those values.
    pub mean: f64,
    /// Sum of squared deviations from the running mean (M2).
    pub m2: f64,
}

impl VarianceState {
    #[allow(clippy::cast_precision_loss)]
    fn update(self, x: f64) -> Self {
        let n = self.count as f64;
        let delta = x - self.mean;
        Self {
            count: self.count + 1,
            mean: self.mean + delta / (n + 1.0),
            m2: self.m2 + delta * delta * n / (n + 1.0),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn variance(self) -> f64 {
        // Population variance M2 / n; NaN for an empty input.
        self.m2 / self.count as f64
    }
}

/// Population variance via Welford's single-pass recurrence.
///
/// For each value `x` with running count `n`:
/// `mean' = (n * mean + x) / (n + 1)` and
/// `M2' = M2 + (x - mean)^2 * n / (n + 1)`; the final variance is `M2 / n`.
/// The variance of an empty input is NaN.
#[derive(Debug, Clone, Default)]
pub struct Variance;

impl Variance {
    /// Creates a variance fold.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Fold for Variance {
    type Input = f64;
    type Acc = VarianceState;
    type Output = f64;

    fn seed(&mut self) -> VarianceState {
        VarianceState::default()
    }

    fn step(&mut self, acc: VarianceState, x: f64) -> VarianceState {
        acc.update(x)
    }

    fn finish(&mut self, acc: VarianceState) -> f64 {
        acc.variance()
    }
}

/// Population standard deviation: the square root of [`Variance`].
#[derive(Debug, Clone, Default)]
pub struct StdDev;

impl StdDev {
    /// Creates a standard-deviation fold.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Fold for StdDev {
    type Input = f64;
    type Acc = VarianceState;
    type Output = f64;

    fn seed(&mut self) -> VarianceState {
        VarianceState::default()
    }

    fn step(&mut self, acc: VarianceState, x: f64) -> VarianceState {
        acc.update(x)
    }

    fn finish(&mut self, acc: VarianceState) -> f64 {
        acc.variance().sqrt()
    }
}

/// Collects every element into a `Vec`, in input order.
#[derive(Debug, Clone, Default)]
pub struct ToVec<T> {
    _elem: PhantomData<fn(T)>,
}

impl<T> ToVec<T> {
    /// Creates a collecting fold.
    #[must_use]
    pub fn new() -> Self {
        Self { _elem: PhantomData }
    }
}

impl<T> Fold for ToVec<T> {
    type Input = T;
    type Acc = Vec<T>;
    type Output = Vec<T>;

    fn seed(&mut self) -> Vec<T> {
        Vec::new()
    }

    fn step(&mut self, mut acc: Vec<T>, item: T) -> Vec<T> {
        acc.push(item);
        acc
    }

    fn finish(&mut self, acc: Vec<T>) -> Vec<T> {
        acc
    }
}
