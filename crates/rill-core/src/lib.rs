//! # Rill Core
//!
//! The streaming data-reduction core: incremental folds that consume a
//! sequence one element at a time and produce a result on demand, without
//! ever materializing the whole input.
//!
//! This crate provides:
//! - **Folds**: the [`Fold`] abstraction (seed, step, finish over a hidden
//!   accumulator) and its composition operators (tee, distribute, partition,
//!   unzip, resumable duplicate, input-side map/filter)
//! - **Scans**: running-output views of a fold, aligned with the input stream
//! - **Grouping**: one fold result per sub-range of a stream — fixed-size
//!   chunks, caller-tagged boundaries, or delimiter subsequences that may
//!   span chunk boundaries
//! - **Arrays**: a fixed-capacity contiguous buffer used as an accumulation
//!   target and as the unit of chunked handle I/O
//!
//! ## Design Principles
//!
//! 1. **Constant memory** - one live accumulator per run, bounded lookback
//!    for delimiter matching
//! 2. **Strict state threading** - accumulators move through `step` by
//!    value; no aliasing
//! 3. **Sequential by construction** - no task spawning; blocking only at
//!    the I/O boundary
//!
//! ## Example
//!
//! ```rust
//! use rill_core::fold::{self, stats::Sum};
//!
//! let total: i64 = fold::run(Sum::new(), [1i64, 2, 3, 4]);
//! assert_eq!(total, 10);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)] // Selectively allowed in `array` with SAFETY comments
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod array;
pub mod fold;
pub mod group;

// Re-export key types
pub use array::Array;
pub use fold::{run, Driver, Fold};

/// Result type for rill-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for rill-core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Array buffer errors
    #[error("Array error: {0}")]
    Array(#[from] array::ArrayError),

    /// I/O errors from chunked handle reads/writes
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
