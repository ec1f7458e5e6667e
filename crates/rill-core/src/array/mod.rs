//! # Array Module
//!
//! A fixed-capacity contiguous buffer with manually tracked bounds: one
//! allocation, a valid-data length, and a capacity fixed at creation. Used
//! as an efficient accumulation target for folds ([`to_array`]) and as the
//! zero-copy unit of chunked handle I/O ([`io`]).
//!
//! ## Capacity policy
//!
//! Three append entry points with distinct contracts:
//!
//! - [`Array::push`] asserts on overflow (fail fast, never corrupts)
//! - [`Array::try_push`] reports overflow as [`ArrayError::CapacityExceeded`]
//! - [`Array::push_unchecked`] is the `unsafe` fast path for call sites
//!   that prove capacity ahead of time
//!
//! ## Ownership
//!
//! An array is exclusively owned by whoever holds the value; appends mutate
//! in place and the allocation is released on drop. No internal
//! synchronization is provided — move it, don't share it.

// Manual allocation below; every unsafe block carries a SAFETY comment.
#![allow(unsafe_code)]

pub mod io;

use crate::fold::Fold;
use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// Errors reported by the checked array paths.
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// An append would exceed the array's fixed capacity.
    #[error("array capacity exceeded: capacity {cap}")]
    CapacityExceeded {
        /// The array's fixed capacity.
        cap: usize,
    },
}

/// A fixed-capacity contiguous buffer.
///
/// Invariant: `len <= cap`, the first `len` slots are initialized, and
/// `ptr` is either a live allocation of `cap` elements or dangling when no
/// allocation exists (zero capacity or zero-sized `T`).
pub struct Array<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    _own: PhantomData<T>,
}

// SAFETY: Array owns its elements exclusively; it is Send/Sync exactly when
// a Vec<T> would be.
unsafe impl<T: Send> Send for Array<T> {}
// SAFETY: shared access is read-only through &Array.
unsafe impl<T: Sync> Sync for Array<T> {}

impl<T> Array<T> {
    /// The zero-capacity array: no allocation, nothing to release.
    #[must_use]
    pub const fn nil() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            _own: PhantomData,
        }
    }

    /// Allocates an empty array of exactly `cap` elements.
    ///
    /// # Panics
    ///
    /// Panics if the layout size overflows `isize`; aborts on allocation
    /// failure.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        if cap == 0 || std::mem::size_of::<T>() == 0 {
            let mut array = Self::nil();
            array.cap = cap;
            return array;
        }
        let layout = Layout::array::<T>(cap).expect("array layout overflows isize");
        // SAFETY: layout has nonzero size (cap > 0 and T is not a ZST).
        let raw = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            alloc::handle_alloc_error(layout)
        };
        Self {
            ptr,
            len: 0,
            cap,
            _own: PhantomData,
        }
    }

    /// Allocates a one-element array holding `value`.
    #[must_use]
    pub fn singleton(value: T) -> Self {
        let mut array = Self::with_capacity(1);
        // SAFETY: len (0) < cap (1).
        unsafe { array.push_unchecked(value) };
        array
    }

    /// Allocates an array sized exactly to `values` and moves every element
    /// in. One allocation total.
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        let mut array = Self::with_capacity(values.len());
        for value in values {
            // SAFETY: capacity was sized to the vector's length.
            unsafe { array.push_unchecked(value) };
        }
        array
    }

    /// Number of initialized elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no elements are initialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The fixed capacity chosen at creation.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Appends `value`, panicking if the array is full.
    ///
    /// # Panics
    ///
    /// Panics if `len == capacity` (fail-fast alternative to the unchecked
    /// path; memory is never corrupted).
    pub fn push(&mut self, value: T) {
        assert!(
            self.len < self.cap,
            "array capacity exceeded: capacity {}",
            self.cap
        );
        // SAFETY: just checked len < cap.
        unsafe { self.push_unchecked(value) };
    }

    /// Appends `value`, reporting overflow instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::CapacityExceeded`] (and gives `value` back)
    /// if the array is full.
    pub fn try_push(&mut self, value: T) -> Result<(), (T, ArrayError)> {
        if self.len < self.cap {
            // SAFETY: just checked len < cap.
            unsafe { self.push_unchecked(value) };
            Ok(())
        } else {
            Err((value, ArrayError::CapacityExceeded { cap: self.cap }))
        }
    }

    /// Appends `value` without a capacity check.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `len < capacity`; violating this writes
    /// past the allocation.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.cap);
        // SAFETY: caller guarantees len < cap, so the slot is in bounds and
        // uninitialized.
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Sets the initialized length directly.
    ///
    /// # Safety
    ///
    /// `len` must not exceed the capacity and the first `len` elements must
    /// be initialized. Shrinking leaks the truncated elements' drops until
    /// the array itself drops its allocation; only used by the I/O layer
    /// over `u8`.
    pub unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.cap);
        self.len = len;
    }

    /// The valid elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first len elements are initialized and in bounds.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The valid elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: exclusive borrow; the first len elements are initialized.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Raw pointer to the allocation start.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Copies the valid elements into a fresh `Vec`, in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }
}

impl<T: Copy> Array<T> {
    /// Allocates an array sized exactly to `values` and bulk-copies them.
    #[must_use]
    pub fn from_slice(values: &[T]) -> Self {
        let mut array = Self::with_capacity(values.len());
        if !values.is_empty() {
            // SAFETY: destination has exactly values.len() capacity and the
            // ranges cannot overlap (fresh allocation).
            unsafe {
                std::ptr::copy_nonoverlapping(values.as_ptr(), array.ptr.as_ptr(), values.len());
                array.set_len(values.len());
            }
        }
        array
    }
}

impl Array<u8> {
    /// Allocates a zero-filled byte array of capacity `cap` with `len == 0`.
    ///
    /// The whole region is initialized, so the I/O layer can hand the spare
    /// capacity to a reader and then [`set_len`](Self::set_len) to the
    /// number of bytes actually read.
    #[must_use]
    pub fn with_capacity_zeroed(cap: usize) -> Self {
        if cap == 0 {
            return Self::nil();
        }
        let layout = Layout::array::<u8>(cap).expect("array layout overflows isize");
        // SAFETY: layout has nonzero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout)
        };
        Self {
            ptr,
            len: 0,
            cap,
            _own: PhantomData,
        }
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        // SAFETY: the first len elements are initialized and exclusively
        // owned.
        unsafe { std::ptr::drop_in_place(self.as_mut_slice()) };
        if self.cap > 0 && std::mem::size_of::<T>() > 0 {
            let layout = Layout::array::<T>(self.cap).expect("array layout overflows isize");
            // SAFETY: ptr was allocated with exactly this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::nil()
    }
}

impl<T: Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        let mut array = Self::with_capacity(self.cap);
        for value in self.as_slice() {
            // SAFETY: the clone's capacity equals ours, and we push at most
            // len <= cap elements.
            unsafe { array.push_unchecked(value.clone()) };
        }
        array
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// A fold accumulating up to `limit` elements into an [`Array`]. See
/// [`to_array`].
#[derive(Debug, Clone)]
pub struct ToArray<T> {
    limit: usize,
    _elem: PhantomData<fn(T)>,
}

/// Seeds a capacity-`limit` array and appends each element; finish returns
/// the array as accumulated.
///
/// Feeding more than `limit` elements panics (the checked append's
/// fail-fast policy) rather than writing out of bounds.
#[must_use]
pub fn to_array<T>(limit: usize) -> ToArray<T> {
    ToArray {
        limit,
        _elem: PhantomData,
    }
}

impl<T> Fold for ToArray<T> {
    type Input = T;
    type Acc = Array<T>;
    type Output = Array<T>;

    fn seed(&mut self) -> Array<T> {
        Array::with_capacity(self.limit)
    }

    fn step(&mut self, mut acc: Array<T>, item: T) -> Array<T> {
        acc.push(item);
        acc
    }

    fn finish(&mut self, acc: Array<T>) -> Array<T> {
        acc
    }
}
