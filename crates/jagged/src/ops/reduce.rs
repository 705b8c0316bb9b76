//! Per-row reductions: sum, product, extrema, and their arg-forms.
//!
//! ## Purpose
//!
//! Reduce each row to one value (sum, prod, min, max) or to the row-local
//! position of an extremum (argmin, argmax). Empty rows yield the
//! operator's identity; arg-forms yield an empty row instead.
//!
//! ## Design notes
//!
//! * Contiguous ordered rows reduce by walking offset windows over the
//!   content once; anything else falls back to a per-row walk over
//!   `[start, stop)` spans.
//! * The arg-forms sort content positions by `(parent, value)` with one
//!   stable sort and then read each parent run's first (argmin) or last
//!   (argmax) entry. Sorting the pair key avoids any arithmetic on the
//!   values themselves, so it cannot overflow and works for any ordered
//!   element type.
//! * Incomparable values (NaN) tie during the sort; which one a run
//!   surfaces then depends on position order only.
//!
//! ## Edge cases
//!
//! * On overlapping rows the arg-forms follow parents, so each content
//!   position counts toward its owning row only.
//! * Bounds are always enforced here regardless of policy: a reduction
//!   reads every owned position.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::{One, Zero};

// Internal dependencies
use crate::layout::array::JaggedArray;
use crate::layout::validate::Validator;
use crate::primitives::content::{Content, FlatContent};
use crate::primitives::errors::JaggedError;

// ============================================================================
// Identity elements for extrema
// ============================================================================

/// Identity elements for min/max reductions over empty rows.
pub trait ReduceIdentity {
    /// Value every element compares below: the min over nothing.
    fn min_identity() -> Self;
    /// Value every element compares above: the max over nothing.
    fn max_identity() -> Self;
}

macro_rules! impl_int_identity {
    ($($t:ty),* $(,)?) => {
        $(
            impl ReduceIdentity for $t {
                fn min_identity() -> Self {
                    <$t>::MAX
                }
                fn max_identity() -> Self {
                    <$t>::MIN
                }
            }
        )*
    };
}

impl_int_identity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_identity {
    ($($t:ty),* $(,)?) => {
        $(
            impl ReduceIdentity for $t {
                fn min_identity() -> Self {
                    <$t>::INFINITY
                }
                fn max_identity() -> Self {
                    <$t>::NEG_INFINITY
                }
            }
        )*
    };
}

impl_float_identity!(f32, f64);

// ============================================================================
// Value reductions
// ============================================================================

impl<T: Copy + Default> JaggedArray<FlatContent<T>> {
    /// Per-row sums; an empty row sums to zero.
    pub fn sum(&self) -> Result<Vec<T>, JaggedError>
    where
        T: Zero,
    {
        self.reduce(T::zero(), |acc, x| acc + x)
    }

    /// Per-row products; an empty row multiplies to one.
    pub fn prod(&self) -> Result<Vec<T>, JaggedError>
    where
        T: One,
    {
        self.reduce(T::one(), |acc, x| acc * x)
    }

    /// Per-row minima; an empty row yields the min identity.
    pub fn min(&self) -> Result<Vec<T>, JaggedError>
    where
        T: PartialOrd + ReduceIdentity,
    {
        self.reduce(T::min_identity(), |acc, x| if x < acc { x } else { acc })
    }

    /// Per-row maxima; an empty row yields the max identity.
    pub fn max(&self) -> Result<Vec<T>, JaggedError>
    where
        T: PartialOrd + ReduceIdentity,
    {
        self.reduce(T::max_identity(), |acc, x| if x > acc { x } else { acc })
    }

    /// Fold every row from an identity, one output per row.
    fn reduce<F>(&self, identity: T, f: F) -> Result<Vec<T>, JaggedError>
    where
        F: Fn(T, T) -> T,
    {
        self.validate()?;
        let n = self.len();
        let content = self.content().as_slice();

        let fold_span = |start: usize, stop: usize| -> Result<T, JaggedError> {
            if stop <= start {
                return Ok(identity);
            }
            if stop > content.len() {
                return Err(JaggedError::ContentOverrun {
                    position: stop as i64 - 1,
                    content_len: content.len(),
                });
            }
            Ok(content[start..stop].iter().fold(identity, |acc, &x| f(acc, x)))
        };

        match self.offsets() {
            Ok(offsets) => {
                // Contiguous rows: one pass over offset windows.
                let mut out = Vec::with_capacity(n);
                for window in offsets.windows(2) {
                    out.push(fold_span(window[0] as usize, window[1] as usize)?);
                }
                Ok(out)
            }
            Err(JaggedError::NotContiguous) => {
                let mut out = Vec::with_capacity(n);
                for row in 0..n {
                    out.push(fold_span(
                        self.starts()[row] as usize,
                        self.stops()[row] as usize,
                    )?);
                }
                Ok(out)
            }
            Err(other) => Err(other),
        }
    }
}

// ============================================================================
// Arg reductions
// ============================================================================

impl<T: Copy + Default + PartialOrd> JaggedArray<FlatContent<T>> {
    /// Row-local position of each row's minimum, as a jagged array of
    /// one-element rows; empty rows stay empty. Ties pick the first.
    pub fn argmin(&self) -> Result<JaggedArray<FlatContent<i64>>, JaggedError> {
        self.arg_reduce(false)
    }

    /// Row-local position of each row's maximum, as a jagged array of
    /// one-element rows; empty rows stay empty. Ties pick the last.
    pub fn argmax(&self) -> Result<JaggedArray<FlatContent<i64>>, JaggedError> {
        self.arg_reduce(true)
    }

    fn arg_reduce(&self, take_last: bool) -> Result<JaggedArray<FlatContent<i64>>, JaggedError> {
        self.validate()?;
        let n = self.len();
        Validator::validate_content_bounds(
            self.starts(),
            &self.stops()[..n],
            self.content().len(),
        )?;
        let parents = self.parents()?;
        let content = self.content().as_slice();

        // Owned positions, stably ordered by (parent, value): each parent
        // run is then value-sorted with position order breaking ties.
        let mut order: Vec<usize> = (0..content.len()).filter(|&pos| parents[pos] >= 0).collect();
        order.sort_by(|&a, &b| {
            parents[a].cmp(&parents[b]).then_with(|| {
                content[a]
                    .partial_cmp(&content[b])
                    .unwrap_or(Ordering::Equal)
            })
        });

        let mut picks: Vec<Option<i64>> = vec![None; n];
        let mut at = 0;
        while at < order.len() {
            let parent = parents[order[at]];
            let mut end = at + 1;
            while end < order.len() && parents[order[end]] == parent {
                end += 1;
            }
            let pick = if take_last { order[end - 1] } else { order[at] };
            picks[parent as usize] = Some(pick as i64 - self.starts()[parent as usize]);
            at = end;
        }

        let mut counts = Vec::with_capacity(n);
        let mut locals = Vec::new();
        for pick in picks {
            match pick {
                Some(local) => {
                    counts.push(1);
                    locals.push(local);
                }
                None => counts.push(0),
            }
        }
        JaggedArray::from_counts(counts, FlatContent::new(locals))
    }
}
