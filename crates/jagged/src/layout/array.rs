//! The jagged array: variable-length rows over one flat content buffer.
//!
//! ## Purpose
//!
//! `JaggedArray` owns the canonical `(starts, stops)` pair, the content,
//! and memoized caches for the derived representations (offsets, counts,
//! parents). Construction variants exist for every representation plus
//! iterables of rows and per-item group keys.
//!
//! ## Design notes
//!
//! * **One canonical pair**: offsets, counts, and parents are caches of
//!   `(starts, stops)`, recomputed on demand and dropped by every setter
//!   that does not directly supply them. This is a cache-coherency design,
//!   not a type hierarchy.
//! * **Lazy validation**: structural checks run on the first structural
//!   read after a mutation and are memoized in a validity flag; setters
//!   clear the flag and eagerly check only what they can (non-negativity,
//!   paired lengths).
//! * **Interior mutability**: caches use `OnceCell` so derivation works
//!   through shared references; setters take `&mut self` and reset them.
//!
//! ## Key concepts
//!
//! * **Row**: `content[start..stop]`; may be empty, may overlap other
//!   rows, may be out of index order — all legal.
//! * **Reading one representation never mutates another** except to
//!   populate its own cache.
//!
//! ## Invariants
//!
//! * `starts.len() <= stops.len()`; operations use the first
//!   `starts.len()` stops.
//! * A populated parents cache always has the content's length.
//!
//! ## Non-goals
//!
//! * No thread safety: single-writer usage is assumed (the caches use
//!   non-`Sync` cells by design).
//! * No persistence and no new numeric element types.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::rc::Rc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::rc::Rc;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cell::{Cell, OnceCell};

// Internal dependencies
use crate::layout::validate::{BoundsPolicy, Validator};
use crate::primitives::content::{check_span, Content, FlatContent};
use crate::primitives::dtype::DataType;
use crate::primitives::errors::JaggedError;
use crate::primitives::index::{
    counts_to_offsets, group_keys_to_offsets_parents, offsets_to_parents, offsets_to_starts,
    offsets_to_stops, parents_to_starts_stops, starts_stops_to_parents,
};

// ============================================================================
// JaggedArray
// ============================================================================

/// A sequence of variable-length rows over one flat content buffer.
#[derive(Debug, Clone)]
pub struct JaggedArray<C> {
    /// Per-row range starts into the content.
    starts: Vec<i64>,

    /// Per-row range stops; may hold more entries than `starts`.
    stops: Vec<i64>,

    /// The flat backing content.
    content: C,

    /// Cached offsets; populated only for contiguous ordered rows.
    offsets: OnceCell<Vec<i64>>,

    /// Cached per-row counts.
    counts: OnceCell<Vec<i64>>,

    /// Cached per-item owning rows.
    parents: OnceCell<Vec<i64>>,

    /// Memoized structural validity.
    valid: Cell<bool>,

    /// When content-length bounds are enforced.
    policy: BoundsPolicy,
}

impl<C: PartialEq> PartialEq for JaggedArray<C> {
    fn eq(&self, other: &Self) -> bool {
        self.starts == other.starts && self.stops == other.stops && self.content == other.content
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Build from explicit starts and stops.
    ///
    /// Non-negativity is checked eagerly; the remaining structural checks
    /// run lazily on first use.
    pub fn new(starts: Vec<i64>, stops: Vec<i64>, content: C) -> Result<Self, JaggedError> {
        Validator::validate_non_negative("starts", &starts)?;
        Validator::validate_non_negative("stops", &stops)?;
        Ok(Self::from_parts_unchecked(
            starts,
            stops,
            content,
            BoundsPolicy::default(),
        ))
    }

    /// Build from a boundary array; rows are `[offsets[i], offsets[i+1])`.
    pub fn from_offsets(offsets: Vec<i64>, content: C) -> Result<Self, JaggedError> {
        Validator::validate_offsets(&offsets)?;
        let out = Self::from_parts_unchecked(
            offsets_to_starts(&offsets),
            offsets_to_stops(&offsets),
            content,
            BoundsPolicy::default(),
        );
        let _ = out.offsets.set(offsets);
        Ok(out)
    }

    /// Build contiguous rows of the given lengths.
    pub fn from_counts(counts: Vec<i64>, content: C) -> Result<Self, JaggedError> {
        Validator::validate_non_negative("counts", &counts)?;
        let offsets = counts_to_offsets(&counts);
        let out = Self::from_parts_unchecked(
            offsets_to_starts(&offsets),
            offsets_to_stops(&offsets),
            content,
            BoundsPolicy::default(),
        );
        let _ = out.offsets.set(offsets);
        let _ = out.counts.set(counts);
        Ok(out)
    }

    /// Build from a per-item owning-row array (−1 marks unowned items).
    pub fn from_parents(parents: Vec<i64>, content: C) -> Result<Self, JaggedError> {
        if parents.len() != content.len() {
            return Err(JaggedError::MismatchedLengths {
                name: "parents",
                expected: content.len(),
                got: parents.len(),
            });
        }
        let (starts, stops) = parents_to_starts_stops(&parents);
        let out = Self::from_parts_unchecked(starts, stops, content, BoundsPolicy::default());
        let _ = out.parents.set(parents);
        Ok(out)
    }

    /// Build from a per-item group-key array whose equal-key runs define
    /// the rows; the caller guarantees equal keys are contiguous.
    pub fn from_group_keys<K: PartialEq>(keys: &[K], content: C) -> Result<Self, JaggedError> {
        if keys.len() != content.len() {
            return Err(JaggedError::MismatchedLengths {
                name: "group keys",
                expected: content.len(),
                got: keys.len(),
            });
        }
        let (offsets, parents) = group_keys_to_offsets_parents(keys);
        let out = Self::from_parts_unchecked(
            offsets_to_starts(&offsets),
            offsets_to_stops(&offsets),
            content,
            BoundsPolicy::default(),
        );
        let _ = out.offsets.set(offsets);
        let _ = out.parents.set(parents);
        Ok(out)
    }

    /// Assemble without checks; callers guarantee non-negative arrays.
    pub(crate) fn from_parts_unchecked(
        starts: Vec<i64>,
        stops: Vec<i64>,
        content: C,
        policy: BoundsPolicy,
    ) -> Self {
        Self {
            starts,
            stops,
            content,
            offsets: OnceCell::new(),
            counts: OnceCell::new(),
            parents: OnceCell::new(),
            valid: Cell::new(false),
            policy,
        }
    }

    /// Choose when content-length bounds are enforced.
    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.policy = policy;
        self.valid.set(false);
        self
    }
}

impl<T: Clone + Default> JaggedArray<FlatContent<T>> {
    /// Flatten an iterable of rows into contiguous content, accumulating
    /// running row-length offsets in encounter order.
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
    {
        let mut offsets = Vec::new();
        let mut content = Vec::new();
        offsets.push(0i64);
        for row in rows {
            let row = row.as_ref();
            content.extend_from_slice(row);
            offsets.push(content.len() as i64);
        }
        let out = Self::from_parts_unchecked(
            offsets_to_starts(&offsets),
            offsets_to_stops(&offsets),
            FlatContent::new(content),
            BoundsPolicy::default(),
        );
        let _ = out.offsets.set(offsets);
        out
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Whether the array has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Per-row range starts.
    #[inline]
    pub fn starts(&self) -> &[i64] {
        &self.starts
    }

    /// Per-row range stops (may hold more entries than `starts`).
    #[inline]
    pub fn stops(&self) -> &[i64] {
        &self.stops
    }

    /// The backing content.
    #[inline]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable content access; clears the memoized validity because the
    /// content's length may change under the caller.
    pub(crate) fn content_mut(&mut self) -> &mut C {
        self.valid.set(false);
        &mut self.content
    }

    /// Consume the array, keeping only its content.
    #[inline]
    pub fn into_content(self) -> C {
        self.content
    }

    /// The active bounds policy.
    #[inline]
    pub fn bounds_policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// Per-row counts `stops - starts`, derived on first use.
    pub fn counts(&self) -> Result<&[i64], JaggedError> {
        self.validate()?;
        Ok(self.counts.get_or_init(|| {
            (0..self.starts.len())
                .map(|row| self.stops[row] - self.starts[row])
                .collect()
        }))
    }

    /// The offsets boundary array, derivable only for contiguous ordered
    /// rows; otherwise a `NotContiguous` value error.
    pub fn offsets(&self) -> Result<&[i64], JaggedError> {
        self.validate()?;
        if let Some(offsets) = self.offsets.get() {
            return Ok(offsets);
        }
        if !self.can_use_offsets() {
            return Err(JaggedError::NotContiguous);
        }
        let n = self.starts.len();
        let mut offsets = Vec::with_capacity(n + 1);
        if n == 0 {
            offsets.push(0);
        } else {
            offsets.extend_from_slice(&self.starts);
            offsets.push(self.stops[n - 1]);
        }
        Ok(self.offsets.get_or_init(|| offsets))
    }

    /// Per-item owning rows (−1 for unowned items), derived on first use;
    /// on overlap the later row wins.
    pub fn parents(&self) -> Result<&[i64], JaggedError> {
        self.validate()?;
        if let Some(parents) = self.parents.get() {
            return Ok(parents);
        }
        let parents = match self.offsets() {
            Ok(offsets) => offsets_to_parents(offsets, self.content.len()),
            Err(JaggedError::NotContiguous) => starts_stops_to_parents(
                &self.starts,
                &self.stops[..self.starts.len()],
                self.content.len(),
            ),
            Err(other) => return Err(other),
        };
        Ok(self.parents.get_or_init(|| parents))
    }

    /// Whether the rows are contiguous and ordered, so that a single
    /// offsets array can describe them.
    pub(crate) fn can_use_offsets(&self) -> bool {
        let n = self.starts.len();
        (0..n.saturating_sub(1)).all(|row| self.stops[row] == self.starts[row + 1])
    }

    /// Establish structural validity, memoized until the next mutation.
    pub fn validate(&self) -> Result<(), JaggedError> {
        if self.valid.get() {
            return Ok(());
        }
        Validator::validate_starts_stops(&self.starts, &self.stops)?;
        if self.policy == BoundsPolicy::Eager {
            Validator::validate_content_bounds(
                &self.starts,
                &self.stops[..self.starts.len()],
                self.content.len(),
            )?;
        }
        self.valid.set(true);
        Ok(())
    }

    /// One row's content, `content[start..stop]`.
    pub fn row(&self, index: usize) -> Result<C, JaggedError> {
        self.validate()?;
        if index >= self.len() {
            return Err(JaggedError::RowOutOfBounds {
                index: index as i64,
                rows: self.len(),
            });
        }
        self.content
            .slice(self.starts[index] as usize, self.stops[index] as usize)
    }

    /// Iterate over the rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = Result<C, JaggedError>> + '_ {
        (0..self.len()).map(move |row| self.row(row))
    }
}

// ============================================================================
// Setters - cache invalidation matrix
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Replace the starts; drops every derived cache.
    pub fn set_starts(&mut self, starts: Vec<i64>) -> Result<(), JaggedError> {
        Validator::validate_non_negative("starts", &starts)?;
        self.starts = starts;
        self.drop_derived();
        Ok(())
    }

    /// Replace the stops; drops every derived cache.
    pub fn set_stops(&mut self, stops: Vec<i64>) -> Result<(), JaggedError> {
        Validator::validate_non_negative("stops", &stops)?;
        self.stops = stops;
        self.drop_derived();
        Ok(())
    }

    /// Replace the content; parents are dropped because their length is
    /// tied to the content's.
    pub fn set_content(&mut self, content: C) {
        self.content = content;
        self.parents.take();
        self.valid.set(false);
    }

    /// Replace the layout through an offsets array, retained as a cache.
    pub fn set_offsets(&mut self, offsets: Vec<i64>) -> Result<(), JaggedError> {
        Validator::validate_offsets(&offsets)?;
        self.starts = offsets_to_starts(&offsets);
        self.stops = offsets_to_stops(&offsets);
        self.drop_derived();
        let _ = self.offsets.set(offsets);
        Ok(())
    }

    /// Replace the layout through per-row counts, retained as a cache
    /// alongside the offsets they imply.
    pub fn set_counts(&mut self, counts: Vec<i64>) -> Result<(), JaggedError> {
        Validator::validate_non_negative("counts", &counts)?;
        let offsets = counts_to_offsets(&counts);
        self.starts = offsets_to_starts(&offsets);
        self.stops = offsets_to_stops(&offsets);
        self.drop_derived();
        let _ = self.offsets.set(offsets);
        let _ = self.counts.set(counts);
        Ok(())
    }

    /// Replace the layout through a parents array, retained as a cache.
    pub fn set_parents(&mut self, parents: Vec<i64>) -> Result<(), JaggedError> {
        if parents.len() != self.content.len() {
            return Err(JaggedError::MismatchedLengths {
                name: "parents",
                expected: self.content.len(),
                got: parents.len(),
            });
        }
        let (starts, stops) = parents_to_starts_stops(&parents);
        self.starts = starts;
        self.stops = stops;
        self.drop_derived();
        let _ = self.parents.set(parents);
        Ok(())
    }

    /// Drop all derived caches and clear the validity flag.
    fn drop_derived(&mut self) {
        self.offsets.take();
        self.counts.take();
        self.parents.take();
        self.valid.set(false);
    }
}

// ============================================================================
// Derived views
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Same layout over different content; layout-only caches survive
    /// because the starts and stops are untouched. The parents cache is
    /// content-length-sized, so it carries over only when the new content
    /// has the same length.
    pub fn with_content<D: Content>(&self, content: D) -> JaggedArray<D> {
        let parents = match self.parents.get() {
            Some(parents) if parents.len() == content.len() => self.parents.clone(),
            _ => OnceCell::new(),
        };
        JaggedArray {
            starts: self.starts.clone(),
            stops: self.stops.clone(),
            content,
            offsets: self.offsets.clone(),
            counts: self.counts.clone(),
            parents,
            valid: Cell::new(false),
            policy: self.policy,
        }
    }

    /// Fresh array over the given layout, inheriting the bounds policy.
    pub(crate) fn with_layout(&self, starts: Vec<i64>, stops: Vec<i64>, content: C) -> Self {
        Self::from_parts_unchecked(starts, stops, content, self.policy)
    }

    /// Row-local positions as a jagged array sharing this layout: item `j`
    /// of row `i` holds `j`. Unowned content positions hold −1.
    pub fn local_index(&self) -> Result<JaggedArray<FlatContent<i64>>, JaggedError> {
        let parents = self.parents()?;
        let content: Vec<i64> = parents
            .iter()
            .enumerate()
            .map(|(pos, &p)| {
                if p >= 0 {
                    pos as i64 - self.starts[p as usize]
                } else {
                    -1
                }
            })
            .collect();
        Ok(self.with_content(FlatContent::new(content)))
    }

    /// Whether all the arrays share one row layout, ignoring where empty
    /// rows sit (an empty row is representable by any `start == stop`).
    pub fn aligned(arrays: &[&Self]) -> Result<bool, JaggedError> {
        let Some((first, rest)) = arrays.split_first() else {
            return Ok(true);
        };
        first.validate()?;
        let n = first.len();
        let counts = first.counts()?;
        for other in rest {
            other.validate()?;
            if other.len() != n {
                return Ok(false);
            }
            for row in 0..n {
                if counts[row] == 0 {
                    continue;
                }
                if other.starts[row] != first.starts[row] || other.stops[row] != first.stops[row] {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

// ============================================================================
// Nested content - a jagged array is itself valid content
// ============================================================================

impl<C: Content> Content for JaggedArray<C> {
    fn len(&self) -> usize {
        self.starts.len()
    }

    fn slice(&self, start: usize, stop: usize) -> Result<Self, JaggedError> {
        check_span(start, stop, self.starts.len())?;
        Ok(self.with_layout(
            self.starts[start..stop].to_vec(),
            self.stops[start..stop].to_vec(),
            self.content.clone(),
        ))
    }

    fn gather(&self, index: &[i64]) -> Result<Self, JaggedError> {
        let mut starts = Vec::with_capacity(index.len());
        let mut stops = Vec::with_capacity(index.len());
        for &row in index {
            if row < 0 {
                // Filler rows are empty.
                starts.push(0);
                stops.push(0);
            } else if (row as usize) < self.starts.len() {
                starts.push(self.starts[row as usize]);
                stops.push(self.stops[row as usize]);
            } else {
                return Err(JaggedError::ContentOverrun {
                    position: row,
                    content_len: self.starts.len(),
                });
            }
        }
        Ok(self.with_layout(starts, stops, self.content.clone()))
    }

    fn column(&self, name: &str) -> Result<Self, JaggedError> {
        Ok(self.with_content(self.content.column(name)?))
    }

    fn select_columns(&self, names: &[&str]) -> Result<Self, JaggedError> {
        Ok(self.with_content(self.content.select_columns(names)?))
    }

    fn set_column(&mut self, name: &str, values: &Self) -> Result<(), JaggedError> {
        let n = self.len();
        let aligned = values.to_layout(Some(&self.starts), Some(&self.stops[..n]))?;
        self.content.set_column(name, aligned.content())?;
        self.valid.set(false);
        Ok(())
    }

    fn data_type(&self) -> DataType {
        DataType::Jagged(Rc::new(self.content.data_type()))
    }
}
