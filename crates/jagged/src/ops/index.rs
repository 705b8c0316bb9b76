//! Indexing: row selection, per-row element selection, and column writes.
//!
//! ## Purpose
//!
//! Implements the read surface of the array: integer, slice, integer
//! array and boolean mask selection over rows; jagged integer and jagged
//! mask selection inside rows; and column assignment for record content.
//!
//! ## Design notes
//!
//! * Slices normalize the way Python's `slice.indices` does: negative
//!   bounds wrap, out-of-range bounds clamp, and a negative step walks
//!   backwards. Only a zero step is an error.
//! * Row selection is a gather over `(starts, stops)` pairs; content is
//!   shared, never copied, until something reshapes it.
//! * Jagged-index and jagged-mask selection resolve positions row by
//!   row against the owning row's count; the result takes the layout of
//!   the index (compacted) or of the surviving elements.
//!
//! ## Key concepts
//!
//! * **Key sequence**: a multi-dimensional lookup is a sequence of keys,
//!   outermost first. The head key picks rows; one trailing integer key
//!   reaches through into each picked row.
//!
//! ## Edge cases
//!
//! * A negative per-row index wraps against that row's own count, so
//!   `-1` means "last element of each row" even when counts differ.
//! * Column keys are terminal: nothing may follow a field selection.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::layout::array::JaggedArray;
use crate::primitives::content::{Content, FlatContent};
use crate::primitives::errors::JaggedError;

// ============================================================================
// Slice
// ============================================================================

/// A Python-style slice with optional bounds and step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    /// First index; negative wraps, `None` means the step-dependent end.
    pub start: Option<i64>,
    /// Exclusive bound; negative wraps, `None` means the other end.
    pub stop: Option<i64>,
    /// Stride; `None` means 1, zero is an error.
    pub step: Option<i64>,
}

impl Slice {
    /// Slice with explicit bounds and unit step.
    pub fn range(start: i64, stop: i64) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    /// The full slice, `[:]`.
    pub fn all() -> Self {
        Self::default()
    }

    /// Resolve against a length, producing the selected indices in
    /// traversal order.
    pub fn positions(&self, len: usize) -> Result<Vec<i64>, JaggedError> {
        let len = len as i64;
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(JaggedError::ZeroStep);
        }

        let wrap = |bound: i64, floor: i64, ceil: i64| -> i64 {
            let bound = if bound < 0 { bound + len } else { bound };
            bound.clamp(floor, ceil)
        };

        let mut out = Vec::new();
        if step > 0 {
            let start = wrap(self.start.unwrap_or(0), 0, len);
            let stop = wrap(self.stop.unwrap_or(len), 0, len);
            let mut at = start;
            while at < stop {
                out.push(at);
                at += step;
            }
        } else {
            let start = wrap(self.start.unwrap_or(len - 1), -1, len - 1);
            let stop = wrap(self.stop.unwrap_or(-len - 1), -1, len - 1);
            let mut at = start;
            while at > stop {
                out.push(at);
                at += step;
            }
        }
        Ok(out)
    }
}

// ============================================================================
// Keys and selection results
// ============================================================================

/// One key of a lookup sequence, outermost first.
#[derive(Debug, Clone, Copy)]
pub enum IndexKey<'a> {
    /// Pick one row (negative wraps).
    Int(i64),
    /// Pick a range of rows.
    Slice(Slice),
    /// Pick rows by index (negative wraps).
    Array(&'a [i64]),
    /// Keep rows where the mask is true; must match the row count.
    Mask(&'a [bool]),
    /// Project one column of record content; terminal.
    Field(&'a str),
    /// Project several columns of record content; terminal.
    Fields(&'a [&'a str]),
}

/// What a lookup produced: a smaller jagged array, or flat content once
/// the row dimension has been consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<C> {
    /// Still jagged: rows survived the lookup.
    Jagged(JaggedArray<C>),
    /// Flat: the lookup consumed the row dimension.
    Content(C),
}

/// Values for a column write: either pre-shaped jagged values or one
/// value per row to be spread across that row.
#[derive(Debug)]
pub enum ColumnSource<'a, C> {
    /// Jagged values, relaid into the destination's layout.
    Jagged(&'a JaggedArray<C>),
    /// One value per row, broadcast across each row.
    PerRow(&'a C),
}

// Only references inside, so copying never needs `C: Copy`.
impl<C> Clone for ColumnSource<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ColumnSource<'_, C> {}

// ============================================================================
// Lookup
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Apply a key sequence, outermost first.
    pub fn get(&self, keys: &[IndexKey<'_>]) -> Result<Selection<C>, JaggedError> {
        let Some((head, tail)) = keys.split_first() else {
            return Ok(Selection::Jagged(self.clone()));
        };
        self.validate()?;

        match *head {
            IndexKey::Field(name) => {
                Self::check_terminal(tail)?;
                Ok(Selection::Jagged(self.column(name)?))
            }
            IndexKey::Fields(names) => {
                Self::check_terminal(tail)?;
                Ok(Selection::Jagged(self.select_columns(names)?))
            }
            IndexKey::Int(at) => {
                let row = self.normalize_row(at)?;
                let content = self.row(row)?;
                self.content_tail(content, tail)
            }
            IndexKey::Slice(slice) => {
                let rows = slice.positions(self.len())?;
                self.jagged_tail(self.gather(&rows)?, tail)
            }
            IndexKey::Array(index) => {
                let rows = index
                    .iter()
                    .map(|&at| self.normalize_row(at).map(|row| row as i64))
                    .collect::<Result<Vec<i64>, JaggedError>>()?;
                self.jagged_tail(self.gather(&rows)?, tail)
            }
            IndexKey::Mask(mask) => {
                if mask.len() != self.len() {
                    return Err(JaggedError::MismatchedLengths {
                        name: "mask",
                        expected: self.len(),
                        got: mask.len(),
                    });
                }
                let rows: Vec<i64> = mask
                    .iter()
                    .enumerate()
                    .filter(|(_, &keep)| keep)
                    .map(|(row, _)| row as i64)
                    .collect();
                self.jagged_tail(self.gather(&rows)?, tail)
            }
        }
    }

    /// Keys applied after the row dimension has been consumed.
    fn content_tail(&self, content: C, tail: &[IndexKey<'_>]) -> Result<Selection<C>, JaggedError> {
        match tail {
            [] => Ok(Selection::Content(content)),
            [IndexKey::Int(at)] => {
                let count = content.len() as i64;
                let idx = if *at < 0 { *at + count } else { *at };
                if idx < 0 || idx >= count {
                    return Err(JaggedError::ElementOutOfBounds {
                        index: *at,
                        min_count: count,
                    });
                }
                Ok(Selection::Content(
                    content.slice(idx as usize, idx as usize + 1)?,
                ))
            }
            _ => Err(JaggedError::UnsupportedKey {
                reason: "a flat row accepts at most one trailing integer key",
            }),
        }
    }

    /// Keys applied to a still-jagged row subset.
    fn jagged_tail(
        &self,
        picked: Self,
        tail: &[IndexKey<'_>],
    ) -> Result<Selection<C>, JaggedError> {
        match tail {
            [] => Ok(Selection::Jagged(picked)),
            [IndexKey::Int(at)] => {
                // One element per row, wrapped against each row's count.
                let counts = picked.counts()?;
                let positions = counts
                    .iter()
                    .enumerate()
                    .map(|(row, &count)| {
                        let idx = if *at < 0 { *at + count } else { *at };
                        if idx < 0 || idx >= count {
                            return Err(JaggedError::ElementOutOfBounds {
                                index: *at,
                                min_count: counts.iter().copied().min().unwrap_or(0),
                            });
                        }
                        Ok(picked.starts()[row] + idx)
                    })
                    .collect::<Result<Vec<i64>, JaggedError>>()?;
                Ok(Selection::Content(picked.content().gather(&positions)?))
            }
            _ => Err(JaggedError::UnsupportedKey {
                reason: "row subsets accept at most one trailing integer key",
            }),
        }
    }

    fn check_terminal(tail: &[IndexKey<'_>]) -> Result<(), JaggedError> {
        if tail.is_empty() {
            Ok(())
        } else {
            Err(JaggedError::UnsupportedKey {
                reason: "column selection must be the final key",
            })
        }
    }

    fn normalize_row(&self, at: i64) -> Result<usize, JaggedError> {
        let rows = self.len() as i64;
        let idx = if at < 0 { at + rows } else { at };
        if idx < 0 || idx >= rows {
            return Err(JaggedError::RowOutOfBounds {
                index: at,
                rows: self.len(),
            });
        }
        Ok(idx as usize)
    }
}

// ============================================================================
// Jagged-by-jagged selection
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Select inside every row with a matching jagged integer index.
    ///
    /// Row `i` of the index names positions inside row `i` of `self`;
    /// negatives wrap against that row's count. The result takes the
    /// index's (compacted) layout.
    pub fn get_jagged(&self, index: &JaggedArray<FlatContent<i64>>) -> Result<Self, JaggedError> {
        if index.len() != self.len() {
            return Err(JaggedError::MismatchedRows {
                expected: self.len(),
                got: index.len(),
            });
        }
        self.validate()?;
        let index = index.to_compact()?;
        let counts = self.counts()?;
        let index_counts = index.counts()?;

        let mut positions = Vec::with_capacity(index.content().len());
        for row in 0..self.len() {
            let count = counts[row];
            let span = index.row(row)?;
            debug_assert_eq!(span.len() as i64, index_counts[row]);
            for &value in span.as_slice() {
                let idx = if value < 0 { value + count } else { value };
                if idx < 0 || idx >= count {
                    return Err(JaggedError::JaggedIndexOutOfBounds { value, count });
                }
                positions.push(self.starts()[row] + idx);
            }
        }
        let content = self.content().gather(&positions)?;
        let n = index.len();
        Ok(self.with_layout(
            index.starts().to_vec(),
            index.stops()[..n].to_vec(),
            content,
        ))
    }

    /// Keep, per row, the elements where a matching jagged mask is true.
    ///
    /// The mask must have this array's row counts; the result is compact.
    pub fn get_mask(&self, mask: &JaggedArray<FlatContent<bool>>) -> Result<Self, JaggedError> {
        if mask.len() != self.len() {
            return Err(JaggedError::MismatchedRows {
                expected: self.len(),
                got: mask.len(),
            });
        }
        self.validate()?;
        // Overlapping or out-of-order rows share content slots, so the
        // mask could not be relaid into them one flag per slot. Compact
        // first; duplicated spans then filter independently.
        if !self.can_use_offsets() {
            return self.to_compact()?.get_mask(mask);
        }
        let n = self.len();
        let mask = mask.to_layout(Some(self.starts()), Some(&self.stops()[..n]))?;

        let mut positions = Vec::new();
        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0i64);
        for row in 0..n {
            let start = self.starts()[row];
            let keep = mask.row(row)?;
            for (at, &flag) in keep.as_slice().iter().enumerate() {
                if flag {
                    positions.push(start + at as i64);
                }
            }
            offsets.push(positions.len() as i64);
        }
        let content = self.content().gather(&positions)?;
        let starts = offsets[..n].to_vec();
        let stops = offsets[1..].to_vec();
        Ok(self.with_layout(starts, stops, content))
    }
}

// ============================================================================
// Column writes
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Write one column of the record content.
    pub fn assign_column(
        &mut self,
        name: &str,
        values: ColumnSource<'_, C>,
    ) -> Result<(), JaggedError> {
        match values {
            ColumnSource::Jagged(values) => self.set_column(name, values),
            ColumnSource::PerRow(values) => {
                if values.len() != self.len() {
                    return Err(JaggedError::MismatchedRows {
                        expected: self.len(),
                        got: values.len(),
                    });
                }
                let parents = self.parents()?.to_vec();
                let spread = values.gather(&parents)?;
                self.content_mut().set_column(name, &spread)
            }
        }
    }

    /// Write several columns; names and values must pair up.
    pub fn assign_columns(
        &mut self,
        names: &[&str],
        values: &[ColumnSource<'_, C>],
    ) -> Result<(), JaggedError> {
        if names.len() != values.len() {
            return Err(JaggedError::MismatchedLengths {
                name: "columns",
                expected: names.len(),
                got: values.len(),
            });
        }
        for (name, source) in names.iter().zip(values) {
            self.assign_column(name, *source)?;
        }
        Ok(())
    }
}
