//! Relayout: move content into a target row layout.
//!
//! ## Purpose
//!
//! Rewrites an array's content so that each row occupies a prescribed
//! `[start, stop)` range of a fresh buffer, preserving per-row values.
//! Compaction and flattening are the two common special cases.
//!
//! ## Design notes
//!
//! * The general path builds a destination-indexed gather map: one
//!   source position (or −1 for unowned filler) per slot of the target
//!   buffer, then delegates the element moves to `Content::gather`.
//!   Row-major enumeration of the map means overlapping source rows are
//!   copied once per owner instead of once overall.
//! * When the source rows are already contiguous and ordered, compaction
//!   degenerates to a single content slice.
//!
//! ## Invariants
//!
//! * Target and source row counts match, and with both bounds given
//!   every row's target width equals its current width.
//! * Target slots no row claims are filled with the content's filler
//!   value.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::layout::array::JaggedArray;
use crate::primitives::content::Content;
use crate::primitives::errors::JaggedError;
use crate::primitives::index::{counts_to_offsets, offsets_to_starts, offsets_to_stops};

// ============================================================================
// Relayout
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Move the content into the given row layout.
    ///
    /// With only `starts`, stops are derived as `starts + counts`; with
    /// only `stops`, starts are derived as `stops - counts`. Either
    /// derived form must leave the rows in non-overlapping ascending
    /// order. With both, each row's width must match its current count
    /// but the rows may sit anywhere, in any order.
    pub fn to_layout(
        &self,
        starts: Option<&[i64]>,
        stops: Option<&[i64]>,
    ) -> Result<Self, JaggedError> {
        let counts = self.counts()?;
        let n = self.len();

        let (target_starts, target_stops): (Vec<i64>, Vec<i64>) = match (starts, stops) {
            (None, None) => return Ok(self.clone()),
            (Some(starts), None) => {
                Self::check_target_rows(n, starts.len())?;
                let stops: Vec<i64> = starts
                    .iter()
                    .zip(counts)
                    .map(|(&start, &count)| start + count)
                    .collect();
                Self::check_target_fit(starts, &stops)?;
                (starts.to_vec(), stops)
            }
            (None, Some(stops)) => {
                Self::check_target_rows(n, stops.len())?;
                let starts: Vec<i64> = stops
                    .iter()
                    .zip(counts)
                    .map(|(&stop, &count)| stop - count)
                    .collect();
                for &start in &starts {
                    if start < 0 {
                        return Err(JaggedError::NegativeValue {
                            name: "derived starts",
                            value: start,
                        });
                    }
                }
                Self::check_target_fit(&starts, stops)?;
                (starts, stops.to_vec())
            }
            (Some(starts), Some(stops)) => {
                Self::check_target_rows(n, starts.len())?;
                Self::check_target_rows(n, stops.len())?;
                for row in 0..n {
                    let target = stops[row] - starts[row];
                    if target != counts[row] {
                        return Err(JaggedError::LayoutCountMismatch {
                            row,
                            current: counts[row],
                            target,
                        });
                    }
                }
                (starts.to_vec(), stops.to_vec())
            }
        };

        // Same layout, same content.
        if target_starts == self.starts() && target_stops == self.stops()[..n] {
            return Ok(self.clone());
        }

        let buf_len = target_stops.iter().copied().max().unwrap_or(0).max(0) as usize;
        let mut map = vec![-1i64; buf_len];
        for row in 0..n {
            let src = self.starts()[row];
            let dst = target_starts[row];
            for k in 0..counts[row] {
                map[(dst + k) as usize] = src + k;
            }
        }
        let content = self.content().gather(&map)?;
        Ok(self.with_layout(target_starts, target_stops, content))
    }

    /// Repack into contiguous ordered rows starting at offset zero.
    pub fn to_compact(&self) -> Result<Self, JaggedError> {
        let n = self.len();
        let counts = self.counts()?.to_vec();
        if self.can_use_offsets() {
            if n == 0 || self.starts()[0] == 0 {
                return Ok(self.clone());
            }
            // Contiguous rows with a leading gap: one slice, shifted starts.
            let base = self.starts()[0];
            let content = self
                .content()
                .slice(base as usize, self.stops()[n - 1] as usize)?;
            let starts: Vec<i64> = self.starts().iter().map(|&start| start - base).collect();
            let stops: Vec<i64> = self.stops()[..n].iter().map(|&stop| stop - base).collect();
            return Ok(self.with_layout(starts, stops, content));
        }
        let offsets = counts_to_offsets(&counts);
        self.to_layout(
            Some(&offsets_to_starts(&offsets)),
            Some(&offsets_to_stops(&offsets)),
        )
    }

    /// The rows' content as one flat buffer, without row boundaries.
    pub fn flatten(&self) -> Result<C, JaggedError> {
        let n = self.len();
        if n == 0 {
            return self.content().slice(0, 0);
        }
        if self.can_use_offsets() {
            self.validate()?;
            return self
                .content()
                .slice(self.starts()[0] as usize, self.stops()[n - 1] as usize);
        }
        Ok(self.to_compact()?.into_content())
    }

    fn check_target_rows(expected: usize, got: usize) -> Result<(), JaggedError> {
        if expected != got {
            return Err(JaggedError::MismatchedRows { expected, got });
        }
        Ok(())
    }

    /// Derived-bound targets must keep rows disjoint and ascending, or
    /// the derivation silently reassigned elements between rows.
    fn check_target_fit(starts: &[i64], stops: &[i64]) -> Result<(), JaggedError> {
        for row in 0..starts.len().saturating_sub(1) {
            if stops[row] > starts[row + 1] {
                return Err(JaggedError::LayoutMisfit { row });
            }
        }
        Ok(())
    }
}
