//! Conversions between the four row-boundary representations.
//!
//! ## Purpose
//!
//! A jagged array's rows can be described four equivalent ways: the
//! canonical `(starts, stops)` pair, a monotonic `offsets` boundary array,
//! per-row `counts`, or per-item `parents`. This module holds the pure
//! derivation algorithms between them.
//!
//! ## Design notes
//!
//! * **Pure**: Every function is a side-effect-free transform over `&[i64]`
//!   slices; callers own caching and invalidation.
//! * **Overlap-aware**: Rows may be empty, overlapping, duplicated, or out
//!   of index order. Parent derivation resolves overlap by letting later
//!   rows overwrite earlier ones.
//!
//! ## Key concepts
//!
//! * **Offsets**: length N+1, valid only for contiguous ordered rows;
//!   `starts = offsets[..N]`, `stops = offsets[1..]`.
//! * **Parents**: one entry per content item; −1 marks an item owned by no
//!   row.
//! * **Group keys**: a per-item key array whose equal-key runs define the
//!   rows (the caller guarantees equal keys are contiguous).
//!
//! ## Invariants
//!
//! * Inputs are assumed non-negative where the representation requires it;
//!   constructors validate before calling in here.
//! * Empty rows reconstructed from parents are pinned `start == stop` at
//!   the preceding row's boundary, so adjacency between empty rows stays
//!   well-defined.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// ============================================================================
// Offsets
// ============================================================================

/// Prefix-sum counts into an offsets array with a leading 0.
#[inline]
pub fn counts_to_offsets(counts: &[i64]) -> Vec<i64> {
    let mut offsets = Vec::with_capacity(counts.len() + 1);
    let mut total = 0i64;
    offsets.push(total);
    for &c in counts {
        total += c;
        offsets.push(total);
    }
    offsets
}

/// All boundaries but the last: the per-row starts.
#[inline]
pub fn offsets_to_starts(offsets: &[i64]) -> Vec<i64> {
    match offsets.len() {
        0 | 1 => Vec::new(),
        n => offsets[..n - 1].to_vec(),
    }
}

/// All boundaries but the first: the per-row stops.
#[inline]
pub fn offsets_to_stops(offsets: &[i64]) -> Vec<i64> {
    match offsets.len() {
        0 | 1 => Vec::new(),
        _ => offsets[1..].to_vec(),
    }
}

/// Assign each content position its owning row from a contiguous layout.
///
/// Positions outside the union span `[offsets[0], offsets[N])` stay −1.
#[inline]
pub fn offsets_to_parents(offsets: &[i64], content_len: usize) -> Vec<i64> {
    let mut parents = vec![-1i64; content_len];
    for row in 0..offsets.len().saturating_sub(1) {
        fill_range(&mut parents, offsets[row], offsets[row + 1], row as i64);
    }
    parents
}

// ============================================================================
// Parents
// ============================================================================

/// Assign each content position its owning row from an arbitrary layout.
///
/// Rows are applied in index order, so on overlap the later row wins; this
/// is the canonical overlap resolution used everywhere in the crate.
#[inline]
pub fn starts_stops_to_parents(starts: &[i64], stops: &[i64], content_len: usize) -> Vec<i64> {
    let mut parents = vec![-1i64; content_len];
    for row in 0..starts.len() {
        fill_range(&mut parents, starts[row], stops[row], row as i64);
    }
    parents
}

/// Reconstruct `(starts, stops)` from a parents array.
///
/// A row's start is the minimum position owned by it and its stop the
/// maximum plus one. Rows owning no position collapse to `start == stop`
/// at the previous row's stop (0 before the first non-empty row).
pub fn parents_to_starts_stops(parents: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let rows = parents
        .iter()
        .copied()
        .filter(|&p| p >= 0)
        .max()
        .map(|m| m as usize + 1)
        .unwrap_or(0);

    let mut first = vec![-1i64; rows];
    let mut last = vec![-1i64; rows];
    for (pos, &p) in parents.iter().enumerate() {
        if p < 0 {
            continue;
        }
        let p = p as usize;
        if first[p] < 0 {
            first[p] = pos as i64;
        }
        if pos as i64 > last[p] {
            last[p] = pos as i64;
        }
    }

    let mut starts = Vec::with_capacity(rows);
    let mut stops = Vec::with_capacity(rows);
    let mut boundary = 0i64;
    for row in 0..rows {
        if first[row] < 0 {
            starts.push(boundary);
            stops.push(boundary);
        } else {
            starts.push(first[row]);
            stops.push(last[row] + 1);
            boundary = last[row] + 1;
        }
    }
    (starts, stops)
}

// ============================================================================
// Group keys
// ============================================================================

/// Derive offsets and parents from a per-item group-key array.
///
/// The caller guarantees that items sharing a key form contiguous runs;
/// each run becomes one row, in encounter order.
pub fn group_keys_to_offsets_parents<K: PartialEq>(keys: &[K]) -> (Vec<i64>, Vec<i64>) {
    let mut offsets = Vec::new();
    let mut parents = Vec::with_capacity(keys.len());
    offsets.push(0i64);

    let mut row = -1i64;
    for (pos, key) in keys.iter().enumerate() {
        if pos == 0 || *key != keys[pos - 1] {
            if pos != 0 {
                offsets.push(pos as i64);
            }
            row += 1;
        }
        parents.push(row);
    }
    offsets.push(keys.len() as i64);
    if keys.is_empty() {
        // A lone boundary; no rows.
        offsets.truncate(1);
    }
    (offsets, parents)
}

// ============================================================================
// Helpers
// ============================================================================

/// Fill `parents[start..stop]` with `row`, clamped to the array length.
#[inline]
fn fill_range(parents: &mut [i64], start: i64, stop: i64, row: i64) {
    let len = parents.len() as i64;
    let a = start.clamp(0, len) as usize;
    let b = stop.clamp(0, len) as usize;
    if a < b {
        for slot in &mut parents[a..b] {
            *slot = row;
        }
    }
}
