#![cfg(feature = "dev")]
//! Tests for the row-boundary representation conversions.
//!
//! These tests verify the pure derivation algorithms between the four
//! equivalent boundary forms:
//! - Counts and offsets (prefix sums, starts/stops splitting)
//! - Parents derivation (contiguous and arbitrary layouts, overlap)
//! - Parents reconstruction (empty-row boundary pinning)
//! - Group-key run detection
//!
//! ## Test Organization
//!
//! 1. **Offsets** - Prefix sums, starts/stops splitting
//! 2. **Parents** - Derivation, overlap resolution, reconstruction
//! 3. **Group Keys** - Run detection, encounter order

use jagged::internals::primitives::index::{
    counts_to_offsets, group_keys_to_offsets_parents, offsets_to_parents, offsets_to_starts,
    offsets_to_stops, parents_to_starts_stops, starts_stops_to_parents,
};

// ============================================================================
// Offsets Tests
// ============================================================================

/// Test counts prefix-sum into offsets.
///
/// Verifies that zero counts produce repeated boundaries.
#[test]
fn test_counts_to_offsets() {
    assert_eq!(counts_to_offsets(&[3, 0, 2]), [0, 3, 3, 5]);
}

/// Test the zero-row offsets array.
///
/// Verifies that no counts still yield one boundary.
#[test]
fn test_counts_to_offsets_empty() {
    assert_eq!(counts_to_offsets(&[]), [0]);
}

/// Test splitting offsets into starts and stops.
#[test]
fn test_offsets_split() {
    let offsets = [0i64, 3, 3, 5];
    assert_eq!(offsets_to_starts(&offsets), [0, 3, 3]);
    assert_eq!(offsets_to_stops(&offsets), [3, 3, 5]);
}

/// Test splitting the lone-boundary offsets array.
///
/// Verifies that `[0]` describes zero rows.
#[test]
fn test_offsets_split_no_rows() {
    assert!(offsets_to_starts(&[0]).is_empty());
    assert!(offsets_to_stops(&[0]).is_empty());
}

// ============================================================================
// Parents Tests
// ============================================================================

/// Test parents from a contiguous layout.
///
/// Verifies that each position maps to its row and the empty row owns
/// nothing.
#[test]
fn test_offsets_to_parents() {
    assert_eq!(offsets_to_parents(&[0, 3, 3, 5], 5), [0, 0, 0, 2, 2]);
}

/// Test parents mark positions outside the union span.
///
/// Verifies that a trailing unowned position stays −1.
#[test]
fn test_offsets_to_parents_unowned_tail() {
    assert_eq!(offsets_to_parents(&[0, 2], 4), [0, 0, -1, -1]);
}

/// Test overlap resolution in parents derivation.
///
/// Verifies that when two rows claim a position, the later row wins.
#[test]
fn test_parents_overlap_later_wins() {
    // Row 0 spans [0, 3), row 1 spans [1, 4).
    let parents = starts_stops_to_parents(&[0, 1], &[3, 4], 5);
    assert_eq!(parents, [0, 1, 1, 1, -1]);
}

/// Test parents derivation with out-of-order rows.
///
/// Verifies that row index, not storage position, is recorded.
#[test]
fn test_parents_out_of_order_rows() {
    // Row 0 is stored after row 1 in the content.
    let parents = starts_stops_to_parents(&[2, 0], &[4, 2], 4);
    assert_eq!(parents, [1, 1, 0, 0]);
}

/// Test starts/stops reconstruction from parents.
///
/// Verifies empty rows are pinned to the preceding row's boundary.
#[test]
fn test_parents_to_starts_stops_empty_row_pinning() {
    let (starts, stops) = parents_to_starts_stops(&[0, 0, 2]);
    assert_eq!(starts, [0, 2, 2]);
    assert_eq!(stops, [2, 2, 3]);
}

/// Test reconstruction from an all-negative parents array.
///
/// Verifies that no owned positions mean no rows.
#[test]
fn test_parents_to_starts_stops_no_rows() {
    let (starts, stops) = parents_to_starts_stops(&[-1, -1]);
    assert!(starts.is_empty());
    assert!(stops.is_empty());
}

/// Test an empty row before any non-empty row pins to zero.
#[test]
fn test_parents_leading_empty_row() {
    let (starts, stops) = parents_to_starts_stops(&[1, 1]);
    assert_eq!(starts, [0, 0]);
    assert_eq!(stops, [0, 2]);
}

// ============================================================================
// Group Key Tests
// ============================================================================

/// Test rows from contiguous equal-key runs.
#[test]
fn test_group_keys_runs() {
    let (offsets, parents) = group_keys_to_offsets_parents(&["a", "a", "b"]);
    assert_eq!(offsets, [0, 2, 3]);
    assert_eq!(parents, [0, 0, 1]);
}

/// Test group keys over no items.
///
/// Verifies the lone-boundary offsets form.
#[test]
fn test_group_keys_empty() {
    let keys: [i32; 0] = [];
    let (offsets, parents) = group_keys_to_offsets_parents(&keys);
    assert_eq!(offsets, [0]);
    assert!(parents.is_empty());
}

/// Test that a repeated key in a later run opens a fresh row.
///
/// Verifies rows are runs, not distinct key values.
#[test]
fn test_group_keys_repeated_key_new_run() {
    let (offsets, parents) = group_keys_to_offsets_parents(&[7, 7, 9, 7]);
    assert_eq!(offsets, [0, 2, 3, 4]);
    assert_eq!(parents, [0, 0, 1, 2]);
}
