//! Tests for the jagged array core.
//!
//! These tests verify construction from every boundary representation,
//! the derived-representation caches and their invalidation, lazy
//! structural validation, and the layout-level views:
//! - Construction (rows, counts, offsets, parents, group keys)
//! - Representation derivation and cache invalidation on write
//! - Bounds policies (lazy default, eager opt-in)
//! - Row access and layout views (local_index, aligned)
//!
//! ## Test Organization
//!
//! 1. **Construction** - All five constructors
//! 2. **Representations** - Derivation and error cases
//! 3. **Setters** - Cache invalidation on write
//! 4. **Bounds Policy** - Lazy vs eager enforcement
//! 5. **Views** - Rows, local_index, aligned

use jagged::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Three rows of lengths 3, 0, 2 over five elements.
fn three_rows() -> FlatJagged<i64> {
    FlatJagged::from_counts(vec![3, 0, 2], FlatContent::from(&[10i64, 20, 30, 40, 50][..]))
        .unwrap()
}

// ============================================================================
// Construction Tests
// ============================================================================

/// Test building from an iterable of rows.
#[test]
fn test_from_rows() {
    let array = FlatJagged::<i64>::from_rows([vec![1, 2, 3], vec![], vec![4, 5]]);
    assert_eq!(array.len(), 3);
    assert_eq!(array.counts().unwrap(), [3, 0, 2]);
    assert_eq!(array.row(2).unwrap().as_slice(), [4, 5]);
}

/// Test building from per-row counts.
///
/// Verifies the derived contiguous starts and stops.
#[test]
fn test_from_counts() {
    let array = three_rows();
    assert_eq!(array.starts(), [0, 3, 3]);
    assert_eq!(array.stops(), [3, 3, 5]);
    assert_eq!(array.offsets().unwrap(), [0, 3, 3, 5]);
}

/// Test building from an offsets boundary array.
#[test]
fn test_from_offsets() {
    let array =
        FlatJagged::from_offsets(vec![0, 2, 2, 4], FlatContent::from(&[1i64, 2, 3, 4][..]))
            .unwrap();
    assert_eq!(array.counts().unwrap(), [2, 0, 2]);
}

/// Test a decreasing offsets array is rejected at construction.
#[test]
fn test_from_offsets_rejects_decrease() {
    let res = FlatJagged::from_offsets(vec![0, 3, 2], FlatContent::from(&[1i64, 2, 3][..]));
    assert!(matches!(
        res,
        Err(JaggedError::NonMonotonicOffsets { position: 1 })
    ));
}

/// Test building from a parents array.
///
/// Verifies the empty middle row collapses at the preceding boundary.
#[test]
fn test_from_parents() {
    let array =
        FlatJagged::from_parents(vec![0, 0, 2], FlatContent::from(&[5i64, 6, 7][..])).unwrap();
    assert_eq!(array.starts(), [0, 2, 2]);
    assert_eq!(array.stops(), [2, 2, 3]);
}

/// Test a parents array must match the content length.
#[test]
fn test_from_parents_length_mismatch() {
    let res = FlatJagged::from_parents(vec![0, 0], FlatContent::from(&[5i64, 6, 7][..]));
    assert!(matches!(
        res,
        Err(JaggedError::MismatchedLengths {
            name: "parents",
            expected: 3,
            got: 2
        })
    ));
}

/// Test building from contiguous group-key runs.
#[test]
fn test_from_group_keys() {
    let array =
        FlatJagged::from_group_keys(&["a", "a", "b"], FlatContent::from(&[1i64, 2, 3][..]))
            .unwrap();
    assert_eq!(array.counts().unwrap(), [2, 1]);
    assert_eq!(array.parents().unwrap(), [0, 0, 1]);
}

/// Test negative starts are rejected eagerly.
#[test]
fn test_new_rejects_negative() {
    let res = FlatJagged::new(vec![-1, 0], vec![1, 2], FlatContent::from(&[1i64, 2][..]));
    assert!(matches!(
        res,
        Err(JaggedError::NegativeValue {
            name: "starts",
            value: -1
        })
    ));
}

// ============================================================================
// Representation Tests
// ============================================================================

/// Test offsets derivation fails on non-contiguous rows.
///
/// Verifies that overlapping rows are legal but have no offsets form.
#[test]
fn test_offsets_not_contiguous() {
    let array = FlatJagged::new(
        vec![0, 1],
        vec![3, 4],
        FlatContent::from(&[1i64, 2, 3, 4][..]),
    )
    .unwrap();
    assert!(array.validate().is_ok());
    assert!(matches!(array.offsets(), Err(JaggedError::NotContiguous)));
    // Counts and parents still derive.
    assert_eq!(array.counts().unwrap(), [3, 3]);
    assert_eq!(array.parents().unwrap(), [0, 1, 1, 1]);
}

/// Test parents mark unowned content positions.
#[test]
fn test_parents_unowned_positions() {
    let array = FlatJagged::new(vec![1], vec![3], FlatContent::from(&[1i64, 2, 3, 4][..]))
        .unwrap();
    assert_eq!(array.parents().unwrap(), [-1, 0, 0, -1]);
}

/// Test the zero-row array.
#[test]
fn test_empty_array() {
    let array = FlatJagged::<i64>::from_rows(Vec::<Vec<i64>>::new());
    assert!(array.is_empty());
    assert_eq!(array.offsets().unwrap(), [0]);
    assert!(array.counts().unwrap().is_empty());
}

/// Test a stops array longer than starts is tolerated.
///
/// Verifies only the first N stops participate.
#[test]
fn test_extra_stops() {
    let array = FlatJagged::new(
        vec![0, 2],
        vec![2, 4, 99],
        FlatContent::from(&[1i64, 2, 3, 4][..]),
    )
    .unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array.counts().unwrap(), [2, 2]);
}

// ============================================================================
// Setter Tests
// ============================================================================

/// Test setting counts rebuilds the layout and derived caches.
#[test]
fn test_set_counts_invalidates() {
    let mut array = three_rows();
    assert_eq!(array.parents().unwrap(), [0, 0, 0, 2, 2]);

    array.set_counts(vec![1, 1, 3]).unwrap();
    assert_eq!(array.starts(), [0, 1, 2]);
    assert_eq!(array.parents().unwrap(), [0, 1, 2, 2, 2]);
}

/// Test replacing content recomputes parents at the new length.
#[test]
fn test_set_content_refreshes_parents() {
    let mut array = FlatJagged::from_counts(vec![2, 1], FlatContent::from(&[1i64, 2, 3][..]))
        .unwrap();
    assert_eq!(array.parents().unwrap(), [0, 0, 1]);

    array.set_content(FlatContent::from(&[1i64, 2, 3, 4, 5][..]));
    // Layout unchanged, but the two new positions are unowned.
    assert_eq!(array.parents().unwrap(), [0, 0, 1, -1, -1]);
    assert_eq!(array.offsets().unwrap(), [0, 2, 3]);
}

/// Test a warm parents cache does not carry to differently-sized content.
#[test]
fn test_with_content_drops_stale_parents() {
    let array = FlatJagged::from_counts(vec![2, 1], FlatContent::from(&[1i64, 2, 3][..]))
        .unwrap();
    assert_eq!(array.parents().unwrap(), [0, 0, 1]);

    let view = array.with_content(FlatContent::from(&[9i64, 8, 7, 6, 5][..]));
    assert_eq!(view.parents().unwrap(), [0, 0, 1, -1, -1]);
    // Layout-only caches survive the swap.
    assert_eq!(view.counts().unwrap(), [2, 1]);
}

/// Test setting starts drops the offsets cache.
#[test]
fn test_set_starts_drops_offsets() {
    let mut array = three_rows();
    assert!(array.offsets().is_ok());

    array.set_starts(vec![0, 0, 3]).unwrap();
    assert!(matches!(array.offsets(), Err(JaggedError::NotContiguous)));
}

/// Test setting parents adopts the reconstructed layout.
#[test]
fn test_set_parents() {
    let mut array = three_rows();
    array.set_parents(vec![0, 0, 1, 1, 1]).unwrap();
    assert_eq!(array.counts().unwrap(), [2, 3]);
}

// ============================================================================
// Bounds Policy Tests
// ============================================================================

/// Test the lazy default tolerates out-of-bounds stops until read.
#[test]
fn test_lazy_bounds() {
    let array = FlatJagged::new(vec![0], vec![9], FlatContent::from(&[1i64, 2][..])).unwrap();
    // Structure is fine; only the read fails.
    assert_eq!(array.counts().unwrap(), [9]);
    assert!(matches!(
        array.row(0),
        Err(JaggedError::ContentOverrun { .. })
    ));
}

/// Test the eager policy rejects out-of-bounds stops at validation.
#[test]
fn test_eager_bounds() {
    let array = FlatJagged::new(vec![0], vec![9], FlatContent::from(&[1i64, 2][..]))
        .unwrap()
        .with_bounds_policy(Eager);
    assert!(matches!(
        array.validate(),
        Err(JaggedError::ContentOverrun { .. })
    ));
}

// ============================================================================
// View Tests
// ============================================================================

/// Test row access bounds checking.
#[test]
fn test_row_out_of_bounds() {
    let array = three_rows();
    assert!(matches!(
        array.row(3),
        Err(JaggedError::RowOutOfBounds { index: 3, rows: 3 })
    ));
}

/// Test iterating rows in index order.
#[test]
fn test_rows_iterator() {
    let array = three_rows();
    let rows: Vec<Vec<i64>> = array
        .rows()
        .map(|row| row.unwrap().into_vec())
        .collect();
    assert_eq!(rows, [vec![10, 20, 30], vec![], vec![40, 50]]);
}

/// Test row-local positions.
///
/// Verifies each owned position holds its offset within the row.
#[test]
fn test_local_index() {
    let array = three_rows();
    let local = array.local_index().unwrap();
    assert_eq!(local.row(0).unwrap().as_slice(), [0, 1, 2]);
    assert_eq!(local.row(2).unwrap().as_slice(), [0, 1]);
}

/// Test layout alignment comparison.
///
/// Verifies that empty rows do not participate in the comparison.
#[test]
fn test_aligned() {
    let a = three_rows();
    let b = three_rows();
    assert!(FlatJagged::aligned(&[&a, &b]).unwrap());

    let c = FlatJagged::from_counts(vec![2, 1, 2], FlatContent::from(&[0i64; 5][..])).unwrap();
    assert!(!FlatJagged::aligned(&[&a, &c]).unwrap());
}

/// Test structural equality compares layout and content.
#[test]
fn test_equality() {
    assert_eq!(three_rows(), three_rows());
    let other = FlatJagged::from_counts(vec![3, 0, 2], FlatContent::from(&[0i64; 5][..]))
        .unwrap();
    assert_ne!(three_rows(), other);
}
