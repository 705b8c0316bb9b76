//! Tests for row and element selection.
//!
//! These tests verify the key-sequence lookup surface:
//! - Integer, slice, array, and mask row selection
//! - Per-row trailing integer keys with row-local negative wrapping
//! - Column projection on record content and its terminal rule
//! - Jagged-by-jagged integer and mask selection
//! - Column writes from jagged and per-row sources
//!
//! ## Test Organization
//!
//! 1. **Slices** - Python-style normalization
//! 2. **Row Selection** - Int, Slice, Array, Mask heads
//! 3. **Trailing Keys** - Per-row element picks
//! 4. **Columns** - Projection and terminal rule
//! 5. **Jagged Selection** - get_jagged, get_mask
//! 6. **Column Writes** - assign_column sources

use jagged::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn two_rows() -> FlatJagged<i64> {
    FlatJagged::from_rows([vec![1, 2, 3], vec![4, 5]])
}

fn record_rows() -> JaggedArray<RecordContent<f64>> {
    let content = RecordContent::new(vec![
        ("x".into(), vec![1.0, 2.0, 3.0]),
        ("y".into(), vec![4.0, 5.0, 6.0]),
    ])
    .unwrap();
    JaggedArray::from_counts(vec![2, 1], content).unwrap()
}

// ============================================================================
// Slice Tests
// ============================================================================

/// Test slice normalization clamps out-of-range bounds.
#[test]
fn test_slice_clamps() {
    assert_eq!(Slice::range(1, 100).positions(4).unwrap(), [1, 2, 3]);
}

/// Test negative slice bounds wrap.
#[test]
fn test_slice_negative_bounds() {
    assert_eq!(Slice::range(-3, -1).positions(4).unwrap(), [1, 2]);
}

/// Test a negative step walks backwards over the full range.
#[test]
fn test_slice_negative_step() {
    let slice = Slice {
        start: None,
        stop: None,
        step: Some(-1),
    };
    assert_eq!(slice.positions(3).unwrap(), [2, 1, 0]);
}

/// Test a zero step is rejected.
#[test]
fn test_slice_zero_step() {
    let slice = Slice {
        start: None,
        stop: None,
        step: Some(0),
    };
    assert!(matches!(slice.positions(3), Err(JaggedError::ZeroStep)));
}

// ============================================================================
// Row Selection Tests
// ============================================================================

/// Test an integer head consumes the row dimension.
#[test]
fn test_get_int() {
    match two_rows().get(&[IndexKey::Int(-1)]).unwrap() {
        Selection::Content(row) => assert_eq!(row.as_slice(), [4, 5]),
        Selection::Jagged(_) => panic!("Int head should yield flat content"),
    }
}

/// Test integer head bounds checking with the original index reported.
#[test]
fn test_get_int_out_of_bounds() {
    let res = two_rows().get(&[IndexKey::Int(-3)]);
    assert!(matches!(
        res,
        Err(JaggedError::RowOutOfBounds { index: -3, rows: 2 })
    ));
}

/// Test a slice head keeps the array jagged.
#[test]
fn test_get_slice() {
    match two_rows().get(&[IndexKey::Slice(Slice::range(1, 2))]).unwrap() {
        Selection::Jagged(sub) => {
            assert_eq!(sub.len(), 1);
            assert_eq!(sub.row(0).unwrap().as_slice(), [4, 5]);
        }
        Selection::Content(_) => panic!("Slice head should stay jagged"),
    }
}

/// Test an index-array head reorders and repeats rows.
#[test]
fn test_get_array() {
    match two_rows().get(&[IndexKey::Array(&[1, 0, 1])]).unwrap() {
        Selection::Jagged(sub) => {
            assert_eq!(sub.counts().unwrap(), [2, 3, 2]);
            assert_eq!(sub.row(1).unwrap().as_slice(), [1, 2, 3]);
        }
        Selection::Content(_) => panic!("Array head should stay jagged"),
    }
}

/// Test a row-mask head keeps only the flagged rows.
#[test]
fn test_get_row_mask() {
    match two_rows().get(&[IndexKey::Mask(&[false, true])]).unwrap() {
        Selection::Jagged(sub) => {
            assert_eq!(sub.len(), 1);
            assert_eq!(sub.row(0).unwrap().as_slice(), [4, 5]);
        }
        Selection::Content(_) => panic!("Mask head should stay jagged"),
    }
}

/// Test a row mask must match the row count.
#[test]
fn test_get_row_mask_length() {
    let res = two_rows().get(&[IndexKey::Mask(&[true])]);
    assert!(matches!(
        res,
        Err(JaggedError::MismatchedLengths {
            name: "mask",
            expected: 2,
            got: 1
        })
    ));
}

// ============================================================================
// Trailing Key Tests
// ============================================================================

/// Test a trailing integer after a row subset picks one element per row.
///
/// Verifies that −1 wraps against each row's own count.
#[test]
fn test_get_slice_then_int() {
    let keys = [IndexKey::Slice(Slice::all()), IndexKey::Int(-1)];
    match two_rows().get(&keys).unwrap() {
        Selection::Content(picked) => assert_eq!(picked.as_slice(), [3, 5]),
        Selection::Jagged(_) => panic!("Trailing Int should consume the element dimension"),
    }
}

/// Test a trailing integer that misses a short row.
#[test]
fn test_get_slice_then_int_out_of_bounds() {
    let keys = [IndexKey::Slice(Slice::all()), IndexKey::Int(2)];
    let res = two_rows().get(&keys);
    assert!(matches!(
        res,
        Err(JaggedError::ElementOutOfBounds {
            index: 2,
            min_count: 2
        })
    ));
}

/// Test a trailing integer after an integer head slices one element.
#[test]
fn test_get_int_then_int() {
    match two_rows().get(&[IndexKey::Int(0), IndexKey::Int(1)]).unwrap() {
        Selection::Content(one) => assert_eq!(one.as_slice(), [2]),
        Selection::Jagged(_) => panic!("Int/Int should yield flat content"),
    }
}

/// Test deeper tails are rejected.
#[test]
fn test_get_deep_tail_rejected() {
    let keys = [IndexKey::Int(0), IndexKey::Int(0), IndexKey::Int(0)];
    assert!(matches!(
        two_rows().get(&keys),
        Err(JaggedError::UnsupportedKey { .. })
    ));
}

// ============================================================================
// Column Tests
// ============================================================================

/// Test projecting one column of record content.
#[test]
fn test_get_field() {
    match record_rows().get(&[IndexKey::Field("x")]).unwrap() {
        Selection::Jagged(sub) => {
            assert_eq!(sub.row(0).unwrap().values("x").unwrap(), [1.0, 2.0]);
        }
        Selection::Content(_) => panic!("Field head should stay jagged"),
    }
}

/// Test a column key must be the final key.
#[test]
fn test_get_field_terminal() {
    let keys = [IndexKey::Field("x"), IndexKey::Int(0)];
    assert!(matches!(
        record_rows().get(&keys),
        Err(JaggedError::UnsupportedKey { .. })
    ));
}

/// Test projecting a missing column.
#[test]
fn test_get_missing_field() {
    assert!(matches!(
        record_rows().get(&[IndexKey::Field("nope")]),
        Err(JaggedError::NoSuchColumn(_))
    ));
}

/// Test flat content rejects column keys.
#[test]
fn test_flat_content_has_no_columns() {
    assert!(matches!(
        two_rows().get(&[IndexKey::Field("x")]),
        Err(JaggedError::UnsupportedColumns { .. })
    ));
}

// ============================================================================
// Jagged Selection Tests
// ============================================================================

/// Test jagged integer selection takes the index's shape.
///
/// Verifies negative values wrap against each row's own count.
#[test]
fn test_get_jagged() {
    let array = two_rows();
    let index = FlatJagged::from_rows([vec![-1, 0], vec![1]]);

    let picked = array.get_jagged(&index).unwrap();
    assert_eq!(picked.counts().unwrap(), [2, 1]);
    assert_eq!(picked.row(0).unwrap().as_slice(), [3, 1]);
    assert_eq!(picked.row(1).unwrap().as_slice(), [5]);
}

/// Test a jagged index value past its row's count.
#[test]
fn test_get_jagged_out_of_bounds() {
    let array = two_rows();
    let index = FlatJagged::from_rows([vec![0], vec![2]]);
    assert!(matches!(
        array.get_jagged(&index),
        Err(JaggedError::JaggedIndexOutOfBounds { value: 2, count: 2 })
    ));
}

/// Test a jagged index must have the array's row count.
#[test]
fn test_get_jagged_row_mismatch() {
    let array = two_rows();
    let index = FlatJagged::from_rows([vec![0]]);
    assert!(matches!(
        array.get_jagged(&index),
        Err(JaggedError::MismatchedRows { expected: 2, got: 1 })
    ));
}

/// Test jagged mask selection keeps flagged elements per row.
#[test]
fn test_get_jagged_mask() {
    let array = FlatJagged::from_rows([vec![1, 2], vec![3, 4]]);
    let mask = FlatJagged::from_rows([vec![true, false], vec![false, true]]);

    let kept = array.get_mask(&mask).unwrap();
    assert_eq!(kept.counts().unwrap(), [1, 1]);
    assert_eq!(kept.row(0).unwrap().as_slice(), [1]);
    assert_eq!(kept.row(1).unwrap().as_slice(), [4]);
}

/// Test each duplicated row is filtered by its own mask flags.
#[test]
fn test_get_jagged_mask_overlapping_rows() {
    // Both rows share the span [0, 2) of the content.
    let array = FlatJagged::new(vec![0, 0], vec![2, 2], vec![1i64, 2].into()).unwrap();
    let mask = FlatJagged::from_rows([vec![true, false], vec![false, true]]);

    let kept = array.get_mask(&mask).unwrap();
    assert_eq!(kept.row(0).unwrap().as_slice(), [1]);
    assert_eq!(kept.row(1).unwrap().as_slice(), [2]);
}

/// Test a jagged mask must have the array's per-row counts.
#[test]
fn test_get_jagged_mask_count_mismatch() {
    let array = FlatJagged::from_rows([vec![1, 2], vec![3, 4]]);
    let mask = FlatJagged::from_rows([vec![true], vec![false, true]]);
    assert!(matches!(
        array.get_mask(&mask),
        Err(JaggedError::LayoutCountMismatch { row: 0, .. })
    ));
}

/// Test masking an all-false row yields an empty row, not a missing one.
#[test]
fn test_get_jagged_mask_empty_row() {
    let array = FlatJagged::from_rows([vec![1, 2], vec![3]]);
    let mask = FlatJagged::from_rows([vec![false, false], vec![true]]);

    let kept = array.get_mask(&mask).unwrap();
    assert_eq!(kept.len(), 2);
    assert_eq!(kept.counts().unwrap(), [0, 1]);
}

// ============================================================================
// Column Write Tests
// ============================================================================

/// Test writing a column from per-row values spreads across each row.
#[test]
fn test_assign_column_per_row() {
    let mut array = record_rows();
    let per_row = RecordContent::single("z", vec![9.0, 8.0]);
    array.assign_column("z", ColumnSource::PerRow(&per_row)).unwrap();

    match array.get(&[IndexKey::Field("z")]).unwrap() {
        Selection::Jagged(sub) => {
            assert_eq!(sub.row(0).unwrap().values("z").unwrap(), [9.0, 9.0]);
            assert_eq!(sub.row(1).unwrap().values("z").unwrap(), [8.0]);
        }
        Selection::Content(_) => panic!("Field head should stay jagged"),
    }
}

/// Test writing a column from jagged values relaid to the destination.
#[test]
fn test_assign_column_jagged() {
    let mut array = record_rows();
    let values = JaggedArray::from_counts(
        vec![2, 1],
        RecordContent::single("w", vec![7.0, 6.0, 5.0]),
    )
    .unwrap();
    array
        .assign_column("w", ColumnSource::Jagged(&values))
        .unwrap();

    match array.get(&[IndexKey::Field("w")]).unwrap() {
        Selection::Jagged(sub) => {
            assert_eq!(sub.row(0).unwrap().values("w").unwrap(), [7.0, 6.0]);
        }
        Selection::Content(_) => panic!("Field head should stay jagged"),
    }
}

/// Test multi-column writes require paired names and sources.
#[test]
fn test_assign_columns_pairing() {
    let mut array = record_rows();
    let per_row = RecordContent::single("z", vec![9.0, 8.0]);
    let res = array.assign_columns(&["a", "b"], &[ColumnSource::PerRow(&per_row)]);
    assert!(matches!(
        res,
        Err(JaggedError::MismatchedLengths {
            name: "columns",
            expected: 2,
            got: 1
        })
    ));
}
