//! Error types for jagged-array operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while building,
//! validating, indexing, relaying out, or reducing jagged arrays.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (e.g. the row index
//!   and the content length that was overrun).
//! * **Synchronous**: Every error is raised at the point of detection; the
//!   engine never retries, recovers, or suppresses a failure internally.
//! * **No-std**: Supports `no_std` environments by using `alloc` for
//!   dynamic messages.
//!
//! ## Key concepts
//!
//! The variants fall into four classes:
//!
//! 1. **Shape errors**: paired index arrays with incompatible lengths.
//! 2. **Value errors**: negative or non-monotonic index values, mismatched
//!    collaborator lengths, misaligned byte spans.
//! 3. **Bounds errors**: an index resolving outside `[0, count)` for its
//!    row after normalization, or a read past the content length.
//! 4. **Unsupported operations**: index or layout shapes outside the
//!    documented cases.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for jagged-array operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JaggedError {
    // ------------------------------------------------------------------
    // Shape errors
    // ------------------------------------------------------------------
    /// `starts` may not have more elements than `stops`.
    StartsLongerThanStops {
        /// Number of elements in `starts`.
        starts: usize,
        /// Number of elements in `stops`.
        stops: usize,
    },

    // ------------------------------------------------------------------
    // Value errors
    // ------------------------------------------------------------------
    /// An index array contains a negative value where none is allowed.
    NegativeValue {
        /// Which array held the value (`"starts"`, `"stops"`, ...).
        name: &'static str,
        /// The offending value.
        value: i64,
    },

    /// Offsets must be non-decreasing.
    NonMonotonicOffsets {
        /// First position where `offsets[position + 1] < offsets[position]`.
        position: usize,
    },

    /// Offsets must contain at least one boundary.
    EmptyOffsets,

    /// A row's stop precedes its start, which would give it a negative count.
    InvertedRow {
        /// The offending row.
        row: usize,
        /// The row's start.
        start: i64,
        /// The row's stop.
        stop: i64,
    },

    /// Two paired collaborator arrays differ in length.
    MismatchedLengths {
        /// What was being paired (`"parents"`, `"group keys"`, `"columns"`, ...).
        name: &'static str,
        /// Required length.
        expected: usize,
        /// Provided length.
        got: usize,
    },

    /// An operand's row count does not match the jagged array it aligns with.
    MismatchedRows {
        /// Row count of the array being aligned against.
        expected: usize,
        /// Row count of the operand.
        got: usize,
    },

    /// The current rows are not contiguous and ordered, so no single
    /// offsets array can represent them.
    NotContiguous,

    /// A row's byte span is not an exact multiple of the element width.
    MisalignedSpan {
        /// The offending row.
        row: usize,
        /// The row's span in bytes.
        span: i64,
        /// The element width in bytes.
        width: usize,
    },

    /// Zero-sized element types cannot address a byte buffer.
    ZeroWidthElement,

    /// A slice key may not use step 0.
    ZeroStep,

    /// Elementwise dispatch needs at least one jagged operand to fix the
    /// common layout.
    MissingJaggedOperand,

    /// An elementwise operator returned content of the wrong length.
    MismatchedOutputLength {
        /// Length of the aligned input content.
        expected: usize,
        /// Length the operator produced.
        got: usize,
    },

    /// The named column does not exist in the content.
    NoSuchColumn(String),

    // ------------------------------------------------------------------
    // Bounds errors
    // ------------------------------------------------------------------
    /// A row index resolved outside `[0, rows)` after normalization.
    RowOutOfBounds {
        /// The index as given (before negative wrapping).
        index: i64,
        /// Number of rows.
        rows: usize,
    },

    /// A per-row element index resolved outside `[0, count)` for some row.
    ElementOutOfBounds {
        /// The index as given (before row-local negative wrapping).
        index: i64,
        /// The minimum row length along the indexed axis.
        min_count: i64,
    },

    /// A jagged integer index contains an out-of-range value for its row.
    JaggedIndexOutOfBounds {
        /// The index value as given.
        value: i64,
        /// The count of the row it indexes into.
        count: i64,
    },

    /// A referenced position lies beyond the content length.
    ContentOverrun {
        /// The position that was read.
        position: i64,
        /// Length of the content buffer.
        content_len: usize,
    },

    /// A row's contents do not fit before the next row's target start.
    LayoutMisfit {
        /// The offending row.
        row: usize,
    },

    /// A target row's length differs from the current row's count.
    LayoutCountMismatch {
        /// The offending row.
        row: usize,
        /// The row's current count.
        current: i64,
        /// The target row's length.
        target: i64,
    },

    // ------------------------------------------------------------------
    // Unsupported operations
    // ------------------------------------------------------------------
    /// The content kind has no named columns.
    UnsupportedColumns {
        /// The content kind (`"flat content"`, `"byte rows"`, ...).
        kind: &'static str,
    },

    /// The index key combination is outside the documented cases.
    UnsupportedKey {
        /// Why the key was rejected.
        reason: &'static str,
    },
}

impl Display for JaggedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::StartsLongerThanStops { starts, stops } => write!(
                f,
                "starts must not have more elements ({}) than stops ({})",
                starts, stops
            ),
            Self::NegativeValue { name, value } => {
                write!(f, "{} must be non-negative, got {}", name, value)
            }
            Self::NonMonotonicOffsets { position } => {
                write!(f, "offsets must be non-decreasing (violated at {})", position)
            }
            Self::EmptyOffsets => write!(f, "offsets must contain at least one boundary"),
            Self::InvertedRow { row, start, stop } => write!(
                f,
                "row {} has stop {} before start {} (negative count)",
                row, stop, start
            ),
            Self::MismatchedLengths {
                name,
                expected,
                got,
            } => write!(
                f,
                "{} must have length {}, got {}",
                name, expected, got
            ),
            Self::MismatchedRows { expected, got } => write!(
                f,
                "operand has {} rows but the jagged array has {}",
                got, expected
            ),
            Self::NotContiguous => write!(
                f,
                "starts and stops are not compatible with a single offsets array"
            ),
            Self::MisalignedSpan { row, span, width } => write!(
                f,
                "row {} spans {} bytes, not a multiple of the element width {}",
                row, span, width
            ),
            Self::ZeroWidthElement => {
                write!(f, "zero-sized element types cannot address a byte buffer")
            }
            Self::ZeroStep => write!(f, "slice step cannot be zero"),
            Self::MissingJaggedOperand => write!(
                f,
                "elementwise dispatch requires at least one jagged operand"
            ),
            Self::MismatchedOutputLength { expected, got } => write!(
                f,
                "elementwise operator returned {} values for {} aligned positions",
                got, expected
            ),
            Self::NoSuchColumn(name) => write!(f, "no column named {:?}", name),
            Self::RowOutOfBounds { index, rows } => {
                write!(f, "row index {} is out of bounds for {} rows", index, rows)
            }
            Self::ElementOutOfBounds { index, min_count } => write!(
                f,
                "index {} is out of bounds for jagged min size {}",
                index, min_count
            ),
            Self::JaggedIndexOutOfBounds { value, count } => write!(
                f,
                "jagged index value {} is out of bounds for a row of count {}",
                value, count
            ),
            Self::ContentOverrun {
                position,
                content_len,
            } => write!(
                f,
                "position {} is beyond the length of the content ({})",
                position, content_len
            ),
            Self::LayoutMisfit { row } => write!(
                f,
                "row {} does not fit before the next row's target start",
                row
            ),
            Self::LayoutCountMismatch {
                row,
                current,
                target,
            } => write!(
                f,
                "target row {} has length {} but the current count is {}",
                row, target, current
            ),
            Self::UnsupportedColumns { kind } => {
                write!(f, "{} cannot be indexed by column name", kind)
            }
            Self::UnsupportedKey { reason } => write!(f, "unsupported index key: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl Error for JaggedError {}
