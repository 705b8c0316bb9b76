//! Structural validation for jagged layouts.
//!
//! ## Purpose
//!
//! This module provides the validation functions for starts/stops pairs,
//! offsets arrays, and content-length bounds, plus the policy that decides
//! *when* the content-length check runs.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Lazy by default**: Structural validity is only established on the
//!   first structural read after a mutation and memoized until the next.
//!
//! ## Key concepts
//!
//! * **BoundsPolicy**: whether stop values are checked against the content
//!   length during validation (`Eager`) or only when the referenced
//!   positions are actually read (`Lazy`, the default).
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or repair invalid layouts.

// Internal dependencies
use crate::primitives::errors::JaggedError;

// ============================================================================
// Bounds Policy
// ============================================================================

/// When stop values are checked against the content length.
///
/// The lazy policy accepts layouts whose stops reach past the content, as
/// long as the offending positions are never read; the eager policy
/// rejects them at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Check only when a referenced position is actually read.
    #[default]
    Lazy,
    /// Check the maximum stop during structural validation.
    Eager,
}

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for jagged layouts.
///
/// Provides static methods returning `Result<(), JaggedError>` that fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    /// Validate that an index array holds no negative values.
    pub fn validate_non_negative(name: &'static str, values: &[i64]) -> Result<(), JaggedError> {
        for &value in values {
            if value < 0 {
                return Err(JaggedError::NegativeValue { name, value });
            }
        }
        Ok(())
    }

    /// Validate an offsets array: at least one boundary, non-negative,
    /// non-decreasing.
    pub fn validate_offsets(offsets: &[i64]) -> Result<(), JaggedError> {
        if offsets.is_empty() {
            return Err(JaggedError::EmptyOffsets);
        }
        Self::validate_non_negative("offsets", offsets)?;
        for position in 0..offsets.len() - 1 {
            if offsets[position + 1] < offsets[position] {
                return Err(JaggedError::NonMonotonicOffsets { position });
            }
        }
        Ok(())
    }

    /// Validate a starts/stops pair: starts must not outnumber stops, and
    /// no row may have its stop before its start.
    pub fn validate_starts_stops(starts: &[i64], stops: &[i64]) -> Result<(), JaggedError> {
        if starts.len() > stops.len() {
            return Err(JaggedError::StartsLongerThanStops {
                starts: starts.len(),
                stops: stops.len(),
            });
        }
        for row in 0..starts.len() {
            if stops[row] < starts[row] {
                return Err(JaggedError::InvertedRow {
                    row,
                    start: starts[row],
                    stop: stops[row],
                });
            }
        }
        Ok(())
    }

    /// Validate that every referenced position fits inside the content.
    pub fn validate_content_bounds(
        starts: &[i64],
        stops: &[i64],
        content_len: usize,
    ) -> Result<(), JaggedError> {
        for row in 0..starts.len() {
            // Empty rows may sit at any boundary, including the end.
            if stops[row] > starts[row] && stops[row] > content_len as i64 {
                return Err(JaggedError::ContentOverrun {
                    position: stops[row],
                    content_len,
                });
            }
        }
        Ok(())
    }
}
