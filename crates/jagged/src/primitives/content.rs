//! Content capability interface and its flat/record implementations.
//!
//! ## Purpose
//!
//! A jagged array does not care what its content *is*, only what it can
//! *do*: report a length, hand out a sliced copy, gather positions into a
//! new buffer, and read or write named columns. This module defines that
//! capability as the [`Content`] trait and implements it for a flat buffer
//! and a record of named columns; the jagged array type implements it too,
//! which is what makes nesting work.
//!
//! ## Design notes
//!
//! * **Capability, not inheritance**: nested structure is reached through
//!   the trait seam, never by special-casing content kinds.
//! * **Gather with fill**: `gather` accepts −1 entries and fills them with
//!   the content kind's filler element. Broadcast and relayout rely on
//!   this for positions owned by no row; such positions are never read
//!   downstream.
//! * **Deferred bounds**: `slice` and `gather` are where lazily-deferred
//!   content-length violations finally surface, as `ContentOverrun`.
//! * **Owned results**: selections return owned buffers. Aliasing a buffer
//!   between views is expressed in Rust by sharing the array itself, not
//!   by hidden pointer aliasing.
//!
//! ## Invariants
//!
//! * `slice(a, b)` requires `a <= b <= len`.
//! * Every column of a record has the record's length.
//!
//! ## Non-goals
//!
//! * No elementwise arithmetic; that is the dispatch collaborator's job.
//! * No masked/indexed/union/virtual content kinds.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::any::type_name;
use core::ops::{Deref, DerefMut};

// Internal dependencies
use crate::primitives::dtype::DataType;
use crate::primitives::errors::JaggedError;

#[cfg(not(feature = "std"))]
use alloc::rc::Rc;
#[cfg(feature = "std")]
use std::rc::Rc;

// ============================================================================
// Capability Trait
// ============================================================================

/// Capability interface over a jagged array's backing content.
///
/// Implemented by [`FlatContent`] (flat buffer), [`RecordContent`] (record
/// of named columns), and by the jagged array itself (nested rows).
pub trait Content: Sized + Clone {
    /// Number of addressable items.
    fn len(&self) -> usize;

    /// Whether the content holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the items in `[start, stop)`.
    ///
    /// Surfaces `ContentOverrun` when the range reaches past the length;
    /// this is where lazily-deferred bounds violations are detected.
    fn slice(&self, start: usize, stop: usize) -> Result<Self, JaggedError>;

    /// New content with item `k` taken from position `index[k]`.
    ///
    /// Entries of −1 yield the content kind's filler element; any other
    /// out-of-range entry is a `ContentOverrun`.
    fn gather(&self, index: &[i64]) -> Result<Self, JaggedError>;

    /// Project the named column, keeping this content's length.
    fn column(&self, name: &str) -> Result<Self, JaggedError>;

    /// Project several named columns at once.
    fn select_columns(&self, names: &[&str]) -> Result<Self, JaggedError>;

    /// Replace or insert the named column from a single-column value of
    /// the same length.
    fn set_column(&mut self, name: &str, values: &Self) -> Result<(), JaggedError>;

    /// Recursive type descriptor for this content.
    fn data_type(&self) -> DataType;
}

// ============================================================================
// FlatContent - Flat Element Buffer
// ============================================================================

/// A flat buffer of elements, the leaf content kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatContent<T>(Vec<T>);

impl<T> FlatContent<T> {
    /// Wrap a vector of elements.
    #[inline]
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    /// View the items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Consume into the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for FlatContent<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for FlatContent<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<Vec<T>> for FlatContent<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T: Clone> From<&[T]> for FlatContent<T> {
    fn from(items: &[T]) -> Self {
        Self(items.to_vec())
    }
}

impl<T: Clone + Default> Content for FlatContent<T> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn slice(&self, start: usize, stop: usize) -> Result<Self, JaggedError> {
        check_span(start, stop, self.0.len())?;
        Ok(Self(self.0[start..stop].to_vec()))
    }

    fn gather(&self, index: &[i64]) -> Result<Self, JaggedError> {
        let mut items = Vec::with_capacity(index.len());
        for &position in index {
            if position < 0 {
                items.push(T::default());
            } else if (position as usize) < self.0.len() {
                items.push(self.0[position as usize].clone());
            } else {
                return Err(JaggedError::ContentOverrun {
                    position,
                    content_len: self.0.len(),
                });
            }
        }
        Ok(Self(items))
    }

    fn column(&self, _name: &str) -> Result<Self, JaggedError> {
        Err(JaggedError::UnsupportedColumns {
            kind: "flat content",
        })
    }

    fn select_columns(&self, _names: &[&str]) -> Result<Self, JaggedError> {
        Err(JaggedError::UnsupportedColumns {
            kind: "flat content",
        })
    }

    fn set_column(&mut self, _name: &str, _values: &Self) -> Result<(), JaggedError> {
        Err(JaggedError::UnsupportedColumns {
            kind: "flat content",
        })
    }

    fn data_type(&self) -> DataType {
        DataType::Primitive(type_name::<T>())
    }
}

// ============================================================================
// RecordContent - Record of Named Columns
// ============================================================================

/// A record of equal-length named columns over one element type.
///
/// Column projection returns a single-column record, so projections stay
/// within the `Content` capability; the paired jagged array keeps its
/// starts and stops untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordContent<T> {
    columns: Vec<(String, Vec<T>)>,
    len: usize,
}

impl<T> RecordContent<T> {
    /// Build a record from named columns; all columns must share a length.
    pub fn new(columns: Vec<(String, Vec<T>)>) -> Result<Self, JaggedError> {
        let len = columns.first().map(|(_, col)| col.len()).unwrap_or(0);
        for (_, col) in &columns {
            if col.len() != len {
                return Err(JaggedError::MismatchedLengths {
                    name: "columns",
                    expected: len,
                    got: col.len(),
                });
            }
        }
        Ok(Self { columns, len })
    }

    /// Build a single-column record.
    pub fn single(name: &str, values: Vec<T>) -> Self {
        let len = values.len();
        Self {
            columns: vec![(String::from(name), values)],
            len,
        }
    }

    /// Column names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// The values of one column, if present.
    pub fn values(&self, name: &str) -> Option<&[T]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, col)| col.as_slice())
    }
}

impl<T: Clone + Default> Content for RecordContent<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn slice(&self, start: usize, stop: usize) -> Result<Self, JaggedError> {
        check_span(start, stop, self.len)?;
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| (name.clone(), col[start..stop].to_vec()))
            .collect();
        Ok(Self {
            columns,
            len: stop - start,
        })
    }

    fn gather(&self, index: &[i64]) -> Result<Self, JaggedError> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for (name, col) in &self.columns {
            let mut items = Vec::with_capacity(index.len());
            for &position in index {
                if position < 0 {
                    items.push(T::default());
                } else if (position as usize) < col.len() {
                    items.push(col[position as usize].clone());
                } else {
                    return Err(JaggedError::ContentOverrun {
                        position,
                        content_len: col.len(),
                    });
                }
            }
            columns.push((name.clone(), items));
        }
        Ok(Self {
            columns,
            len: index.len(),
        })
    }

    fn column(&self, name: &str) -> Result<Self, JaggedError> {
        let values = self
            .values(name)
            .ok_or_else(|| JaggedError::NoSuchColumn(String::from(name)))?;
        Ok(Self::single(name, values.to_vec()))
    }

    fn select_columns(&self, names: &[&str]) -> Result<Self, JaggedError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let values = self
                .values(name)
                .ok_or_else(|| JaggedError::NoSuchColumn(String::from(*name)))?;
            columns.push((String::from(*name), values.to_vec()));
        }
        Ok(Self {
            columns,
            len: self.len,
        })
    }

    fn set_column(&mut self, name: &str, values: &Self) -> Result<(), JaggedError> {
        if values.columns.len() != 1 {
            return Err(JaggedError::MismatchedLengths {
                name: "columns",
                expected: 1,
                got: values.columns.len(),
            });
        }
        let incoming = &values.columns[0].1;
        if self.columns.is_empty() {
            self.len = incoming.len();
        } else if incoming.len() != self.len {
            return Err(JaggedError::MismatchedLengths {
                name: "column values",
                expected: self.len,
                got: incoming.len(),
            });
        }
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, col)) => *col = incoming.clone(),
            None => self.columns.push((String::from(name), incoming.clone())),
        }
        Ok(())
    }

    fn data_type(&self) -> DataType {
        DataType::Record(
            self.columns
                .iter()
                .map(|(name, _)| (name.clone(), Rc::new(DataType::Primitive(type_name::<T>()))))
                .collect(),
        )
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Reject spans reaching past the content length.
#[inline]
pub(crate) fn check_span(start: usize, stop: usize, len: usize) -> Result<(), JaggedError> {
    if start > stop || stop > len {
        return Err(JaggedError::ContentOverrun {
            position: stop as i64,
            content_len: len,
        });
    }
    Ok(())
}
