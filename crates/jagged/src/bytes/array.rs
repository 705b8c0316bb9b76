//! Byte-addressed jagged rows over fixed-width elements.
//!
//! ## Purpose
//!
//! `ByteJaggedArray<T>` stores starts and stops in byte units over a raw
//! `u8` buffer and decodes `T` elements on read. Row selection reuses the
//! element array's machinery on the raw bytes; element selection converts
//! to an element-typed array first.
//!
//! ## Design notes
//!
//! * Byte/element unit conversion specializes the common widths 1, 2, 4,
//!   and 8 to shifts; other widths divide.
//! * Decoding uses unaligned reads, so rows may start at any byte. The
//!   only structural demand beyond the raw layout's own is that every
//!   row's byte span divides evenly by the element width.
//! * `to_jagged` decodes row by row into a compact element array and then
//!   relays out, so it accepts any raw layout, gaps and overlaps
//!   included.
//!
//! ## Non-goals
//!
//! * No record columns: byte rows carry a single element type.
//! * No in-place element writes; decode, modify, re-encode instead.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use bytemuck::Pod;
use core::any::type_name;
use core::cell::Cell;
use core::marker::PhantomData;
use core::mem::size_of;

// Internal dependencies
use crate::layout::array::JaggedArray;
use crate::ops::index::{IndexKey, Selection};
use crate::primitives::content::FlatContent;
use crate::primitives::dtype::DataType;
use crate::primitives::errors::JaggedError;

// ============================================================================
// ByteJaggedArray
// ============================================================================

/// Jagged rows whose starts and stops count bytes, decoded to `T`.
#[derive(Debug, Clone)]
pub struct ByteJaggedArray<T> {
    /// Byte-addressed layout over the raw buffer.
    raw: JaggedArray<FlatContent<u8>>,

    /// Memoized width-alignment validity.
    valid: Cell<bool>,

    _marker: PhantomData<T>,
}

impl<T> PartialEq for ByteJaggedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

/// What a byte-array lookup produced: a smaller byte array, or decoded
/// elements once the row dimension has been consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum ByteSelection<T> {
    /// Still jagged, still byte-addressed.
    Jagged(ByteJaggedArray<T>),
    /// Decoded elements.
    Elements(Vec<T>),
}

impl<T: Pod + Default> ByteJaggedArray<T> {
    /// Build from byte-addressed starts and stops over a raw buffer.
    pub fn new(starts: Vec<i64>, stops: Vec<i64>, bytes: Vec<u8>) -> Result<Self, JaggedError> {
        if size_of::<T>() == 0 {
            return Err(JaggedError::ZeroWidthElement);
        }
        Ok(Self {
            raw: JaggedArray::new(starts, stops, FlatContent::new(bytes))?,
            valid: Cell::new(false),
            _marker: PhantomData,
        })
    }

    /// Encode an element-typed jagged array into compact byte rows.
    pub fn from_jagged(array: &JaggedArray<FlatContent<T>>) -> Result<Self, JaggedError> {
        if size_of::<T>() == 0 {
            return Err(JaggedError::ZeroWidthElement);
        }
        let compact = array.to_compact()?;
        let n = compact.len();
        let starts = compact.starts().iter().map(|&s| Self::mul_width(s)).collect();
        let stops = compact.stops()[..n]
            .iter()
            .map(|&s| Self::mul_width(s))
            .collect();
        let bytes: Vec<u8> = bytemuck::cast_slice(compact.content().as_slice()).to_vec();
        Ok(Self {
            raw: JaggedArray::new(starts, stops, FlatContent::new(bytes))?,
            valid: Cell::new(false),
            _marker: PhantomData,
        })
    }

    /// Element width in bytes.
    #[inline]
    pub fn width() -> usize {
        size_of::<T>()
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the array has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Byte-addressed row starts.
    #[inline]
    pub fn byte_starts(&self) -> &[i64] {
        self.raw.starts()
    }

    /// Byte-addressed row stops.
    #[inline]
    pub fn byte_stops(&self) -> &[i64] {
        self.raw.stops()
    }

    /// The raw byte buffer.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.raw.content().as_slice()
    }

    fn div_width(value: i64) -> i64 {
        match size_of::<T>() {
            1 => value,
            2 => value >> 1,
            4 => value >> 2,
            8 => value >> 3,
            width => value / width as i64,
        }
    }

    fn mul_width(value: i64) -> i64 {
        match size_of::<T>() {
            1 => value,
            2 => value << 1,
            4 => value << 2,
            8 => value << 3,
            width => value * width as i64,
        }
    }

    /// Per-row counts in elements.
    pub fn counts(&self) -> Result<Vec<i64>, JaggedError> {
        self.validate()?;
        Ok(self.raw.counts()?.iter().map(|&c| Self::div_width(c)).collect())
    }

    /// Establish structural and width-alignment validity, memoized.
    pub fn validate(&self) -> Result<(), JaggedError> {
        if self.valid.get() {
            return Ok(());
        }
        self.raw.validate()?;
        let width = size_of::<T>() as i64;
        let counts = self.raw.counts()?;
        for (row, &span) in counts.iter().enumerate() {
            if span % width != 0 {
                return Err(JaggedError::MisalignedSpan {
                    row,
                    span,
                    width: size_of::<T>(),
                });
            }
        }
        self.valid.set(true);
        Ok(())
    }

    /// One row, decoded.
    pub fn row(&self, index: usize) -> Result<Vec<T>, JaggedError> {
        self.validate()?;
        let bytes = self.raw.row(index)?;
        Ok(bytes
            .as_slice()
            .chunks_exact(size_of::<T>())
            .map(bytemuck::pod_read_unaligned)
            .collect())
    }

    /// Decode into an element-typed jagged array, optionally into an
    /// explicit element-addressed layout; the default layout is compact.
    pub fn to_jagged(
        &self,
        starts: Option<&[i64]>,
        stops: Option<&[i64]>,
    ) -> Result<JaggedArray<FlatContent<T>>, JaggedError> {
        self.validate()?;
        let counts = self.counts()?;
        let mut content = Vec::with_capacity(counts.iter().sum::<i64>() as usize);
        for row in 0..self.len() {
            content.extend(self.row(row)?);
        }
        let compact = JaggedArray::from_counts(counts, FlatContent::new(content))?;
        compact.to_layout(starts, stops)
    }

    /// Apply a key sequence, outermost first; column keys are rejected
    /// because byte rows carry no columns.
    pub fn get(&self, keys: &[IndexKey<'_>]) -> Result<ByteSelection<T>, JaggedError> {
        let Some((head, tail)) = keys.split_first() else {
            return Ok(ByteSelection::Jagged(self.clone()));
        };
        self.validate()?;

        match *head {
            IndexKey::Field(_) | IndexKey::Fields(_) => {
                Err(JaggedError::UnsupportedColumns { kind: "byte rows" })
            }
            IndexKey::Int(at) => {
                let rows = self.len() as i64;
                let idx = if at < 0 { at + rows } else { at };
                if idx < 0 || idx >= rows {
                    return Err(JaggedError::RowOutOfBounds {
                        index: at,
                        rows: self.len(),
                    });
                }
                let elems = self.row(idx as usize)?;
                match tail {
                    [] => Ok(ByteSelection::Elements(elems)),
                    [IndexKey::Int(inner)] => {
                        let count = elems.len() as i64;
                        let pick = if *inner < 0 { *inner + count } else { *inner };
                        if pick < 0 || pick >= count {
                            return Err(JaggedError::ElementOutOfBounds {
                                index: *inner,
                                min_count: count,
                            });
                        }
                        Ok(ByteSelection::Elements(vec![elems[pick as usize]]))
                    }
                    _ => Err(JaggedError::UnsupportedKey {
                        reason: "a decoded row accepts at most one trailing integer key",
                    }),
                }
            }
            IndexKey::Slice(_) | IndexKey::Array(_) | IndexKey::Mask(_) => {
                let picked = match self.raw.get(&[*head])? {
                    Selection::Jagged(raw) => raw,
                    Selection::Content(_) => unreachable!("row keys keep the row dimension"),
                };
                let sub = Self {
                    raw: picked,
                    valid: Cell::new(false),
                    _marker: PhantomData,
                };
                match tail {
                    [] => Ok(ByteSelection::Jagged(sub)),
                    [IndexKey::Int(inner)] => {
                        // One element per picked row, byte-strided.
                        let counts = sub.counts()?;
                        let min_count = counts.iter().copied().min().unwrap_or(0);
                        let width = size_of::<T>();
                        let bytes = sub.raw.content().as_slice();
                        let mut out = Vec::with_capacity(counts.len());
                        for (row, &count) in counts.iter().enumerate() {
                            let pick = if *inner < 0 { *inner + count } else { *inner };
                            if pick < 0 || pick >= count {
                                return Err(JaggedError::ElementOutOfBounds {
                                    index: *inner,
                                    min_count,
                                });
                            }
                            let at = (sub.raw.starts()[row] + Self::mul_width(pick)) as usize;
                            if at + width > bytes.len() {
                                return Err(JaggedError::ContentOverrun {
                                    position: (at + width) as i64 - 1,
                                    content_len: bytes.len(),
                                });
                            }
                            out.push(bytemuck::pod_read_unaligned(&bytes[at..at + width]));
                        }
                        Ok(ByteSelection::Elements(out))
                    }
                    _ => Err(JaggedError::UnsupportedKey {
                        reason: "row subsets accept at most one trailing integer key",
                    }),
                }
            }
        }
    }

    /// Select inside every row with a jagged integer index; decodes
    /// first, then defers to the element array.
    pub fn get_jagged(
        &self,
        index: &JaggedArray<FlatContent<i64>>,
    ) -> Result<JaggedArray<FlatContent<T>>, JaggedError> {
        self.to_jagged(None, None)?.get_jagged(index)
    }

    /// Keep, per row, the elements where a jagged mask is true; decodes
    /// first, then defers to the element array.
    pub fn get_mask(
        &self,
        mask: &JaggedArray<FlatContent<bool>>,
    ) -> Result<JaggedArray<FlatContent<T>>, JaggedError> {
        self.to_jagged(None, None)?.get_mask(mask)
    }

    /// Type descriptor: one row dimension over byte-decoded elements.
    pub fn data_type(&self) -> DataType {
        DataType::jagged(DataType::Bytes {
            width: size_of::<T>(),
            elem: type_name::<T>(),
        })
    }
}
