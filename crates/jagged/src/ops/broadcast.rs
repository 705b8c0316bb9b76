//! Broadcasting: spread per-row values across rows and run elementwise
//! kernels over mixed jagged, flat, and scalar operands.
//!
//! ## Purpose
//!
//! Two services: `broadcast_content` turns one value per row into one
//! value per element (via parents), and `dispatch` aligns a set of
//! operands to a shared layout so an elementwise kernel can run over
//! plain slices.
//!
//! ## Design notes
//!
//! * The first jagged operand fixes the layout. Every other operand is
//!   brought to that layout: aligned jagged arrays contribute their
//!   content directly, others are relaid row by row, per-row values are
//!   spread across their row, scalars fill everything.
//! * Aligned operand buffers all share one length, the highest stop of
//!   the template layout. Slots no row owns hold the element filler, so
//!   kernels may compute garbage there; the layout hides those slots.
//!
//! ## Edge cases
//!
//! * No jagged operand at all is an error: nothing fixes the layout.
//! * A kernel returning a buffer of the wrong length is an error,
//!   caught before the result is wrapped.

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
// Per-row broadcasting
// ============================================================================

impl<C: Content> JaggedArray<C> {
    /// Spread one value per row across that row's elements, keeping this
    /// array's layout. Unowned content slots get the filler value.
    pub fn broadcast_content<D: Content>(&self, values: &D) -> Result<JaggedArray<D>, JaggedError> {
        if values.len() != self.len() {
            return Err(JaggedError::MismatchedRows {
                expected: self.len(),
                got: values.len(),
            });
        }
        let spread = values.gather(self.parents()?)?;
        Ok(self.with_content(spread))
    }
}

impl<T: Clone + Default> JaggedArray<FlatContent<T>> {
    /// Spread one scalar per row across that row's elements.
    pub fn broadcast(&self, values: &[T]) -> Result<Self, JaggedError> {
        self.broadcast_content(&FlatContent::from(values))
    }

    /// Fill every element slot with one scalar, keeping the layout.
    pub fn broadcast_scalar(&self, value: T) -> Result<Self, JaggedError> {
        self.validate()?;
        Ok(self.with_content(FlatContent::new(vec![value; self.content().len()])))
    }
}

// ============================================================================
// Kernel dispatch
// ============================================================================

/// One operand of an elementwise kernel.
#[derive(Debug, Clone)]
pub enum Operand<'a, T> {
    /// A jagged operand; the first one fixes the result layout.
    Jagged(&'a JaggedArray<FlatContent<T>>),
    /// One value per row, spread across that row.
    Flat(&'a [T]),
    /// One value everywhere.
    Scalar(T),
}

/// Run an elementwise kernel over aligned operand buffers, wrapping the
/// output in the first jagged operand's layout.
pub fn dispatch<T, F>(
    operands: &[Operand<'_, T>],
    kernel: F,
) -> Result<JaggedArray<FlatContent<T>>, JaggedError>
where
    T: Clone + Default,
    F: FnOnce(&[&[T]]) -> Vec<T>,
{
    let (template, buffers) = align_operands(operands)?;
    let slices: Vec<&[T]> = buffers.iter().map(Vec::as_slice).collect();
    let out = kernel(&slices);
    wrap_output(template, out)
}

/// Like [`dispatch`], for kernels with several outputs; every output is
/// wrapped in the same layout.
pub fn dispatch_multi<T, F>(
    operands: &[Operand<'_, T>],
    kernel: F,
) -> Result<Vec<JaggedArray<FlatContent<T>>>, JaggedError>
where
    T: Clone + Default,
    F: FnOnce(&[&[T]]) -> Vec<Vec<T>>,
{
    let (template, buffers) = align_operands(operands)?;
    let slices: Vec<&[T]> = buffers.iter().map(Vec::as_slice).collect();
    kernel(&slices)
        .into_iter()
        .map(|out| wrap_output(template, out))
        .collect()
}

/// Bring every operand to the template layout as one buffer each.
fn align_operands<'a, T: Clone + Default>(
    operands: &[Operand<'a, T>],
) -> Result<(&'a JaggedArray<FlatContent<T>>, Vec<Vec<T>>), JaggedError> {
    let template = operands
        .iter()
        .find_map(|op| match op {
            Operand::Jagged(array) => Some(*array),
            _ => None,
        })
        .ok_or(JaggedError::MissingJaggedOperand)?;
    template.validate()?;

    let n = template.len();
    let buf_len = template.stops()[..n].iter().copied().max().unwrap_or(0) as usize;

    let mut buffers = Vec::with_capacity(operands.len());
    for op in operands {
        let buffer = match op {
            Operand::Jagged(array) => {
                let array = *array;
                if JaggedArray::aligned(&[template, array])? {
                    aligned_content(array, buf_len)?
                } else {
                    let relaid =
                        array.to_layout(Some(template.starts()), Some(&template.stops()[..n]))?;
                    aligned_content(&relaid, buf_len)?
                }
            }
            Operand::Flat(values) => {
                if values.len() != n {
                    return Err(JaggedError::MismatchedRows {
                        expected: n,
                        got: values.len(),
                    });
                }
                let mut spread = vec![T::default(); buf_len];
                for row in 0..n {
                    for pos in template.starts()[row]..template.stops()[row] {
                        spread[pos as usize] = values[row].clone();
                    }
                }
                spread
            }
            Operand::Scalar(value) => vec![value.clone(); buf_len],
        };
        buffers.push(buffer);
    }
    Ok((template, buffers))
}

/// An operand's content as an aligned buffer of the shared length.
fn aligned_content<T: Clone + Default>(
    array: &JaggedArray<FlatContent<T>>,
    buf_len: usize,
) -> Result<Vec<T>, JaggedError> {
    let content = array.content().as_slice();
    if content.len() < buf_len {
        return Err(JaggedError::ContentOverrun {
            position: buf_len as i64 - 1,
            content_len: content.len(),
        });
    }
    Ok(content[..buf_len].to_vec())
}

/// Check a kernel output's length and give it the template layout.
fn wrap_output<T: Clone + Default>(
    template: &JaggedArray<FlatContent<T>>,
    out: Vec<T>,
) -> Result<JaggedArray<FlatContent<T>>, JaggedError> {
    let n = template.len();
    let buf_len = template.stops()[..n].iter().copied().max().unwrap_or(0) as usize;
    if out.len() != buf_len {
        return Err(JaggedError::MismatchedOutputLength {
            expected: buf_len,
            got: out.len(),
        });
    }
    Ok(template.with_layout(
        template.starts().to_vec(),
        template.stops()[..n].to_vec(),
        FlatContent::new(out),
    ))
}
