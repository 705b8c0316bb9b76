//! High-level public surface.
//!
//! ## Purpose
//!
//! One flat namespace over the layered internals: the array types, the
//! capability trait and its content carriers, the lookup and broadcast
//! vocabulary, and the error type. `jagged::prelude` re-exports this
//! module wholesale.
//!
//! ## Design notes
//!
//! * `FlatJagged<T>` is the everyday case, a jagged array over a flat
//!   primitive buffer; the alias keeps signatures readable.
//! * Nothing here adds behavior; every item lives in its layer and is
//!   only renamed into view.

// Layer 1: primitives
pub use crate::primitives::content::{Content, FlatContent, RecordContent};
pub use crate::primitives::dtype::DataType;
pub use crate::primitives::errors::JaggedError;

// Layer 2: layout
pub use crate::layout::array::JaggedArray;
pub use crate::layout::validate::BoundsPolicy;

// Layer 3: ops
pub use crate::ops::broadcast::{dispatch, dispatch_multi, Operand};
pub use crate::ops::index::{ColumnSource, IndexKey, Selection, Slice};
pub use crate::ops::reduce::ReduceIdentity;

// Layer 4: bytes
pub use crate::bytes::array::{ByteJaggedArray, ByteSelection};

/// A jagged array over a flat buffer of primitive elements.
pub type FlatJagged<T> = JaggedArray<FlatContent<T>>;
