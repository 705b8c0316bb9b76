//! # jagged — a ragged-array engine for Rust
//!
//! A `JaggedArray` represents a sequence of variable-length rows stored in
//! one flat content buffer. Each row is a half-open `[start, stop)` range
//! into the content; rows may be empty, may overlap, and may be stored out
//! of index order. Four equivalent boundary representations (starts/stops,
//! offsets, counts, parents) are maintained as memoized caches of one
//! canonical pair, and the engine provides indexing, broadcasting,
//! relayout, and per-row reductions over them.
//!
//! ## Quick Start
//!
//! ```rust
//! use jagged::prelude::*;
//!
//! // Three rows of lengths 3, 0, and 2 over one flat buffer.
//! let array = FlatJagged::<i64>::from_rows([vec![1, 2, 3], vec![], vec![4, 5]]);
//!
//! assert_eq!(array.counts()?, [3, 0, 2]);
//! assert_eq!(array.row(0)?.as_slice(), [1, 2, 3]);
//!
//! // Per-row reductions; empty rows yield the operator identity.
//! assert_eq!(array.sum()?, [6, 0, 9]);
//! assert_eq!(array.prod()?, [6, 1, 20]);
//! # Ok::<(), JaggedError>(())
//! ```
//!
//! ## Jagged fancy indexing
//!
//! An index that is itself jagged selects within each row; the result takes
//! the *index's* shape, and negative values wrap by each row's own length:
//!
//! ```rust
//! use jagged::prelude::*;
//!
//! let array = FlatJagged::<i64>::from_rows([vec![1, 2, 3], vec![4, 5]]);
//! let index = FlatJagged::<i64>::from_rows([vec![-1, 0], vec![1]]);
//!
//! let picked = array.get_jagged(&index)?;
//! assert_eq!(picked.row(0)?.as_slice(), [3, 1]);
//! assert_eq!(picked.row(1)?.as_slice(), [5]);
//! # Ok::<(), JaggedError>(())
//! ```
//!
//! ## Result and Error Handling
//!
//! Every fallible operation returns `Result<_, JaggedError>`. Structural
//! validation is lazy: it runs on the first structural read after a
//! mutation and is memoized until the next one. Whether stop values are
//! checked against the content length eagerly or only when the referenced
//! positions are actually read is controlled by [`prelude::BoundsPolicy`].
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments; disable default features to
//! remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! jagged = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - errors, index-model conversions, content capability.
mod primitives;

// Layer 2: Layout - the owning array, construction, and validation.
mod layout;

// Layer 3: Ops - indexing, relayout, broadcasting, and reductions.
mod ops;

// Layer 4: Bytes - byte-addressed fixed-width variant.
mod bytes;

// High-level public surface.
mod api;

// Standard jagged prelude.
pub mod prelude {
    pub use crate::api::{
        dispatch, dispatch_multi,
        BoundsPolicy::{self, Eager, Lazy},
        ByteJaggedArray, ByteSelection, ColumnSource, Content, DataType, FlatContent, FlatJagged,
        IndexKey, JaggedArray, JaggedError, Operand, RecordContent, ReduceIdentity, Selection,
        Slice,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing
// purposes. It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod layout {
        pub use crate::layout::*;
    }
    pub mod ops {
        pub use crate::ops::*;
    }
    pub mod bytes {
        pub use crate::bytes::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
