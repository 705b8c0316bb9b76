//! Layer 3: Ops
//!
//! # Purpose
//!
//! Everything in this layer consumes a finished `JaggedArray` and
//! produces new arrays or flat results. Nothing here mutates layout in
//! place; writes go through the layout layer's setters.
//!
//! Relayout is the workhorse: indexing, masking, and broadcasting all
//! reduce to "move content into a target layout" and share its
//! destination-indexed gather map. Reductions never materialize per-row
//! buffers; they walk the content once, segmented by offsets or keyed
//! by parents.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Bytes
//!   ↓
//! Layer 3: Ops ← You are here
//!   ↓
//! Layer 2: Layout
//!   ↓
//! Layer 1: Primitives
//! ```

/// Broadcasting and elementwise kernel dispatch.
pub mod broadcast;

/// Row and element selection, column writes.
pub mod index;

/// Per-row reductions and their arg-forms.
pub mod reduce;

/// Moving content into a target row layout.
pub mod relayout;
