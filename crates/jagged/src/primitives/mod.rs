//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive abstractions used throughout the
//! crate: shared error types, the four-representation index model, the
//! content capability interface, and recursive type descriptors. It has
//! zero internal dependencies within the crate.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Bytes
//!   ↓
//! Layer 3: Ops
//!   ↓
//! Layer 2: Layout
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Row-boundary representation conversions.
pub mod index;

/// Content capability interface and flat/record implementations.
pub mod content;

/// Recursive type descriptors.
pub mod dtype;
