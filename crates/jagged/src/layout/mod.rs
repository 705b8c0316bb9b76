//! Layer 2: Layout
//!
//! # Purpose
//!
//! This layer owns the jagged array itself: the canonical `(starts, stops)`
//! pair, the flat content, the memoized derived representations, and the
//! lazy structural validation that guards them.
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
//! Layer 2: Layout ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// The jagged array type and its representation caches.
pub mod array;

/// Structural validation and the bounds-check policy.
pub mod validate;
