//! Layer 4: Bytes
//!
//! # Purpose
//!
//! Wraps a byte-addressed jagged layout around fixed-width plain-old-data
//! elements, decoding on read. Useful when row boundaries come from a
//! wire format or file that counts bytes, not elements.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Bytes ← You are here
//!   ↓
//! Layer 3: Ops
//!   ↓
//! Layer 2: Layout
//!   ↓
//! Layer 1: Primitives
//! ```

/// The byte-addressed jagged array.
pub mod array;
