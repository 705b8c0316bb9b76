//! Recursive type descriptors for jagged content.
//!
//! ## Purpose
//!
//! Downstream type algebra needs to know what a jagged array contains: an
//! unbounded number of rows whose element type is the content's own
//! descriptor. Descriptors are recursive (a jagged of jagged of records of
//! floats) and may share nodes structurally.
//!
//! ## Design notes
//!
//! * **Explicit graph**: Shared substructure is expressed with `Rc`; the
//!   `Display` impl detects revisited nodes by pointer identity and prints
//!   a back-reference instead of recursing forever on shared arms.
//! * **Descriptive only**: Descriptors carry no behavior; the type-algebra
//!   collaborator consumes them.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::rc::Rc;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::rc::Rc;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Descriptor Graph
// ============================================================================

/// Recursive type descriptor for jagged content.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    /// A flat buffer of one primitive element type.
    Primitive(&'static str),

    /// An unbounded number of variable-length rows of the inner type.
    Jagged(Rc<DataType>),

    /// Named columns, each of the paired type.
    Record(Vec<(String, Rc<DataType>)>),

    /// Byte-addressed rows of a fixed-width element type.
    Bytes {
        /// Element width in bytes.
        width: usize,
        /// Element type name.
        elem: &'static str,
    },
}

impl DataType {
    /// Wrap a descriptor in one jagged row dimension.
    pub fn jagged(inner: DataType) -> Self {
        Self::Jagged(Rc::new(inner))
    }

    /// Number of jagged row dimensions before a non-jagged element type.
    pub fn depth(&self) -> usize {
        match self {
            Self::Jagged(inner) => 1 + inner.depth(),
            _ => 0,
        }
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, seen: &mut Vec<*const DataType>) -> Result {
        match self {
            Self::Primitive(name) => write!(f, "{}", name),
            Self::Bytes { width, elem } => write!(f, "bytes[{}] -> {}", width, elem),
            Self::Jagged(inner) => {
                let ptr = Rc::as_ptr(inner);
                if seen.contains(&ptr) {
                    // Shared arm already printed on another path.
                    return write!(f, "[0, inf) -> <shared>");
                }
                seen.push(ptr);
                write!(f, "[0, inf) -> ")?;
                inner.fmt_node(f, seen)
            }
            Self::Record(columns) => {
                write!(f, "{{")?;
                for (i, (name, dtype)) in columns.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", name)?;
                    let ptr = Rc::as_ptr(dtype);
                    if seen.contains(&ptr) {
                        write!(f, "<shared>")?;
                    } else {
                        seen.push(ptr);
                        dtype.fmt_node(f, seen)?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut seen = Vec::new();
        self.fmt_node(f, &mut seen)
    }
}
