//! Error types for lsif-typed-core.

use crate::graph::{EdgeLabel, Id};
use crate::types::TextEncoding;
use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors that can occur while converting a typed index.
///
/// Only [`ConversionError::InvalidRange`] is recoverable: the converter skips
/// the offending occurrence and keeps going. Every other variant aborts the
/// whole conversion and no partial output is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The index has no metadata block.
    #[error("Index metadata is missing")]
    MissingMetadata,

    /// The metadata block has no tool information.
    #[error("Index metadata is missing tool info")]
    MissingToolInfo,

    /// The text encoding is neither UTF-8 nor UTF-16.
    #[error("Unsupported text encoding {encoding:?}: expected UTF-8 or UTF-16")]
    UnsupportedEncoding {
        /// Encoding found in the metadata.
        encoding: TextEncoding,
    },

    /// An occurrence range does not have 3 or 4 elements.
    #[error("Invalid range {range:?}: expected 3 or 4 elements, got {}", range.len())]
    InvalidRange {
        /// The rejected range array.
        range: Vec<i32>,
    },

    /// An edge was constructed without any target vertex.
    #[error("Invariant violation: `{label}` edge from {out_v} has no targets")]
    EmptyEdge {
        /// Label of the rejected edge.
        label: EdgeLabel,
        /// Out-vertex of the rejected edge.
        out_v: Id,
    },
}

impl ConversionError {
    /// Whether this error must abort the conversion.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConversionError::InvalidRange { .. })
    }
}
