//! LSIF Typed Core - converts typed code intelligence indexes into LSIF graphs.
//!
//! A typed index is symbol-oriented: every declaration has one global symbol
//! string, and documents list occurrences of those symbols. An LSIF graph is
//! vertex/edge oriented: navigation requests ("go to definition", "find
//! references", "find implementations", "hover") become short traversals that
//! start at a `range` vertex.
//!
//! # Features
//!
//! - **Two-pass symbol resolution**: global (exported/imported) symbols are
//!   registered once per index, local symbols once per document
//! - **Relationship aggregation**: implementation and reference relationships
//!   propagate across symbols and documents through an inverse index
//! - **Portable monikers**: parsed symbols become `moniker` and
//!   `packageInformation` vertices for cross-repository navigation
//! - **NDJSON export**: one LSIF element per line, in emission order
//!
//! # Usage
//!
//! ```no_run
//! use lsif_typed_core::{convert_index, exporter, ConversionOptions, Index};
//!
//! # fn run(index: Index) -> Result<(), Box<dyn std::error::Error>> {
//! let elements = convert_index(&index, ConversionOptions::default())?;
//! exporter::ndjson::write_ndjson(&elements, std::io::stdout().lock())?;
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod error;
pub mod exporter;
pub mod graph;
pub mod options;
pub mod symbol;
pub mod types;

pub use convert::convert_index;
pub use error::{ConversionError, Result};
pub use graph::{Edge, EdgeLabel, EdgeTargets, Element, ElementData, ElementKind, Id, Vertex};
pub use options::{ConversionOptions, ImplementationPolicy, RelationshipSource};
pub use types::{
    Document, Index, Metadata, Occurrence, Relationship, SymbolInformation, SymbolRole,
    TextEncoding, ToolInfo,
};

/// Get the version of lsif-typed-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
