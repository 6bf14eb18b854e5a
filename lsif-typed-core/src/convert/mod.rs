//! Typed index to LSIF graph conversion.
//!
//! # Architecture
//!
//! ```text
//! Index -> metadata -> pass 1 (global symbols) -> inverse relationships
//!       -> pass 2 (per document: local symbols, ranges, items) -> Vec<Element>
//! ```
//!
//! A [`Converter`] lives for exactly one call to [`convert_index`]. It owns the
//! [`GraphBuilder`] and every table built along the way, so two conversions
//! never share state and the same input always yields the same output.

pub mod document;
pub mod metadata;
pub mod moniker;
pub mod relationships;
pub mod resolver;

use crate::error::{ConversionError, Result};
use crate::graph::{Element, GraphBuilder};
use crate::options::ConversionOptions;
use crate::types::Index;
use moniker::PackageRegistry;
use relationships::InverseRelationships;
use resolver::SymbolTable;
use tracing::{debug, info};

/// Convert a fully decoded typed index into LSIF graph elements.
///
/// Fails without output when the metadata is missing or malformed, or when an
/// internal invariant is violated. Occurrences with malformed ranges and
/// references to unknown symbols are skipped.
pub fn convert_index(index: &Index, options: ConversionOptions) -> Result<Vec<Element>> {
    let metadata = index
        .metadata
        .as_ref()
        .ok_or(ConversionError::MissingMetadata)?;

    let mut converter = Converter::new(options);
    converter.emit_metadata(metadata)?;
    converter.register_global_symbols(index)?;
    converter.build_inverse_relationships(index);

    for (position, document) in index.documents.iter().enumerate() {
        converter.emit_document(&metadata.project_root, position, document)?;
    }

    let elements = converter.graph.into_elements();
    info!(
        documents = index.documents.len(),
        global_symbols = converter.globals.len(),
        packages = converter.packages.len(),
        elements = elements.len(),
        "Converted typed index"
    );
    Ok(elements)
}

/// State of a single conversion.
struct Converter<'a> {
    graph: GraphBuilder,
    /// Exported and imported symbols, shared by all documents.
    globals: SymbolTable,
    packages: PackageRegistry,
    relationships: InverseRelationships<'a>,
    options: ConversionOptions,
}

impl<'a> Converter<'a> {
    fn new(options: ConversionOptions) -> Self {
        debug!(?options, "Starting conversion");
        Self {
            graph: GraphBuilder::new(),
            globals: SymbolTable::default(),
            packages: PackageRegistry::default(),
            relationships: InverseRelationships::default(),
            options,
        }
    }

    fn build_inverse_relationships(&mut self, index: &'a Index) {
        if self.options.uses_inverse_relationships() {
            self.relationships = InverseRelationships::build(&index.documents);
        }
    }
}
