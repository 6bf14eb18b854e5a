//! Document and range emission (pass 2).

use super::metadata::{document_uri, interpret_range};
use super::resolver::{lookup, BundleKind, SymbolTable};
use super::Converter;
use crate::error::Result;
use crate::graph::{Edge, EdgeLabel, Id, Vertex};
use crate::symbol::is_local_symbol;
use crate::types::{Document, Occurrence, SymbolInformation};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Per-document state, dropped once the document is emitted.
pub struct DocumentScope<'a> {
    /// Position of the document in the index.
    pub position: usize,
    /// ID of the `document` vertex.
    pub id: Id,
    pub locals: SymbolTable,
    declarations: HashMap<&'a str, &'a SymbolInformation>,
}

impl<'a> DocumentScope<'a> {
    fn new(position: usize, id: Id) -> Self {
        Self {
            position,
            id,
            locals: SymbolTable::default(),
            declarations: HashMap::new(),
        }
    }

    /// The symbol information this document declares for `symbol`.
    pub fn declaration(&self, symbol: &str) -> Option<&'a SymbolInformation> {
        self.declarations.get(symbol).copied()
    }
}

impl<'a> Converter<'a> {
    pub(super) fn emit_document(
        &mut self,
        project_root: &str,
        position: usize,
        document: &'a Document,
    ) -> Result<()> {
        let uri = document_uri(project_root, &document.relative_path);
        let id = self.graph.emit_vertex(Vertex::Document(uri));
        let mut scope = DocumentScope::new(position, id);

        for info in &document.symbols {
            scope.declarations.entry(info.symbol.as_str()).or_insert(info);
            if is_local_symbol(&info.symbol) && !scope.locals.contains(&info.symbol) {
                let bundle = self.emit_result_bundle(info, BundleKind::Local)?;
                scope.locals.insert(&info.symbol, bundle);
            }
            self.emit_implementation_monikers(info)?;
        }

        let mut ranges = Vec::with_capacity(document.occurrences.len());
        for occurrence in &document.occurrences {
            if let Some(range) = self.emit_occurrence(&mut scope, occurrence)? {
                ranges.push(range);
            }
        }

        debug!(
            path = %document.relative_path,
            ranges = ranges.len(),
            locals = scope.locals.len(),
            "Emitted document"
        );
        if ranges.is_empty() {
            return Ok(());
        }
        self.graph
            .emit_edge(Edge::many(EdgeLabel::Contains, id, ranges))?;
        Ok(())
    }

    /// Emit the range of one occurrence and link it to its symbol. Returns
    /// `None` when the range is malformed and the occurrence was dropped.
    fn emit_occurrence(
        &mut self,
        scope: &mut DocumentScope<'a>,
        occurrence: &'a Occurrence,
    ) -> Result<Option<Id>> {
        let range = match interpret_range(&occurrence.range) {
            Ok(range) => range,
            Err(err) => {
                debug!(symbol = %occurrence.symbol, error = %err, "Skipping occurrence");
                return Ok(None);
            }
        };
        let range_id = self.graph.emit_vertex(Vertex::Range(range));

        let Some(bundle) = lookup(&occurrence.symbol, &self.globals, &scope.locals).copied() else {
            trace!(symbol = %occurrence.symbol, "No symbol information for occurrence");
            return Ok(Some(range_id));
        };
        self.graph
            .emit_edge(Edge::one(EdgeLabel::Next, range_id, bundle.result_set))?;

        match bundle.definition_result {
            Some(definition_result) if occurrence.is_definition() => {
                self.graph
                    .emit_edge(Edge::item(definition_result, vec![range_id], scope.id))?;
                self.aggregate_relationships(scope, &occurrence.symbol, bundle, range_id)?;
            }
            _ => {
                self.graph
                    .emit_edge(Edge::item(bundle.reference_result, vec![range_id], scope.id))?;
            }
        }
        Ok(Some(range_id))
    }
}
