//! Symbol resolution.
//!
//! Every registered symbol owns a [`ResultBundle`]: the `resultSet` hub and
//! the result vertices hanging off it. Global symbols are registered once in
//! pass 1 and live for the whole conversion. Local symbols are registered per
//! document in pass 2 and dropped with the document.

use super::metadata::hover_markdown;
use super::moniker::emit_moniker;
use super::Converter;
use crate::error::Result;
use crate::graph::{Edge, EdgeLabel, GraphBuilder, Id, MonikerKind, Vertex};
use crate::options::ImplementationPolicy;
use crate::symbol::{is_global_symbol, is_local_symbol};
use crate::types::{Index, SymbolInformation};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Where a bundle's symbol comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleKind {
    /// Declared by a document of this index.
    Export,
    /// Declared by another package.
    Import,
    /// Scoped to one document.
    Local,
}

impl BundleKind {
    pub fn is_global(&self) -> bool {
        !matches!(self, BundleKind::Local)
    }

    pub fn moniker_kind(&self) -> Option<MonikerKind> {
        match self {
            BundleKind::Export => Some(MonikerKind::Export),
            BundleKind::Import => Some(MonikerKind::Import),
            BundleKind::Local => None,
        }
    }
}

/// Graph IDs owned by one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultBundle {
    pub kind: BundleKind,
    pub result_set: Id,
    /// Only exported symbols have definitions in this index.
    pub definition_result: Option<Id>,
    pub reference_result: Id,
    pub implementation_result: Option<Id>,
    pub hover_result: Id,
}

impl ResultBundle {
    /// Declared by another package, so defined outside this index.
    pub fn is_imported(&self) -> bool {
        self.kind == BundleKind::Import
    }

    /// Return the `implementationResult`, creating it on first use.
    ///
    /// Local symbols never get one and yield `None`.
    pub(crate) fn ensure_implementation_result(
        &mut self,
        graph: &mut GraphBuilder,
    ) -> Result<Option<Id>> {
        if let Some(id) = self.implementation_result {
            return Ok(Some(id));
        }
        if !self.kind.is_global() {
            return Ok(None);
        }
        let id = emit_implementation_result(graph, self.result_set)?;
        self.implementation_result = Some(id);
        Ok(Some(id))
    }
}

/// Symbol string to bundle, for one scope.
#[derive(Debug, Default)]
pub struct SymbolTable {
    bundles: HashMap<String, ResultBundle>,
}

impl SymbolTable {
    pub fn get(&self, symbol: &str) -> Option<&ResultBundle> {
        self.bundles.get(symbol)
    }

    pub fn get_mut(&mut self, symbol: &str) -> Option<&mut ResultBundle> {
        self.bundles.get_mut(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.bundles.contains_key(symbol)
    }

    pub fn insert(&mut self, symbol: &str, bundle: ResultBundle) {
        self.bundles.insert(symbol.to_string(), bundle);
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// Pick the table a symbol reference resolves in: local symbols in the
/// current document, everything else globally.
pub fn lookup<'t>(
    symbol: &str,
    globals: &'t SymbolTable,
    locals: &'t SymbolTable,
) -> Option<&'t ResultBundle> {
    if is_local_symbol(symbol) {
        locals.get(symbol)
    } else {
        globals.get(symbol)
    }
}

pub fn lookup_mut<'t>(
    symbol: &str,
    globals: &'t mut SymbolTable,
    locals: &'t mut SymbolTable,
) -> Option<&'t mut ResultBundle> {
    if is_local_symbol(symbol) {
        locals.get_mut(symbol)
    } else {
        globals.get_mut(symbol)
    }
}

impl Converter<'_> {
    /// Pass 1: register imported symbols, then every global symbol declared
    /// by a document, in input order.
    pub(super) fn register_global_symbols(&mut self, index: &Index) -> Result<()> {
        for info in &index.external_symbols {
            self.register_global(info, BundleKind::Import)?;
        }
        for document in &index.documents {
            for info in document.symbols.iter().filter(|i| is_global_symbol(&i.symbol)) {
                self.register_global(info, BundleKind::Export)?;
            }
        }
        debug!(symbols = self.globals.len(), "Registered global symbols");
        Ok(())
    }

    fn register_global(&mut self, info: &SymbolInformation, kind: BundleKind) -> Result<()> {
        if self.globals.contains(&info.symbol) {
            trace!(symbol = %info.symbol, ?kind, "Skipping duplicate global symbol");
            return Ok(());
        }
        let bundle = self.emit_result_bundle(info, kind)?;
        self.globals.insert(&info.symbol, bundle);
        Ok(())
    }

    /// Emit the result vertices of one symbol and wire them to its
    /// `resultSet`.
    pub(super) fn emit_result_bundle(
        &mut self,
        info: &SymbolInformation,
        kind: BundleKind,
    ) -> Result<ResultBundle> {
        let graph = &mut self.graph;
        let definition_result = match kind {
            BundleKind::Export => Some(graph.emit_vertex(Vertex::DefinitionResult)),
            BundleKind::Import | BundleKind::Local => None,
        };
        let result_set = graph.emit_vertex(Vertex::ResultSet);
        let reference_result = graph.emit_vertex(Vertex::ReferenceResult);
        let hover_result = graph.emit_vertex(Vertex::HoverResult(hover_markdown(&info.documentation)));

        if let Some(definition_result) = definition_result {
            graph.emit_edge(Edge::one(EdgeLabel::Definition, result_set, definition_result))?;
        }
        graph.emit_edge(Edge::one(EdgeLabel::References, result_set, reference_result))?;
        graph.emit_edge(Edge::one(EdgeLabel::Hover, result_set, hover_result))?;

        let implementation_result = if kind.is_global()
            && self.options.implementation_results == ImplementationPolicy::Eager
        {
            Some(emit_implementation_result(graph, result_set)?)
        } else {
            None
        };

        if let Some(moniker_kind) = kind.moniker_kind() {
            emit_moniker(graph, &mut self.packages, &info.symbol, moniker_kind, result_set)?;
        }

        Ok(ResultBundle {
            kind,
            result_set,
            definition_result,
            reference_result,
            implementation_result,
            hover_result,
        })
    }
}

fn emit_implementation_result(graph: &mut GraphBuilder, result_set: Id) -> Result<Id> {
    let id = graph.emit_vertex(Vertex::ImplementationResult);
    graph.emit_edge(Edge::one(EdgeLabel::Implementation, result_set, id))?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(kind: BundleKind) -> ResultBundle {
        ResultBundle {
            kind,
            result_set: 1,
            definition_result: None,
            reference_result: 2,
            implementation_result: None,
            hover_result: 3,
        }
    }

    #[test]
    fn test_lookup_picks_scope_by_name() {
        let mut globals = SymbolTable::default();
        let mut locals = SymbolTable::default();
        globals.insert("npm pkg 1.0 A#", bundle(BundleKind::Export));
        locals.insert("local 0", bundle(BundleKind::Local));

        assert!(lookup("npm pkg 1.0 A#", &globals, &locals).is_some());
        assert!(lookup("local 0", &globals, &locals).is_some());
        // A local name never falls back to the global table.
        globals.insert("local 1", bundle(BundleKind::Export));
        assert!(lookup("local 1", &globals, &locals).is_none());
        assert!(lookup("npm pkg 1.0 B#", &globals, &locals).is_none());
    }

    #[test]
    fn test_lazy_implementation_result_is_memoized() {
        let mut graph = GraphBuilder::new();
        graph.emit_vertex(Vertex::ResultSet);
        let mut global = bundle(BundleKind::Import);

        let first = global.ensure_implementation_result(&mut graph).unwrap();
        let second = global.ensure_implementation_result(&mut graph).unwrap();
        assert_eq!(first, Some(2));
        assert_eq!(first, second);
        // vertex + textDocument/implementation edge
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_local_bundle_has_no_implementation_result() {
        let mut graph = GraphBuilder::new();
        let mut local = bundle(BundleKind::Local);
        assert_eq!(local.ensure_implementation_result(&mut graph).unwrap(), None);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_bundle_kinds() {
        assert!(BundleKind::Export.is_global());
        assert!(BundleKind::Import.is_global());
        assert!(!BundleKind::Local.is_global());
        assert_eq!(BundleKind::Local.moniker_kind(), None);
        assert_eq!(BundleKind::Import.moniker_kind(), Some(MonikerKind::Import));
        assert!(bundle(BundleKind::Import).is_imported());
        assert!(!bundle(BundleKind::Export).is_imported());
    }
}
