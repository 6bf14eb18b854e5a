//! Moniker and package information emission.
//!
//! Monikers make a symbol addressable from other repositories. They are a
//! best-effort addition: a symbol that does not parse, or parses without a
//! scheme, still gets full in-repository navigation.

use super::resolver::ResultBundle;
use super::Converter;
use crate::error::Result;
use crate::graph::{Edge, EdgeLabel, GraphBuilder, Id, Moniker, MonikerKind, PackageInformation, Vertex};
use crate::symbol::{is_local_symbol, Package, Symbol};
use crate::types::SymbolInformation;
use std::collections::HashMap;
use tracing::trace;

/// One `packageInformation` vertex per distinct package.
#[derive(Debug, Default)]
pub struct PackageRegistry {
    ids: HashMap<Package, Id>,
}

impl PackageRegistry {
    pub fn get_or_emit(&mut self, graph: &mut GraphBuilder, package: &Package) -> Id {
        if let Some(&id) = self.ids.get(package) {
            return id;
        }
        let id = graph.emit_vertex(Vertex::PackageInformation(PackageInformation {
            name: package.name.clone(),
            manager: package.manager.clone(),
            version: package.version.clone(),
        }));
        self.ids.insert(package.clone(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Attach a moniker for `symbol` to `result_set`.
///
/// Returns the moniker ID, or `None` when the symbol has no usable scheme.
pub fn emit_moniker(
    graph: &mut GraphBuilder,
    packages: &mut PackageRegistry,
    symbol: &str,
    kind: MonikerKind,
    result_set: Id,
) -> Result<Option<Id>> {
    let parsed = match Symbol::parse_partial(symbol) {
        Ok(parsed) if !parsed.scheme.is_empty() => parsed,
        Ok(_) => {
            trace!(symbol, "Skipping moniker for symbol without scheme");
            return Ok(None);
        }
        Err(err) => {
            trace!(symbol, error = %err, "Skipping moniker for unparseable symbol");
            return Ok(None);
        }
    };

    let moniker = graph.emit_vertex(Vertex::Moniker(Moniker {
        kind,
        scheme: parsed.scheme,
        identifier: symbol.to_string(),
    }));
    graph.emit_edge(Edge::one(EdgeLabel::Moniker, result_set, moniker))?;

    if parsed.package.is_complete() {
        let package = packages.get_or_emit(graph, &parsed.package);
        graph.emit_edge(Edge::one(EdgeLabel::PackageInformation, moniker, package))?;
    }
    Ok(Some(moniker))
}

impl Converter<'_> {
    /// Give a global symbol an `implementation` moniker for every imported
    /// symbol it implements, so the implementation can be found from the
    /// package that defines the interface.
    pub(super) fn emit_implementation_monikers(&mut self, info: &SymbolInformation) -> Result<()> {
        if is_local_symbol(&info.symbol) {
            return Ok(());
        }
        let Some(owner) = self.globals.get(&info.symbol).copied() else {
            return Ok(());
        };

        for relationship in info.relationships.iter().filter(|r| r.is_implementation) {
            let imported = self
                .globals
                .get(&relationship.symbol)
                .is_some_and(ResultBundle::is_imported);
            if !imported {
                continue;
            }
            emit_moniker(
                &mut self.graph,
                &mut self.packages,
                &relationship.symbol,
                MonikerKind::Implementation,
                owner.result_set,
            )?;
        }
        Ok(())
    }
}
