//! Relationship aggregation.
//!
//! Symbols declare relationships towards other symbols: a method implements
//! an interface method, an override references the method it overrides. When
//! the definition of a symbol is emitted, its range is also recorded in the
//! implementation and reference results of every related symbol, in both
//! directions. The reverse direction needs [`InverseRelationships`], built
//! from all documents before any document is emitted.

use super::document::DocumentScope;
use super::resolver::{lookup_mut, ResultBundle};
use super::Converter;
use crate::error::Result;
use crate::graph::{Edge, Id, ItemProperty};
use crate::symbol::is_local_symbol;
use crate::types::{Document, Relationship};
use std::collections::HashMap;
use tracing::trace;

/// A relationship seen from the symbol being defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedSymbol<'a> {
    pub symbol: &'a str,
    pub is_reference: bool,
    pub is_implementation: bool,
}

impl<'a> From<&'a Relationship> for RelatedSymbol<'a> {
    fn from(relationship: &'a Relationship) -> Self {
        Self {
            symbol: &relationship.symbol,
            is_reference: relationship.is_reference,
            is_implementation: relationship.is_implementation,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InverseEntry<'a> {
    declarer: RelatedSymbol<'a>,
    /// Document that declares `declarer`.
    document: usize,
}

/// Maps a global symbol to every symbol that declares a relationship towards
/// it, in input order.
///
/// Only definitions of exported symbols are aggregated, so relationships
/// towards local symbols are never looked up and are not indexed.
#[derive(Debug, Default)]
pub struct InverseRelationships<'a> {
    entries: HashMap<&'a str, Vec<InverseEntry<'a>>>,
}

impl<'a> InverseRelationships<'a> {
    pub fn build(documents: &'a [Document]) -> Self {
        let mut entries: HashMap<&'a str, Vec<InverseEntry<'a>>> = HashMap::new();
        for (position, document) in documents.iter().enumerate() {
            for info in &document.symbols {
                for relationship in &info.relationships {
                    if is_local_symbol(&relationship.symbol) {
                        continue;
                    }
                    entries
                        .entry(relationship.symbol.as_str())
                        .or_default()
                        .push(InverseEntry {
                            declarer: RelatedSymbol {
                                symbol: &info.symbol,
                                is_reference: relationship.is_reference,
                                is_implementation: relationship.is_implementation,
                            },
                            document: position,
                        });
                }
            }
        }
        Self { entries }
    }

    /// Symbols related to `symbol` that can be resolved while emitting
    /// `document`. Local declarers from other documents are left out.
    pub fn related_to(&self, symbol: &str, document: usize) -> Vec<RelatedSymbol<'a>> {
        self.entries
            .get(symbol)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.document == document || !is_local_symbol(e.declarer.symbol))
                    .map(|e| e.declarer)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> Converter<'a> {
    /// Record the definition `range` of `symbol` in the results of every
    /// related symbol, then summarize the touched reference results in the
    /// symbol's own reference result.
    pub(super) fn aggregate_relationships(
        &mut self,
        scope: &mut DocumentScope<'a>,
        symbol: &'a str,
        bundle: ResultBundle,
        range: Id,
    ) -> Result<()> {
        let mut related = self.relationships.related_to(symbol, scope.position);
        if let Some(info) = scope.declaration(symbol) {
            related.extend(info.relationships.iter().map(RelatedSymbol::from));
        }
        if related.is_empty() {
            return Ok(());
        }

        let tagged = self.options.tag_item_properties;
        let tag_definitions = tagged.then_some(ItemProperty::Definitions);
        let tag_references = tagged.then_some(ItemProperty::References);
        let tag_reference_results = tagged.then_some(ItemProperty::ReferenceResults);

        // Results that already hold `range`; a symbol related to itself, or
        // related through both directions, is recorded once.
        let mut recorded: Vec<Id> = Vec::new();
        let mut reference_results: Vec<Id> = Vec::new();
        for relationship in related {
            let Some(target) = lookup_mut(relationship.symbol, &mut self.globals, &mut scope.locals)
            else {
                trace!(symbol, related = relationship.symbol, "Skipping unresolved relationship");
                continue;
            };

            if relationship.is_implementation {
                if let Some(implementation) = target.ensure_implementation_result(&mut self.graph)? {
                    if !recorded.contains(&implementation) {
                        self.graph
                            .emit_edge(Edge::item(implementation, vec![range], scope.id))?;
                        recorded.push(implementation);
                    }
                }
            }

            if relationship.is_reference {
                let reference_result = target.reference_result;
                if !recorded.contains(&reference_result) {
                    self.graph.emit_edge(
                        Edge::item(reference_result, vec![range], scope.id)
                            .with_property(tag_references),
                    )?;
                    recorded.push(reference_result);
                }
                // Never summarize a reference result into itself.
                if reference_result != bundle.reference_result
                    && !reference_results.contains(&reference_result)
                {
                    reference_results.push(reference_result);
                }
            }
        }

        if !reference_results.is_empty() {
            if !recorded.contains(&bundle.reference_result) {
                self.graph.emit_edge(
                    Edge::item(bundle.reference_result, vec![range], scope.id)
                        .with_property(tag_definitions),
                )?;
            }
            self.graph.emit_edge(
                Edge::item(bundle.reference_result, reference_results, scope.id)
                    .with_property(tag_reference_results),
            )?;
        }
        Ok(())
    }
}
