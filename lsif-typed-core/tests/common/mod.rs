//! Shared fixtures for conversion tests.

#![allow(dead_code)]

use lsif_typed_core::graph::{Edge, EdgeLabel, Element, Id, Vertex};
use lsif_typed_core::{Document, Index, Metadata, Occurrence, SymbolInformation, TextEncoding, ToolInfo};

pub const PROJECT_ROOT: &str = "file:///repo";

/// Build an index with valid UTF-16 metadata.
pub fn index(external_symbols: Vec<SymbolInformation>, documents: Vec<Document>) -> Index {
    Index {
        metadata: Some(Metadata {
            project_root: PROJECT_ROOT.to_string(),
            tool_info: Some(ToolInfo {
                name: "scip-test".to_string(),
                version: "0.1.0".to_string(),
            }),
            text_encoding: TextEncoding::Utf16,
        }),
        external_symbols,
        documents,
    }
}

pub fn document(
    relative_path: &str,
    symbols: Vec<SymbolInformation>,
    occurrences: Vec<Occurrence>,
) -> Document {
    Document {
        relative_path: relative_path.to_string(),
        symbols,
        occurrences,
    }
}

pub fn count_label(elements: &[Element], label: &str) -> usize {
    elements.iter().filter(|e| e.label() == label).count()
}

pub fn edges<'a>(elements: &'a [Element], label: EdgeLabel) -> Vec<(Id, &'a Edge)> {
    elements
        .iter()
        .filter_map(|e| e.as_edge().map(|edge| (e.id, edge)))
        .filter(|(_, edge)| edge.label == label)
        .collect()
}

/// IDs of all vertices matching `predicate`, in emission order.
pub fn vertex_ids(elements: &[Element], predicate: impl Fn(&Vertex) -> bool) -> Vec<Id> {
    elements
        .iter()
        .filter(|e| e.as_vertex().is_some_and(&predicate))
        .map(|e| e.id)
        .collect()
}

/// The vertex an edge with `label` leads to from `out_v`.
pub fn target_of(elements: &[Element], label: EdgeLabel, out_v: Id) -> Option<Id> {
    edges(elements, label)
        .into_iter()
        .find(|(_, edge)| edge.out_v == out_v)
        .and_then(|(_, edge)| edge.targets.ids().first().copied())
}

/// The `resultSet` a range is attached to.
pub fn result_set_of(elements: &[Element], range: Id) -> Option<Id> {
    target_of(elements, EdgeLabel::Next, range)
}

/// `(out_v, in_vs)` of every `item` edge, in emission order.
pub fn items(elements: &[Element]) -> Vec<(Id, Vec<Id>)> {
    edges(elements, EdgeLabel::Item)
        .into_iter()
        .map(|(_, edge)| (edge.out_v, edge.targets.ids().to_vec()))
        .collect()
}
