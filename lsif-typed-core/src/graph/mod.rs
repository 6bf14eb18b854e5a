//! LSIF graph elements.
//!
//! The converter output is a flat, ordered list of [`Element`]s. Vertices
//! carry typed payloads and edges reference vertices by [`Id`]. Labels are
//! derived from the payload type so a vertex can never be emitted with a
//! label that disagrees with its contents.

pub mod builder;

pub use builder::GraphBuilder;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Graph-wide element identifier, allocated sequentially from 1.
pub type Id = u64;

/// LSIF protocol version written to the `metaData` vertex.
pub const LSIF_VERSION: &str = "0.4.3";

/// Whether an element is a vertex or an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Vertex,
    Edge,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Edge => "edge",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the LSIF dump.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: Id,
    pub data: ElementData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementData {
    Vertex(Vertex),
    Edge(Edge),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self.data {
            ElementData::Vertex(_) => ElementKind::Vertex,
            ElementData::Edge(_) => ElementKind::Edge,
        }
    }

    pub fn label(&self) -> &'static str {
        match &self.data {
            ElementData::Vertex(vertex) => vertex.label(),
            ElementData::Edge(edge) => edge.label.as_str(),
        }
    }

    pub fn as_vertex(&self) -> Option<&Vertex> {
        match &self.data {
            ElementData::Vertex(vertex) => Some(vertex),
            ElementData::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match &self.data {
            ElementData::Edge(edge) => Some(edge),
            ElementData::Vertex(_) => None,
        }
    }
}

/// A graph vertex and its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Vertex {
    MetaData(MetaData),
    /// Payload is the document URI.
    Document(String),
    Range(Range),
    ResultSet,
    DefinitionResult,
    ReferenceResult,
    ImplementationResult,
    /// Payload is the markdown hover text.
    HoverResult(String),
    Moniker(Moniker),
    PackageInformation(PackageInformation),
}

impl Vertex {
    pub fn label(&self) -> &'static str {
        match self {
            Vertex::MetaData(_) => "metaData",
            Vertex::Document(_) => "document",
            Vertex::Range(_) => "range",
            Vertex::ResultSet => "resultSet",
            Vertex::DefinitionResult => "definitionResult",
            Vertex::ReferenceResult => "referenceResult",
            Vertex::ImplementationResult => "implementationResult",
            Vertex::HoverResult(_) => "hoverResult",
            Vertex::Moniker(_) => "moniker",
            Vertex::PackageInformation(_) => "packageInformation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    pub version: String,
    pub project_root: String,
    pub position_encoding: String,
    pub tool_info: ToolInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Zero-based line/character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: i32,
    pub character: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Moniker kinds written to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonikerKind {
    Export,
    Import,
    Implementation,
}

impl MonikerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonikerKind::Export => "export",
            MonikerKind::Import => "import",
            MonikerKind::Implementation => "implementation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moniker {
    pub kind: MonikerKind,
    pub scheme: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInformation {
    pub name: String,
    pub manager: String,
    pub version: String,
}

/// Edge labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeLabel {
    #[serde(rename = "textDocument/definition")]
    Definition,
    #[serde(rename = "textDocument/references")]
    References,
    #[serde(rename = "textDocument/implementation")]
    Implementation,
    #[serde(rename = "textDocument/hover")]
    Hover,
    #[serde(rename = "moniker")]
    Moniker,
    #[serde(rename = "packageInformation")]
    PackageInformation,
    #[serde(rename = "next")]
    Next,
    #[serde(rename = "item")]
    Item,
    #[serde(rename = "contains")]
    Contains,
}

impl EdgeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeLabel::Definition => "textDocument/definition",
            EdgeLabel::References => "textDocument/references",
            EdgeLabel::Implementation => "textDocument/implementation",
            EdgeLabel::Hover => "textDocument/hover",
            EdgeLabel::Moniker => "moniker",
            EdgeLabel::PackageInformation => "packageInformation",
            EdgeLabel::Next => "next",
            EdgeLabel::Item => "item",
            EdgeLabel::Contains => "contains",
        }
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// In-vertices of an edge. 1:1 edges use `One`, 1:n edges use `Many`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeTargets {
    One(Id),
    Many(Vec<Id>),
}

impl EdgeTargets {
    pub fn is_empty(&self) -> bool {
        match self {
            EdgeTargets::One(_) => false,
            EdgeTargets::Many(ids) => ids.is_empty(),
        }
    }

    pub fn ids(&self) -> &[Id] {
        match self {
            EdgeTargets::One(id) => std::slice::from_ref(id),
            EdgeTargets::Many(ids) => ids,
        }
    }
}

/// Optional tag on `item` edges saying which part of a result the items
/// belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemProperty {
    Definitions,
    References,
    ReferenceResults,
}

impl ItemProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemProperty::Definitions => "definitions",
            ItemProperty::References => "references",
            ItemProperty::ReferenceResults => "referenceResults",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub label: EdgeLabel,
    pub out_v: Id,
    pub targets: EdgeTargets,
    /// Document the items belong to, for `item` edges.
    pub document: Option<Id>,
    pub property: Option<ItemProperty>,
}

impl Edge {
    pub fn new(label: EdgeLabel, out_v: Id, targets: EdgeTargets) -> Self {
        Self {
            label,
            out_v,
            targets,
            document: None,
            property: None,
        }
    }

    /// A 1:1 edge.
    pub fn one(label: EdgeLabel, out_v: Id, in_v: Id) -> Self {
        Self::new(label, out_v, EdgeTargets::One(in_v))
    }

    /// A 1:n edge.
    pub fn many(label: EdgeLabel, out_v: Id, in_vs: Vec<Id>) -> Self {
        Self::new(label, out_v, EdgeTargets::Many(in_vs))
    }

    /// An `item` edge scoped to a document.
    pub fn item(out_v: Id, in_vs: Vec<Id>, document: Id) -> Self {
        Self::many(EdgeLabel::Item, out_v, in_vs).in_document(document)
    }

    pub fn in_document(mut self, document: Id) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_property(mut self, property: Option<ItemProperty>) -> Self {
        self.property = property;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_labels() {
        assert_eq!(Vertex::ResultSet.label(), "resultSet");
        assert_eq!(Vertex::HoverResult(String::new()).label(), "hoverResult");
        assert_eq!(Vertex::Document("file:///a".into()).label(), "document");
    }

    #[test]
    fn test_edge_targets() {
        assert!(EdgeTargets::Many(vec![]).is_empty());
        assert!(!EdgeTargets::One(3).is_empty());
        assert_eq!(EdgeTargets::One(3).ids(), &[3]);
        assert_eq!(EdgeTargets::Many(vec![4, 5]).ids(), &[4, 5]);
    }

    #[test]
    fn test_item_edge() {
        let edge = Edge::item(2, vec![9], 5);
        assert_eq!(edge.label, EdgeLabel::Item);
        assert_eq!(edge.document, Some(5));
        assert_eq!(edge.property, None);
        assert_eq!(edge.label.to_string(), "item");
    }
}
