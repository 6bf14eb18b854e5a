//! Sequential element emission.

use super::{Edge, Element, ElementData, Id, Vertex};
use crate::error::{ConversionError, Result};

/// Owns the ID counter and the output sequence of one conversion.
///
/// IDs start at 1 and are handed out strictly in emission order, so the
/// element list is always sorted by ID with no gaps. Nothing else in the
/// crate allocates IDs.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    last_id: Id,
    elements: Vec<Element>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID.
    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        self.last_id
    }

    pub fn emit_vertex(&mut self, vertex: Vertex) -> Id {
        let id = self.next_id();
        self.elements.push(Element {
            id,
            data: ElementData::Vertex(vertex),
        });
        id
    }

    /// Emit an edge. An edge without targets is rejected before an ID is
    /// allocated and must abort the conversion.
    pub fn emit_edge(&mut self, edge: Edge) -> Result<Id> {
        if edge.targets.is_empty() {
            return Err(ConversionError::EmptyEdge {
                label: edge.label,
                out_v: edge.out_v,
            });
        }
        let id = self.next_id();
        self.elements.push(Element {
            id,
            data: ElementData::Edge(edge),
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeLabel;

    #[test]
    fn test_ids_are_sequential() {
        let mut graph = GraphBuilder::new();
        let a = graph.emit_vertex(Vertex::ResultSet);
        let b = graph.emit_vertex(Vertex::ReferenceResult);
        let e = graph
            .emit_edge(Edge::one(EdgeLabel::References, a, b))
            .unwrap();
        assert_eq!((a, b, e), (1, 2, 3));
        let ids: Vec<Id> = graph.elements().iter().map(|el| el.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_edge_is_rejected() {
        let mut graph = GraphBuilder::new();
        let doc = graph.emit_vertex(Vertex::Document("file:///a.go".into()));
        let err = graph
            .emit_edge(Edge::many(EdgeLabel::Contains, doc, vec![]))
            .unwrap_err();
        assert_eq!(
            err,
            ConversionError::EmptyEdge {
                label: EdgeLabel::Contains,
                out_v: doc
            }
        );
        assert!(err.is_fatal());
        // No ID was consumed by the rejected edge.
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.emit_vertex(Vertex::ResultSet), 2);
    }
}
