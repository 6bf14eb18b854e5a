//! Newline-delimited JSON exporter.
//!
//! Each element becomes one flat JSON object: `id`, `type` and `label` at the
//! top level, with the payload fields merged in. Two payloads are shaped
//! differently: hover text is wrapped as a markdown `result`, and a document's
//! URI is written under `uri`.

use crate::graph::{Edge, EdgeTargets, Element, ElementData, Vertex};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::io::Write;

/// Render one element as a JSON object.
pub fn element_to_value(element: &Element) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), json!(element.id));
    object.insert("type".to_string(), json!(element.kind().as_str()));
    object.insert("label".to_string(), json!(element.label()));

    match &element.data {
        ElementData::Vertex(vertex) => merge_vertex(&mut object, vertex),
        ElementData::Edge(edge) => merge_edge(&mut object, edge),
    }
    Value::Object(object)
}

fn merge_vertex(object: &mut Map<String, Value>, vertex: &Vertex) {
    match vertex {
        Vertex::MetaData(metadata) => merge(object, metadata),
        Vertex::Document(uri) => {
            object.insert("uri".to_string(), json!(uri));
        }
        Vertex::Range(range) => merge(object, range),
        Vertex::HoverResult(markdown) => {
            object.insert(
                "result".to_string(),
                json!({ "contents": { "kind": "markdown", "value": markdown } }),
            );
        }
        Vertex::Moniker(moniker) => merge(object, moniker),
        Vertex::PackageInformation(package) => merge(object, package),
        Vertex::ResultSet
        | Vertex::DefinitionResult
        | Vertex::ReferenceResult
        | Vertex::ImplementationResult => {}
    }
}

fn merge_edge(object: &mut Map<String, Value>, edge: &Edge) {
    object.insert("outV".to_string(), json!(edge.out_v));
    match &edge.targets {
        EdgeTargets::One(in_v) => {
            object.insert("inV".to_string(), json!(in_v));
        }
        EdgeTargets::Many(in_vs) => {
            object.insert("inVs".to_string(), json!(in_vs));
        }
    }
    if let Some(document) = edge.document {
        object.insert("document".to_string(), json!(document));
    }
    if let Some(property) = edge.property {
        object.insert("property".to_string(), json!(property.as_str()));
    }
}

/// Merge the fields of a struct payload into `object`.
fn merge<T: Serialize>(object: &mut Map<String, Value>, payload: &T) {
    if let Ok(Value::Object(fields)) = serde_json::to_value(payload) {
        object.extend(fields);
    }
}

/// Write elements as NDJSON, one element per line, in order.
pub fn write_ndjson<W: Write>(elements: &[Element], writer: W) -> Result<(), serde_json::Error> {
    let mut writer = std::io::BufWriter::new(writer);
    for element in elements {
        serde_json::to_writer(&mut writer, &element_to_value(element))?;
        writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    }
    writer.flush().map_err(serde_json::Error::io)
}

/// Render elements as an NDJSON string.
pub fn to_ndjson_string(elements: &[Element]) -> String {
    elements
        .iter()
        .map(|element| element_to_value(element).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
