//! Metadata, range and hover translation.

use super::Converter;
use crate::error::{ConversionError, Result};
use crate::graph::{self, Id, MetaData, Position, Range, Vertex, LSIF_VERSION};
use crate::types::{Metadata, TextEncoding};

/// Joins documentation paragraphs into one markdown hover.
pub const HOVER_SEPARATOR: &str = "\n\n---\n\n";

impl Converter<'_> {
    /// Emit the `metaData` vertex. Must be the first element of the graph.
    pub(super) fn emit_metadata(&mut self, metadata: &Metadata) -> Result<Id> {
        let tool_info = metadata
            .tool_info
            .as_ref()
            .ok_or(ConversionError::MissingToolInfo)?;
        let position_encoding = position_encoding(metadata.text_encoding)?;

        Ok(self.graph.emit_vertex(Vertex::MetaData(MetaData {
            version: LSIF_VERSION.to_string(),
            project_root: metadata.project_root.clone(),
            position_encoding: position_encoding.to_string(),
            tool_info: graph::ToolInfo {
                name: tool_info.name.clone(),
                version: tool_info.version.clone(),
            },
        })))
    }
}

/// LSIF name of the text encoding.
pub fn position_encoding(encoding: TextEncoding) -> Result<&'static str> {
    match encoding {
        TextEncoding::Utf8 => Ok("utf-8"),
        TextEncoding::Utf16 => Ok("utf-16"),
        TextEncoding::Unspecified => Err(ConversionError::UnsupportedEncoding { encoding }),
    }
}

/// Interpret a raw occurrence range.
///
/// `[line, start, end]` spans a single line; `[start_line, start, end_line,
/// end]` may span several.
pub fn interpret_range(range: &[i32]) -> Result<Range> {
    match *range {
        [line, start, end] => Ok(Range {
            start: Position {
                line,
                character: start,
            },
            end: Position {
                line,
                character: end,
            },
        }),
        [start_line, start, end_line, end] => Ok(Range {
            start: Position {
                line: start_line,
                character: start,
            },
            end: Position {
                line: end_line,
                character: end,
            },
        }),
        _ => Err(ConversionError::InvalidRange {
            range: range.to_vec(),
        }),
    }
}

/// Join the project root URI and a document's relative path.
pub fn document_uri(project_root: &str, relative_path: &str) -> String {
    let root = project_root.trim_end_matches('/');
    let path = relative_path.trim_start_matches('/');
    if root.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", root, path)
    }
}

pub fn hover_markdown(documentation: &[String]) -> String {
    documentation.join(HOVER_SEPARATOR)
}
