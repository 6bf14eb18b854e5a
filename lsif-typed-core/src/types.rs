//! Data model of a decoded typed index.
//!
//! These types mirror the typed index format after decoding: one `Index` per
//! project, holding metadata, symbols imported from other packages, and the
//! documents of the project with their symbols and occurrences. The converter
//! only reads them.

use serde::{Deserialize, Serialize};

/// A complete typed index for one project.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    #[serde(default)]
    pub metadata: Option<Metadata>,
    /// Symbols defined in other packages and referenced from this one.
    #[serde(default)]
    pub external_symbols: Vec<SymbolInformation>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Index-wide metadata.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// URI of the project root, usually a `file://` URI.
    #[serde(default)]
    pub project_root: String,
    #[serde(default)]
    pub tool_info: Option<ToolInfo>,
    /// Unit of the character offsets in occurrence ranges.
    #[serde(default, alias = "textDocumentEncoding")]
    pub text_encoding: TextEncoding,
}

/// The indexer that produced the index.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Encoding used to count characters in ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "UnspecifiedTextEncoding", alias = "Unspecified")]
    Unspecified,
    #[serde(rename = "UTF8")]
    Utf8,
    #[serde(rename = "UTF16")]
    Utf16,
}

/// A source file with the symbols it declares and the occurrences it contains.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Path relative to the project root, using `/` separators.
    pub relative_path: String,
    #[serde(default)]
    pub symbols: Vec<SymbolInformation>,
    #[serde(default)]
    pub occurrences: Vec<Occurrence>,
}

/// Declaration-level information about one symbol.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInformation {
    pub symbol: String,
    /// Markdown paragraphs shown on hover.
    #[serde(default)]
    pub documentation: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl SymbolInformation {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation.push(documentation.into());
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }
}

/// A declared link from one symbol to another.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// The related symbol.
    pub symbol: String,
    #[serde(default)]
    pub is_reference: bool,
    #[serde(default)]
    pub is_implementation: bool,
    #[serde(default)]
    pub is_type_definition: bool,
}

impl Relationship {
    pub fn reference(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            is_reference: true,
            ..Default::default()
        }
    }

    pub fn implementation(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            is_implementation: true,
            ..Default::default()
        }
    }
}

/// Symbol role bit flags.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolRole {
    Definition = 0x1,
    Import = 0x2,
    WriteAccess = 0x4,
    ReadAccess = 0x8,
    Generated = 0x10,
    Test = 0x20,
}

impl SymbolRole {
    pub fn value(&self) -> i32 {
        *self as i32
    }
}

/// A single use or definition of a symbol in a document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// `[line, startCharacter, endCharacter]` or
    /// `[startLine, startCharacter, endLine, endCharacter]`, zero-based.
    pub range: Vec<i32>,
    pub symbol: String,
    /// Bitmask of [`SymbolRole`] values.
    #[serde(default, alias = "symbolRoles")]
    pub roles: i32,
}

impl Occurrence {
    pub fn new(range: Vec<i32>, symbol: impl Into<String>, roles: i32) -> Self {
        Self {
            range,
            symbol: symbol.into(),
            roles,
        }
    }

    pub fn definition(range: Vec<i32>, symbol: impl Into<String>) -> Self {
        Self::new(range, symbol, SymbolRole::Definition.value())
    }

    pub fn reference(range: Vec<i32>, symbol: impl Into<String>) -> Self {
        Self::new(range, symbol, 0)
    }

    pub fn has_role(&self, role: SymbolRole) -> bool {
        self.roles & role.value() != 0
    }

    pub fn is_definition(&self) -> bool {
        self.has_role(SymbolRole::Definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_role() {
        let occ = Occurrence::new(vec![0, 0, 3], "a", 0x1 | 0x8);
        assert!(occ.is_definition());
        assert!(occ.has_role(SymbolRole::ReadAccess));
        assert!(!occ.has_role(SymbolRole::WriteAccess));
        assert!(!Occurrence::reference(vec![0, 0, 3], "a").is_definition());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "metadata": {
                "projectRoot": "file:///repo",
                "toolInfo": {"name": "indexer", "version": "1.0"},
                "textDocumentEncoding": "UTF8"
            },
            "externalSymbols": [{"symbol": "npm dep 1.0 Foo#"}],
            "documents": [{
                "relativePath": "src/a.ts",
                "symbols": [{
                    "symbol": "npm pkg 1.0 Bar#",
                    "relationships": [{"symbol": "npm dep 1.0 Foo#", "isImplementation": true}]
                }],
                "occurrences": [{"range": [1, 2, 5], "symbol": "npm pkg 1.0 Bar#", "symbolRoles": 1}]
            }]
        }"#;
        let index: Index = serde_json::from_str(json).unwrap();
        let metadata = index.metadata.unwrap();
        assert_eq!(metadata.text_encoding, TextEncoding::Utf8);
        assert_eq!(metadata.tool_info.unwrap().name, "indexer");
        assert_eq!(index.external_symbols.len(), 1);
        let doc = &index.documents[0];
        assert!(doc.symbols[0].relationships[0].is_implementation);
        assert!(doc.occurrences[0].is_definition());
    }

    #[test]
    fn test_missing_encoding_is_unspecified() {
        let metadata: Metadata = serde_json::from_str(r#"{"projectRoot": "x"}"#).unwrap();
        assert_eq!(metadata.text_encoding, TextEncoding::Unspecified);
        assert!(metadata.tool_info.is_none());
    }
}
