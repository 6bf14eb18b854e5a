//! Conversion policies.
//!
//! Three graph shaping choices are left to the caller. The defaults produce
//! the smallest graph that still answers every navigation request.

use serde::{Deserialize, Serialize};

/// When `implementationResult` vertices are created for global symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImplementationPolicy {
    /// On the first implementation relationship that targets the symbol.
    #[default]
    Lazy,
    /// Up front, for every exported and imported symbol.
    Eager,
}

/// Which relationships are followed when a definition is processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipSource {
    /// Relationships declared by the defined symbol plus relationships other
    /// symbols declare towards it.
    #[default]
    Inverse,
    /// Only relationships declared by the defined symbol.
    Declared,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub implementation_results: ImplementationPolicy,
    pub relationship_source: RelationshipSource,
    /// Tag relationship-driven `item` edges with a `property`.
    pub tag_item_properties: bool,
}

impl ConversionOptions {
    pub fn with_implementation_results(mut self, policy: ImplementationPolicy) -> Self {
        self.implementation_results = policy;
        self
    }

    pub fn with_relationship_source(mut self, source: RelationshipSource) -> Self {
        self.relationship_source = source;
        self
    }

    pub fn with_tagged_item_properties(mut self, tag: bool) -> Self {
        self.tag_item_properties = tag;
        self
    }

    pub(crate) fn uses_inverse_relationships(&self) -> bool {
        self.relationship_source == RelationshipSource::Inverse
    }
}
