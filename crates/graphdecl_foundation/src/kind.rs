//! Resource kinds and the type-name alias table.
//!
//! The alias table is constant data: every type name a declaration may use
//! maps to exactly one [`ResourceKind`] and one [`DocumentSection`].

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The closed set of declarable resource kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// A node label with properties, constraints, and indexes.
    NodeType,
    /// A relationship type between two node labels.
    RelationshipType,
    /// An analytics algorithm or graph projection.
    Algorithm,
    /// An ML or knowledge-graph pipeline.
    Pipeline,
    /// A retrieval configuration.
    Retriever,
    /// The wrapper collecting node and relationship types.
    Schema,
}

impl ResourceKind {
    /// All kinds, in rendering order.
    pub const ALL: [ResourceKind; 6] = [
        Self::NodeType,
        Self::RelationshipType,
        Self::Algorithm,
        Self::Pipeline,
        Self::Retriever,
        Self::Schema,
    ];

    /// Returns the variant name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NodeType => "NodeType",
            Self::RelationshipType => "RelationshipType",
            Self::Algorithm => "Algorithm",
            Self::Pipeline => "Pipeline",
            Self::Retriever => "Retriever",
            Self::Schema => "Schema",
        }
    }

    /// Returns the pluralized camel-case key used in structured documents.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::NodeType => "nodeTypes",
            Self::RelationshipType => "relationshipTypes",
            Self::Algorithm => "algorithms",
            Self::Pipeline => "pipelines",
            Self::Retriever => "retrievers",
            Self::Schema => "schemas",
        }
    }

    /// Returns true for node and relationship types, the kinds with Cypher output.
    #[must_use]
    pub const fn is_entity(self) -> bool {
        matches!(self, Self::NodeType | Self::RelationshipType)
    }

    /// Returns the section a resource of this kind lands in when its
    /// declared type name is not in the alias table.
    #[must_use]
    pub const fn default_section(self) -> DocumentSection {
        match self {
            Self::NodeType => DocumentSection::NodeTypes,
            Self::RelationshipType => DocumentSection::RelationshipTypes,
            Self::Algorithm => DocumentSection::Algorithms,
            Self::Pipeline => DocumentSection::Pipelines,
            Self::Retriever => DocumentSection::Retrievers,
            Self::Schema => DocumentSection::Schemas,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        kind_of(s)
            .or_else(|| Self::ALL.into_iter().find(|k| k.plural() == s))
            .ok_or_else(|| Error::unsupported("resource kind", s))
    }
}

/// Top-level sections of a structured document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentSection {
    /// `nodeTypes`
    NodeTypes,
    /// `relationshipTypes`
    RelationshipTypes,
    /// `algorithms`
    Algorithms,
    /// `projections`
    Projections,
    /// `pipelines`
    Pipelines,
    /// `kgPipelines`
    KgPipelines,
    /// `retrievers`
    Retrievers,
    /// `schemas`
    Schemas,
}

impl DocumentSection {
    /// The document key for this section.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NodeTypes => "nodeTypes",
            Self::RelationshipTypes => "relationshipTypes",
            Self::Algorithms => "algorithms",
            Self::Projections => "projections",
            Self::Pipelines => "pipelines",
            Self::KgPipelines => "kgPipelines",
            Self::Retrievers => "retrievers",
            Self::Schemas => "schemas",
        }
    }
}

/// One entry of the alias table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindAlias {
    /// The type name as written in declarations.
    pub type_name: &'static str,
    /// The resource kind the type declares.
    pub kind: ResourceKind,
    /// Where the resource appears in a structured document.
    pub section: DocumentSection,
}

const fn alias(type_name: &'static str, kind: ResourceKind, section: DocumentSection) -> KindAlias {
    KindAlias {
        type_name,
        kind,
        section,
    }
}

use DocumentSection as S;
use ResourceKind as K;

/// Every type name recognized as a resource declaration.
pub static ALIASES: &[KindAlias] = &[
    alias("NodeType", K::NodeType, S::NodeTypes),
    alias("Node", K::NodeType, S::NodeTypes),
    alias("RelationshipType", K::RelationshipType, S::RelationshipTypes),
    alias("Relationship", K::RelationshipType, S::RelationshipTypes),
    alias("Algorithm", K::Algorithm, S::Algorithms),
    alias("PageRank", K::Algorithm, S::Algorithms),
    alias("ArticleRank", K::Algorithm, S::Algorithms),
    alias("Louvain", K::Algorithm, S::Algorithms),
    alias("Leiden", K::Algorithm, S::Algorithms),
    alias("LabelPropagation", K::Algorithm, S::Algorithms),
    alias("WeaklyConnectedComponents", K::Algorithm, S::Algorithms),
    alias("StronglyConnectedComponents", K::Algorithm, S::Algorithms),
    alias("TriangleCount", K::Algorithm, S::Algorithms),
    alias("BetweennessCentrality", K::Algorithm, S::Algorithms),
    alias("DegreeCentrality", K::Algorithm, S::Algorithms),
    alias("ClosenessCentrality", K::Algorithm, S::Algorithms),
    alias("NodeSimilarity", K::Algorithm, S::Algorithms),
    alias("Knn", K::Algorithm, S::Algorithms),
    alias("FastRp", K::Algorithm, S::Algorithms),
    alias("FastRP", K::Algorithm, S::Algorithms),
    alias("Node2Vec", K::Algorithm, S::Algorithms),
    alias("GraphSage", K::Algorithm, S::Algorithms),
    alias("ShortestPath", K::Algorithm, S::Algorithms),
    alias("Dijkstra", K::Algorithm, S::Algorithms),
    alias("GraphProjection", K::Algorithm, S::Projections),
    alias("NativeProjection", K::Algorithm, S::Projections),
    alias("CypherProjection", K::Algorithm, S::Projections),
    alias("Projection", K::Algorithm, S::Projections),
    alias("Pipeline", K::Pipeline, S::Pipelines),
    alias("NodeClassificationPipeline", K::Pipeline, S::Pipelines),
    alias("NodeRegressionPipeline", K::Pipeline, S::Pipelines),
    alias("LinkPredictionPipeline", K::Pipeline, S::Pipelines),
    alias("KgPipeline", K::Pipeline, S::KgPipelines),
    alias("KGPipeline", K::Pipeline, S::KgPipelines),
    alias("KnowledgeGraphPipeline", K::Pipeline, S::KgPipelines),
    alias("SimpleKgPipeline", K::Pipeline, S::KgPipelines),
    alias("SimpleKGPipeline", K::Pipeline, S::KgPipelines),
    alias("Retriever", K::Retriever, S::Retrievers),
    alias("VectorRetriever", K::Retriever, S::Retrievers),
    alias("VectorCypherRetriever", K::Retriever, S::Retrievers),
    alias("HybridRetriever", K::Retriever, S::Retrievers),
    alias("HybridCypherRetriever", K::Retriever, S::Retrievers),
    alias("Text2CypherRetriever", K::Retriever, S::Retrievers),
    alias("Schema", K::Schema, S::Schemas),
    alias("GraphSchema", K::Schema, S::Schemas),
];

/// Looks up a bare type name in the alias table.
#[must_use]
pub fn lookup_alias(type_name: &str) -> Option<&'static KindAlias> {
    ALIASES.iter().find(|a| a.type_name == type_name)
}

/// Returns the resource kind for a bare type name, if it is an alias.
#[must_use]
pub fn kind_of(type_name: &str) -> Option<ResourceKind> {
    lookup_alias(type_name).map(|a| a.kind)
}

/// Returns true if the name is a resource-kind alias.
#[must_use]
pub fn is_kind_alias(name: &str) -> bool {
    lookup_alias(name).is_some()
}

/// Returns the document section for a resource given its kind and declared type name.
#[must_use]
pub fn section_for(kind: ResourceKind, type_name: &str) -> DocumentSection {
    match lookup_alias(type_name) {
        Some(a) if a.kind == kind => a.section,
        _ => kind.default_section(),
    }
}
