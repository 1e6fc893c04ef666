//! Structured JSON document projection.
//!
//! The same types serialize rendered resources and deserialize documents
//! back into resources, so a document can stand in for a scanned tree when
//! diffing.

use std::collections::BTreeMap;

use graphdecl_foundation::{
    ConstraintDef, DiscoveredResource, DocumentSection, Error, ErrorKind, IndexDef, PropertyDef,
    ResourceKind, Result, Setting, section_for,
};
use graphdecl_graph::DependencyGraph;
use serde::{Deserialize, Serialize};

use crate::config::SynthConfig;

/// A structured document keyed by pluralized section name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaDocument {
    /// `nodeTypes`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_types: Vec<EntityEntry>,
    /// `relationshipTypes`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship_types: Vec<EntityEntry>,
    /// `algorithms`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub algorithms: Vec<ConfigEntry>,
    /// `projections`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projections: Vec<ConfigEntry>,
    /// `pipelines`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pipelines: Vec<ConfigEntry>,
    /// `kgPipelines`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kg_pipelines: Vec<ConfigEntry>,
    /// `retrievers`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retrievers: Vec<ConfigEntry>,
    /// `schemas`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<ConfigEntry>,
}

/// A node type or relationship type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityEntry {
    /// The label or relationship type.
    pub label: String,
    /// The declared type name, when it is not the canonical one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source label (relationships only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Target label (relationships only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyEntry>,
    /// Explicit constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintEntry>,
    /// Explicit indexes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexEntry>,
    /// Names of referenced resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

/// One property of a node or relationship type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEntry {
    /// Property name.
    pub name: String,
    /// Property type.
    #[serde(rename = "type")]
    pub ty: String,
    /// Existence required.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Values unique.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique: bool,
    /// Free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An explicit constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintEntry {
    /// Constraint type as declared.
    #[serde(rename = "type")]
    pub kind: String,
    /// Constrained properties.
    pub properties: Vec<String>,
    /// Explicit name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// An explicit index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Index type as declared.
    #[serde(rename = "type")]
    pub kind: String,
    /// Indexed properties.
    pub properties: Vec<String>,
    /// Free-form options.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
    /// Explicit name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// An algorithm, projection, pipeline, retriever, or schema wrapper.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    /// Domain name.
    pub name: String,
    /// Declared type name (e.g. `PageRank`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Guidance for agents (schema wrapper only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_context: Option<String>,
    /// Literal configuration values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, Setting>,
    /// Names of referenced resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

// =============================================================================
// Projection
// =============================================================================

impl SchemaDocument {
    /// Projects resources into a document, preserving their order within
    /// each section.
    #[must_use]
    pub fn from_resources<'a, I>(resources: I) -> Self
    where
        I: IntoIterator<Item = &'a DiscoveredResource>,
    {
        let mut doc = Self::default();
        for resource in resources {
            match section_for(resource.kind, &resource.type_name) {
                DocumentSection::NodeTypes => doc.node_types.push(entity_entry(resource)),
                DocumentSection::RelationshipTypes => {
                    doc.relationship_types.push(entity_entry(resource));
                }
                DocumentSection::Algorithms => doc.algorithms.push(config_entry(resource)),
                DocumentSection::Projections => doc.projections.push(config_entry(resource)),
                DocumentSection::Pipelines => doc.pipelines.push(config_entry(resource)),
                DocumentSection::KgPipelines => doc.kg_pipelines.push(config_entry(resource)),
                DocumentSection::Retrievers => doc.retrievers.push(config_entry(resource)),
                DocumentSection::Schemas => doc.schemas.push(config_entry(resource)),
            }
        }
        doc
    }

    /// Converts the document back into resources, section by section.
    ///
    /// # Errors
    /// Returns an invalid-document error if an entry's declared type belongs
    /// to a different kind than its section.
    pub fn into_resources(self) -> Result<Vec<DiscoveredResource>> {
        let mut out = Vec::new();
        for entry in self.node_types {
            out.push(entity_resource(entry, ResourceKind::NodeType)?);
        }
        for entry in self.relationship_types {
            out.push(entity_resource(entry, ResourceKind::RelationshipType)?);
        }
        let config_sections = [
            (self.algorithms, ResourceKind::Algorithm, "Algorithm"),
            (self.projections, ResourceKind::Algorithm, "GraphProjection"),
            (self.pipelines, ResourceKind::Pipeline, "Pipeline"),
            (self.kg_pipelines, ResourceKind::Pipeline, "KgPipeline"),
            (self.retrievers, ResourceKind::Retriever, "Retriever"),
            (self.schemas, ResourceKind::Schema, "Schema"),
        ];
        for (entries, kind, default_type) in config_sections {
            for entry in entries {
                out.push(config_resource(entry, kind, default_type)?);
            }
        }
        Ok(out)
    }
}

fn entity_entry(resource: &DiscoveredResource) -> EntityEntry {
    EntityEntry {
        label: resource.name.clone(),
        type_name: (resource.type_name != resource.kind.name()).then(|| resource.type_name.clone()),
        description: resource.description.clone(),
        source: resource.source.clone(),
        target: resource.target.clone(),
        properties: resource
            .properties
            .iter()
            .map(|p| PropertyEntry {
                name: p.name.clone(),
                ty: p.ty.clone(),
                required: p.required,
                unique: p.unique,
                description: p.description.clone(),
            })
            .collect(),
        constraints: resource
            .constraints
            .iter()
            .map(|c| ConstraintEntry {
                kind: c.kind.clone(),
                properties: c.properties.clone(),
                name: c.name.clone(),
            })
            .collect(),
        indexes: resource
            .indexes
            .iter()
            .map(|i| IndexEntry {
                kind: i.kind.clone(),
                properties: i.properties.clone(),
                options: i.options.clone(),
                name: i.name.clone(),
            })
            .collect(),
        depends_on: resource.dependencies.clone(),
    }
}

fn config_entry(resource: &DiscoveredResource) -> ConfigEntry {
    ConfigEntry {
        name: resource.name.clone(),
        type_name: resource.type_name.clone(),
        description: resource.description.clone(),
        agent_context: resource.agent_context.clone(),
        config: resource.settings.clone(),
        depends_on: resource.dependencies.clone(),
    }
}

fn check_type(name: &str, type_name: &str, kind: ResourceKind) -> Result<()> {
    match graphdecl_foundation::kind_of(type_name) {
        Some(found) if found != kind => Err(Error::invalid_document(format!(
            "'{name}' has type {type_name}, which is a {found}, not a {kind}"
        ))),
        _ => Ok(()),
    }
}

fn entity_resource(entry: EntityEntry, kind: ResourceKind) -> Result<DiscoveredResource> {
    let mut resource = DiscoveredResource::new(entry.label, kind);
    if let Some(type_name) = entry.type_name {
        check_type(&resource.name, &type_name, kind)?;
        resource.type_name = type_name;
    }
    resource.description = entry.description;
    resource.source = entry.source;
    resource.target = entry.target;
    resource.properties = entry
        .properties
        .into_iter()
        .map(|p| PropertyDef {
            name: p.name,
            ty: p.ty,
            required: p.required,
            unique: p.unique,
            description: p.description,
        })
        .collect();
    resource.constraints = entry
        .constraints
        .into_iter()
        .map(|c| ConstraintDef {
            kind: c.kind,
            properties: c.properties,
            name: c.name,
        })
        .collect();
    resource.indexes = entry
        .indexes
        .into_iter()
        .map(|i| IndexDef {
            kind: i.kind,
            properties: i.properties,
            options: i.options,
            name: i.name,
        })
        .collect();
    for dep in entry.depends_on {
        resource.add_dependency(dep);
    }
    Ok(resource)
}

fn config_resource(
    entry: ConfigEntry,
    kind: ResourceKind,
    default_type: &str,
) -> Result<DiscoveredResource> {
    let mut resource = DiscoveredResource::new(entry.name, kind);
    resource.type_name = if entry.type_name.is_empty() {
        default_type.to_string()
    } else {
        check_type(&resource.name, &entry.type_name, kind)?;
        entry.type_name
    };
    resource.description = entry.description;
    resource.agent_context = entry.agent_context;
    resource.settings = entry.config;
    for dep in entry.depends_on {
        resource.add_dependency(dep);
    }
    Ok(resource)
}

// =============================================================================
// Rendering and parsing
// =============================================================================

/// Renders resources as a JSON document in dependency order.
///
/// # Errors
/// Returns a cycle error if the resources cannot be ordered.
pub fn render_document(resources: &[DiscoveredResource], config: &SynthConfig) -> Result<String> {
    let graph = DependencyGraph::build(resources);
    let order = graph.topological_sort()?;
    let doc = SchemaDocument::from_resources(order);
    let text = if config.pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    }
    .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
    Ok(text + "\n")
}

/// Parses a JSON document back into resources.
///
/// # Errors
/// Returns an invalid-document error for malformed JSON, unknown sections,
/// or entries whose type does not match their section.
pub fn parse_document(text: &str) -> Result<Vec<DiscoveredResource>> {
    let doc: SchemaDocument =
        serde_json::from_str(text).map_err(|e| Error::invalid_document(e.to_string()))?;
    doc.into_resources()
}
