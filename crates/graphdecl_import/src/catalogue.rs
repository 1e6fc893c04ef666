//! Catalogue snapshot import.
//!
//! A catalogue snapshot is the pre-fetched output of `SHOW CONSTRAINTS`,
//! `SHOW INDEXES`, `db.labels()` and `db.relationshipTypes()`, stored as JSON.
//! Column names follow the database's own (`labelsOrTypes`, `entityType`,
//! `owningConstraint`, ...).

use graphdecl_foundation::{Error, IndexType, ResourceKind, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ImportReport;
use crate::grouping::{ConstraintShape, Grouping, ImportedIndex};

/// Whether a catalogue row applies to nodes or relationships.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Node label.
    #[default]
    Node,
    /// Relationship type.
    Relationship,
}

impl EntityType {
    fn kind(self) -> ResourceKind {
        match self {
            Self::Node => ResourceKind::NodeType,
            Self::Relationship => ResourceKind::RelationshipType,
        }
    }
}

/// One `SHOW CONSTRAINTS` row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogueConstraint {
    /// Constraint name.
    pub name: Option<String>,
    /// Constraint type, e.g. `UNIQUENESS`, `NODE_KEY`, `NODE_PROPERTY_EXISTENCE`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Node or relationship.
    pub entity_type: EntityType,
    /// Labels or relationship types covered.
    #[serde(alias = "labels")]
    pub labels_or_types: Option<Vec<String>>,
    /// Constrained properties.
    pub properties: Option<Vec<String>>,
    /// Property type for type constraints.
    pub property_type: Option<String>,
}

/// One `SHOW INDEXES` row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogueIndex {
    /// Index name.
    pub name: Option<String>,
    /// Index type, e.g. `RANGE`, `TEXT`, `VECTOR`, `LOOKUP`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Node or relationship.
    pub entity_type: EntityType,
    /// Labels or relationship types covered; null for lookup indexes.
    #[serde(alias = "labels")]
    pub labels_or_types: Option<Vec<String>>,
    /// Indexed properties; null for lookup indexes.
    pub properties: Option<Vec<String>>,
    /// Name of the constraint backing this index, if any.
    pub owning_constraint: Option<String>,
    /// The raw options map (`indexConfig`, `indexProvider`).
    pub options: Option<Value>,
}

/// A pre-fetched catalogue of one database.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogueSnapshot {
    /// Constraint rows.
    pub constraints: Vec<CatalogueConstraint>,
    /// Index rows.
    pub indexes: Vec<CatalogueIndex>,
    /// Node labels in use.
    #[serde(alias = "nodeLabels")]
    pub labels: Vec<String>,
    /// Relationship types in use.
    #[serde(alias = "types")]
    pub relationship_types: Vec<String>,
}

impl CatalogueSnapshot {
    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    /// Returns an invalid-document error if the text is not a snapshot.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::invalid_document(format!("catalogue snapshot: {e}")))
    }
}

/// Imports every constraint, index, label and relationship type of a snapshot.
///
/// Lookup indexes and indexes owned by a constraint are skipped silently;
/// constraint and index types with no declaration form are listed in
/// [`ImportReport::skipped`].
#[must_use]
pub fn import_catalogue(snapshot: &CatalogueSnapshot) -> ImportReport {
    let mut grouping = Grouping::new();
    let mut skipped = Vec::new();

    for constraint in &snapshot.constraints {
        if !apply_constraint(constraint, &mut grouping) {
            let entry = describe("constraint", constraint.name.as_deref(), &constraint.kind);
            warn!(entry = %entry, "skipping catalogue constraint");
            skipped.push(entry);
        }
    }

    for index in &snapshot.indexes {
        if index.kind.eq_ignore_ascii_case("LOOKUP") {
            debug!(name = ?index.name, "skipping lookup index");
            continue;
        }
        if index.owning_constraint.is_some() {
            debug!(name = ?index.name, "skipping constraint-backing index");
            continue;
        }
        if !apply_index(index, &mut grouping) {
            let entry = describe("index", index.name.as_deref(), &index.kind);
            warn!(entry = %entry, "skipping catalogue index");
            skipped.push(entry);
        }
    }

    for label in &snapshot.labels {
        grouping.entity(ResourceKind::NodeType, label);
    }
    for ty in &snapshot.relationship_types {
        grouping.entity(ResourceKind::RelationshipType, ty);
    }

    ImportReport {
        resources: grouping.finish(),
        skipped,
    }
}

fn describe(what: &str, name: Option<&str>, kind: &str) -> String {
    match name {
        Some(name) => format!("{what} '{name}' ({kind})"),
        None => format!("{what} ({kind})"),
    }
}

fn apply_constraint(constraint: &CatalogueConstraint, grouping: &mut Grouping) -> bool {
    let kind = constraint.kind.to_ascii_uppercase().replace([' ', '-'], "_");
    let shape = if kind.contains("KEY") {
        ConstraintShape::Key
    } else if kind.contains("EXISTENCE") || kind == "NOT_NULL" {
        ConstraintShape::Exists
    } else if kind.contains("PROPERTY_TYPE") {
        match &constraint.property_type {
            Some(ty) => ConstraintShape::Typed(ty.clone()),
            None => return false,
        }
    } else if kind.contains("UNIQUE") {
        ConstraintShape::Unique
    } else {
        return false;
    };

    let entity = if kind.starts_with("RELATIONSHIP") {
        ResourceKind::RelationshipType
    } else {
        constraint.entity_type.kind()
    };
    let properties = constraint.properties.clone().unwrap_or_default();
    let labels = constraint.labels_or_types.as_deref().unwrap_or_default();
    if properties.is_empty() || labels.is_empty() {
        return false;
    }
    for label in labels {
        grouping.constraint(
            entity,
            label,
            shape.clone(),
            &properties,
            constraint.name.clone(),
        );
    }
    true
}

fn apply_index(index: &CatalogueIndex, grouping: &mut Grouping) -> bool {
    let Ok(kind) = index.kind.parse::<IndexType>() else {
        return false;
    };
    let properties = index.properties.clone().unwrap_or_default();
    let labels = index.labels_or_types.clone().unwrap_or_default();
    if properties.is_empty() || labels.is_empty() {
        return false;
    }

    let config = index.options.as_ref().and_then(|o| o.get("indexConfig"));
    let option = |key: &str| {
        config.and_then(|c| c.get(key)).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    };
    let imported = ImportedIndex {
        kind,
        properties,
        name: index.name.clone(),
        dimensions: option("vector.dimensions"),
        similarity: option("vector.similarity_function"),
    };
    grouping.index(index.entity_type.kind(), &labels, &imported);
    true
}
