//! Folding imported constraints and indexes into one resource per label.

use std::collections::HashMap;

use graphdecl_foundation::{
    ConstraintDef, ConstraintType, DiscoveredResource, IndexDef, IndexType, PropertyDef,
    ResourceKind,
};

/// Property type assumed when nothing in the import says otherwise.
pub const DEFAULT_IMPORTED_TYPE: &str = "String";

/// What an imported constraint asserts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstraintShape {
    /// `IS UNIQUE`.
    Unique,
    /// `IS NOT NULL`.
    Exists,
    /// `IS NODE KEY` / `IS RELATIONSHIP KEY`.
    Key,
    /// `IS :: TYPE`, carrying the property type.
    Typed(String),
}

/// An imported index before it is attached to a label.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportedIndex {
    /// Index variant.
    pub kind: IndexType,
    /// Indexed properties, variable prefixes removed.
    pub properties: Vec<String>,
    /// Declared name, if any.
    pub name: Option<String>,
    /// Vector dimensions from the options map.
    pub dimensions: Option<String>,
    /// Vector similarity function from the options map.
    pub similarity: Option<String>,
}

/// Accumulates resources in first-encounter order.
#[derive(Debug, Default)]
pub struct Grouping {
    resources: Vec<DiscoveredResource>,
    positions: HashMap<(ResourceKind, String), usize>,
}

impl Grouping {
    /// Creates an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resource for a label, creating it on first sight.
    pub fn entity(&mut self, kind: ResourceKind, label: &str) -> &mut DiscoveredResource {
        let key = (kind, label.to_string());
        let index = match self.positions.get(&key) {
            Some(&index) => index,
            None => {
                self.resources.push(DiscoveredResource::new(label, kind));
                self.positions.insert(key, self.resources.len() - 1);
                self.resources.len() - 1
            }
        };
        &mut self.resources[index]
    }

    fn property(&mut self, kind: ResourceKind, label: &str, name: &str) -> &mut PropertyDef {
        let resource = self.entity(kind, label);
        let position = match resource.properties.iter().position(|p| p.name == name) {
            Some(position) => position,
            None => {
                resource
                    .properties
                    .push(PropertyDef::new(name, DEFAULT_IMPORTED_TYPE));
                resource.properties.len() - 1
            }
        };
        &mut resource.properties[position]
    }

    /// Applies one constraint to a label.
    ///
    /// Single-property uniqueness and existence become property flags. A key
    /// marks every member required (and unique when it has one member) and is
    /// also kept as an explicit constraint. Composite uniqueness stays explicit.
    pub fn constraint(
        &mut self,
        kind: ResourceKind,
        label: &str,
        shape: ConstraintShape,
        properties: &[String],
        name: Option<String>,
    ) {
        match shape {
            ConstraintShape::Unique if properties.len() == 1 => {
                self.property(kind, label, &properties[0]).unique = true;
            }
            ConstraintShape::Unique => {
                self.explicit(kind, label, ConstraintType::Unique, properties, name);
            }
            ConstraintShape::Exists => {
                for property in properties {
                    self.property(kind, label, property).required = true;
                }
            }
            ConstraintShape::Key => {
                let single = properties.len() == 1;
                for property in properties {
                    let def = self.property(kind, label, property);
                    def.required = true;
                    def.unique |= single;
                }
                self.explicit(kind, label, ConstraintType::Key, properties, name);
            }
            ConstraintShape::Typed(ty) => {
                for property in properties {
                    self.property(kind, label, property).ty = cypher_type(&ty);
                }
            }
        }
    }

    fn explicit(
        &mut self,
        kind: ResourceKind,
        label: &str,
        ty: ConstraintType,
        properties: &[String],
        name: Option<String>,
    ) {
        for property in properties {
            self.property(kind, label, property);
        }
        let mut constraint = ConstraintDef::new(ty.to_string(), properties.iter().cloned());
        constraint.name = name;
        let resource = self.entity(kind, label);
        if !resource.constraints.contains(&constraint) {
            resource.constraints.push(constraint);
        }
    }

    /// Applies one index to every label it covers.
    ///
    /// Only the first label keeps the declared name so regenerated statements
    /// stay distinct.
    pub fn index(&mut self, kind: ResourceKind, labels: &[String], index: &ImportedIndex) {
        for (i, label) in labels.iter().enumerate() {
            let implied = match index.kind {
                IndexType::Vector => Some("List<Float>"),
                IndexType::Point => Some("Point"),
                _ => None,
            };
            for property in &index.properties {
                let def = self.property(kind, label, property);
                if let Some(ty) = implied {
                    if def.ty == DEFAULT_IMPORTED_TYPE {
                        def.ty = ty.to_string();
                    }
                }
            }

            let mut def = IndexDef::new(index.kind.to_string(), index.properties.iter().cloned());
            def.name = if i == 0 { index.name.clone() } else { None };
            if let Some(dimensions) = &index.dimensions {
                def = def.with_option("dimensions", dimensions.as_str());
            }
            if let Some(similarity) = &index.similarity {
                def = def.with_option("similarity", similarity.to_lowercase());
            }
            let resource = self.entity(kind, label);
            if !resource.indexes.contains(&def) {
                resource.indexes.push(def);
            }
        }
    }

    /// Consumes the grouping, yielding resources in first-encounter order.
    #[must_use]
    pub fn finish(self) -> Vec<DiscoveredResource> {
        self.resources
    }
}

/// Maps a Cypher property type to the declaration vocabulary.
///
/// Unknown types are kept as written.
#[must_use]
pub fn cypher_type(text: &str) -> String {
    let words: Vec<String> = text
        .split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect();
    let joined = words.join(" ");
    let joined = joined.trim_end_matches(" NOT NULL");

    if let Some(inner) = joined
        .strip_prefix("LIST<")
        .or_else(|| joined.strip_prefix("LIST <"))
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return format!("List<{}>", cypher_type(inner));
    }

    match joined {
        "STRING" => "String",
        "INTEGER" | "INT" | "SIGNED INTEGER" => "Integer",
        "FLOAT" => "Float",
        "BOOLEAN" | "BOOL" => "Boolean",
        "DATE" => "Date",
        "LOCAL DATETIME" | "TIMESTAMP WITHOUT TIME ZONE" => "LocalDateTime",
        "ZONED DATETIME" | "TIMESTAMP WITH TIME ZONE" => "DateTime",
        "LOCAL TIME" | "TIME WITHOUT TIME ZONE" => "LocalTime",
        "ZONED TIME" | "TIME WITH TIME ZONE" => "Time",
        "DURATION" => "Duration",
        "POINT" => "Point",
        _ => return text.trim().to_string(),
    }
    .to_string()
}
