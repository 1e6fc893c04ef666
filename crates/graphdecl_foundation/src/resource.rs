//! The resource model: one [`DiscoveredResource`] per declaration.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::kind::ResourceKind;

/// Where a declaration was found.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Originating file.
    pub file: PathBuf,
    /// 1-based line, 0 when unknown.
    pub line: u32,
    /// 1-based column, 0 when unknown.
    pub column: u32,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

/// A property declared on a node or relationship type.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDef {
    /// Property key.
    pub name: String,
    /// Declared value type, as written (e.g. `String`, `List<Float>`).
    pub ty: String,
    /// Must be present on every entity.
    pub required: bool,
    /// Must be unique across entities with the same label.
    pub unique: bool,
    /// Optional free text.
    pub description: Option<String>,
}

impl PropertyDef {
    /// Creates an optional, non-unique property.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Self::default()
        }
    }

    /// Builder method to mark the property required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Builder method to mark the property unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// An explicitly declared constraint.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintDef {
    /// Constraint type as declared; parsed into [`ConstraintType`] at render time.
    pub kind: String,
    /// Constrained properties, in order.
    pub properties: Vec<String>,
    /// Explicit statement name.
    pub name: Option<String>,
}

impl ConstraintDef {
    /// Creates a constraint definition.
    pub fn new<I, S>(kind: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            properties: properties.into_iter().map(Into::into).collect(),
            name: None,
        }
    }
}

impl fmt::Display for ConstraintDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self
            .kind
            .parse::<ConstraintType>()
            .map_or_else(|_| self.kind.clone(), |k| k.to_string());
        write!(f, "{kind}({})", self.properties.join(", "))
    }
}

/// An explicitly declared index.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexDef {
    /// Index type as declared; parsed into [`IndexType`] at render time.
    pub kind: String,
    /// Indexed properties, in order.
    pub properties: Vec<String>,
    /// Free-form options (e.g. `dimensions`, `similarity`).
    pub options: BTreeMap<String, String>,
    /// Explicit statement name.
    pub name: Option<String>,
}

impl IndexDef {
    /// Creates an index definition without options.
    pub fn new<I, S>(kind: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            properties: properties.into_iter().map(Into::into).collect(),
            options: BTreeMap::new(),
            name: None,
        }
    }

    /// Builder method to add an option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for IndexDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self
            .kind
            .parse::<IndexType>()
            .map_or_else(|_| self.kind.clone(), |k| k.to_string());
        write!(f, "{kind}({})", self.properties.join(", "))
    }
}

/// A literal configuration value on an algorithm, pipeline, or retriever.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Setting {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    Text(String),
    /// Array of settings.
    List(Vec<Setting>),
    /// A path or identifier reference, kept as written.
    Ref(String),
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Ref(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// One declaration found in source (or recovered from an import).
#[derive(Clone, Debug, PartialEq)]
pub struct DiscoveredResource {
    /// Domain identifier: the label or algorithm name, never the declaring identifier.
    pub name: String,
    /// Resource kind.
    pub kind: ResourceKind,
    /// The type name the declaration used (e.g. `PageRank`).
    pub type_name: String,
    /// The identifier that declared this resource in source.
    pub identifier: String,
    /// Originating location.
    pub location: Location,
    /// Names of resources this one references, ordered and deduplicated.
    pub dependencies: Vec<String>,
    /// Declared properties.
    pub properties: Vec<PropertyDef>,
    /// Explicit constraints.
    pub constraints: Vec<ConstraintDef>,
    /// Explicit indexes.
    pub indexes: Vec<IndexDef>,
    /// Source label (relationships only).
    pub source: Option<String>,
    /// Target label (relationships only).
    pub target: Option<String>,
    /// Free-text guidance for agents (schema wrapper only).
    pub agent_context: Option<String>,
    /// Optional free text.
    pub description: Option<String>,
    /// Other literal fields, keyed by field name.
    pub settings: BTreeMap<String, Setting>,
}

impl DiscoveredResource {
    /// Creates a resource with no metadata. The type name defaults to the kind name
    /// and the identifier to the domain name.
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        let name = name.into();
        Self {
            identifier: name.clone(),
            name,
            kind,
            type_name: kind.name().to_string(),
            location: Location::default(),
            dependencies: Vec::new(),
            properties: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
            source: None,
            target: None,
            agent_context: None,
            description: None,
            settings: BTreeMap::new(),
        }
    }

    /// Creates a node type.
    pub fn node(label: impl Into<String>) -> Self {
        Self::new(label, ResourceKind::NodeType)
    }

    /// Creates a relationship type between two labels.
    pub fn relationship(
        label: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        let mut rel = Self::new(label, ResourceKind::RelationshipType);
        rel.source = Some(source.into());
        rel.target = Some(target.into());
        rel
    }

    /// Builder method to add a property.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Builder method to add a constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: ConstraintDef) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Builder method to add an index.
    #[must_use]
    pub fn with_index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    /// Builder method to add a dependency.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.add_dependency(name);
        self
    }

    /// Builder method to set the location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Adds a dependency unless it is already present.
    pub fn add_dependency(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.dependencies.contains(&name) {
            self.dependencies.push(name);
        }
    }

    /// Returns the `(kind, name)` identity key.
    #[must_use]
    pub fn key(&self) -> (ResourceKind, &str) {
        (self.kind, self.name.as_str())
    }

    /// Finds a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns true if any property is required.
    #[must_use]
    pub fn has_required_property(&self) -> bool {
        self.properties.iter().any(|p| p.required)
    }
}

/// Constraint types the synthesizer can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintType {
    /// Single or composite uniqueness.
    Unique,
    /// Property existence (`IS NOT NULL`).
    Exists,
    /// Composite key (`IS NODE KEY` / `IS RELATIONSHIP KEY`).
    Key,
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unique => "UNIQUE",
            Self::Exists => "EXISTS",
            Self::Key => "KEY",
        })
    }
}

impl std::str::FromStr for ConstraintType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match normalize(s).as_str() {
            "unique" | "uniqueness" | "isunique" => Ok(Self::Unique),
            "exists" | "existence" | "notnull" | "isnotnull" | "required" | "propertyexistence" => {
                Ok(Self::Exists)
            }
            "key" | "nodekey" | "relationshipkey" | "relkey" | "compositekey" => Ok(Self::Key),
            _ => Err(crate::Error::unsupported("constraint type", s)),
        }
    }
}

/// Index types the synthesizer can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexType {
    /// Range (default) index.
    Range,
    /// Text index.
    Text,
    /// Full-text index over one or more properties.
    Fulltext,
    /// Spatial point index.
    Point,
    /// Vector similarity index.
    Vector,
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Range => "RANGE",
            Self::Text => "TEXT",
            Self::Fulltext => "FULLTEXT",
            Self::Point => "POINT",
            Self::Vector => "VECTOR",
        })
    }
}

impl std::str::FromStr for IndexType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match normalize(s).as_str() {
            "" | "range" | "default" | "btree" | "property" => Ok(Self::Range),
            "text" => Ok(Self::Text),
            "fulltext" => Ok(Self::Fulltext),
            "point" | "spatial" => Ok(Self::Point),
            "vector" => Ok(Self::Vector),
            _ => Err(crate::Error::unsupported("index type", s)),
        }
    }
}

/// Lowercases and strips separators so `NODE_KEY`, `NodeKey`, and `node key` compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
