//! The declaration vocabulary.
//!
//! Declaration source builds `static` values of these types; the scanner
//! reads them structurally, and generated source compiles against them.
//! Every type has a `DEFAULT` constant so literals can name only the fields
//! they set:
//!
//! ```
//! use graphdecl::schema::*;
//!
//! pub static PERSON: NodeType = NodeType {
//!     label: "Person",
//!     properties: &[Property { name: "id", ty: "String", required: true, unique: true, ..Property::DEFAULT }],
//!     ..NodeType::DEFAULT
//! };
//!
//! assert!(PERSON.property("id").is_some_and(|p| p.unique));
//! ```

/// A property on a node or relationship type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Property {
    /// Property key.
    pub name: &'static str,
    /// Type name, e.g. `String` or `List<Float>`.
    pub ty: &'static str,
    /// Must be present on every instance.
    pub required: bool,
    /// Must be unique across instances.
    pub unique: bool,
    /// Free text; empty when absent.
    pub description: &'static str,
}

impl Property {
    /// An optional, non-unique `String` property with no name.
    pub const DEFAULT: Self = Self {
        name: "",
        ty: "String",
        required: false,
        unique: false,
        description: "",
    };
}

/// An explicit constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraint {
    /// `UNIQUE`, `EXISTS`, or `KEY`.
    pub kind: &'static str,
    /// Constrained properties.
    pub properties: &'static [&'static str],
    /// Statement name; empty to derive one.
    pub name: &'static str,
}

impl Constraint {
    /// An unnamed uniqueness constraint over nothing.
    pub const DEFAULT: Self = Self {
        kind: "UNIQUE",
        properties: &[],
        name: "",
    };
}

/// An explicit index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Index {
    /// `RANGE`, `TEXT`, `FULLTEXT`, `POINT`, or `VECTOR`.
    pub kind: &'static str,
    /// Indexed properties.
    pub properties: &'static [&'static str],
    /// Options such as `("dimensions", "1536")`.
    pub options: &'static [(&'static str, &'static str)],
    /// Statement name; empty to derive one.
    pub name: &'static str,
}

impl Index {
    /// An unnamed range index over nothing.
    pub const DEFAULT: Self = Self {
        kind: "RANGE",
        properties: &[],
        options: &[],
        name: "",
    };

    /// Looks up an option value.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&'static str> {
        self.options.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// A node label and its properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeType {
    /// The label.
    pub label: &'static str,
    /// Free text; empty when absent.
    pub description: &'static str,
    /// Declared properties.
    pub properties: &'static [Property],
    /// Explicit constraints.
    pub constraints: &'static [Constraint],
    /// Explicit indexes.
    pub indexes: &'static [Index],
}

impl NodeType {
    /// An unlabelled node type with nothing declared.
    pub const DEFAULT: Self = Self {
        label: "",
        description: "",
        properties: &[],
        constraints: &[],
        indexes: &[],
    };

    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'static Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A relationship type between two node labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationshipType {
    /// The relationship type name.
    pub label: &'static str,
    /// Free text; empty when absent.
    pub description: &'static str,
    /// Source node label; empty when unconstrained.
    pub source: &'static str,
    /// Target node label; empty when unconstrained.
    pub target: &'static str,
    /// Declared properties.
    pub properties: &'static [Property],
    /// Explicit constraints.
    pub constraints: &'static [Constraint],
    /// Explicit indexes.
    pub indexes: &'static [Index],
}

impl RelationshipType {
    /// An unlabelled relationship type with nothing declared.
    pub const DEFAULT: Self = Self {
        label: "",
        description: "",
        source: "",
        target: "",
        properties: &[],
        constraints: &[],
        indexes: &[],
    };

    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'static Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// The wrapper listing every type of one schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
    /// Node types.
    pub nodes: &'static [&'static NodeType],
    /// Relationship types.
    pub relationships: &'static [&'static RelationshipType],
    /// Free-text guidance for agents querying the graph.
    pub agent_context: &'static str,
}

impl Schema {
    /// An empty schema.
    pub const DEFAULT: Self = Self {
        nodes: &[],
        relationships: &[],
        agent_context: "",
    };

    /// Finds a node type by label.
    #[must_use]
    pub fn node(&self, label: &str) -> Option<&'static NodeType> {
        self.nodes.iter().copied().find(|n| n.label == label)
    }

    /// Finds a relationship type by label.
    #[must_use]
    pub fn relationship(&self, label: &str) -> Option<&'static RelationshipType> {
        self.relationships.iter().copied().find(|r| r.label == label)
    }

    /// Relationship types whose source or target is the given label.
    pub fn relationships_of<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = &'static RelationshipType> + 'a {
        self.relationships
            .iter()
            .copied()
            .filter(move |r| r.source == label || r.target == label)
    }
}
