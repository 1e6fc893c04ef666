//! Cypher statement templates.
//!
//! One [`Template`] variant per constraint or index shape. Rendering is an
//! exhaustive match so a new variant cannot be added without its text.

use std::fmt;

use graphdecl_foundation::{Error, Result};

/// The entity a statement applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A node label.
    Node(String),
    /// A relationship type.
    Relationship(String),
}

impl Target {
    /// The label or type name.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Node(label) | Self::Relationship(label) => label,
        }
    }

    fn var(&self) -> &'static str {
        match self {
            Self::Node(_) => "n",
            Self::Relationship(_) => "r",
        }
    }

    /// The `FOR` pattern: `(n:Label)` or `()-[r:TYPE]-()`.
    #[must_use]
    pub fn pattern(&self) -> String {
        match self {
            Self::Node(label) => format!("(n:{})", quote_identifier(label)),
            Self::Relationship(label) => format!("()-[r:{}]-()", quote_identifier(label)),
        }
    }

    fn key_kind(&self) -> &'static str {
        match self {
            Self::Node(_) => "NODE",
            Self::Relationship(_) => "RELATIONSHIP",
        }
    }
}

/// A constraint or index statement shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Template {
    /// `REQUIRE n.p IS UNIQUE` or `REQUIRE (n.a, n.b) IS UNIQUE`.
    UniqueConstraint,
    /// `REQUIRE n.p IS NOT NULL`.
    ExistenceConstraint,
    /// `REQUIRE (n.a, n.b) IS NODE KEY` / `IS RELATIONSHIP KEY`.
    KeyConstraint,
    /// `CREATE INDEX ... ON (n.a, n.b)`.
    RangeIndex,
    /// `CREATE TEXT INDEX ... ON (n.p)`.
    TextIndex,
    /// `CREATE FULLTEXT INDEX ... ON EACH [n.a, n.b]`.
    FulltextIndex,
    /// `CREATE POINT INDEX ... ON (n.p)`.
    PointIndex,
    /// `CREATE VECTOR INDEX ... ON (n.p) OPTIONS {...}`.
    VectorIndex {
        /// `vector.dimensions`
        dimensions: u32,
        /// `vector.similarity_function`
        similarity: String,
    },
}

impl Template {
    /// Suffix used when deriving a statement name.
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::UniqueConstraint => "unique",
            Self::ExistenceConstraint => "not_null",
            Self::KeyConstraint => "key",
            Self::RangeIndex => "range",
            Self::TextIndex => "text",
            Self::FulltextIndex => "fulltext",
            Self::PointIndex => "point",
            Self::VectorIndex { .. } => "vector",
        }
    }

    /// Returns true if the template applies to exactly one property.
    #[must_use]
    pub fn is_single_property(&self) -> bool {
        matches!(
            self,
            Self::ExistenceConstraint | Self::TextIndex | Self::PointIndex | Self::VectorIndex { .. }
        )
    }

    /// Returns true for constraint templates.
    #[must_use]
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            Self::UniqueConstraint | Self::ExistenceConstraint | Self::KeyConstraint
        )
    }

    fn keyword(&self) -> &'static str {
        match self {
            Self::UniqueConstraint | Self::ExistenceConstraint | Self::KeyConstraint => {
                "CONSTRAINT"
            }
            Self::RangeIndex => "INDEX",
            Self::TextIndex => "TEXT INDEX",
            Self::FulltextIndex => "FULLTEXT INDEX",
            Self::PointIndex => "POINT INDEX",
            Self::VectorIndex { .. } => "VECTOR INDEX",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One renderable statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    /// Constraint or index name.
    pub name: String,
    /// The entity the statement applies to.
    pub target: Target,
    /// Statement shape.
    pub template: Template,
    /// Properties, in declared order.
    pub properties: Vec<String>,
}

impl Statement {
    /// Creates a statement, checking the property count fits the template.
    ///
    /// # Errors
    /// Returns an unsupported error for an empty property list or a
    /// single-property template given several.
    pub fn new(
        name: impl Into<String>,
        target: Target,
        template: Template,
        properties: Vec<String>,
    ) -> Result<Self> {
        if properties.is_empty() {
            return Err(Error::unsupported(
                format!("{template} on {}", target.label()),
                "empty property list",
            ));
        }
        if template.is_single_property() && properties.len() != 1 {
            return Err(Error::unsupported(
                format!("{template} on {}", target.label()),
                format!("{} properties ({})", properties.len(), properties.join(", ")),
            ));
        }
        Ok(Self {
            name: name.into(),
            target,
            template,
            properties,
        })
    }

    /// Renders the statement, terminated by `;`.
    #[must_use]
    pub fn render(&self, if_not_exists: bool) -> String {
        let var = self.target.var();
        let guard = if if_not_exists { " IF NOT EXISTS" } else { "" };
        let head = format!(
            "CREATE {} {}{guard} FOR {}",
            self.template.keyword(),
            quote_identifier(&self.name),
            self.target.pattern()
        );
        let single = || property_ref(var, &self.properties[0]);
        let tuple = || {
            if self.properties.len() == 1 {
                single()
            } else {
                format!("({})", self.property_list(var))
            }
        };

        match &self.template {
            Template::UniqueConstraint => format!("{head} REQUIRE {} IS UNIQUE;", tuple()),
            Template::ExistenceConstraint => format!("{head} REQUIRE {} IS NOT NULL;", single()),
            Template::KeyConstraint => format!(
                "{head} REQUIRE {} IS {} KEY;",
                tuple(),
                self.target.key_kind()
            ),
            Template::RangeIndex => format!("{head} ON ({});", self.property_list(var)),
            Template::TextIndex | Template::PointIndex => format!("{head} ON ({});", single()),
            Template::FulltextIndex => format!("{head} ON EACH [{}];", self.property_list(var)),
            Template::VectorIndex {
                dimensions,
                similarity,
            } => format!(
                "{head} ON ({}) OPTIONS {{indexConfig: {{`vector.dimensions`: {dimensions}, \
                 `vector.similarity_function`: '{}'}}}};",
                single(),
                similarity.replace('\'', "\\'")
            ),
        }
    }

    fn property_list(&self, var: &str) -> String {
        self.properties
            .iter()
            .map(|p| property_ref(var, p))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn property_ref(var: &str, property: &str) -> String {
    format!("{var}.{}", quote_identifier(property))
}

/// Returns true for names usable in Cypher without quoting.
#[must_use]
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Backtick-quotes a name unless it is a plain identifier.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}
