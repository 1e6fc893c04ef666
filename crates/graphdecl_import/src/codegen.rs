//! Declaration source generation.
//!
//! Turns imported resources back into a module of `static` declarations that
//! the scanner reads as the same node and relationship types.

use std::collections::HashMap;
use std::fmt::Write as _;

use graphdecl_foundation::{
    ConstraintDef, DiscoveredResource, Error, ErrorKind, IndexDef, PropertyDef, ResourceKind,
    Result,
};
use tracing::{debug, warn};

/// Agent guidance written into the schema wrapper when none is known.
pub const DEFAULT_AGENT_CONTEXT: &str =
    "Describe the domain, naming conventions, and common query patterns for agents here.";

/// Identifier of the generated schema wrapper.
const SCHEMA_IDENT: &str = "SCHEMA";

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Configuration for source generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Agent guidance used when no schema resource supplies one.
    pub agent_context: String,
    /// Whether to emit the `//!` file header.
    pub header: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            agent_context: DEFAULT_AGENT_CONTEXT.to_string(),
            header: true,
        }
    }
}

impl GenerateConfig {
    /// Creates a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the agent guidance placeholder.
    #[must_use]
    pub fn with_agent_context(mut self, context: impl Into<String>) -> Self {
        self.agent_context = context.into();
        self
    }

    /// Enables or disables the file header.
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// Generates declaration source for resources with default settings.
///
/// # Errors
/// See [`generate_with`].
pub fn generate(resources: &[DiscoveredResource], package: &str) -> Result<String> {
    generate_with(resources, package, &GenerateConfig::default())
}

/// Generates declaration source for resources.
///
/// Node and relationship types each become one `static`; a `SCHEMA` wrapper
/// lists them all. Other kinds have no source form here and are skipped.
///
/// # Errors
/// Returns an internal error if writing the output fails.
pub fn generate_with(
    resources: &[DiscoveredResource],
    package: &str,
    config: &GenerateConfig,
) -> Result<String> {
    write_module(resources, package, config)
        .map_err(|e| Error::new(ErrorKind::Internal(format!("source generation: {e}"))))
}

fn write_module(
    resources: &[DiscoveredResource],
    package: &str,
    config: &GenerateConfig,
) -> std::result::Result<String, std::fmt::Error> {
    let module = module_name(package);
    let mut names = Identifiers::new();
    let mut out = String::new();

    if config.header {
        writeln!(out, "//! Graph schema declarations generated by graphdecl.")?;
        writeln!(out, "//!")?;
        writeln!(out, "//! Regenerate with `graphdecl import`; local edits are overwritten.")?;
        writeln!(out)?;
    }
    writeln!(out, "pub mod {module} {{")?;
    writeln!(out, "    use graphdecl::schema::*;")?;

    let mut nodes = Vec::new();
    let mut relationships = Vec::new();
    for resource in resources {
        if !resource.kind.is_entity() {
            warn!(kind = %resource.kind, name = %resource.name, "no source form; skipped");
            continue;
        }
        let ident = names.allocate(&resource.name, resource.kind);
        debug!(name = %resource.name, ident = %ident, "generating");
        writeln!(out)?;
        write_entity(&mut out, &ident, resource)?;
        if resource.kind == ResourceKind::NodeType {
            nodes.push(ident);
        } else {
            relationships.push(ident);
        }
    }

    let agent_context = resources
        .iter()
        .filter(|r| r.kind == ResourceKind::Schema)
        .find_map(|r| r.agent_context.as_deref())
        .unwrap_or(&config.agent_context);

    writeln!(out)?;
    writeln!(out, "    pub static {SCHEMA_IDENT}: Schema = Schema {{")?;
    writeln!(out, "        nodes: {},", ref_list(&nodes))?;
    writeln!(out, "        relationships: {},", ref_list(&relationships))?;
    writeln!(out, "        agent_context: {agent_context:?},")?;
    writeln!(out, "    }};")?;
    writeln!(out, "}}")?;
    Ok(out)
}

fn ref_list(idents: &[String]) -> String {
    let refs: Vec<String> = idents.iter().map(|i| format!("&{i}")).collect();
    format!("&[{}]", refs.join(", "))
}

fn str_list(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|i| format!("{i:?}")).collect();
    format!("&[{}]", items.join(", "))
}

// =============================================================================
// Struct literals
// =============================================================================

/// A struct literal of the declaration vocabulary.
///
/// Fields left out fall back to the type's `DEFAULT`.
struct Literal {
    ty: &'static str,
    arity: usize,
    fields: Vec<(&'static str, String)>,
}

impl Literal {
    fn new(ty: &'static str, arity: usize) -> Self {
        Self {
            ty,
            arity,
            fields: Vec::new(),
        }
    }

    fn field(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.fields.push((name, value.into()));
        self
    }

    fn base(&self) -> Option<String> {
        (self.fields.len() < self.arity).then(|| format!("..{}::DEFAULT", self.ty))
    }

    fn inline(&self) -> String {
        let mut parts: Vec<String> = self
            .fields
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        parts.extend(self.base());
        format!("{} {{ {} }}", self.ty, parts.join(", "))
    }

    fn block(&self, indent: &str) -> String {
        let mut out = format!("{} {{\n", self.ty);
        for (name, value) in &self.fields {
            let _ = writeln!(out, "{indent}    {name}: {value},");
        }
        if let Some(base) = self.base() {
            let _ = writeln!(out, "{indent}    {base}");
        }
        out.push_str(indent);
        out.push('}');
        out
    }
}

fn block_list(items: Vec<String>, indent: &str) -> String {
    let mut out = String::from("&[\n");
    for item in items {
        let _ = writeln!(out, "{indent}    {item},");
    }
    out.push_str(indent);
    out.push(']');
    out
}

fn property_literal(property: &PropertyDef) -> String {
    let mut literal = Literal::new("Property", 5);
    literal
        .field("name", format!("{:?}", property.name))
        .field("ty", format!("{:?}", property.ty))
        .field("required", property.required.to_string())
        .field("unique", property.unique.to_string());
    if let Some(description) = &property.description {
        literal.field("description", format!("{description:?}"));
    }
    literal.inline()
}

fn constraint_literal(constraint: &ConstraintDef) -> String {
    let mut literal = Literal::new("Constraint", 3);
    literal
        .field("kind", format!("{:?}", constraint.kind))
        .field("properties", str_list(&constraint.properties));
    if let Some(name) = &constraint.name {
        literal.field("name", format!("{name:?}"));
    }
    literal.inline()
}

fn index_literal(index: &IndexDef) -> String {
    let mut literal = Literal::new("Index", 4);
    literal
        .field("kind", format!("{:?}", index.kind))
        .field("properties", str_list(&index.properties));
    if !index.options.is_empty() {
        let pairs: Vec<String> = index
            .options
            .iter()
            .map(|(k, v)| format!("({k:?}, {v:?})"))
            .collect();
        literal.field("options", format!("&[{}]", pairs.join(", ")));
    }
    if let Some(name) = &index.name {
        literal.field("name", format!("{name:?}"));
    }
    literal.inline()
}

fn write_entity(
    out: &mut String,
    ident: &str,
    resource: &DiscoveredResource,
) -> std::fmt::Result {
    const INDENT: &str = "        ";
    let (ty, arity) = match resource.kind {
        ResourceKind::RelationshipType => ("RelationshipType", 7),
        _ => ("NodeType", 5),
    };

    let mut literal = Literal::new(ty, arity);
    literal.field("label", format!("{:?}", resource.name));
    if let Some(description) = &resource.description {
        literal.field("description", format!("{description:?}"));
    }
    if let Some(source) = &resource.source {
        literal.field("source", format!("{source:?}"));
    }
    if let Some(target) = &resource.target {
        literal.field("target", format!("{target:?}"));
    }
    if !resource.properties.is_empty() {
        let items = resource.properties.iter().map(property_literal).collect();
        literal.field("properties", block_list(items, INDENT));
    }
    if !resource.constraints.is_empty() {
        let items = resource.constraints.iter().map(constraint_literal).collect();
        literal.field("constraints", block_list(items, INDENT));
    }
    if !resource.indexes.is_empty() {
        let items = resource.indexes.iter().map(index_literal).collect();
        literal.field("indexes", block_list(items, INDENT));
    }

    writeln!(out, "    pub static {ident}: {ty} = {};", literal.block("    "))
}

// =============================================================================
// Identifiers
// =============================================================================

/// Allocates unique `static` identifiers in declaration order.
#[derive(Debug)]
pub struct Identifiers {
    taken: HashMap<String, ResourceKind>,
}

impl Default for Identifiers {
    fn default() -> Self {
        Self::new()
    }
}

impl Identifiers {
    /// Creates an allocator with the schema wrapper's identifier reserved.
    #[must_use]
    pub fn new() -> Self {
        let mut taken = HashMap::new();
        taken.insert(SCHEMA_IDENT.to_string(), ResourceKind::Schema);
        Self { taken }
    }

    /// Returns a fresh identifier for a label.
    ///
    /// A relationship colliding with a node gets `_REL`, a node colliding
    /// with a relationship gets `_NODE`; anything still taken is numbered
    /// from `_2`.
    pub fn allocate(&mut self, label: &str, kind: ResourceKind) -> String {
        let mut candidate = static_ident(label);
        if let Some(&owner) = self.taken.get(&candidate) {
            match (kind, owner) {
                (ResourceKind::RelationshipType, ResourceKind::NodeType) => {
                    candidate.push_str("_REL");
                }
                (ResourceKind::NodeType, ResourceKind::RelationshipType) => {
                    candidate.push_str("_NODE");
                }
                _ => {}
            }
        }
        if self.taken.contains_key(&candidate) {
            let base = candidate.clone();
            let mut n = 2;
            while self.taken.contains_key(&candidate) {
                candidate = format!("{base}_{n}");
                n += 1;
            }
        }
        self.taken.insert(candidate.clone(), kind);
        candidate
    }
}

/// SCREAMING_SNAKE_CASE identifier for a label.
///
/// Word boundaries fall before an uppercase letter that follows a lowercase
/// letter or digit, and before the last capital of an acronym. Characters
/// outside ASCII alphanumerics become separators. Labels that do not start
/// with an ASCII letter are prefixed with `N`.
#[must_use]
pub fn static_ident(label: &str) -> String {
    let chars: Vec<char> = label.chars().collect();
    let mut raw = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            raw.push('_');
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower)
            {
                raw.push('_');
            }
        }
        raw.push(c.to_ascii_uppercase());
    }
    let ident = collapse_underscores(&raw);

    if label.starts_with(|c: char| c.is_ascii_alphabetic()) {
        ident
    } else if ident.is_empty() {
        "N".to_string()
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("N{ident}")
    } else {
        format!("N_{ident}")
    }
}

/// A valid module name for a package: lowercase snake case, never a keyword.
#[must_use]
pub fn module_name(package: &str) -> String {
    let raw: String = package
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let name = collapse_underscores(&raw);
    if name.is_empty() {
        "schema".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("schema_{name}")
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

fn collapse_underscores(raw: &str) -> String {
    raw.split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
