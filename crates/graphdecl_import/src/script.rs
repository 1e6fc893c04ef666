//! Cypher script import.
//!
//! Scripts are split into statements at `;`, then each statement is matched
//! against a small grammar of constraint and index forms. Anything else is
//! reported as skipped.

use std::sync::LazyLock;

use graphdecl_foundation::{Error, ErrorKind, IndexType, ResourceKind, Result};
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::ImportReport;
use crate::grouping::{ConstraintShape, Grouping, ImportedIndex};

// =============================================================================
// Grammar
// =============================================================================

const CONSTRAINT: &str = r"(?isx)
    ^CREATE \s+ CONSTRAINT
    (?: \s+ (?P<name> `[^`]+` | [A-Za-z_][\w$]* ) )?
    (?: \s+ IF \s+ NOT \s+ EXISTS )?
    \s+ (?: FOR | ON ) \s*
    (?:
        \( \s* \w* \s* : \s* (?P<node> `[^`]+` | [^\s:()`|]+ ) \s* \)
      | \( \s* \) \s* <? \s* - \s* \[ \s* \w* \s* : \s* (?P<rel> `[^`]+` | [^\s:()\[\]`|]+ ) \s* \] \s* - \s* >? \s* \( \s* \)
    )
    \s* (?: REQUIRE | ASSERT ) \s*
    (?:
        EXISTS \s* \( \s* (?P<exists> [^)]*? ) \s* \)
      | (?P<props> \( [^)]* \) | \w* \.? `[^`]+` | [^\s(]+ ) \s+ IS \s+
        (?P<shape>
            UNIQUE
          | (?: NODE \s+ | REL (?: ATIONSHIP )? \s+ )? KEY
          | NOT \s+ NULL
          | :: \s* (?P<ty> .+? )
          | TYPED \s+ (?P<typed> .+? )
        )
    )
    \s* (?: OPTIONS \s* \{ .* \} )? \s* $";

const INDEX: &str = r"(?isx)
    ^CREATE \s+ (?: (?P<kind> RANGE | BTREE | TEXT | FULLTEXT | VECTOR | POINT ) \s+ )? INDEX
    (?: \s+ (?P<name> `[^`]+` | [A-Za-z_][\w$]* ) )?
    (?: \s+ IF \s+ NOT \s+ EXISTS )?
    \s+ FOR \s*
    (?:
        \( \s* \w* \s* : \s* (?P<nodes> [^)]+? ) \s* \)
      | \( \s* \) \s* <? \s* - \s* \[ \s* \w* \s* : \s* (?P<rels> [^\]]+? ) \s* \] \s* - \s* >? \s* \( \s* \)
    )
    \s* ON \s*
    (?: EACH \s* \[ (?P<each> [^\]]* ) \] | \( (?P<props> [^)]* ) \) )
    \s* (?P<options> OPTIONS \s* \{ .* \} )? \s* $";

const LEGACY_INDEX: &str = r"(?isx)
    ^CREATE \s+ INDEX
    (?: \s+ (?P<name> `[^`]+` | [A-Za-z_][\w$]* ) )?
    \s+ ON \s* : \s* (?P<label> `[^`]+` | [^\s(`]+ ) \s*
    \( (?P<props> [^)]* ) \) \s* $";

const DIMENSIONS: &str = r"(?i)`?vector\.dimensions`?\s*:\s*(\d+)";

const SIMILARITY: &str = r#"(?i)`?vector\.similarity_function`?\s*:\s*['"]([^'"]+)['"]"#;

/// The compiled statement grammar.
struct Grammar {
    constraint: Regex,
    index: Regex,
    legacy_index: Regex,
    dimensions: Regex,
    similarity: Regex,
}

impl Grammar {
    fn compile() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            constraint: Regex::new(CONSTRAINT)?,
            index: Regex::new(INDEX)?,
            legacy_index: Regex::new(LEGACY_INDEX)?,
            dimensions: Regex::new(DIMENSIONS)?,
            similarity: Regex::new(SIMILARITY)?,
        })
    }
}

static GRAMMAR: LazyLock<std::result::Result<Grammar, regex::Error>> =
    LazyLock::new(Grammar::compile);

fn grammar() -> Result<&'static Grammar> {
    GRAMMAR
        .as_ref()
        .map_err(|e| Error::new(ErrorKind::Internal(format!("statement grammar: {e}"))))
}

// =============================================================================
// Statement splitting
// =============================================================================

/// Splits a script into statements.
///
/// Outside quotes, `//` starts a comment that runs to the end of the line,
/// wherever it appears; `--` does the same where a statement could begin
/// (line start or after a `;`), so relationship patterns like `()--()` are
/// left alone. A `;` inside quotes or backticks does not end a statement.
/// Trailing text with no terminator is returned as a final statement.
#[must_use]
pub fn split_statements(text: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for line in text.lines() {
        let mut chars = line.trim().chars().peekable();
        let mut statement_start = true;
        while let Some(c) = chars.next() {
            if let Some(q) = quote {
                current.push(c);
                if c == '\\' && q != '`' {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '/' if chars.peek() == Some(&'/') => break,
                '-' if statement_start && chars.peek() == Some(&'-') => break,
                ';' => {
                    push_statement(&mut statements, &mut current);
                    statement_start = true;
                }
                c if c.is_whitespace() => current.push(c),
                c => {
                    if matches!(c, '\'' | '"' | '`') {
                        quote = Some(c);
                    }
                    statement_start = false;
                    current.push(c);
                }
            }
        }
        if !current.trim().is_empty() {
            current.push(' ');
        }
    }
    push_statement(&mut statements, &mut current);
    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

// =============================================================================
// Import
// =============================================================================

/// Imports the constraints and indexes of a Cypher script.
///
/// # Errors
/// Returns an internal error only if the statement grammar fails to compile.
/// Unrecognized statements are not errors; they are listed in
/// [`ImportReport::skipped`].
pub fn import_script(text: &str) -> Result<ImportReport> {
    let grammar = grammar()?;
    let mut grouping = Grouping::new();
    let mut skipped = Vec::new();

    for statement in split_statements(text) {
        if apply_statement(grammar, &statement, &mut grouping) {
            debug!(statement = %statement, "imported");
        } else {
            warn!(statement = %statement, "skipping unrecognized statement");
            skipped.push(statement);
        }
    }

    Ok(ImportReport {
        resources: grouping.finish(),
        skipped,
    })
}

fn apply_statement(grammar: &Grammar, statement: &str, grouping: &mut Grouping) -> bool {
    if let Some(caps) = grammar.constraint.captures(statement) {
        return apply_constraint(&caps, grouping);
    }
    if let Some(caps) = grammar.index.captures(statement) {
        return apply_index(grammar, &caps, grouping);
    }
    if let Some(caps) = grammar.legacy_index.captures(statement) {
        let properties = property_list(caps.name("props").map_or("", |m| m.as_str()));
        let label = unquote(caps.name("label").map_or("", |m| m.as_str()));
        if properties.is_empty() || label.is_empty() {
            return false;
        }
        let index = ImportedIndex {
            kind: IndexType::Range,
            properties,
            name: captured_name(&caps),
            dimensions: None,
            similarity: None,
        };
        grouping.index(ResourceKind::NodeType, &[label], &index);
        return true;
    }
    false
}

fn apply_constraint(caps: &Captures<'_>, grouping: &mut Grouping) -> bool {
    let (kind, label) = if let Some(node) = caps.name("node") {
        (ResourceKind::NodeType, unquote(node.as_str()))
    } else if let Some(rel) = caps.name("rel") {
        (ResourceKind::RelationshipType, unquote(rel.as_str()))
    } else {
        return false;
    };

    let (shape, properties) = if let Some(exists) = caps.name("exists") {
        (ConstraintShape::Exists, property_list(exists.as_str()))
    } else {
        let properties = property_list(caps.name("props").map_or("", |m| m.as_str()));
        let Some(shape) = caps.name("shape") else {
            return false;
        };
        let ty = caps.name("ty").or_else(|| caps.name("typed"));
        let shape = if let Some(ty) = ty {
            ConstraintShape::Typed(ty.as_str().trim().to_string())
        } else {
            let words = shape.as_str().to_ascii_uppercase();
            if words == "UNIQUE" {
                ConstraintShape::Unique
            } else if words.ends_with("KEY") {
                ConstraintShape::Key
            } else {
                ConstraintShape::Exists
            }
        };
        (shape, properties)
    };

    if properties.is_empty() {
        return false;
    }
    grouping.constraint(kind, &label, shape, &properties, captured_name(caps));
    true
}

fn apply_index(grammar: &Grammar, caps: &Captures<'_>, grouping: &mut Grouping) -> bool {
    let index_kind = match caps.name("kind") {
        Some(kind) => match kind.as_str().parse::<IndexType>() {
            Ok(kind) => kind,
            Err(_) => return false,
        },
        None => IndexType::Range,
    };
    let (entity, labels) = if let Some(nodes) = caps.name("nodes") {
        (ResourceKind::NodeType, label_list(nodes.as_str()))
    } else if let Some(rels) = caps.name("rels") {
        (ResourceKind::RelationshipType, label_list(rels.as_str()))
    } else {
        return false;
    };
    let properties = property_list(
        caps.name("each")
            .or_else(|| caps.name("props"))
            .map_or("", |m| m.as_str()),
    );
    if labels.is_empty() || properties.is_empty() {
        return false;
    }

    let options = caps.name("options").map_or("", |m| m.as_str());
    let option = |re: &Regex| {
        re.captures(options)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };
    let index = ImportedIndex {
        kind: index_kind,
        properties,
        name: captured_name(caps),
        dimensions: option(&grammar.dimensions),
        similarity: option(&grammar.similarity),
    };
    grouping.index(entity, &labels, &index);
    true
}

// =============================================================================
// Fragments
// =============================================================================

fn captured_name(caps: &Captures<'_>) -> Option<String> {
    caps.name("name").map(|m| unquote(m.as_str()))
}

/// Strips surrounding backticks, undoubling escaped ones.
fn unquote(text: &str) -> String {
    let text = text.trim();
    match text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        Some(inner) => inner.replace("``", "`"),
        None => text.to_string(),
    }
}

/// Splits `L|M` or `L:M` label lists.
fn label_list(text: &str) -> Vec<String> {
    text.split(['|', ':'])
        .map(unquote)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Splits `(n.a, n.b)`, `n.a`, or `n.a, n.b` into bare property names.
fn property_list(text: &str) -> Vec<String> {
    let text = text.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text);
    text.split(',')
        .map(|item| unquote(strip_variable(item.trim())))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Drops a leading `var.` unless the dot is inside backticks.
fn strip_variable(item: &str) -> &str {
    if item.starts_with('`') {
        return item;
    }
    match item.split_once('.') {
        Some((_, property)) => property,
        None => item,
    }
}
