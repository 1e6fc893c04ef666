//! Cypher statement script rendering.

use std::collections::HashSet;

use graphdecl_foundation::{
    ConstraintDef, ConstraintType, DiscoveredResource, Error, IndexDef, IndexType, ResourceKind,
    Result,
};
use graphdecl_graph::DependencyGraph;
use tracing::debug;

use crate::config::SynthConfig;
use crate::templates::{Statement, Target, Template};

/// First line of a rendered script when file headers are enabled.
pub const FILE_HEADER: &str = "// Generated by graphdecl. Do not edit by hand.";

/// Derives every statement for one resource.
///
/// Implicit constraints from property flags come first, in property order,
/// then explicit constraints, then indexes. A name seen twice is emitted once.
///
/// # Errors
/// Returns an unsupported error for unknown constraint or index types and
/// property lists that do not fit their template.
pub fn statements(resource: &DiscoveredResource, config: &SynthConfig) -> Result<Vec<Statement>> {
    let target = match resource.kind {
        ResourceKind::NodeType => Target::Node(resource.name.clone()),
        ResourceKind::RelationshipType => Target::Relationship(resource.name.clone()),
        _ => return Ok(Vec::new()),
    };
    let lower = resource.name.to_lowercase();

    let mut out = Vec::new();
    for property in &resource.properties {
        if property.unique {
            out.push(Statement::new(
                format!("{lower}_{}_unique", property.name),
                target.clone(),
                Template::UniqueConstraint,
                vec![property.name.clone()],
            )?);
        }
        if property.required {
            out.push(Statement::new(
                format!("{lower}_{}_not_null", property.name),
                target.clone(),
                Template::ExistenceConstraint,
                vec![property.name.clone()],
            )?);
        }
    }

    for constraint in &resource.constraints {
        out.push(constraint_statement(constraint, &target, &lower)?);
    }
    for index in &resource.indexes {
        out.push(index_statement(index, &target, &lower, config)?);
    }

    let mut seen = HashSet::new();
    out.retain(|s| seen.insert(s.name.clone()));
    Ok(out)
}

fn derived_name(lower: &str, properties: &[String], template: &Template) -> String {
    format!("{lower}_{}_{}", properties.join("_"), template.suffix())
}

fn constraint_statement(
    constraint: &ConstraintDef,
    target: &Target,
    lower: &str,
) -> Result<Statement> {
    let template = match constraint.kind.parse::<ConstraintType>()? {
        ConstraintType::Unique => Template::UniqueConstraint,
        ConstraintType::Exists => Template::ExistenceConstraint,
        ConstraintType::Key => Template::KeyConstraint,
    };
    let name = constraint
        .name
        .clone()
        .unwrap_or_else(|| derived_name(lower, &constraint.properties, &template));
    Statement::new(name, target.clone(), template, constraint.properties.clone())
}

fn index_statement(
    index: &IndexDef,
    target: &Target,
    lower: &str,
    config: &SynthConfig,
) -> Result<Statement> {
    let template = match index.kind.parse::<IndexType>()? {
        IndexType::Range => Template::RangeIndex,
        IndexType::Text => Template::TextIndex,
        IndexType::Fulltext => Template::FulltextIndex,
        IndexType::Point => Template::PointIndex,
        IndexType::Vector => vector_template(index, config)?,
    };
    let name = index
        .name
        .clone()
        .unwrap_or_else(|| derived_name(lower, &index.properties, &template));
    Statement::new(name, target.clone(), template, index.properties.clone())
}

fn vector_template(index: &IndexDef, config: &SynthConfig) -> Result<Template> {
    let mut dimensions = config.vector_dimensions;
    let mut similarity = config.vector_similarity.clone();
    for (key, value) in &index.options {
        match option_key(key).as_str() {
            "dimensions" | "vectordimensions" | "dims" => {
                dimensions = value
                    .trim()
                    .parse()
                    .map_err(|_| Error::unsupported("vector dimensions", value.as_str()))?;
            }
            "similarity" | "similarityfunction" | "vectorsimilarityfunction" => {
                similarity = value.trim().to_lowercase();
            }
            _ => {}
        }
    }
    Ok(Template::VectorIndex {
        dimensions,
        similarity,
    })
}

fn option_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '.' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Renders one resource's statements, one per line.
///
/// Returns an empty string when the resource has nothing to emit, including
/// kinds that have no statement form.
///
/// # Errors
/// See [`statements`].
pub fn render_resource(resource: &DiscoveredResource, config: &SynthConfig) -> Result<String> {
    Ok(statements(resource, config)?
        .iter()
        .map(|s| s.render(config.if_not_exists))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Renders a whole statement script.
///
/// Resources are taken in dependency order, node types before relationship
/// types; other kinds have no statements and are skipped.
///
/// # Errors
/// Returns a cycle error if the resources cannot be ordered, or any
/// rendering error from [`render_resource`].
pub fn render_cypher(resources: &[DiscoveredResource], config: &SynthConfig) -> Result<String> {
    let graph = DependencyGraph::build(resources);
    let order = graph.topological_sort()?;

    let mut blocks = Vec::new();
    for kind in [ResourceKind::NodeType, ResourceKind::RelationshipType] {
        for resource in order.iter().filter(|r| r.kind == kind) {
            let body = render_resource(resource, config)?;
            if body.is_empty() {
                debug!(kind = %kind, name = %resource.name, "no statements");
                continue;
            }
            if config.block_headers {
                blocks.push(format!("// {kind}: {}\n{body}", resource.name));
            } else {
                blocks.push(body);
            }
        }
    }

    let mut out = String::new();
    if config.file_header {
        out.push_str(FILE_HEADER);
        out.push_str("\n\n");
    }
    out.push_str(&blocks.join("\n\n"));
    if !blocks.is_empty() {
        out.push('\n');
    }
    Ok(out)
}
