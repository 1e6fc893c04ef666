//! Scan a source tree, order it, synthesize both formats, then diff.

use std::fs;
use std::path::Path;

use graphdecl::diff::{DiffAction, diff, diff_paths};
use graphdecl::foundation::{DiscoveredResource, ResourceKind};
use graphdecl::graph::DependencyGraph;
use graphdecl::language::{ScanConfig, Scanner};
use graphdecl::synth::{OutputFormat, SynthConfig, parse_document, render};
use tempfile::TempDir;

const NODES: &str = r#"
use graphdecl::schema::*;

pub static PERSON: NodeType = NodeType {
    label: "Person",
    description: "A human being",
    properties: &[
        Property { name: "id", ty: "String", required: true, unique: true, ..Property::DEFAULT },
        Property { name: "embedding", ty: "List<Float>", ..Property::DEFAULT },
    ],
    indexes: &[Index {
        kind: "VECTOR",
        properties: &["embedding"],
        options: &[("dimensions", "1536")],
        ..Index::DEFAULT
    }],
    ..NodeType::DEFAULT
};

pub static COMPANY: NodeType = NodeType {
    label: "Company",
    properties: &[Property { name: "name", ty: "String", unique: true, ..Property::DEFAULT }],
    ..NodeType::DEFAULT
};
"#;

const RELATIONSHIPS: &str = r#"
use graphdecl::schema::*;

pub static WORKS_FOR: RelationshipType = RelationshipType {
    label: "WORKS_FOR",
    source: &PERSON,
    target: &COMPANY,
    ..RelationshipType::DEFAULT
};

pub static SCHEMA: Schema = Schema {
    nodes: &[&PERSON, &COMPANY],
    relationships: &[&WORKS_FOR],
    agent_context: "People work for companies.",
};
"#;

const ANALYTICS: &str = r#"
pub static EMPLOYMENT: NativeProjection = NativeProjection {
    name: "employment",
    node_labels: &["Person", "Company"],
    relationship_types: &[&WORKS_FOR],
};

pub static INFLUENCE: PageRank = PageRank {
    name: "influence",
    projection: &EMPLOYMENT,
    max_iterations: 20,
};

#[cfg(test)]
mod tests {
    pub static FIXTURE: NodeType = NodeType { label: "Fixture" };
}
"#;

fn entities(resources: &[DiscoveredResource]) -> Vec<DiscoveredResource> {
    resources
        .iter()
        .filter(|r| r.kind.is_entity())
        .cloned()
        .collect()
}

fn write_tree(root: &Path) {
    fs::create_dir_all(root.join("analytics")).unwrap();
    fs::write(root.join("nodes.rs"), NODES).unwrap();
    fs::write(root.join("relationships.rs"), RELATIONSHIPS).unwrap();
    fs::write(root.join("analytics/rank.rs"), ANALYTICS).unwrap();
}

#[test]
fn scan_order_and_synthesize() {
    let dir = TempDir::new().unwrap();
    write_tree(dir.path());

    let report = Scanner::default().scan_dir(dir.path()).unwrap();
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.resources.len(), 6);

    let graph = DependencyGraph::build(&report.resources);
    let order: Vec<(ResourceKind, &str)> = graph
        .topological_sort()
        .unwrap()
        .into_iter()
        .map(|r| r.key())
        .collect();
    assert_eq!(
        order,
        vec![
            (ResourceKind::NodeType, "Company"),
            (ResourceKind::NodeType, "Person"),
            (ResourceKind::RelationshipType, "WORKS_FOR"),
            (ResourceKind::Schema, "SCHEMA"),
            (ResourceKind::Algorithm, "employment"),
            (ResourceKind::Algorithm, "influence"),
        ]
    );

    let config = SynthConfig::default();
    let cypher = render(&report.resources, OutputFormat::Cypher, &config).unwrap();
    assert!(cypher.contains("CREATE CONSTRAINT company_name_unique IF NOT EXISTS"));
    assert!(cypher.contains("`vector.dimensions`: 1536, `vector.similarity_function`: 'cosine'"));
    assert!(!cypher.contains("WORKS_FOR"));
    assert!(cypher.find("// NodeType: Company") < cypher.find("// NodeType: Person"));

    let json = render(&report.resources, OutputFormat::Json, &config).unwrap();
    let parsed = parse_document(&json).unwrap();
    assert_eq!(parsed.len(), report.resources.len());
    // Documents keep references as plain strings, so only entities compare exactly.
    assert!(diff(&entities(&report.resources), &entities(&parsed)).is_empty());
    let influence = parsed.iter().find(|r| r.name == "influence").unwrap();
    assert_eq!(influence.dependencies, vec!["employment"]);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    write_tree(dir.path());
    let scanner = Scanner::default();
    let config = SynthConfig::default();

    let outputs: Vec<String> = (0..3)
        .map(|_| {
            let report = scanner.scan_dir(dir.path()).unwrap();
            render(&report.resources, OutputFormat::Cypher, &config).unwrap()
        })
        .collect();
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[test]
fn schema_evolution_between_trees() {
    let old = TempDir::new().unwrap();
    let new = TempDir::new().unwrap();
    write_tree(old.path());
    write_tree(new.path());
    fs::write(
        new.path().join("nodes.rs"),
        NODES.replace(
            r#"Property { name: "name", ty: "String", unique: true, ..Property::DEFAULT }"#,
            r#"Property { name: "name", ty: "String", unique: true, ..Property::DEFAULT },
        Property { name: "founded", ty: "Date", required: true, ..Property::DEFAULT }"#,
        ),
    )
    .unwrap();
    fs::write(
        new.path().join("analytics/rank.rs"),
        ANALYTICS.replace("max_iterations: 20", "max_iterations: 40"),
    )
    .unwrap();

    let result = diff_paths(old.path(), new.path(), &ScanConfig::default()).unwrap();
    let names: Vec<(&str, DiffAction)> = result
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.action))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Company", DiffAction::Modified),
            ("influence", DiffAction::Modified),
        ]
    );
    assert!(result.entries[0].is_breaking());
    assert!(!result.entries[1].is_breaking());
    assert_eq!(
        result.entries[1].changes[0].description,
        "setting 'max_iterations' changed: 20 -> 40"
    );
}
