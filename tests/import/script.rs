//! Statement script import.

use graphdecl_foundation::ResourceKind;
use graphdecl_import::{GenerateConfig, generate, generate_with, import_script};
use graphdecl_synth::{SynthConfig, render_cypher};

use super::{entity_keys, rescan};

// =============================================================================
// Label Fidelity
// =============================================================================

#[test]
fn numeric_label_keeps_its_literal() {
    let report =
        import_script("CREATE CONSTRAINT FOR (n:5122Node) REQUIRE n.id IS UNIQUE;").unwrap();
    assert!(report.skipped.is_empty());

    let source = generate(&report.resources, "legacy").unwrap();
    assert!(source.contains("pub static N5122_NODE: NodeType = NodeType {"));
    assert!(source.contains("label: \"5122Node\","));
    assert!(source.contains("nodes: &[&N5122_NODE],"));

    let scanned = rescan(&source);
    let node = scanned
        .iter()
        .find(|r| r.kind == ResourceKind::NodeType)
        .unwrap();
    assert_eq!(node.name, "5122Node");
    assert_eq!(node.identifier, "N5122_NODE");
    assert!(node.property("id").unwrap().unique);
}

#[test]
fn colliding_labels_get_distinct_identifiers() {
    let script = "
        CREATE CONSTRAINT FOR (n:Knows) REQUIRE n.id IS UNIQUE;
        CREATE CONSTRAINT FOR ()-[r:KNOWS]-() REQUIRE r.since IS NOT NULL;
        CREATE CONSTRAINT FOR (n:`knows`) REQUIRE n.id IS UNIQUE;
    ";
    let report = import_script(script).unwrap();
    let source = generate(&report.resources, "social").unwrap();
    assert!(source.contains("pub static KNOWS: NodeType"));
    assert!(source.contains("pub static KNOWS_REL: RelationshipType"));
    assert!(source.contains("pub static KNOWS_2: NodeType"));

    let scanned = rescan(&source);
    assert_eq!(entity_keys(&scanned), entity_keys(&report.resources));
}

#[test]
fn trailing_comments_do_not_swallow_statements() {
    let script = "
        CREATE CONSTRAINT FOR (n:Person) REQUIRE n.id IS UNIQUE; // people
        CREATE CONSTRAINT FOR (n:Company) REQUIRE n.id IS UNIQUE; // don't touch
        CREATE INDEX FOR (n:City) ON (n.name); -- cities
    ";
    let report = import_script(script).unwrap();
    assert!(report.skipped.is_empty(), "skipped: {:?}", report.skipped);
    let names: Vec<&str> = report.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Person", "Company", "City"]);
    assert!(report.resources[1].property("id").unwrap().unique);
    assert_eq!(report.resources[2].indexes.len(), 1);
}

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn mixed_script_rescans_to_the_same_labels() {
    let script = "
        // exported schema
        CREATE CONSTRAINT person_id IF NOT EXISTS FOR (p:Person) REQUIRE p.id IS UNIQUE;
        CREATE CONSTRAINT FOR (p:Person) REQUIRE p.email IS NOT NULL;
        CREATE CONSTRAINT FOR (p:Person) REQUIRE p.age IS :: INTEGER;
        CREATE CONSTRAINT FOR (c:Company) REQUIRE (c.name, c.country) IS NODE KEY;
        CREATE TEXT INDEX FOR (c:Company) ON (c.description);
        CREATE FULLTEXT INDEX search FOR (n:Person|Company) ON EACH [n.name];
        CREATE POINT INDEX FOR (o:Office) ON (o.location);
        CREATE INDEX ON :Legacy(code);
        CREATE CONSTRAINT FOR ()-[r:WORKS_FOR]-() REQUIRE r.since IS NOT NULL;
        MATCH (n) DETACH DELETE n;
    ";
    let report = import_script(script).unwrap();
    assert_eq!(report.skipped, vec!["MATCH (n) DETACH DELETE n"]);

    let person = &report.resources[0];
    assert_eq!(person.name, "Person");
    assert_eq!(person.property("age").unwrap().ty, "Integer");
    assert!(person.property("email").unwrap().required);
    assert_eq!(person.indexes[0].name.as_deref(), Some("search"));

    let office = report.resources.iter().find(|r| r.name == "Office").unwrap();
    assert_eq!(office.property("location").unwrap().ty, "Point");

    let source = generate(&report.resources, "company graph").unwrap();
    assert!(source.contains("pub mod company_graph {"));
    let scanned = rescan(&source);
    assert_eq!(entity_keys(&scanned), entity_keys(&report.resources));
    for original in &report.resources {
        let back = scanned.iter().find(|r| r.key() == original.key()).unwrap();
        assert_eq!(back.properties, original.properties, "{}", original.name);
        assert_eq!(back.constraints, original.constraints, "{}", original.name);
        assert_eq!(back.indexes, original.indexes, "{}", original.name);
    }
}

#[test]
fn synthesized_scripts_reach_a_fixed_point() {
    let script = "
        CREATE CONSTRAINT FOR (p:Person) REQUIRE p.id IS UNIQUE;
        CREATE CONSTRAINT FOR (c:Company) REQUIRE (c.name, c.country) IS NODE KEY;
        CREATE VECTOR INDEX FOR (d:Doc) ON (d.embedding)
          OPTIONS {indexConfig: {`vector.dimensions`: 768, `vector.similarity_function`: 'euclidean'}};
        CREATE CONSTRAINT FOR ()-[r:WORKS_FOR]-() REQUIRE r.since IS NOT NULL;
    ";
    let config = SynthConfig::default();
    let first = render_cypher(&import_script(script).unwrap().resources, &config).unwrap();
    let second = render_cypher(&import_script(&first).unwrap().resources, &config).unwrap();
    let third = render_cypher(&import_script(&second).unwrap().resources, &config).unwrap();
    assert_eq!(second, third);
    assert!(second.contains("`vector.dimensions`: 768"));
    assert!(second.contains("'euclidean'"));
}

#[test]
fn generation_options() {
    let report = import_script("CREATE INDEX FOR (n:Tag) ON (n.name);").unwrap();
    let config = GenerateConfig::new()
        .with_header(false)
        .with_agent_context("Tags label documents.");
    let source = generate_with(&report.resources, "tags", &config).unwrap();
    assert!(source.starts_with("pub mod tags {"));
    assert!(source.contains("agent_context: \"Tags label documents.\","));

    let schema = rescan(&source)
        .into_iter()
        .find(|r| r.kind == ResourceKind::Schema)
        .unwrap();
    assert_eq!(schema.agent_context.as_deref(), Some("Tags label documents."));
    assert_eq!(schema.dependencies, vec!["Tag"]);
}

#[test]
fn empty_script_generates_an_empty_schema() {
    let report = import_script("// nothing here\n").unwrap();
    assert!(report.is_empty());
    let source = generate(&report.resources, "empty").unwrap();
    assert!(source.contains("nodes: &[],"));
    assert!(entity_keys(&rescan(&source)).is_empty());
}
