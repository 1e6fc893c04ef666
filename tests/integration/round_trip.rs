//! Import a script, write the generated source into a tree, and scan it back.

use std::fs;

use graphdecl::diff::diff;
use graphdecl::foundation::ResourceKind;
use graphdecl::import::{generate, import_script};
use graphdecl::language::Scanner;
use graphdecl::synth::{SynthConfig, render_cypher};
use tempfile::TempDir;

const EXPORTED: &str = "
// Exported from a running database
CREATE CONSTRAINT FOR (n:5122Node) REQUIRE n.id IS UNIQUE;
CREATE CONSTRAINT person_id FOR (p:Person) REQUIRE p.id IS UNIQUE;
CREATE CONSTRAINT FOR (p:Person) REQUIRE p.name IS NOT NULL;
CREATE TEXT INDEX person_bio FOR (p:Person) ON (p.bio);
CREATE CONSTRAINT FOR ()-[r:FOLLOWS]-() REQUIRE r.since IS NOT NULL;
";

#[test]
fn imported_schema_survives_a_trip_through_source() {
    let report = import_script(EXPORTED).unwrap();
    assert!(report.skipped.is_empty());

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("imported.rs"),
        generate(&report.resources, "imported").unwrap(),
    )
    .unwrap();
    let scanned = Scanner::default().scan_dir(dir.path()).unwrap();

    let entities: Vec<_> = scanned
        .resources
        .iter()
        .filter(|r| r.kind.is_entity())
        .cloned()
        .collect();
    assert!(diff(&report.resources, &entities).is_empty());
    assert!(
        entities
            .iter()
            .any(|r| r.name == "5122Node" && r.identifier == "N5122_NODE")
    );

    let schema = scanned
        .resources
        .iter()
        .find(|r| r.kind == ResourceKind::Schema)
        .unwrap();
    assert_eq!(schema.dependencies, vec!["5122Node", "Person", "FOLLOWS"]);

    let config = SynthConfig::default();
    assert_eq!(
        render_cypher(&report.resources, &config).unwrap(),
        render_cypher(&scanned.resources, &config).unwrap()
    );
}
