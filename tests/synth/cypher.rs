//! Cypher script rendering.

use graphdecl_foundation::{DiscoveredResource, ErrorKind, IndexDef};
use graphdecl_synth::{OutputFormat, SynthConfig, render, render_cypher, render_resource};

use super::scanned;

#[test]
fn full_script_in_dependency_order() {
    let script = render(&scanned(), OutputFormat::Cypher, &SynthConfig::default()).unwrap();
    let expected = "\
// Generated by graphdecl. Do not edit by hand.

// NodeType: Company
CREATE CONSTRAINT company_name_country_key IF NOT EXISTS FOR (n:Company) REQUIRE (n.name, n.country) IS NODE KEY;

// NodeType: Person
CREATE CONSTRAINT person_id_unique IF NOT EXISTS FOR (n:Person) REQUIRE n.id IS UNIQUE;
CREATE CONSTRAINT person_id_not_null IF NOT EXISTS FOR (n:Person) REQUIRE n.id IS NOT NULL;
CREATE TEXT INDEX person_bio_text IF NOT EXISTS FOR (n:Person) ON (n.bio);
CREATE VECTOR INDEX person_embedding_vector IF NOT EXISTS FOR (n:Person) ON (n.embedding) \
OPTIONS {indexConfig: {`vector.dimensions`: 1536, `vector.similarity_function`: 'cosine'}};

// RelationshipType: WORKS_FOR
CREATE CONSTRAINT works_for_since_not_null IF NOT EXISTS FOR ()-[r:WORKS_FOR]-() REQUIRE r.since IS NOT NULL;
";
    assert_eq!(script, expected);
}

#[test]
fn relationship_without_constraints_renders_nothing() {
    let rel = DiscoveredResource::relationship("WORKS_FOR", "Person", "Company");
    assert_eq!(render_resource(&rel, &SynthConfig::default()).unwrap(), "");

    let bare = SynthConfig::default().with_file_header(false);
    assert_eq!(render_cypher(&[rel], &bare).unwrap(), "");
}

#[test]
fn header_is_kept_for_an_empty_script() {
    let script = render_cypher(&[], &SynthConfig::default()).unwrap();
    assert_eq!(script, "// Generated by graphdecl. Do not edit by hand.\n\n");
}

#[test]
fn plain_script_without_guards_or_comments() {
    let config = SynthConfig::new()
        .with_file_header(false)
        .with_block_headers(false)
        .with_if_not_exists(false);
    let script = render_cypher(&scanned(), &config).unwrap();
    assert!(!script.contains("//"));
    assert!(!script.contains("IF NOT EXISTS"));
    assert_eq!(script.lines().filter(|l| l.starts_with("CREATE")).count(), 6);
}

#[test]
fn rendering_is_deterministic() {
    let config = SynthConfig::default();
    let first = render_cypher(&scanned(), &config).unwrap();
    let second = render_cypher(&scanned(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unsupported_index_aborts_the_script() {
    let resources = vec![
        DiscoveredResource::node("Doc").with_index(IndexDef::new("lookup", ["x"])),
    ];
    let err = render_cypher(&resources, &SynthConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Unsupported { .. }));
}

#[test]
fn labels_needing_quotes_are_backticked() {
    let resources = vec![
        DiscoveredResource::node("5122Node")
            .with_property(graphdecl_foundation::PropertyDef::new("id", "String").unique()),
    ];
    let script = render_cypher(&resources, &SynthConfig::default().with_file_header(false)).unwrap();
    assert!(script.contains("FOR (n:`5122Node`) REQUIRE n.id IS UNIQUE;"));
}
