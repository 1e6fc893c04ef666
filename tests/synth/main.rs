//! Integration tests for graphdecl_synth.
//!
//! Scripts and documents are rendered from scanned source so the tests
//! cover the same path the `synth` command takes.

mod cypher;

use std::path::Path;

use graphdecl_foundation::DiscoveredResource;
use graphdecl_language::Scanner;

pub const SCHEMA: &str = r#"
use graphdecl::schema::*;

pub static PERSON: NodeType = NodeType {
    label: "Person",
    properties: &[
        Property { name: "id", ty: "String", required: true, unique: true, ..Property::DEFAULT },
        Property { name: "bio", ..Property::DEFAULT },
        Property { name: "embedding", ty: "List<Float>", ..Property::DEFAULT },
    ],
    indexes: &[
        Index { kind: "TEXT", properties: &["bio"], ..Index::DEFAULT },
        Index {
            kind: "VECTOR",
            properties: &["embedding"],
            options: &[("dimensions", "1536"), ("similarity", "cosine")],
            ..Index::DEFAULT
        },
    ],
    ..NodeType::DEFAULT
};

pub static COMPANY: NodeType = NodeType {
    label: "Company",
    constraints: &[Constraint { kind: "KEY", properties: &["name", "country"], ..Constraint::DEFAULT }],
    ..NodeType::DEFAULT
};

pub static WORKS_FOR: RelationshipType = RelationshipType {
    label: "WORKS_FOR",
    source: &PERSON,
    target: &COMPANY,
    properties: &[Property { name: "since", ty: "Date", required: true, ..Property::DEFAULT }],
    ..RelationshipType::DEFAULT
};

pub static INFLUENCE: PageRank = PageRank {
    name: "influence",
    max_iterations: 20,
    damping_factor: 0.85,
};
"#;

pub fn scanned() -> Vec<DiscoveredResource> {
    Scanner::default()
        .scan_source(Path::new("schema.rs"), SCHEMA)
        .unwrap()
}
