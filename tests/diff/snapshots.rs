//! Snapshot loading from disk.

use std::fs;

use graphdecl_diff::{DiffAction, Snapshot, SnapshotKind, diff_paths, format_summary, to_json};
use graphdecl_foundation::{ErrorKind, ResourceKind};
use graphdecl_language::ScanConfig;
use graphdecl_synth::{SynthConfig, render_document};
use serde_json::Value;
use tempfile::TempDir;

use super::{BASELINE, scan};

const EDITED: &str = r#"
pub static PERSON: NodeType = NodeType {
    label: "Person",
    properties: &[
        Property { name: "id", ty: "String", required: true, unique: true },
        Property { name: "name", ty: "String" },
    ],
    indexes: &[Index { kind: "TEXT", properties: &["name"] }],
};
"#;

#[test]
fn directories_are_compared_as_trees() {
    let old = TempDir::new().unwrap();
    let new = TempDir::new().unwrap();
    fs::write(old.path().join("schema.rs"), BASELINE).unwrap();
    fs::write(new.path().join("schema.rs"), EDITED).unwrap();
    fs::write(new.path().join("broken.rs"), "pub struct (").unwrap();

    let snapshot = Snapshot::load(new.path(), &ScanConfig::default()).unwrap();
    assert_eq!(snapshot.kind, SnapshotKind::Directory);
    assert_eq!(snapshot.warnings.len(), 1);

    let result = diff_paths(old.path(), new.path(), &ScanConfig::default()).unwrap();
    let person = result.entry(ResourceKind::NodeType, "Person").unwrap();
    assert_eq!(person.action, DiffAction::Modified);
    assert!(person.is_breaking());
    assert_eq!(
        result
            .entry(ResourceKind::RelationshipType, "WORKS_FOR")
            .unwrap()
            .action,
        DiffAction::Removed
    );
}

#[test]
fn documents_are_compared_with_documents() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.JSON");
    let config = SynthConfig::default();
    fs::write(&old, render_document(&scan(BASELINE), &config).unwrap()).unwrap();
    fs::write(&new, render_document(&scan(EDITED), &config).unwrap()).unwrap();

    let from_documents = diff_paths(&old, &new, &ScanConfig::default()).unwrap();
    let from_source = graphdecl_diff::diff(&scan(BASELINE), &scan(EDITED));
    assert_eq!(from_documents, from_source);

    let source = dir.path().join("schema.rs");
    fs::write(&source, EDITED).unwrap();
    let err = diff_paths(&old, &source, &ScanConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Usage(_)));
}

#[test]
fn single_files_report_duplicates_like_directories() {
    let dir = TempDir::new().unwrap();
    let source = format!("{EDITED}\npub struct Person(NodeType);\n");
    fs::write(dir.path().join("schema.rs"), &source).unwrap();

    let file = Snapshot::load(&dir.path().join("schema.rs"), &ScanConfig::default()).unwrap();
    let tree = Snapshot::load(dir.path(), &ScanConfig::default()).unwrap();
    assert_eq!(file.kind, SnapshotKind::SourceFile);
    assert_eq!(file.resources, tree.resources);
    assert_eq!(file.warnings, tree.warnings);
    assert_eq!(file.warnings.len(), 1);
    assert!(file.warnings[0].message.starts_with("duplicate NodeType 'Person'"));
}

#[test]
fn missing_and_malformed_snapshots() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let err = Snapshot::load(&missing, &ScanConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io { .. }));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{").unwrap();
    let err = Snapshot::load(&bad, &ScanConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidDocument(_)));
}

#[test]
fn reports_render_as_text_and_json() {
    let result = graphdecl_diff::diff(&scan(BASELINE), &scan(EDITED));
    let summary = format_summary(&result);
    assert!(summary.starts_with("~ NodeType Person (modified)\n"));
    assert!(summary.contains("    property 'age' removed [BREAKING]\n"));
    assert!(summary.contains("- RelationshipType WORKS_FOR (removed)\n"));
    assert!(summary.ends_with("0 added, 1 modified, 1 removed; 3 breaking"));

    let value: Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();
    assert_eq!(value["entries"][0]["action"], "modified");
    assert_eq!(value["entries"][1]["kind"], "RelationshipType");

    assert_eq!(format_summary(&graphdecl_diff::diff(&[], &[])), "No differences");
}
