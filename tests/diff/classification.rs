//! Breaking-change classification of single edits.

use graphdecl_diff::{DiffAction, diff};
use graphdecl_foundation::ResourceKind;

use super::{BASELINE, scan};

fn person_changes(edited: &str) -> Vec<String> {
    let result = diff(&scan(BASELINE), &scan(edited));
    result
        .entry(ResourceKind::NodeType, "Person")
        .map(|e| e.changes.iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

#[test]
fn identical_snapshots_have_no_entries() {
    let result = diff(&scan(BASELINE), &scan(BASELINE));
    assert!(result.is_empty());
    assert!(!result.has_breaking());
}

#[test]
fn adding_a_required_property_is_breaking() {
    let edited = BASELINE.replace(
        r#"Property { name: "age", ty: "Integer" },"#,
        r#"Property { name: "age", ty: "Integer" },
        Property { name: "email", ty: "String", required: true },"#,
    );
    assert_eq!(person_changes(&edited), vec!["required property 'email' added [BREAKING]"]);
}

#[test]
fn adding_an_optional_property_or_index_is_not_breaking() {
    let edited = BASELINE
        .replace(
            r#"Property { name: "age", ty: "Integer" },"#,
            r#"Property { name: "age", ty: "Integer" },
        Property { name: "nickname", ty: "String" },"#,
        )
        .replace(
            r#"indexes: &[Index { kind: "TEXT", properties: &["name"] }],"#,
            r#"indexes: &[
        Index { kind: "TEXT", properties: &["name"] },
        Index { kind: "RANGE", properties: &["age"] },
    ],"#,
        );
    let result = diff(&scan(BASELINE), &scan(&edited));
    assert!(!result.has_breaking());
    assert_eq!(
        person_changes(&edited),
        vec!["index RANGE(age) added", "property 'nickname' added"]
    );
}

#[test]
fn removing_a_property_or_constraint_is_breaking() {
    let edited = BASELINE
        .replace(r#"Property { name: "age", ty: "Integer" },"#, "")
        .replace(
            r#"constraints: &[Constraint { kind: "UNIQUE", properties: &["name", "age"] }],"#,
            "",
        );
    assert_eq!(
        person_changes(&edited),
        vec![
            "constraint UNIQUE(name, age) removed [BREAKING]",
            "property 'age' removed [BREAKING]",
        ]
    );
}

#[test]
fn flag_and_type_changes() {
    let edited = BASELINE
        .replace(
            r#"Property { name: "id", ty: "String", required: true, unique: true },"#,
            r#"Property { name: "id", ty: "String" },"#,
        )
        .replace(
            r#"Property { name: "name", ty: "String" },"#,
            r#"Property { name: "name", ty: "String", required: true },"#,
        )
        .replace(r#"ty: "Integer""#, r#"ty: "Float""#);
    assert_eq!(
        person_changes(&edited),
        vec![
            "property 'age' type changed: Integer -> Float [BREAKING]",
            "property 'id' is no longer required",
            "property 'id' is no longer unique [BREAKING]",
            "property 'name' is now required [BREAKING]",
        ]
    );
}

#[test]
fn removing_an_index_is_informational() {
    let edited = BASELINE.replace(
        r#"indexes: &[Index { kind: "TEXT", properties: &["name"] }],"#,
        "",
    );
    assert_eq!(person_changes(&edited), vec!["index TEXT(name) removed"]);
}

#[test]
fn relationship_endpoint_changes_are_breaking() {
    let edited = BASELINE.replace(r#"target: "Company","#, r#"target: "Organization","#);
    let result = diff(&scan(BASELINE), &scan(&edited));
    let entry = result
        .entry(ResourceKind::RelationshipType, "WORKS_FOR")
        .unwrap();
    assert_eq!(entry.action, DiffAction::Modified);
    assert!(entry.is_breaking());
    assert_eq!(
        entry.changes[0].description,
        "target changed: Company -> Organization"
    );
}

#[test]
fn new_and_removed_resources() {
    let edited = format!(
        "{}\n{}",
        BASELINE.replace("WORKS_FOR", "EMPLOYED_BY"),
        r#"pub static TEAM: NodeType = NodeType {
            label: "Team",
            properties: &[Property { name: "code", ty: "String", required: true }],
        };
        pub static TAG: NodeType = NodeType { label: "Tag" };"#
    );
    let result = diff(&scan(BASELINE), &scan(&edited));
    let actions: Vec<(DiffAction, &str)> = result
        .entries
        .iter()
        .map(|e| (e.action, e.name.as_str()))
        .collect();
    assert_eq!(
        actions,
        vec![
            (DiffAction::Added, "EMPLOYED_BY"),
            (DiffAction::Added, "Tag"),
            (DiffAction::Added, "Team"),
            (DiffAction::Removed, "WORKS_FOR"),
        ]
    );

    let team = result.entry(ResourceKind::NodeType, "Team").unwrap();
    assert!(team.is_breaking());
    assert!(!result.entry(ResourceKind::NodeType, "Tag").unwrap().is_breaking());
    assert!(result.entry(ResourceKind::RelationshipType, "WORKS_FOR").unwrap().is_breaking());

    let counts = result.counts();
    assert_eq!((counts.added, counts.modified, counts.removed), (3, 0, 1));
    assert_eq!(result.breaking_count(), 2);
}
