//! Hand-built ordering scenarios.

use std::path::Path;

use graphdecl_foundation::{DiscoveredResource, Error, ErrorKind, ResourceKind};
use graphdecl_graph::DependencyGraph;
use graphdecl_language::Scanner;

fn names(order: &[&DiscoveredResource]) -> Vec<String> {
    order.iter().map(|r| r.name.clone()).collect()
}

#[test]
fn scanned_schema_orders_nodes_before_relationships() {
    let source = r#"
        pub static WORKS_FOR: RelationshipType = RelationshipType {
            label: "WORKS_FOR",
            source: &PERSON,
            target: &COMPANY,
        };
        pub static PERSON: NodeType = NodeType { label: "Person" };
        pub static COMPANY: NodeType = NodeType { label: "Company" };
        pub static SOCIAL: NativeProjection = NativeProjection {
            name: "social",
            relationships: &[&WORKS_FOR],
        };
    "#;
    let resources = Scanner::default()
        .scan_source(Path::new("schema.rs"), source)
        .unwrap();
    let graph = DependencyGraph::build(&resources);
    let order = names(&graph.topological_sort().unwrap());
    assert_eq!(order, vec!["Company", "Person", "WORKS_FOR", "social"]);
    assert_eq!(
        graph.transitive_dependencies("social").into_iter().collect::<Vec<_>>(),
        vec!["Company", "Person", "WORKS_FOR"]
    );
}

#[test]
fn ties_break_by_name_then_kind() {
    let resources = vec![
        DiscoveredResource::new("b", ResourceKind::Retriever),
        DiscoveredResource::new("Shared", ResourceKind::Algorithm),
        DiscoveredResource::node("Shared"),
        DiscoveredResource::node("A"),
    ];
    let graph = DependencyGraph::build(&resources);
    let order: Vec<(ResourceKind, &str)> = graph
        .topological_sort()
        .unwrap()
        .into_iter()
        .map(DiscoveredResource::key)
        .collect();
    assert_eq!(
        order,
        vec![
            (ResourceKind::NodeType, "A"),
            (ResourceKind::NodeType, "Shared"),
            (ResourceKind::Algorithm, "Shared"),
            (ResourceKind::Retriever, "b"),
        ]
    );
}

#[test]
fn dangling_and_self_references_are_ignored() {
    let resources = vec![
        DiscoveredResource::node("Person")
            .with_dependency("Nowhere")
            .with_dependency("Person"),
        DiscoveredResource::relationship("KNOWS", "Person", "Person").with_dependency("Person"),
    ];
    let graph = DependencyGraph::build(&resources);
    assert!(!graph.has_cycle());
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("KNOWS", "Person")]);
    assert_eq!(names(&graph.dependents_of("Person")), vec!["KNOWS"]);
    assert!(graph.dependents_of("Nowhere").is_empty());
}

#[test]
fn cycles_report_every_stuck_resource() {
    let resources = vec![
        DiscoveredResource::node("A").with_dependency("B"),
        DiscoveredResource::node("B").with_dependency("C"),
        DiscoveredResource::node("C").with_dependency("A"),
        DiscoveredResource::node("D").with_dependency("A"),
        DiscoveredResource::node("E"),
    ];
    let graph = DependencyGraph::build(&resources);
    assert!(graph.has_cycle());

    let err = graph.topological_sort().unwrap_err();
    assert_eq!(err.remaining, vec!["A", "B", "C", "D"]);

    let err: Error = err.into();
    assert!(matches!(err.kind, ErrorKind::Cycle { ref remaining } if remaining.len() == 4));
}

#[test]
fn empty_graph_sorts_to_nothing() {
    let graph = DependencyGraph::build(&[]);
    assert!(graph.is_empty());
    assert!(graph.topological_sort().unwrap().is_empty());
    assert!(graph.transitive_dependencies("anything").is_empty());
}
