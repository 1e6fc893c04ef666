//! Kind alias table tests.

use graphdecl_foundation::{
    ALIASES, DocumentSection, ResourceKind, is_kind_alias, kind_of, lookup_alias, section_for,
};

// =============================================================================
// Alias Lookup
// =============================================================================

#[test]
fn every_kind_has_a_canonical_alias() {
    for kind in ResourceKind::ALL {
        let alias = lookup_alias(kind.name()).unwrap();
        assert_eq!(alias.kind, kind);
        assert_eq!(alias.section, kind.default_section());
    }
}

#[test]
fn concrete_aliases_resolve_to_their_kind() {
    assert_eq!(kind_of("PageRank"), Some(ResourceKind::Algorithm));
    assert_eq!(kind_of("HybridCypherRetriever"), Some(ResourceKind::Retriever));
    assert_eq!(kind_of("SimpleKGPipeline"), Some(ResourceKind::Pipeline));
    assert_eq!(kind_of("GraphSchema"), Some(ResourceKind::Schema));
    assert_eq!(kind_of("Node"), Some(ResourceKind::NodeType));
    assert_eq!(kind_of("String"), None);
    assert!(!is_kind_alias("nodetype"));
}

#[test]
fn alias_table_has_no_duplicate_names() {
    let mut names: Vec<&str> = ALIASES.iter().map(|a| a.type_name).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}

// =============================================================================
// Document Sections
// =============================================================================

#[test]
fn projections_and_kg_pipelines_get_their_own_sections() {
    assert_eq!(
        section_for(ResourceKind::Algorithm, "NativeProjection"),
        DocumentSection::Projections
    );
    assert_eq!(
        section_for(ResourceKind::Pipeline, "KgPipeline"),
        DocumentSection::KgPipelines
    );
    assert_eq!(
        section_for(ResourceKind::Algorithm, "Louvain"),
        DocumentSection::Algorithms
    );
}

#[test]
fn mismatched_alias_falls_back_to_kind_section() {
    assert_eq!(
        section_for(ResourceKind::Retriever, "NativeProjection"),
        DocumentSection::Retrievers
    );
    assert_eq!(
        section_for(ResourceKind::NodeType, "Whatever"),
        DocumentSection::NodeTypes
    );
    assert_eq!(DocumentSection::KgPipelines.key(), "kgPipelines");
}

#[test]
fn kind_names_and_plurals() {
    assert_eq!(ResourceKind::RelationshipType.to_string(), "RelationshipType");
    assert_eq!(ResourceKind::RelationshipType.plural(), "relationshipTypes");
    assert!(ResourceKind::NodeType.is_entity());
    assert!(!ResourceKind::Schema.is_entity());
}
