//! Catalogue snapshot import.

use graphdecl_foundation::ResourceKind;
use graphdecl_import::{CatalogueSnapshot, generate, import_catalogue};

use super::{entity_keys, rescan};

const SHOW_OUTPUT: &str = r#"{
    "constraints": [
        {"name": "movie_key", "type": "NODE_KEY", "entityType": "NODE",
         "labelsOrTypes": ["Movie"], "properties": ["title", "year"]},
        {"name": "rated_score", "type": "RELATIONSHIP_PROPERTY_TYPE", "entityType": "RELATIONSHIP",
         "labelsOrTypes": ["RATED"], "properties": ["score"], "propertyType": "FLOAT"}
    ],
    "indexes": [
        {"name": "movie_key", "type": "RANGE", "entityType": "NODE",
         "labelsOrTypes": ["Movie"], "properties": ["title", "year"], "owningConstraint": "movie_key"},
        {"name": "movie_plot", "type": "FULLTEXT", "entityType": "NODE",
         "labelsOrTypes": ["Movie"], "properties": ["plot", "tagline"]},
        {"name": "rated_at", "type": "RANGE", "entityType": "RELATIONSHIP",
         "labelsOrTypes": ["RATED"], "properties": ["at"]}
    ],
    "labels": ["Movie", "User"],
    "relationshipTypes": ["RATED"]
}"#;

#[test]
fn catalogue_round_trip() {
    let report = import_catalogue(&CatalogueSnapshot::from_json(SHOW_OUTPUT).unwrap());
    assert!(report.skipped.is_empty(), "{:?}", report.skipped);

    let movie = &report.resources[0];
    assert_eq!(movie.name, "Movie");
    assert!(movie.property("title").unwrap().required);
    assert!(movie.property("year").unwrap().required);
    assert_eq!(movie.constraints[0].to_string(), "KEY(title, year)");
    assert_eq!(movie.indexes.len(), 1);
    assert_eq!(movie.indexes[0].to_string(), "FULLTEXT(plot, tagline)");

    let rated = &report.resources[1];
    assert_eq!(rated.kind, ResourceKind::RelationshipType);
    assert_eq!(rated.property("score").unwrap().ty, "Float");

    let user = report.resources.iter().find(|r| r.name == "User").unwrap();
    assert!(user.properties.is_empty());

    let scanned = rescan(&generate(&report.resources, "movies").unwrap());
    assert_eq!(entity_keys(&scanned), entity_keys(&report.resources));
    let back = scanned.iter().find(|r| r.name == "Movie").unwrap();
    assert_eq!(back.constraints, movie.constraints);
    assert_eq!(back.indexes, movie.indexes);
}

#[test]
fn malformed_snapshots_are_invalid_documents() {
    let err = CatalogueSnapshot::from_json(r#"{"constraints": 3}"#).unwrap_err();
    assert!(matches!(err.kind, graphdecl_foundation::ErrorKind::InvalidDocument(_)));
}
