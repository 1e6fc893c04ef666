//! Error type tests.

use std::io;
use std::path::Path;

use graphdecl_foundation::{Error, ErrorKind};

#[test]
fn io_errors_name_the_path() {
    let err = Error::io(Path::new("missing.rs"), &io::Error::from(io::ErrorKind::NotFound));
    let text = err.to_string();
    assert!(text.starts_with("i/o error on missing.rs"));
    assert!(!err.is_parse_error());
}

#[test]
fn parse_errors_carry_file_and_position() {
    let err = Error::parse("unexpected token", 3, 9, "pub static".into())
        .in_file(Path::new("schema.rs"));
    assert!(err.is_parse_error());
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("schema.rs"));
    assert!(err.to_string().contains("parse error at 3:9: unexpected token"));
}

#[test]
fn cycle_errors_list_remaining_resources() {
    let err = Error::cycle(vec!["A".into(), "B".into()]);
    assert!(matches!(&err.kind, ErrorKind::Cycle { remaining } if remaining.len() == 2));
    assert_eq!(err.to_string(), "dependency cycle detected among: A, B");
}

#[test]
fn usage_and_document_errors() {
    assert_eq!(Error::usage("bad format").to_string(), "usage error: bad format");
    assert_eq!(
        Error::invalid_document("expected object").to_string(),
        "invalid document: expected object"
    );
    assert_eq!(
        Error::unsupported("index type", "HASH").to_string(),
        "unsupported index type: HASH"
    );
}
