//! Integration tests for graphdecl_import.
//!
//! Imported schemas are turned back into declaration source and re-scanned,
//! so every test here also exercises the scanner on generated code.

mod catalogue;
mod script;

use std::collections::BTreeSet;
use std::path::Path;

use graphdecl_foundation::{DiscoveredResource, ResourceKind};
use graphdecl_language::Scanner;

pub fn rescan(source: &str) -> Vec<DiscoveredResource> {
    Scanner::default()
        .scan_source(Path::new("generated.rs"), source)
        .unwrap()
}

pub fn entity_keys(resources: &[DiscoveredResource]) -> BTreeSet<(ResourceKind, String)> {
    resources
        .iter()
        .filter(|r| r.kind.is_entity())
        .map(|r| (r.kind, r.name.clone()))
        .collect()
}
