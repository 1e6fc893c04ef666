//! Round-trip import of Cypher scripts and catalogue snapshots into graphdecl
//! declaration source.
//!
//! This crate provides:
//! - [`import_script`] - Constraint and index statements to resources
//! - [`import_catalogue`] - `SHOW CONSTRAINTS` / `SHOW INDEXES` snapshots to resources
//! - [`generate`] - Resources to a module of `static` declarations
//! - [`ImportReport`] - Imported resources plus the statements that were skipped

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalogue;
pub mod codegen;
pub mod grouping;
pub mod script;

use graphdecl_foundation::DiscoveredResource;

pub use catalogue::{
    CatalogueConstraint, CatalogueIndex, CatalogueSnapshot, EntityType, import_catalogue,
};
pub use codegen::{
    DEFAULT_AGENT_CONTEXT, GenerateConfig, Identifiers, generate, generate_with, module_name,
    static_ident,
};
pub use grouping::{DEFAULT_IMPORTED_TYPE, cypher_type};
pub use script::{import_script, split_statements};

/// The outcome of one import.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportReport {
    /// One node or relationship type per label, in first-encounter order.
    pub resources: Vec<DiscoveredResource>,
    /// Statements or catalogue rows that had no declaration form.
    pub skipped: Vec<String>,
}

impl ImportReport {
    /// Returns true if nothing was imported or skipped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.skipped.is_empty()
    }
}
