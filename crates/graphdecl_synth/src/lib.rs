//! Cypher statement and JSON document synthesis for graphdecl resources.
//!
//! This crate provides:
//! - [`render`] - Whole-tree rendering in either [`OutputFormat`]
//! - [`templates`] - One statement template per constraint/index shape
//! - [`cypher`] - Implicit and explicit constraint/index derivation
//! - [`document`] - The camelCase structured document and its parser
//! - [`SynthConfig`] - Header, `IF NOT EXISTS`, and vector defaults

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod cypher;
pub mod document;
pub mod templates;

use std::fmt;
use std::str::FromStr;

use graphdecl_foundation::{DiscoveredResource, Error, Result};

pub use config::{DEFAULT_VECTOR_DIMENSIONS, DEFAULT_VECTOR_SIMILARITY, SynthConfig};
pub use cypher::{render_cypher, render_resource, statements};
pub use document::{SchemaDocument, parse_document, render_document};
pub use templates::{Statement, Target, Template, quote_identifier};

/// The artifact to synthesize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// A Cypher statement script.
    Cypher,
    /// A structured JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cypher => "cypher",
            Self::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cypher" | "cql" | "statements" => Ok(Self::Cypher),
            "json" | "document" => Ok(Self::Json),
            _ => Err(Error::usage(format!(
                "unknown output format '{s}' (expected cypher or json)"
            ))),
        }
    }
}

/// Renders resources in the requested format.
///
/// # Errors
/// Returns a cycle error if the resources cannot be ordered, or an
/// unsupported error for constraint and index types with no template.
pub fn render(
    resources: &[DiscoveredResource],
    format: OutputFormat,
    config: &SynthConfig,
) -> Result<String> {
    match format {
        OutputFormat::Cypher => render_cypher(resources, config),
        OutputFormat::Json => render_document(resources, config),
    }
}
