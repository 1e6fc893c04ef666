//! graphdecl - Declarative graph schema discovery and synthesis
//!
//! This crate re-exports all layers of the graphdecl system for convenient access,
//! and hosts the [`schema`] vocabulary that declaration source is written in.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: graphdecl_cli        - `graphdecl` binary
//! Layer 3: graphdecl_diff       - Snapshots, diffing, breaking classification
//! Layer 2: graphdecl_graph      - Dependency graph, topological order
//!          graphdecl_synth      - Cypher scripts and JSON documents
//!          graphdecl_import     - Script/catalogue import, source generation
//! Layer 1: graphdecl_language   - syn-based declaration scanner
//! Layer 0: graphdecl_foundation - Resource model, kind aliases, Error
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod schema;

pub use graphdecl_diff as diff;
pub use graphdecl_foundation as foundation;
pub use graphdecl_graph as graph;
pub use graphdecl_import as import;
pub use graphdecl_language as language;
pub use graphdecl_synth as synth;
