//! Resource model, kind alias table, and error types for graphdecl.
//!
//! This crate provides:
//! - [`DiscoveredResource`] - One declared node type, relationship type, algorithm,
//!   pipeline, retriever, or schema wrapper
//! - [`ResourceKind`] and the constant alias table mapping type names to kinds
//! - [`ConstraintType`] / [`IndexType`] - The renderable constraint and index variants
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod kind;
pub mod resource;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use kind::{
    ALIASES, DocumentSection, KindAlias, ResourceKind, is_kind_alias, kind_of, lookup_alias,
    section_for,
};
pub use resource::{
    ConstraintDef, ConstraintType, DiscoveredResource, IndexDef, IndexType, Location,
    PropertyDef, Setting,
};
