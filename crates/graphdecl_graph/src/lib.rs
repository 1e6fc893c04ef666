//! Dependency graph over discovered graphdecl resources.
//!
//! This crate provides:
//! - [`DependencyGraph`] - Immutable graph built fresh from one scan
//! - Deterministic topological ordering with name tie-breaking
//! - Cycle detection and transitive dependency closure
//! - [`CycleError`] - The structured failure of an ordering

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod graph;

pub use graph::{CycleError, DependencyGraph};
