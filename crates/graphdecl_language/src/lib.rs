//! Resource scanner for graphdecl declaration source.
//!
//! Declaration files are ordinary Rust, parsed with `syn`. This crate provides:
//! - [`parse_source`] - Parsing a source file into a [`syn::File`] with positioned errors
//! - [`Scanner`] - Discovery of resource declarations in files and directory trees
//! - [`ScanConfig`] - Directory policy and duplicate reporting

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod parse;
pub mod scanner;


pub use config::ScanConfig;
pub use parse::parse_source;
pub use scanner::{DEFAULT_PROPERTY_TYPE, ScanReport, ScanWarning, Scanner, resolve_kind};
