//! Schema snapshot diffing with breaking-change classification.
//!
//! This crate provides:
//! - [`diff`] - `(kind, name)`-keyed comparison of two resource sets
//! - [`Snapshot`] - Loading a directory, source file, or document as one side
//! - [`diff_paths`] - Same-kind snapshot comparison straight from disk
//! - [`format_summary`] / [`to_json`] - Human-readable and JSON reports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod diff;
pub mod format;
pub mod snapshot;

pub use diff::{Change, DiffAction, DiffCounts, DiffEntry, DiffResult, diff, diff_resource};
pub use format::{format_summary, to_json};
pub use snapshot::{Snapshot, SnapshotKind, diff_paths};
