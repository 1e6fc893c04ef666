//! Loading the two sides of a diff.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use graphdecl_foundation::{DiscoveredResource, Error, Result};
use graphdecl_language::{ScanConfig, ScanWarning, Scanner};
use graphdecl_synth::parse_document;
use tracing::{debug, warn};

use crate::diff::{DiffResult, diff};

/// How a snapshot is stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// A source tree.
    Directory,
    /// A single declaration source file.
    SourceFile,
    /// A structured JSON document.
    Document,
}

impl SnapshotKind {
    /// Classifies a path.
    ///
    /// # Errors
    /// Returns an I/O error if the path cannot be inspected.
    pub fn of(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| Error::io(path, &e))?;
        if metadata.is_dir() {
            Ok(Self::Directory)
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            Ok(Self::Document)
        } else {
            Ok(Self::SourceFile)
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Directory => "directory",
            Self::SourceFile => "source file",
            Self::Document => "document",
        })
    }
}

/// One side of a diff.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Where the snapshot was loaded from.
    pub path: PathBuf,
    /// How it was stored.
    pub kind: SnapshotKind,
    /// The resources it declares.
    pub resources: Vec<DiscoveredResource>,
    /// Files skipped and duplicates ignored while scanning.
    pub warnings: Vec<ScanWarning>,
}

impl Snapshot {
    /// Loads a snapshot: directories are scanned, `.json` files parsed as
    /// documents, and any other file scanned as a single source file.
    ///
    /// # Errors
    /// Returns an I/O error for unreadable paths, a parse error for a
    /// malformed source file, or an invalid-document error for a malformed
    /// document.
    pub fn load(path: &Path, config: &ScanConfig) -> Result<Self> {
        let kind = SnapshotKind::of(path)?;
        Self::load_as(path, kind, config)
    }

    fn load_as(path: &Path, kind: SnapshotKind, config: &ScanConfig) -> Result<Self> {
        debug!(path = %path.display(), kind = %kind, "loading snapshot");
        let scanner = Scanner::new(config.clone());
        let (resources, warnings) = match kind {
            SnapshotKind::Directory | SnapshotKind::SourceFile => {
                let report = scanner.scan_path(path)?;
                (report.resources, report.warnings)
            }
            SnapshotKind::Document => {
                let text = fs::read_to_string(path).map_err(|e| Error::io(path, &e))?;
                (parse_document(&text).map_err(|e| e.in_file(path))?, Vec::new())
            }
        };
        for warning in &warnings {
            warn!("{warning}");
        }
        Ok(Self {
            path: path.to_path_buf(),
            kind,
            resources,
            warnings,
        })
    }
}

/// Loads two snapshots of the same kind and diffs them.
///
/// # Errors
/// Returns a usage error, before anything is read, if the snapshots are of
/// different kinds; otherwise any error from [`Snapshot::load`].
pub fn diff_paths(old: &Path, new: &Path, config: &ScanConfig) -> Result<DiffResult> {
    let old_kind = SnapshotKind::of(old)?;
    let new_kind = SnapshotKind::of(new)?;
    if old_kind != new_kind {
        return Err(Error::usage(format!(
            "cannot compare a {old_kind} ({}) with a {new_kind} ({})",
            old.display(),
            new.display()
        )));
    }
    let before = Snapshot::load_as(old, old_kind, config)?;
    let after = Snapshot::load_as(new, new_kind, config)?;
    Ok(diff(&before.resources, &after.resources))
}
