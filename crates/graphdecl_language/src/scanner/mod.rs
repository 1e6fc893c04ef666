//! Resource discovery over declaration source.
//!
//! The flow is: Source → `syn::File` → `DeclarationAnalyzer` → candidates →
//! reference resolution → [`DiscoveredResource`]s.
//!
//! # Module Structure
//!
//! - `analyzer` - Recognition of both declaration forms and metadata extraction
//! - `deps` - The dependency candidate heuristic
//! - `resolve` - Duplicate handling and identifier-to-label rewriting

mod analyzer;
mod deps;
mod resolve;


use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use graphdecl_foundation::{DiscoveredResource, Error, Result};
use tracing::{debug, warn};

use crate::config::ScanConfig;
use crate::parse::parse_source;

pub use analyzer::{DEFAULT_PROPERTY_TYPE, resolve_kind};
pub use deps::is_candidate;

use analyzer::{Candidate, DeclarationAnalyzer};

/// A non-fatal problem found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanWarning {
    /// The file the warning concerns.
    pub path: PathBuf,
    /// Human-readable description.
    pub message: String,
}

impl ScanWarning {
    /// Creates a warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// The result of scanning a file or directory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanReport {
    /// Discovered resources in scan order.
    pub resources: Vec<DiscoveredResource>,
    /// Skipped files and duplicate declarations.
    pub warnings: Vec<ScanWarning>,
    /// Number of files that were read and parsed.
    pub files_scanned: usize,
}

/// Discovers resource declarations in source files.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Creates a scanner with the given configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Returns the scanner configuration.
    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans source text as if it were read from `path`.
    ///
    /// # Errors
    /// Returns a parse error if the source is malformed.
    pub fn scan_source(&self, path: &Path, source: &str) -> Result<Vec<DiscoveredResource>> {
        let candidates = self.analyze_source(path, source)?;
        Ok(resolve::finalize(candidates, self.config.warn_on_duplicates).0)
    }

    /// Scans a single file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or a parse error.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<DiscoveredResource>> {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, &e))?;
        self.scan_source(path, &source)
    }

    /// Scans a directory tree depth-first in file-name order.
    ///
    /// Files that fail to read or parse become warnings and contribute no
    /// resources.
    ///
    /// # Errors
    /// Returns an I/O error if the root directory cannot be read.
    pub fn scan_dir(&self, root: &Path) -> Result<ScanReport> {
        let mut warnings = Vec::new();
        let mut files = Vec::new();
        let entries = read_sorted(root)?;
        self.collect_files(entries, &mut files, &mut warnings);

        let mut candidates = Vec::new();
        let mut files_scanned = 0;
        for file in &files {
            let result = fs::read_to_string(file)
                .map_err(|e| Error::io(file, &e))
                .and_then(|source| self.analyze_source(file, &source));
            match result {
                Ok(found) => {
                    debug!(path = %file.display(), resources = found.len(), "scanned file");
                    files_scanned += 1;
                    candidates.extend(found);
                }
                Err(err) => {
                    warn!(path = %file.display(), error = %err, "skipping file");
                    warnings.push(ScanWarning::new(file, err.to_string()));
                }
            }
        }

        let (resources, duplicates) = resolve::finalize(candidates, self.config.warn_on_duplicates);
        warnings.extend(duplicates);

        Ok(ScanReport {
            resources,
            warnings,
            files_scanned,
        })
    }

    /// Scans a directory or a single file.
    ///
    /// A single file is scanned strictly: read and parse errors are returned.
    ///
    /// # Errors
    /// Returns an I/O error for a missing path, or a parse error for a
    /// malformed single file.
    pub fn scan_path(&self, path: &Path) -> Result<ScanReport> {
        let metadata = fs::metadata(path).map_err(|e| Error::io(path, &e))?;
        if metadata.is_dir() {
            return self.scan_dir(path);
        }

        let source = fs::read_to_string(path).map_err(|e| Error::io(path, &e))?;
        let candidates = self.analyze_source(path, &source)?;
        let (resources, warnings) = resolve::finalize(candidates, self.config.warn_on_duplicates);
        Ok(ScanReport {
            resources,
            warnings,
            files_scanned: 1,
        })
    }

    fn analyze_source(&self, path: &Path, source: &str) -> Result<Vec<Candidate>> {
        let file = parse_source(source).map_err(|e| e.in_file(path))?;
        Ok(DeclarationAnalyzer::new(path).analyze(&file))
    }

    fn collect_files(
        &self,
        entries: Vec<PathBuf>,
        files: &mut Vec<PathBuf>,
        warnings: &mut Vec<ScanWarning>,
    ) {
        for path in entries {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            let file_type = match fs::symlink_metadata(&path) {
                Ok(metadata) => metadata.file_type(),
                Err(err) => {
                    warnings.push(ScanWarning::new(&path, err.to_string()));
                    continue;
                }
            };

            if file_type.is_dir() {
                if self.config.is_excluded_dir(&name) {
                    debug!(path = %path.display(), "skipping directory");
                    continue;
                }
                match read_sorted(&path) {
                    Ok(children) => self.collect_files(children, files, warnings),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "skipping directory");
                        warnings.push(ScanWarning::new(&path, err.to_string()));
                    }
                }
            } else if file_type.is_file() && self.config.is_scanned_file(&name) {
                files.push(path);
            }
        }
    }
}

/// Lists a directory's entries sorted by file name.
fn read_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, &e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, &e))?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}
