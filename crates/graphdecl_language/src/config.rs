//! Scanner configuration.

/// Directories excluded from directory scans by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["vendor", "third_party", "target", "node_modules"];

/// Directories holding tests and benchmarks, skipped when `skip_tests` is set.
pub const TEST_DIRS: &[&str] = &["tests", "benches"];

/// Configuration for a [`Scanner`](crate::Scanner).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Skip test directories and `*_test.rs` / `*_tests.rs` / `tests.rs` files.
    pub skip_tests: bool,
    /// Skip entries whose name starts with `.`.
    pub skip_hidden: bool,
    /// Directory names never descended into.
    pub excluded_dirs: Vec<String>,
    /// File extensions (without the dot) that are scanned.
    pub extensions: Vec<String>,
    /// Report duplicate `(kind, name)` declarations as warnings.
    pub warn_on_duplicates: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip_tests: true,
            skip_hidden: true,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
            extensions: vec!["rs".to_string()],
            warn_on_duplicates: true,
        }
    }
}

impl ScanConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether test files and directories are skipped.
    #[must_use]
    pub fn with_skip_tests(mut self, skip: bool) -> Self {
        self.skip_tests = skip;
        self
    }

    /// Sets whether hidden entries are skipped.
    #[must_use]
    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Adds a directory name to the exclusion list.
    #[must_use]
    pub fn with_excluded_dir(mut self, name: impl Into<String>) -> Self {
        self.excluded_dirs.push(name.into());
        self
    }

    /// Replaces the scanned file extensions.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether duplicate declarations produce warnings.
    #[must_use]
    pub fn with_warn_on_duplicates(mut self, warn: bool) -> Self {
        self.warn_on_duplicates = warn;
        self
    }

    /// Returns true if a directory with this name should not be descended into.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        (self.skip_hidden && name.starts_with('.'))
            || self.excluded_dirs.iter().any(|d| d == name)
            || (self.skip_tests && TEST_DIRS.contains(&name))
    }

    /// Returns true if a file with this name should be scanned.
    #[must_use]
    pub fn is_scanned_file(&self, name: &str) -> bool {
        if self.skip_hidden && name.starts_with('.') {
            return false;
        }
        let Some((stem, ext)) = name.rsplit_once('.') else {
            return false;
        };
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }
        !(self.skip_tests && is_test_file_stem(stem))
    }
}

fn is_test_file_stem(stem: &str) -> bool {
    stem == "tests" || stem.ends_with("_test") || stem.ends_with("_tests")
}
