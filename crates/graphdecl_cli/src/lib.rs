//! Command-line interface for graphdecl.
//!
//! This crate provides:
//! - [`Cli`] - The `clap` argument model
//! - [`run`] - Dispatch of one parsed command over the library crates
//! - [`Outcome`] - The exit status a successful run maps to

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser, Subcommand};
use graphdecl_diff::{diff_paths, format_summary, to_json};
use graphdecl_foundation::{Error, Result};
use graphdecl_graph::DependencyGraph;
use graphdecl_import::{CatalogueSnapshot, ImportReport, generate, import_catalogue, import_script};
use graphdecl_language::{ScanConfig, Scanner};
use graphdecl_synth::{OutputFormat, SynthConfig, render};
use tracing::{debug, warn};

// =============================================================================
// Arguments
// =============================================================================

/// Discover graph schema declarations and synthesize deployment artifacts.
#[derive(Debug, Parser)]
#[command(name = "graphdecl", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Log debug progress to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also scan test files and directories.
    #[arg(long, global = true)]
    pub include_tests: bool,
}

/// One CLI action.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the resources declared under a path.
    Scan {
        /// Source directory or file.
        path: PathBuf,
    },

    /// Print resources in dependency order.
    Order {
        /// Source directory or file.
        path: PathBuf,
    },

    /// Generate a Cypher script or JSON document.
    Synth {
        /// Source directory or file.
        path: PathBuf,
        /// Output format: cypher or json.
        #[arg(short, long, default_value = "cypher")]
        format: String,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Omit the generated-file header and per-resource comments.
        #[arg(long)]
        no_header: bool,
    },

    /// Generate declaration source from a Cypher script or catalogue snapshot.
    #[command(group(ArgGroup::new("input").required(true).args(["script", "catalogue"])))]
    Import {
        /// Cypher script to import.
        script: Option<PathBuf>,
        /// Catalogue snapshot (JSON) to import.
        #[arg(long)]
        catalogue: Option<PathBuf>,
        /// Name of the generated module.
        #[arg(short, long, default_value = "schema")]
        package: String,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two snapshots of the same kind.
    Diff {
        /// Old snapshot: directory, source file, or JSON document.
        old: PathBuf,
        /// New snapshot of the same kind.
        new: PathBuf,
        /// Print the diff as JSON.
        #[arg(long)]
        json: bool,
        /// Exit with status 2 when any change is breaking.
        #[arg(long)]
        fail_on_breaking: bool,
    },
}

impl Cli {
    /// Scanner configuration implied by the global flags.
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::default().with_skip_tests(!self.include_tests)
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// How a successful run should exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Everything went fine.
    Success,
    /// A diff found breaking changes and `--fail-on-breaking` was set.
    Breaking,
}

impl Outcome {
    /// Process exit code.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Breaking => 2,
        }
    }
}

/// Runs one command, writing generated content to `out` unless redirected.
///
/// # Errors
/// Returns any error from the library layer or from writing output.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<Outcome> {
    let config = cli.scan_config();
    match &cli.command {
        Command::Scan { path } => {
            let report = Scanner::new(config).scan_path(path)?;
            let mut text = String::new();
            for resource in &report.resources {
                text.push_str(&format!(
                    "{}\t{}\t{}\n",
                    resource.kind, resource.name, resource.location
                ));
            }
            debug!(
                files = report.files_scanned,
                resources = report.resources.len(),
                "scan complete"
            );
            emit(out, None, &text)?;
        }
        Command::Order { path } => {
            let report = Scanner::new(config).scan_path(path)?;
            let graph = DependencyGraph::build(&report.resources);
            let mut text = String::new();
            for resource in graph.topological_sort()? {
                text.push_str(&format!("{}\t{}\n", resource.kind, resource.name));
            }
            emit(out, None, &text)?;
        }
        Command::Synth {
            path,
            format,
            output,
            no_header,
        } => {
            let format: OutputFormat = format.parse()?;
            let report = Scanner::new(config).scan_path(path)?;
            let synth = SynthConfig::default()
                .with_file_header(!no_header)
                .with_block_headers(!no_header);
            let text = render(&report.resources, format, &synth)?;
            emit(out, output.as_deref(), &text)?;
        }
        Command::Import {
            script,
            catalogue,
            package,
            output,
        } => {
            let report = match (script, catalogue) {
                (Some(script), _) => import_script(&read(script)?)?,
                (None, Some(catalogue)) => {
                    import_catalogue(&CatalogueSnapshot::from_json(&read(catalogue)?)?)
                }
                (None, None) => {
                    return Err(Error::usage("import needs a script or --catalogue"));
                }
            };
            log_skipped(&report);
            let text = generate(&report.resources, package)?;
            emit(out, output.as_deref(), &text)?;
        }
        Command::Diff {
            old,
            new,
            json,
            fail_on_breaking,
        } => {
            let result = diff_paths(old, new, &config)?;
            let mut text = if *json {
                to_json(&result)?
            } else {
                format_summary(&result)
            };
            text.push('\n');
            emit(out, None, &text)?;
            if *fail_on_breaking && result.has_breaking() {
                return Ok(Outcome::Breaking);
            }
        }
    }
    Ok(Outcome::Success)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, &e))
}

fn emit(out: &mut dyn Write, path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).map_err(|e| Error::io(path, &e))?;
            debug!(path = %path.display(), bytes = text.len(), "wrote output");
            Ok(())
        }
        None => out
            .write_all(text.as_bytes())
            .map_err(|e| Error::io(Path::new("<stdout>"), &e)),
    }
}

fn log_skipped(report: &ImportReport) {
    if !report.skipped.is_empty() {
        warn!(count = report.skipped.len(), "statements had no declaration form");
    }
}
