use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Dependency bridge for a single source file.
///
/// bridge-analyzer maps what one file imports, what it exports, and which
/// files in the repository depend on it, ranking every related file by a
/// simple importance score. TypeScript, JavaScript, Python, Go and Rust are
/// recognised by pattern; no compiler or toolchain is invoked.
#[derive(Parser, Debug)]
#[command(
    name = "bridge-analyzer",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for analysis results.
#[derive(Clone, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Compact one-line-per-result format (default).
    #[default]
    Compact,
    /// Human-readable sections with optional ANSI color when stdout is a terminal.
    Table,
    /// The same JSON document the HTTP endpoint returns.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one file against a snapshot of the repository it lives in.
    ///
    /// The repository root is walked (respecting .gitignore, skipping
    /// node_modules and `exclude` patterns from bridge.toml) to build the
    /// snapshot used for import resolution and dependents.
    Analyze {
        /// File to analyze, relative to --root or absolute.
        file: PathBuf,

        /// Repository root to snapshot.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Analyze the file on its own, without walking the repository.
        #[arg(long)]
        no_snapshot: bool,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Serve the analysis over HTTP.
    ///
    /// POST /api/bridge/analyze takes {filePath, fileContent, repoFiles?, owner, repo};
    /// GET /api/health reports liveness.
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on. Overrides bridge.toml; a valid PORT environment
        /// variable overrides both.
        #[arg(short, long)]
        port: Option<u16>,
    },
}
