//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pack - Resolve and inspect multi-platform app packaging configuration
#[derive(Parser, Debug)]
#[command(name = "pack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory (searched upwards for pyproject.toml)
    #[arg(long, global = true, env = "PACK_PROJECT")]
    pub project: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the resolved configuration for a target
    ///
    /// Examples:
    ///   pack config                          # Host platform, default format
    ///   pack config -p macOS -f Xcode        # A specific target
    ///   pack config --app hello-world --json # One app, as JSON
    Config {
        /// Target platform (defaults to the host platform)
        #[arg(short, long)]
        platform: Option<String>,

        /// Output format (defaults to the platform's default format)
        #[arg(short, long)]
        format: Option<String>,

        /// Only show this app
        #[arg(short, long)]
        app: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the path index of an app's build bundle
    Paths {
        /// App whose bundle to inspect
        #[arg(short, long)]
        app: String,

        /// Target platform (defaults to the host platform)
        #[arg(short, long)]
        platform: Option<String>,

        /// Output format (defaults to the platform's default format)
        #[arg(short, long)]
        format: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List supported platforms and output formats
    Platforms,
}
