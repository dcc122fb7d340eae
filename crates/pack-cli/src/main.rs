//! Pack CLI
//!
//! Inspect how a project's packaging configuration resolves for each target.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    let project_dir = match cli.project {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(cmd, project_dir),
        None => {
            println!("{} Multi-platform app packaging", "pack".green().bold());
            println!();
            println!("Run {} for available commands.", "pack --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, project_dir: PathBuf) -> Result<()> {
    match cmd {
        Commands::Config {
            platform,
            format,
            app,
            json,
        } => commands::run_config(
            &project_dir,
            platform.as_deref(),
            format.as_deref(),
            app.as_deref(),
            json,
        ),
        Commands::Paths {
            app,
            platform,
            format,
            json,
        } => commands::run_paths(
            &project_dir,
            &app,
            platform.as_deref(),
            format.as_deref(),
            json,
        ),
        Commands::Platforms => commands::run_platforms(),
    }
}
