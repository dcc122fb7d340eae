//! Command implementations for pack-cli

pub mod config;
pub mod paths;
pub mod platforms;

pub use config::run_config;
pub use paths::run_paths;
pub use platforms::run_platforms;

use std::path::Path;

use pack_config::PlatformRegistry;
use pack_core::Project;

use crate::error::Result;

/// Locate the project and settle the (platform, format) target.
fn open_target(
    project_dir: &Path,
    platform: Option<&str>,
    format: Option<&str>,
) -> Result<(Project, String, String)> {
    let project = Project::discover(project_dir)?;
    let platform = match platform {
        Some(platform) => platform,
        None => PlatformRegistry::host_platform(),
    };
    let (platform, format) = project.target(platform, format)?;
    tracing::debug!(root = %project.root(), %platform, %format, "Resolved target");
    Ok((project, platform, format))
}
