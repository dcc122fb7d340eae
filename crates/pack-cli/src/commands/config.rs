//! Config command implementation

use std::path::Path;

use colored::Colorize;
use pack_config::{AppConfig, ConfigMap, value::map_to_json};
use pack_core::ResolvedProject;
use serde_json::json;

use crate::error::Result;

/// Run the config command
pub fn run_config(
    project_dir: &Path,
    platform: Option<&str>,
    format: Option<&str>,
    app: Option<&str>,
    json: bool,
) -> Result<()> {
    let (project, platform, format) = super::open_target(project_dir, platform, format)?;
    let resolved = project.resolve(&platform, &format)?;

    if let Some(app) = app {
        let config = resolved
            .apps
            .get(app)
            .ok_or_else(|| pack_core::Error::AppNotFound {
                app: app.to_string(),
                platform: platform.clone(),
                format: format.clone(),
            })?;
        let typed = AppConfig::from_resolved(config)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&map_to_json(config.as_map()))?);
        } else {
            print_app(app, config.as_map());
            println!("  {}", "derived".dimmed());
            println!("    {:<20} {}", "module_name", typed.module_name());
            println!("    {:<20} {}", "bundle_identifier", typed.bundle_identifier());
        }
        return Ok(());
    }

    if json {
        let output = config_json(&platform, &format, &resolved);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "Configuration for".bold(),
        platform.cyan(),
        format.cyan()
    );
    println!();

    println!("{}:", "Global options".bold());
    if resolved.global.is_empty() {
        println!("  {}", "None".dimmed());
    } else {
        print_entries(&resolved.global);
    }
    println!();

    for (name, config) in &resolved.apps {
        print_app(name, config.as_map());
        println!();
    }

    if resolved.apps.is_empty() {
        println!("{} No apps are defined for this target.", "Note:".yellow().bold());
    }

    Ok(())
}

/// Machine-readable form of a resolved project.
fn config_json(platform: &str, format: &str, resolved: &ResolvedProject) -> serde_json::Value {
    let apps: serde_json::Map<String, serde_json::Value> = resolved
        .apps
        .iter()
        .map(|(name, config)| (name.clone(), map_to_json(config.as_map())))
        .collect();

    json!({
        "platform": platform,
        "format": format,
        "global": map_to_json(&resolved.global),
        "apps": apps,
    })
}

fn print_app(name: &str, config: &ConfigMap) {
    println!("{} {}:", "App".bold(), name.green().bold());
    print_entries(config);
}

fn print_entries(map: &ConfigMap) {
    for (key, value) in map {
        println!("  {:<22} {}", key.cyan(), value.to_json());
    }
}
