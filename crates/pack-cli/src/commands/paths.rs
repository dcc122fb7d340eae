//! Paths command implementation

use std::path::Path;

use colored::Colorize;
use pack_core::{ImageTargets, PathIndex};
use serde_json::json;

use crate::error::Result;

/// Run the paths command
pub fn run_paths(
    project_dir: &Path,
    app: &str,
    platform: Option<&str>,
    format: Option<&str>,
    json: bool,
) -> Result<()> {
    let (project, platform, format) = super::open_target(project_dir, platform, format)?;
    let cache = project.path_index_cache(&platform, &format);
    let index = cache.get(app)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&paths_json(&index))?);
        return Ok(());
    }

    println!(
        "{} {} ({} {})",
        "Bundle paths for".bold(),
        app.green().bold(),
        platform.cyan(),
        format.cyan()
    );
    println!();
    println!("{}:  {}", "Bundle".dimmed(), index.bundle_path());
    println!("{}:     {}", "App".dimmed(), index.app_path());
    print_optional("Packages", index.app_packages_path().map(|p| p.to_string()));
    print_optional("Support", index.support_path().map(|p| p.to_string()));
    print_optional("Revision", index.support_revision());

    if !index.cleanup_paths().is_empty() {
        println!();
        println!("{}:", "Cleanup".bold());
        for pattern in index.cleanup_paths() {
            println!("  {pattern}");
        }
    }

    print_images("Icons", &index.icon_targets());
    print_images("Splash", &index.splash_image_targets());
    for (document_type, targets) in index.document_type_icon_targets() {
        print_images(&format!("Document type {document_type}"), &targets);
    }

    Ok(())
}

fn paths_json(index: &PathIndex) -> serde_json::Value {
    let document_types: serde_json::Map<String, serde_json::Value> = index
        .document_type_icon_targets()
        .iter()
        .map(|(name, targets)| (name.clone(), images_json(targets)))
        .collect();

    json!({
        "bundle_path": index.bundle_path().as_str(),
        "app_path": index.app_path().as_str(),
        "app_packages_path": index.app_packages_path().map(|p| p.to_string()),
        "support_path": index.support_path().map(|p| p.to_string()),
        "support_revision": index.support_revision(),
        "cleanup_paths": index.cleanup_paths(),
        "icon": images_json(&index.icon_targets()),
        "splash": images_json(&index.splash_image_targets()),
        "document_type_icon": document_types,
    })
}

/// Unsized images are keyed by an empty string.
fn images_json(targets: &ImageTargets) -> serde_json::Value {
    targets
        .iter()
        .map(|(size, path)| {
            (
                size.clone().unwrap_or_default(),
                serde_json::Value::from(path.as_str()),
            )
        })
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn print_optional(label: &str, value: Option<String>) {
    let value = value.unwrap_or_else(|| "-".dimmed().to_string());
    println!("{}: {}", format!("{label:<8}").dimmed(), value);
}

fn print_images(label: &str, targets: &ImageTargets) {
    if targets.is_empty() {
        return;
    }
    println!();
    println!("{}:", label.bold());
    for (size, path) in targets {
        match size {
            Some(size) => println!("  {:<6} {}", size.cyan(), path),
            None => println!("  {}", path),
        }
    }
}
