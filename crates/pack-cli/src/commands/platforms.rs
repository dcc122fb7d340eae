//! Platforms command implementation

use colored::Colorize;
use pack_config::PlatformRegistry;

use crate::error::Result;

/// Run the platforms command
pub fn run_platforms() -> Result<()> {
    let registry = PlatformRegistry::with_builtins();
    let host = PlatformRegistry::host_platform();

    println!("{}", "Supported Platforms".bold());
    println!();

    for platform in registry.platforms() {
        let marker = if platform == host {
            format!(" {}", "(host)".dimmed())
        } else {
            String::new()
        };
        println!("{}{}:", platform.cyan().bold(), marker);

        let default_format = registry.default_format(platform);
        for format in registry.formats(platform) {
            if Some(format.as_str()) == default_format {
                println!("  {} {}", format.green(), "(default)".dimmed());
            } else {
                println!("  {format}");
            }
        }
    }

    println!();
    println!(
        "{} Select a target with {}.",
        "Tip:".dimmed(),
        "--platform <PLATFORM> --format <FORMAT>".cyan()
    );

    Ok(())
}
