//! List command for catalog providers

use std::path::Path;

use colored::Colorize;
use plugin_catalog::Catalog;
use plugin_core::PluginProvider;

use crate::error::Result;

/// Run the list command
pub fn run_list(path: &Path) -> Result<()> {
    let catalog = Catalog::load(path)?;
    let collection = catalog.collection()?;
    let ambiguous = collection.ambiguous_names();

    println!("{}", "Available Plugins".bold());
    println!();

    for provider in collection.providers() {
        println!(
            "{} ({}):",
            provider.name().to_string().cyan().bold(),
            provider.url().as_str().dimmed()
        );
        if provider.infos().is_empty() {
            println!("  {}", "(none)".dimmed());
        }
        for info in provider.infos() {
            let name = info.name().to_string();
            if ambiguous.contains(info.name()) {
                println!(
                    "  {:<24} {} {}",
                    name.yellow(),
                    info.url(),
                    "(ambiguous)".yellow()
                );
            } else {
                println!("  {:<24} {}", name.green(), info.url());
            }
        }
        println!();
    }

    println!(
        "{} {} plugins from {} providers, {} ambiguous.",
        "Total:".dimmed(),
        collection.infos().len(),
        collection.len(),
        ambiguous.len()
    );

    Ok(())
}
