//! Plugin CLI
//!
//! Parses info and alias text, merges them, and resolves selectors through
//! a catalog of providers.

mod cli;
mod commands;
mod error;
mod logging;

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

    logging::init(cli.verbose).map_err(CliError::user)?;

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Plugin CLI", "plugin".green().bold());
            println!();
            println!("Run {} for available commands.", "plugin --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Infos { text } => commands::run_infos(&text),
        Commands::Aliases { text } => commands::run_aliases(&text),
        Commands::Merge { aliases, infos } => commands::run_merge(&aliases, &infos),
        Commands::List { catalog } => commands::run_list(&catalog),
        Commands::Resolve { catalog, selector } => commands::run_resolve(&catalog, &selector),
    }
}
