//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Plugin CLI - parse, merge and resolve plugin names and aliases
#[derive(Parser, Debug)]
#[command(name = "plugin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Parse an info set and print its canonical text
    ///
    /// Examples:
    ///   plugin infos "https://example.com/b b, https://example.com/a a"
    Infos {
        /// Info set text: `URL NAME` entries separated by commas
        text: String,
    },

    /// Parse an alias set and print its canonical text
    ///
    /// Examples:
    ///   plugin aliases "a, short long-name, custom base (1) https://example.com/custom"
    Aliases {
        /// Alias set text: `name`, `alias selector` or `alias selector url` declarations
        text: String,
    },

    /// Merge an alias set with a provider's info set
    Merge {
        /// Alias set text
        #[arg(long)]
        aliases: String,

        /// Info set text published by the provider
        #[arg(long)]
        infos: String,
    },

    /// List the plugins of every provider in a catalog
    List {
        /// Catalog file (.toml, .json, .yaml)
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Resolve a selector through a catalog and print the plugin tree
    ///
    /// Examples:
    ///   plugin resolve --catalog plugins.toml 'collection(to-date("yyyy-mm-dd"))'
    Resolve {
        /// Catalog file (.toml, .json, .yaml)
        #[arg(long)]
        catalog: PathBuf,

        /// Selector, e.g. `name` or `name(parameter, ...)`
        selector: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_merge() {
        let cli = Cli::try_parse_from(["plugin", "merge", "--aliases", "X A", "--infos", "u A"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Merge {
                aliases: "X A".to_string(),
                infos: "u A".to_string(),
            })
        );
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["plugin", "list", "--catalog", "c.toml", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_resolve_requires_catalog() {
        assert!(Cli::try_parse_from(["plugin", "resolve", "name"]).is_err());
    }
}
