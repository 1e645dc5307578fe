//! Commands working on info and alias text

use colored::Colorize;

use super::helper;
use crate::error::Result;

/// Run the infos command
pub fn run_infos(text: &str) -> Result<()> {
    let infos = helper().parse_info_set(text)?;
    println!("{infos}");
    Ok(())
}

/// Run the aliases command
pub fn run_aliases(text: &str) -> Result<()> {
    let aliases = helper().parse_alias_set(text)?;
    println!("{aliases}");
    Ok(())
}

/// Run the merge command
pub fn run_merge(aliases: &str, infos: &str) -> Result<()> {
    let helper = helper();
    let aliases = helper.parse_alias_set(aliases)?;
    let infos = helper.parse_info_set(infos)?;

    let merged = aliases.merge(&infos)?;
    if merged.is_empty() && !infos.is_empty() {
        eprintln!(
            "{} none of the provided {}s is named by the aliases",
            "warning:".yellow().bold(),
            helper.label()
        );
    }
    println!("{merged}");
    Ok(())
}
