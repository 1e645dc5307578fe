//! Command implementations for plugin-cli

pub mod list;
pub mod resolve;
pub mod text;

pub use list::run_list;
pub use resolve::run_resolve;
pub use text::{run_aliases, run_infos, run_merge};

use plugin_core::{PluginHelper, PluginName};

/// The plugin kind every command works with.
pub(crate) fn helper() -> PluginHelper<PluginName> {
    PluginHelper::new("plugin")
}
