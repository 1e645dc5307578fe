//! Serialized form of a catalog file.

use std::collections::BTreeMap;

use plugin_core::{AbsoluteUrl, EnvironmentValueName, PluginAliasSet, PluginInfoSet, PluginName, ProviderName};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root of a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub providers: Vec<ProviderEntry>,

    /// Values available to selectors as `$name`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<EnvironmentValueName, Value>,
}

/// One statically declared provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub name: ProviderName,
    pub url: AbsoluteUrl,
    /// Info set text, e.g. `https://example.com/a a, https://example.com/b b`.
    pub infos: PluginInfoSet<PluginName>,
    /// Alias set text applied on top of `infos`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<PluginAliasSet<PluginName>>,
}
