//! Providers declared in a catalog.

use std::fmt;

use plugin_core::{
    AbsoluteUrl, EnvironmentContext, PluginInfo, PluginInfoSet, PluginName, PluginProvider,
    ProviderName, Result, SelectorValue, unknown_name,
};
use tracing::debug;

use crate::schema::ProviderEntry;

/// A plugin materialised from a catalog: which provider made it, from which
/// info, with which parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginInstance {
    pub provider: ProviderName,
    pub info: PluginInfo<PluginName>,
    pub values: Vec<SelectorValue<PluginInstance>>,
}

/// Selector-like rendering, e.g. `collection(to-date("yyyy-mm-dd"), 1)`.
impl fmt::Display for PluginInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info.name())?;
        if self.values.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                SelectorValue::Provided(instance) => write!(f, "{instance}")?,
                SelectorValue::Number(n) => write!(f, "{n}")?,
                SelectorValue::String(s) => write!(f, "{s:?}")?,
                SelectorValue::Environment(v) => write!(f, "{v}")?,
            }
        }
        f.write_str(")")
    }
}

/// A provider whose plugins are the infos listed for it in the catalog.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    name: ProviderName,
    url: AbsoluteUrl,
    infos: PluginInfoSet<PluginName>,
}

impl CatalogProvider {
    pub fn new(name: ProviderName, url: AbsoluteUrl, infos: PluginInfoSet<PluginName>) -> Self {
        Self { name, url, infos }
    }
}

impl From<&ProviderEntry> for CatalogProvider {
    fn from(entry: &ProviderEntry) -> Self {
        Self::new(entry.name.clone(), entry.url.clone(), entry.infos.clone())
    }
}

impl PluginProvider<PluginName> for CatalogProvider {
    type Plugin = PluginInstance;

    fn name(&self) -> &ProviderName {
        &self.name
    }

    fn url(&self) -> &AbsoluteUrl {
        &self.url
    }

    fn infos(&self) -> &PluginInfoSet<PluginName> {
        &self.infos
    }

    fn plugin(
        &self,
        name: &PluginName,
        values: Vec<SelectorValue<PluginInstance>>,
        _context: &dyn EnvironmentContext,
    ) -> Result<PluginInstance> {
        let info = self
            .infos
            .get_by_name(name)
            .ok_or_else(|| unknown_name(name))?;
        debug!(provider = %self.name, plugin = %name, values = values.len(), "materialised plugin");
        Ok(PluginInstance {
            provider: self.name.clone(),
            info: info.clone(),
            values,
        })
    }
}
