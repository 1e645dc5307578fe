//! Catalogs: providers and environment values read from a file.

use std::collections::BTreeSet;
use std::path::Path;

use plugin_core::{
    BoxedProvider, MapEnvironmentContext, PluginHelper, PluginName, ProviderCollection,
};
use tracing::info;

use crate::config::ConfigStore;
use crate::provider::{CatalogProvider, PluginInstance};
use crate::schema::{CatalogFile, ProviderEntry};
use crate::{Error, Result};

/// A validated catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    file: CatalogFile,
}

impl Catalog {
    /// Rejects catalogs that declare a provider name twice.
    pub fn new(file: CatalogFile) -> Result<Self> {
        let mut names = BTreeSet::new();
        for entry in &file.providers {
            if !names.insert(&entry.name) {
                return Err(Error::DuplicateProvider {
                    name: entry.name.to_string(),
                });
            }
        }
        Ok(Self { file })
    }

    /// Loads a catalog, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(&ConfigStore::new(), path)
    }

    pub fn load_with(store: &ConfigStore, path: &Path) -> Result<Self> {
        let catalog = Self::new(store.load(path)?)?;
        info!(
            path = %path.display(),
            providers = catalog.file.providers.len(),
            "loaded plugin catalog"
        );
        Ok(catalog)
    }

    pub fn file(&self) -> &CatalogFile {
        &self.file
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.file.providers
    }

    /// One provider per entry, behind its aliases when the entry has any.
    pub fn providers(&self) -> Result<Vec<BoxedProvider<PluginName, PluginInstance>>> {
        let helper = helper();
        self.file
            .providers
            .iter()
            .map(|entry| {
                let provider = CatalogProvider::from(entry);
                let boxed: BoxedProvider<PluginName, PluginInstance> = match &entry.aliases {
                    Some(aliases) => Box::new(helper.aliases_provider(aliases.clone(), provider)?),
                    None => Box::new(provider),
                };
                Ok(boxed)
            })
            .collect()
    }

    pub fn collection(&self) -> Result<ProviderCollection<PluginName, PluginInstance>> {
        Ok(helper().collection(self.providers()?))
    }

    pub fn environment(&self) -> MapEnvironmentContext {
        self.file
            .environment
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

fn helper() -> PluginHelper<PluginName> {
    PluginHelper::new("plugin")
}
