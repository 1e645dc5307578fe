//! Per-kind strategy bundle.

use std::fmt;

use crate::alias_set::PluginAliasSet;
use crate::collection::{BoxedProvider, ProviderCollection};
use crate::error::{Error, Result};
use crate::info::PluginInfo;
use crate::info_set::PluginInfoSet;
use crate::mapper::{
    FilteredProviderMapper, MergedProviderMapper, ProviderMapper, RenamingProviderMapper,
    UnknownName,
};
use crate::name::Name;
use crate::provider::{AliasesProvider, PluginProvider};
use crate::selector::PluginSelector;

/// The default unknown-name error: `Unknown <name>`.
pub fn unknown_name<N: Name>(name: &N) -> Error {
    Error::UnknownName {
        kind: N::KIND,
        name: name.to_string(),
    }
}

/// Everything the generic algebra needs to know about one plugin kind.
///
/// ```
/// use plugin_core::{PluginHelper, PluginName};
///
/// let helper = PluginHelper::<PluginName>::new("converter");
/// let infos = helper.parse_info_set("https://example.com/a a").unwrap();
/// assert_eq!(infos.len(), 1);
/// ```
#[derive(Clone)]
pub struct PluginHelper<N: Name> {
    label: &'static str,
    unknown: UnknownName<N>,
}

impl<N: Name> PluginHelper<N> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            unknown: unknown_name::<N>,
        }
    }

    /// Replaces the unknown-name error, e.g. to phrase it as "no such formatter".
    pub fn with_unknown_name(mut self, unknown: UnknownName<N>) -> Self {
        self.unknown = unknown;
        self
    }

    /// Short description of the kind, e.g. `converter`.
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn unknown_name(&self, name: &N) -> Error {
        (self.unknown)(name)
    }

    pub fn parse_name(&self, text: &str) -> Result<N> {
        N::parse(text)
    }

    pub fn parse_info(&self, text: &str) -> Result<PluginInfo<N>> {
        PluginInfo::parse(text)
    }

    pub fn parse_info_set(&self, text: &str) -> Result<PluginInfoSet<N>> {
        PluginInfoSet::parse(text)
    }

    pub fn parse_selector(&self, text: &str) -> Result<PluginSelector<N>> {
        PluginSelector::parse(text)
    }

    pub fn parse_alias_set(&self, text: &str) -> Result<PluginAliasSet<N>> {
        PluginAliasSet::parse(text)
    }

    pub fn provider_mapper(
        &self,
        in_infos: &PluginInfoSet<N>,
        out_infos: &PluginInfoSet<N>,
    ) -> ProviderMapper<N> {
        ProviderMapper::new(in_infos, out_infos, self.unknown)
    }

    pub fn filtered_mapper(
        &self,
        filter_infos: &PluginInfoSet<N>,
        provider_infos: &PluginInfoSet<N>,
    ) -> FilteredProviderMapper<N> {
        FilteredProviderMapper::new(filter_infos, provider_infos, self.unknown)
    }

    pub fn renaming_mapper(
        &self,
        rename_infos: &PluginInfoSet<N>,
        provider_infos: &PluginInfoSet<N>,
    ) -> Result<RenamingProviderMapper<N>> {
        RenamingProviderMapper::new(rename_infos, provider_infos, self.unknown)
    }

    pub fn merged_mapper(
        &self,
        mapping_infos: &PluginInfoSet<N>,
        provider_infos: &PluginInfoSet<N>,
    ) -> Result<MergedProviderMapper<N>> {
        MergedProviderMapper::new(mapping_infos, provider_infos, self.unknown)
    }

    /// Wraps `provider` in `aliases`, reporting hidden names with this kind's error.
    pub fn aliases_provider<P: PluginProvider<N>>(
        &self,
        aliases: PluginAliasSet<N>,
        provider: P,
    ) -> Result<AliasesProvider<N, P>> {
        AliasesProvider::new(aliases, provider, self.unknown)
    }

    pub fn collection<T>(&self, providers: Vec<BoxedProvider<N, T>>) -> ProviderCollection<N, T> {
        ProviderCollection::new(providers, self.unknown)
    }
}

impl<N: Name> fmt::Debug for PluginHelper<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHelper")
            .field("label", &self.label)
            .field("kind", &N::KIND)
            .finish()
    }
}
