//! Name mappers between a requested view of plugins and a provider's own infos.
//!
//! Every mapper matches two info sets by url and translates names from the
//! view it exposes to the names the provider understands. They differ in
//! which infos the exposed view contains:
//!
//! | mapper                     | exposed infos |
//! |----------------------------|---------------|
//! | [`ProviderMapper`]         | `out` infos whose url also appears in `in` |
//! | [`FilteredProviderMapper`] | filter infos whose url the provider publishes |
//! | [`RenamingProviderMapper`] | every provider info, renamed where a rename shares its url |
//! | [`MergedProviderMapper`]   | all mapping infos plus provider infos they do not override |

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::info_set::PluginInfoSet;
use crate::name::Name;
use crate::selector::PluginSelector;

/// Builds the error for a name a mapper does not know.
pub type UnknownName<N> = fn(&N) -> Error;

/// Translation from exposed names to provider names.
pub trait NameMapper<N: Name> {
    /// The provider name for an exposed name.
    fn name(&self, name: &N) -> Result<N>;

    /// The selector with its name translated and its text kept.
    fn selector(&self, selector: &PluginSelector<N>) -> Result<PluginSelector<N>> {
        Ok(selector.set_name(self.name(selector.name())?))
    }

    /// The exposed infos.
    fn infos(&self) -> &PluginInfoSet<N>;
}

#[derive(Clone)]
struct NameTable<N: Name> {
    names: BTreeMap<N, N>,
    unknown: UnknownName<N>,
}

impl<N: Name> NameTable<N> {
    /// Maps each name in `from` to the name in `to` sharing its url.
    fn matching_urls(from: &PluginInfoSet<N>, to: &PluginInfoSet<N>, unknown: UnknownName<N>) -> Self {
        let names = from
            .iter()
            .filter_map(|info| {
                to.get_by_url(info.url())
                    .map(|target| (info.name().clone(), target.name().clone()))
            })
            .collect();
        Self { names, unknown }
    }

    fn name(&self, name: &N) -> Result<N> {
        self.names
            .get(name)
            .cloned()
            .ok_or_else(|| (self.unknown)(name))
    }
}

impl<N: Name> fmt::Debug for NameTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.names.iter()).finish()
    }
}

macro_rules! name_mapper_impl {
    ($ty:ident) => {
        impl<N: Name> NameMapper<N> for $ty<N> {
            fn name(&self, name: &N) -> Result<N> {
                self.names.name(name)
            }

            fn infos(&self) -> &PluginInfoSet<N> {
                &self.infos
            }
        }
    };
}

/// Direct `in` to `out` translation for names whose urls match.
#[derive(Debug, Clone)]
pub struct ProviderMapper<N: Name> {
    infos: PluginInfoSet<N>,
    names: NameTable<N>,
}

impl<N: Name> ProviderMapper<N> {
    pub fn new(in_infos: &PluginInfoSet<N>, out_infos: &PluginInfoSet<N>, unknown: UnknownName<N>) -> Self {
        Self {
            infos: out_infos.filter(in_infos),
            names: NameTable::matching_urls(in_infos, out_infos, unknown),
        }
    }
}

name_mapper_impl!(ProviderMapper);

/// Exposes only the filter infos that the provider publishes, under the filter's names.
#[derive(Debug, Clone)]
pub struct FilteredProviderMapper<N: Name> {
    infos: PluginInfoSet<N>,
    names: NameTable<N>,
}

impl<N: Name> FilteredProviderMapper<N> {
    pub fn new(
        filter_infos: &PluginInfoSet<N>,
        provider_infos: &PluginInfoSet<N>,
        unknown: UnknownName<N>,
    ) -> Self {
        let infos = filter_infos.filter(provider_infos);
        let names = NameTable::matching_urls(&infos, provider_infos, unknown);
        Self { infos, names }
    }
}

name_mapper_impl!(FilteredProviderMapper);

/// Exposes every provider info, renaming those that share a url with a rename.
#[derive(Debug, Clone)]
pub struct RenamingProviderMapper<N: Name> {
    infos: PluginInfoSet<N>,
    names: NameTable<N>,
}

impl<N: Name> RenamingProviderMapper<N> {
    /// Fails when a rename collides with another provider name.
    pub fn new(
        rename_infos: &PluginInfoSet<N>,
        provider_infos: &PluginInfoSet<N>,
        unknown: UnknownName<N>,
    ) -> Result<Self> {
        let infos = provider_infos.rename_if_present(rename_infos)?;
        let names = NameTable::matching_urls(&infos, provider_infos, unknown);
        Ok(Self { infos, names })
    }
}

name_mapper_impl!(RenamingProviderMapper);

/// Mapping infos win over provider infos that share their url or name.
#[derive(Debug, Clone)]
pub struct MergedProviderMapper<N: Name> {
    infos: PluginInfoSet<N>,
    names: NameTable<N>,
}

impl<N: Name> MergedProviderMapper<N> {
    pub fn new(
        mapping_infos: &PluginInfoSet<N>,
        provider_infos: &PluginInfoSet<N>,
        unknown: UnknownName<N>,
    ) -> Result<Self> {
        let kept = provider_infos.delete_if(|info| {
            mapping_infos.contains_url(info.url()) || mapping_infos.contains_name(info.name())
        });
        let infos = PluginInfoSet::new(kept.iter().chain(mapping_infos.iter()).cloned())?;
        let names = NameTable::matching_urls(&infos, provider_infos, unknown);
        Ok(Self { infos, names })
    }
}

name_mapper_impl!(MergedProviderMapper);
