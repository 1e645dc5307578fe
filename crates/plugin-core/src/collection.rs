//! Several providers of one plugin kind behind a single namespace.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::{debug, warn};

use crate::environment::EnvironmentContext;
use crate::error::Result;
use crate::info::PluginInfo;
use crate::mapper::UnknownName;
use crate::name::Name;
use crate::provider::PluginProvider;
use crate::selector::{PluginSelector, SelectorValue};

/// Boxed provider handing out plugins of type `T`.
pub type BoxedProvider<N, T> = Box<dyn PluginProvider<N, Plugin = T>>;

/// Aggregates providers and routes each name to the provider publishing it.
///
/// A name published under different infos by more than one provider is
/// ambiguous: it stays listed in [`ProviderCollection::infos`] but cannot be
/// looked up. The same info published twice is not ambiguous; the first
/// provider serves it.
pub struct ProviderCollection<N: Name, T> {
    providers: Vec<BoxedProvider<N, T>>,
    name_to_provider: BTreeMap<N, usize>,
    ambiguous: BTreeSet<N>,
    unknown: UnknownName<N>,
}

impl<N: Name, T> ProviderCollection<N, T> {
    pub fn new(providers: Vec<BoxedProvider<N, T>>, unknown: UnknownName<N>) -> Self {
        let mut owners: BTreeMap<N, (usize, &PluginInfo<N>)> = BTreeMap::new();
        let mut ambiguous = BTreeSet::new();

        for (index, provider) in providers.iter().enumerate() {
            for info in provider.infos() {
                match owners.get(info.name()) {
                    None => {
                        owners.insert(info.name().clone(), (index, info));
                    }
                    Some((_, existing)) if *existing == info => {}
                    Some(_) => {
                        ambiguous.insert(info.name().clone());
                    }
                }
            }
        }

        let name_to_provider: BTreeMap<N, usize> = owners
            .into_iter()
            .filter(|(name, _)| !ambiguous.contains(name))
            .map(|(name, (index, _))| (name, index))
            .collect();

        for name in &ambiguous {
            warn!(%name, kind = N::KIND, "name published by several providers, ignoring it");
        }
        debug!(
            providers = providers.len(),
            names = name_to_provider.len(),
            ambiguous = ambiguous.len(),
            "built {} provider collection",
            N::KIND
        );

        Self {
            providers,
            name_to_provider,
            ambiguous,
            unknown,
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn providers(&self) -> impl Iterator<Item = &dyn PluginProvider<N, Plugin = T>> {
        self.providers.iter().map(|provider| provider.as_ref())
    }

    /// Every info of every provider, including ambiguous ones.
    pub fn infos(&self) -> BTreeSet<PluginInfo<N>> {
        self.providers
            .iter()
            .flat_map(|provider| provider.infos().iter().cloned())
            .collect()
    }

    pub fn ambiguous_names(&self) -> &BTreeSet<N> {
        &self.ambiguous
    }

    /// The provider serving `name`; `None` for unknown and ambiguous names.
    pub fn provider_for(&self, name: &N) -> Option<&dyn PluginProvider<N, Plugin = T>> {
        self.name_to_provider
            .get(name)
            .map(|index| self.providers[*index].as_ref())
    }

    /// Creates the selected plugin.
    ///
    /// Nested names in the selector text are looked up in the whole
    /// collection, so one provider's plugin may take another's as a parameter.
    pub fn get(&self, selector: &PluginSelector<N>, context: &dyn EnvironmentContext) -> Result<T> {
        self.owner(selector.name())?;
        let values = selector.evaluate_text(
            &mut |name, values, context| self.get_with_values(name, values, context),
            context,
        )?;
        self.get_with_values(selector.name(), values, context)
    }

    pub fn get_with_values(
        &self,
        name: &N,
        values: Vec<SelectorValue<T>>,
        context: &dyn EnvironmentContext,
    ) -> Result<T> {
        self.owner(name)?.plugin(name, values, context)
    }

    fn owner(&self, name: &N) -> Result<&dyn PluginProvider<N, Plugin = T>> {
        self.provider_for(name).ok_or_else(|| (self.unknown)(name))
    }
}

impl<N: Name, T> fmt::Debug for ProviderCollection<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCollection")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("names", &self.name_to_provider.keys().collect::<Vec<_>>())
            .field("ambiguous", &self.ambiguous)
            .finish()
    }
}
