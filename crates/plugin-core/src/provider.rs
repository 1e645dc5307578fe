//! Plugin providers and the alias layer that can wrap any of them.

use tracing::debug;

use crate::absolute_url::AbsoluteUrl;
use crate::alias_set::PluginAliasSet;
use crate::environment::EnvironmentContext;
use crate::error::{Error, Result};
use crate::info_set::PluginInfoSet;
use crate::mapper::UnknownName;
use crate::name::{Name, ProviderName};
use crate::selector::{PluginSelector, SelectorValue};

/// A source of plugins addressable by name.
///
/// The trait is object safe so that providers of one kind can be collected
/// behind `Box<dyn PluginProvider<N, Plugin = T>>`.
pub trait PluginProvider<N: Name> {
    /// What the provider hands out for a name and its parameter values.
    type Plugin;

    fn name(&self) -> &ProviderName;

    fn url(&self) -> &AbsoluteUrl;

    /// Every plugin this provider can create.
    fn infos(&self) -> &PluginInfoSet<N>;

    /// Creates the plugin `name` from already materialised parameters.
    fn plugin(
        &self,
        name: &N,
        values: Vec<SelectorValue<Self::Plugin>>,
        context: &dyn EnvironmentContext,
    ) -> Result<Self::Plugin>;

    /// Evaluates the selector text, resolving nested names through this
    /// provider, then creates the selected plugin.
    fn plugin_selector(
        &self,
        selector: &PluginSelector<N>,
        context: &dyn EnvironmentContext,
    ) -> Result<Self::Plugin> {
        let values =
            selector.evaluate_text(&mut |name, values, context| self.plugin(name, values, context), context)?;
        self.plugin(selector.name(), values, context)
    }
}

/// A provider viewed through an alias set.
///
/// Only the infos produced by [`PluginAliasSet::merge`] are visible; lookups
/// translate aliases to the wrapped provider's names before delegating.
/// Names outside the merged infos are reported through `unknown`.
pub struct AliasesProvider<N: Name, P> {
    aliases: PluginAliasSet<N>,
    infos: PluginInfoSet<N>,
    provider: P,
    unknown: UnknownName<N>,
}

impl<N, P> AliasesProvider<N, P>
where
    N: Name,
    P: PluginProvider<N>,
{
    pub fn new(aliases: PluginAliasSet<N>, provider: P, unknown: UnknownName<N>) -> Result<Self> {
        let infos = aliases.merge(provider.infos())?;
        debug!(
            provider = %provider.name(),
            published = provider.infos().len(),
            visible = infos.len(),
            "wrapped provider with aliases"
        );
        Ok(Self {
            aliases,
            infos,
            provider,
            unknown,
        })
    }

    pub fn aliases(&self) -> &PluginAliasSet<N> {
        &self.aliases
    }

    pub fn inner(&self) -> &P {
        &self.provider
    }

    /// The wrapped provider's selector for a visible name.
    fn target(&self, name: &N) -> Result<PluginSelector<N>> {
        let unknown = || (self.unknown)(name);
        if !self.infos.contains_name(name) {
            return Err(unknown());
        }
        self.aliases
            .resolve_selector(&PluginSelector::new(name.clone(), ""))?
            .ok_or_else(unknown)
    }
}

impl<N, P> PluginProvider<N> for AliasesProvider<N, P>
where
    N: Name,
    P: PluginProvider<N>,
{
    type Plugin = P::Plugin;

    fn name(&self) -> &ProviderName {
        self.provider.name()
    }

    fn url(&self) -> &AbsoluteUrl {
        self.provider.url()
    }

    fn infos(&self) -> &PluginInfoSet<N> {
        &self.infos
    }

    fn plugin(
        &self,
        name: &N,
        values: Vec<SelectorValue<Self::Plugin>>,
        context: &dyn EnvironmentContext,
    ) -> Result<Self::Plugin> {
        let target = self.target(name)?;
        if target.text().is_empty() {
            return self.provider.plugin(target.name(), values, context);
        }
        if !values.is_empty() {
            return Err(Error::InvalidAlias {
                name: name.to_string(),
                reason: format!("alias already has parameters {}", target.text()),
            });
        }

        // Parameters declared by the alias name plugins of the wrapped provider.
        let declared = target.evaluate_text(
            &mut |name, values, context| self.provider.plugin(name, values, context),
            context,
        )?;
        self.provider.plugin(target.name(), declared, context)
    }
}
