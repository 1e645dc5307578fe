//! Alias sets: a validated list of alias declarations and its reconciliation
//! against the infos a provider actually publishes.
//!
//! Text form, declarations separated by commas:
//!
//! ```text
//! name
//! alias target-name
//! alias target-name (parameters) https://example.com/alias
//! ```
//!
//! A url may itself contain commas, so a declaration ending in a url is
//! written with a space before the following separator.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::alias::PluginAlias;
use crate::error::{Error, Result};
use crate::info::PluginInfo;
use crate::info_set::PluginInfoSet;
use crate::name::Name;
use crate::parser::PluginExpressionParser;
use crate::selector::PluginSelector;

/// A consistent set of [`PluginAlias`] declarations.
///
/// All lookup tables are derived from `aliases` at construction, and every
/// operation producing a new set goes through the same validation.
#[derive(Debug, Clone)]
pub struct PluginAliasSet<N: Name> {
    aliases: BTreeSet<PluginAlias<N>>,
    alias_to_selector: BTreeMap<N, PluginSelector<N>>,
    alias_or_name_to_name: BTreeMap<N, N>,
    names_not_aliases: BTreeSet<N>,
    /// Aliases that rename a published plugin instead of declaring their own url.
    aliases_without_infos: BTreeSet<N>,
    /// Infos declared by aliases with a url.
    alias_infos: PluginInfoSet<N>,
}

impl<N: Name> Default for PluginAliasSet<N> {
    fn default() -> Self {
        Self {
            aliases: BTreeSet::new(),
            alias_to_selector: BTreeMap::new(),
            alias_or_name_to_name: BTreeMap::new(),
            names_not_aliases: BTreeSet::new(),
            aliases_without_infos: BTreeSet::new(),
            alias_infos: PluginInfoSet::empty(),
        }
    }
}

impl<N: Name> PluginAliasSet<N> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates the declarations and builds the lookup tables.
    ///
    /// Fails when a name or alias is declared twice, a url is declared twice,
    /// two url-less aliases target the same name, or a url-less alias targets
    /// a name that is also declared plain.
    pub fn new(aliases: impl IntoIterator<Item = PluginAlias<N>>) -> Result<Self> {
        let mut declared = BTreeSet::new();
        let mut alias_to_selector = BTreeMap::new();
        let mut alias_or_name_to_name = BTreeMap::new();
        let mut names_not_aliases = BTreeSet::new();
        let mut aliases_without_infos = BTreeSet::new();
        let mut target_to_alias: BTreeMap<N, N> = BTreeMap::new();
        let mut urls = BTreeSet::new();
        let mut alias_infos = Vec::new();
        let mut all = BTreeSet::new();

        for alias in aliases {
            let name = alias.name().clone();
            if !declared.insert(name.clone()) {
                return Err(Error::DuplicateName {
                    kind: N::KIND,
                    name: name.to_string(),
                });
            }

            match alias.selector() {
                None => {
                    alias_or_name_to_name.insert(name.clone(), name.clone());
                    names_not_aliases.insert(name);
                }
                Some(selector) => {
                    let target = selector.name().clone();
                    match alias.url() {
                        Some(url) => {
                            if !urls.insert(url.clone()) {
                                return Err(Error::DuplicateUrl {
                                    url: url.to_string(),
                                });
                            }
                            alias_infos.push(PluginInfo::new(url.clone(), name.clone()));
                        }
                        None => {
                            if let Some(first) = target_to_alias.insert(target.clone(), name.clone())
                            {
                                return Err(Error::DuplicateAliasTarget {
                                    target: target.to_string(),
                                    first: first.to_string(),
                                    second: name.to_string(),
                                });
                            }
                            aliases_without_infos.insert(name.clone());
                        }
                    }
                    alias_or_name_to_name.insert(name.clone(), target);
                    alias_to_selector.insert(name, selector.clone());
                }
            }
            all.insert(alias);
        }

        // A url-less alias and a plain declaration of its target would both
        // claim the same published plugin.
        for (target, alias) in &target_to_alias {
            if names_not_aliases.contains(target) {
                return Err(Error::AliasConflict {
                    alias: alias.to_string(),
                    target: target.to_string(),
                });
            }
        }

        debug!(
            names = names_not_aliases.len(),
            aliases = alias_to_selector.len(),
            "built {} alias set",
            N::KIND
        );

        Ok(Self {
            aliases: all,
            alias_to_selector,
            alias_or_name_to_name,
            names_not_aliases,
            aliases_without_infos,
            alias_infos: PluginInfoSet::new(alias_infos)?,
        })
    }

    /// Parses comma separated declarations; empty text is the empty set.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = PluginExpressionParser::new(text);
        let mut aliases = Vec::new();

        parser.spaces();
        while !parser.is_empty() {
            aliases.push(PluginAlias::parse_with(&mut parser)?);
            parser.spaces();
            if parser.is_empty() {
                break;
            }
            if !parser.parameter_separator() {
                return Err(parser.invalid_character());
            }
            parser.spaces();
            if parser.is_empty() {
                return Err(parser.end_of_text(N::KIND));
            }
        }

        Self::new(aliases)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginAlias<N>> {
        self.aliases.iter()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// The target name of an alias, or the name itself for a plain declaration.
    pub fn alias_or_name(&self, name: &N) -> Option<&N> {
        self.alias_or_name_to_name.get(name)
    }

    pub fn alias_selector(&self, alias: &N) -> Option<&PluginSelector<N>> {
        self.alias_to_selector.get(alias)
    }

    pub fn contains_alias_or_name(&self, name: &N) -> bool {
        self.alias_or_name_to_name.contains_key(name)
    }

    pub fn names_not_aliases(&self) -> &BTreeSet<N> {
        &self.names_not_aliases
    }

    pub fn aliases_without_infos(&self) -> &BTreeSet<N> {
        &self.aliases_without_infos
    }

    pub fn alias_infos(&self) -> &PluginInfoSet<N> {
        &self.alias_infos
    }

    /// Translates a caller's selector into the selector to ask the provider for.
    ///
    /// Plain names pass through. An alias becomes its declared selector,
    /// taking the caller's text only when the alias declares none. `None`
    /// when the name is not declared here.
    pub fn resolve_selector(&self, selector: &PluginSelector<N>) -> Result<Option<PluginSelector<N>>> {
        if self.names_not_aliases.contains(selector.name()) {
            return Ok(Some(selector.clone()));
        }
        let Some(aliased) = self.alias_to_selector.get(selector.name()) else {
            return Ok(None);
        };
        if aliased.text().is_empty() {
            return Ok(Some(aliased.set_text(selector.text())));
        }
        if selector.text().is_empty() {
            return Ok(Some(aliased.clone()));
        }
        Err(Error::InvalidAlias {
            name: selector.name().to_string(),
            reason: format!("alias already has parameters {}", aliased.text()),
        })
    }

    /// Views `provider_infos` through the declarations.
    ///
    /// Plain names keep their infos, aliases replace the info of their
    /// target with a renamed copy (or with their own url), and everything
    /// the declarations do not mention is dropped.
    pub fn merge(&self, provider_infos: &PluginInfoSet<N>) -> Result<PluginInfoSet<N>> {
        let mut infos =
            provider_infos.delete_if(|info| !self.names_not_aliases.contains(info.name()));

        for alias in &self.aliases_without_infos {
            let Some(selector) = self.alias_to_selector.get(alias) else {
                continue;
            };
            match provider_infos.get_by_name(selector.name()) {
                Some(provided) => {
                    infos = infos.replace_or_concat(provided.set_name(alias.clone()))?;
                }
                None => debug!(%alias, target = %selector.name(), "alias target not provided"),
            }
        }

        for info in &self.alias_infos {
            let Some(selector) = self.alias_to_selector.get(info.name()) else {
                continue;
            };
            if provider_infos.contains_name(selector.name()) {
                infos = infos.replace_or_concat(info.clone())?;
            } else {
                debug!(alias = %info.name(), target = %selector.name(), "alias target not provided");
            }
        }

        Ok(infos)
    }

    /// A new set from `aliases`, validated like [`PluginAliasSet::new`].
    pub fn set_elements(&self, aliases: impl IntoIterator<Item = PluginAlias<N>>) -> Result<Self> {
        let aliases: BTreeSet<_> = aliases.into_iter().collect();
        if aliases == self.aliases {
            return Ok(self.clone());
        }
        Self::new(aliases)
    }

    pub fn concat(&self, alias: PluginAlias<N>) -> Result<Self> {
        self.set_elements(self.aliases.iter().cloned().chain(std::iter::once(alias)))
    }

    pub fn delete(&self, alias: &PluginAlias<N>) -> Result<Self> {
        self.filter(|a| a != alias)
    }

    /// Keeps the declarations accepted by `predicate`.
    pub fn filter(&self, mut predicate: impl FnMut(&PluginAlias<N>) -> bool) -> Result<Self> {
        self.set_elements(self.aliases.iter().filter(|a| predicate(*a)).cloned())
    }

    /// Declarations named before `to`.
    pub fn head_set(&self, to: &N) -> Result<Self> {
        self.filter(|a| a.name() < to)
    }

    /// Declarations named `from` or later.
    pub fn tail_set(&self, from: &N) -> Result<Self> {
        self.filter(|a| a.name() >= from)
    }

    /// Declarations named from `from` up to, excluding, `to`.
    pub fn sub_set(&self, from: &N, to: &N) -> Result<Self> {
        self.filter(|a| a.name() >= from && a.name() < to)
    }

    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl<N: Name> PartialEq for PluginAliasSet<N> {
    fn eq(&self, other: &Self) -> bool {
        self.aliases == other.aliases
    }
}

impl<N: Name> Eq for PluginAliasSet<N> {}

impl<N: Name> Hash for PluginAliasSet<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.aliases.hash(state);
    }
}

impl<N: Name> fmt::Display for PluginAliasSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous_url = false;
        for (i, alias) in self.aliases.iter().enumerate() {
            if i > 0 {
                f.write_str(if previous_url { " , " } else { ", " })?;
            }
            write!(f, "{alias}")?;
            previous_url = alias.url().is_some();
        }
        Ok(())
    }
}

impl<N: Name> FromStr for PluginAliasSet<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<N: Name> Serialize for PluginAliasSet<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, N: Name> Deserialize<'de> for PluginAliasSet<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
