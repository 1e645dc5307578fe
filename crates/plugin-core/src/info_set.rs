//! Sets of plugin infos, unique by both url and name.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::absolute_url::AbsoluteUrl;
use crate::error::{Error, Result};
use crate::info::PluginInfo;
use crate::name::Name;
use crate::parser::PluginExpressionParser;

/// Separator written between infos.
pub const INFO_SEPARATOR: &str = ", ";

/// An immutable set of [`PluginInfo`] ordered by name.
///
/// No two infos share a url or a name; every operation that could break
/// this returns an error instead of a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginInfoSet<N: Name> {
    infos: BTreeSet<PluginInfo<N>>,
}

impl<N: Name> Default for PluginInfoSet<N> {
    fn default() -> Self {
        Self {
            infos: BTreeSet::new(),
        }
    }
}

impl<N: Name> PluginInfoSet<N> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(infos: impl IntoIterator<Item = PluginInfo<N>>) -> Result<Self> {
        let mut names = BTreeSet::new();
        let mut urls = BTreeSet::new();
        let mut set = BTreeSet::new();

        for info in infos {
            if !urls.insert(info.url().clone()) {
                return Err(Error::DuplicateUrl {
                    url: info.url().to_string(),
                });
            }
            if !names.insert(info.name().clone()) {
                return Err(Error::DuplicateName {
                    kind: N::KIND,
                    name: info.name().to_string(),
                });
            }
            set.insert(info);
        }

        Ok(Self { infos: set })
    }

    /// Parses `URL SPACE Name` entries separated by commas.
    ///
    /// Whitespace around entries is ignored; empty text is the empty set.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = PluginExpressionParser::new(text);
        let mut infos = Vec::new();

        parser.spaces();
        while !parser.is_empty() {
            infos.push(PluginInfo::parse_with(&mut parser)?);
            parser.spaces();
            if parser.is_empty() {
                break;
            }
            if !parser.parameter_separator() {
                return Err(parser.invalid_character());
            }
            parser.spaces();
            if parser.is_empty() {
                return Err(parser.end_of_text("info"));
            }
        }

        Self::new(infos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginInfo<N>> {
        self.infos.iter()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn contains(&self, info: &PluginInfo<N>) -> bool {
        self.infos.contains(info)
    }

    pub fn names(&self) -> BTreeSet<N> {
        self.infos.iter().map(|i| i.name().clone()).collect()
    }

    pub fn urls(&self) -> BTreeSet<AbsoluteUrl> {
        self.infos.iter().map(|i| i.url().clone()).collect()
    }

    pub fn get_by_name(&self, name: &N) -> Option<&PluginInfo<N>> {
        self.infos.iter().find(|i| i.name() == name)
    }

    pub fn get_by_url(&self, url: &AbsoluteUrl) -> Option<&PluginInfo<N>> {
        self.infos.iter().find(|i| i.url() == url)
    }

    pub fn contains_name(&self, name: &N) -> bool {
        self.get_by_name(name).is_some()
    }

    pub fn contains_url(&self, url: &AbsoluteUrl) -> bool {
        self.get_by_url(url).is_some()
    }

    /// Keeps the infos whose url also appears in `other`.
    pub fn filter(&self, other: &Self) -> Self {
        let urls = other.urls();
        self.delete_if(|info| !urls.contains(info.url()))
    }

    /// Renames every info that shares a url with an info in `renames`.
    ///
    /// Renames whose url is absent here are ignored.
    pub fn rename_if_present(&self, renames: &Self) -> Result<Self> {
        Self::new(self.infos.iter().map(|info| match renames.get_by_url(info.url()) {
            Some(rename) => info.set_name(rename.name().clone()),
            None => info.clone(),
        }))
    }

    /// Adds one info.
    pub fn concat(&self, info: PluginInfo<N>) -> Result<Self> {
        if self.contains(&info) {
            return Ok(self.clone());
        }
        Self::new(self.infos.iter().cloned().chain(std::iter::once(info)))
    }

    /// Replaces `old` with `new`; a missing `old` leaves the set unchanged.
    pub fn replace(&self, old: &PluginInfo<N>, new: PluginInfo<N>) -> Result<Self> {
        if !self.contains(old) || old == &new {
            return Ok(self.clone());
        }
        Self::new(
            self.infos
                .iter()
                .map(|info| if info == old { new.clone() } else { info.clone() }),
        )
    }

    /// Replaces the info sharing the url of `info`, or adds `info` when there is none.
    pub fn replace_or_concat(&self, info: PluginInfo<N>) -> Result<Self> {
        match self.get_by_url(info.url()) {
            Some(existing) => self.replace(existing, info),
            None => self.concat(info),
        }
    }

    pub fn delete(&self, info: &PluginInfo<N>) -> Self {
        self.delete_if(|i| i == info)
    }

    pub fn delete_if(&self, mut predicate: impl FnMut(&PluginInfo<N>) -> bool) -> Self {
        Self {
            infos: self
                .infos
                .iter()
                .filter(|info| !predicate(*info))
                .cloned()
                .collect(),
        }
    }

    /// Serialized form, e.g. `https://example.com/a a, https://example.com/b b`.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl<N: Name> fmt::Display for PluginInfoSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, info) in self.infos.iter().enumerate() {
            if i > 0 {
                f.write_str(INFO_SEPARATOR)?;
            }
            write!(f, "{info}")?;
        }
        Ok(())
    }
}

impl<N: Name> FromStr for PluginInfoSet<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<'a, N: Name> IntoIterator for &'a PluginInfoSet<N> {
    type Item = &'a PluginInfo<N>;
    type IntoIter = std::collections::btree_set::Iter<'a, PluginInfo<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.infos.iter()
    }
}

impl<N: Name> Serialize for PluginInfoSet<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, N: Name> Deserialize<'de> for PluginInfoSet<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
