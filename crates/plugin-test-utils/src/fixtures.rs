//! Parse helpers for test setup.
//!
//! Each helper panics with the offending text, so a typo in a fixture shows
//! up as a readable test failure instead of an `unwrap` on `Err`.

use plugin_core::{
    AbsoluteUrl, EnvironmentValueName, MapEnvironmentContext, PluginAliasSet, PluginInfo,
    PluginInfoSet, PluginName, PluginSelector,
};
use serde_json::Value;

pub fn name(text: &str) -> PluginName {
    PluginName::new(text).unwrap_or_else(|e| panic!("name({text:?}): {e}"))
}

pub fn url(text: &str) -> AbsoluteUrl {
    AbsoluteUrl::parse(text).unwrap_or_else(|e| panic!("url({text:?}): {e}"))
}

pub fn info(url_text: &str, name_text: &str) -> PluginInfo<PluginName> {
    PluginInfo::new(url(url_text), name(name_text))
}

pub fn infos(text: &str) -> PluginInfoSet<PluginName> {
    PluginInfoSet::parse(text).unwrap_or_else(|e| panic!("infos({text:?}): {e}"))
}

pub fn aliases(text: &str) -> PluginAliasSet<PluginName> {
    PluginAliasSet::parse(text).unwrap_or_else(|e| panic!("aliases({text:?}): {e}"))
}

pub fn selector(text: &str) -> PluginSelector<PluginName> {
    PluginSelector::parse(text).unwrap_or_else(|e| panic!("selector({text:?}): {e}"))
}

/// An environment holding the given values.
///
/// # Panics
/// Panics on an invalid environment value name.
pub fn environment<'a>(
    values: impl IntoIterator<Item = (&'a str, Value)>,
) -> MapEnvironmentContext {
    values
        .into_iter()
        .map(|(key, value)| {
            let key = EnvironmentValueName::new(key)
                .unwrap_or_else(|e| panic!("environment({key:?}): {e}"));
            (key, value)
        })
        .collect()
}

/// Infos `https://example.com/<provider>/<name> <name>` for each name.
pub fn published(provider: &str, names: &[&str]) -> PluginInfoSet<PluginName> {
    PluginInfoSet::new(
        names
            .iter()
            .map(|n| info(&format!("https://example.com/{provider}/{n}"), n)),
    )
    .unwrap_or_else(|e| panic!("published({provider:?}, {names:?}): {e}"))
}
