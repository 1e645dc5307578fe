//! Plugin naming, selector expressions and alias resolution
//!
//! Plugins are published by providers as infos (`url name`), addressed by
//! selectors (`name (parameters)`), and renamed or hidden through alias sets
//! before several providers are joined into one collection.

pub mod absolute_url;
pub mod alias;
pub mod alias_set;
pub mod collection;
pub mod cursor;
pub mod environment;
pub mod error;
pub mod helper;
pub mod info;
pub mod info_set;
pub mod mapper;
pub mod name;
pub mod parser;
pub mod provider;
pub mod selector;

pub use absolute_url::AbsoluteUrl;
pub use alias::PluginAlias;
pub use alias_set::PluginAliasSet;
pub use collection::{BoxedProvider, ProviderCollection};
pub use environment::{EnvironmentContext, MapEnvironmentContext};
pub use error::{Error, Result};
pub use helper::{PluginHelper, unknown_name};
pub use info::PluginInfo;
pub use info_set::PluginInfoSet;
pub use mapper::{
    FilteredProviderMapper, MergedProviderMapper, NameMapper, ProviderMapper,
    RenamingProviderMapper, UnknownName,
};
pub use name::{EnvironmentValueName, Name, NameRules, PluginName, ProviderName};
pub use parser::PluginExpressionParser;
pub use provider::{AliasesProvider, PluginProvider};
pub use selector::{PluginSelector, SelectorParameter, SelectorValue};
