//! Declarative plugin provider catalogs
//!
//! A catalog file lists providers with their infos and optional alias text,
//! plus environment values for `$name` references. Loading one yields a
//! [`plugin_core::ProviderCollection`] of [`PluginInstance`]s.

pub mod catalog;
pub mod config;
pub mod error;
pub mod provider;
pub mod schema;

pub use catalog::Catalog;
pub use config::{ConfigStore, MAX_CATALOG_SIZE};
pub use error::{Error, Result};
pub use provider::{CatalogProvider, PluginInstance};
pub use schema::{CatalogFile, ProviderEntry};
