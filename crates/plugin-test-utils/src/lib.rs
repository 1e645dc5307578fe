//! Shared test utilities for the plugin workspace.
//!
//! This crate is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`fixtures`]: parse helpers that panic with the offending text
//! - [`provider`]: [`RecordingProvider`](provider::RecordingProvider), a provider that records every request
//! - [`catalog`]: [`TestCatalog`](catalog::TestCatalog), catalog files in a temporary directory

pub mod catalog;
pub mod fixtures;
pub mod provider;
