//! Error types for plugin-catalog

use std::path::PathBuf;

/// Result type for plugin-catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or using a catalog
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Plugin error: {0}")]
    Core(#[from] plugin_core::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} catalog at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} catalog for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported catalog format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Catalog file too large: {path} is {size} bytes (max {max})")]
    CatalogTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Duplicate provider {name} in catalog")]
    DuplicateProvider { name: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
