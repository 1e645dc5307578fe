//! Format-agnostic catalog loading and saving

use std::fs;
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

/// Largest catalog file accepted by [`ConfigStore::load`].
pub const MAX_CATALOG_SIZE: u64 = 1024 * 1024;

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
#[derive(Debug, Clone, Copy)]
pub struct ConfigStore {
    max_size: u64,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            max_size: MAX_CATALOG_SIZE,
        }
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store accepting files up to `max_size` bytes.
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let size = fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
        if size > self.max_size {
            return Err(Error::CatalogTooLarge {
                path: path.to_path_buf(),
                size,
                max: self.max_size,
            });
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };
        match extension(path).as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))
            }
            other => Err(Error::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let serialize_error = |format: &str, message: String| Error::ConfigSerialize {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };
        let content = match extension(path).as_str() {
            "toml" => toml::to_string_pretty(value)
                .map_err(|e| serialize_error("TOML", e.to_string()))?,
            "json" => serde_json::to_string_pretty(value)
                .map_err(|e| serialize_error("JSON", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::to_string(value).map_err(|e| serialize_error("YAML", e.to_string()))?
            }
            other => {
                return Err(Error::UnsupportedFormat {
                    extension: other.to_string(),
                });
            }
        };

        fs::write(path, content).map_err(|e| Error::io(path, e))
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
