//! Catalog files written into a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding catalog files.
///
/// # Example
///
/// ```rust,no_run
/// use plugin_test_utils::catalog::TestCatalog;
///
/// let catalog = TestCatalog::new();
/// let path = catalog.write("catalog.toml", "[[providers]]\n");
/// assert!(path.exists());
/// ```
pub struct TestCatalog {
    temp_dir: TempDir,
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCatalog {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap_or_else(|e| panic!("TestCatalog::new: {e}")),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` to `file_name` and returns the full path.
    pub fn write(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(file_name);
        fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("TestCatalog::write({}): {e}", path.display()));
        path
    }

    /// Writes [`SAMPLE_TOML`] as `catalog.toml`.
    pub fn sample(&self) -> PathBuf {
        self.write("catalog.toml", SAMPLE_TOML)
    }
}

/// Two providers that both publish `dup`, one with aliases, and an environment.
pub const SAMPLE_TOML: &str = r#"
[[providers]]
name = "core"
url = "https://example.com/providers/core"
infos = "https://example.com/core/collection collection, https://example.com/core/number-to-boolean number-to-boolean, https://example.com/core/dup dup"

[[providers]]
name = "dates"
url = "https://example.com/providers/dates"
infos = "https://example.com/dates/string-to-local-date string-to-local-date, https://example.com/dates/dup dup, https://example.com/dates/hidden hidden"
aliases = "dup, to-date string-to-local-date"

[environment]
locale = "en-AU"
"#;
