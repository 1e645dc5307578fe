//! Error types for plugin-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from plugin-core
    #[error(transparent)]
    Core(#[from] plugin_core::Error),

    /// Error from plugin-catalog
    #[error(transparent)]
    Catalog(#[from] plugin_catalog::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
