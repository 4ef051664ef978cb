use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A specialized [`Result`](std::result::Result) for scaffolding operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors that can occur while scaffolding a feature file.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// The style configuration could not be located, read, or deserialized.
    #[error("Style config error ({}): {source}", path.display())]
    Config { path: PathBuf, source: config::ConfigError },

    /// An override glob in the style configuration is not a valid pattern.
    #[error("Invalid override pattern '{pattern}': {source}")]
    InvalidPattern { pattern: String, source: glob::PatternError },

    /// No formatter is registered for the destination file type.
    #[error("No formatter for file: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    /// The feature document could not be serialized.
    #[error("Serialization error: {source}")]
    Serialize { source: serde_yaml::Error },

    /// Filesystem failure while reading or writing.
    #[error("IO error ({}): {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    /// The project root could not be derived from the crate location.
    #[error("Layout error: {message}")]
    Layout { message: Cow<'static, str> },

    /// The logger rejected its configuration or could not be installed.
    #[error("Logger error: {message}")]
    Logger { message: Cow<'static, str> },
}

impl ScaffoldError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io { path: path.as_ref().to_path_buf(), source }
    }

    pub(crate) fn config(path: impl AsRef<Path>, source: config::ConfigError) -> Self {
        Self::Config { path: path.as_ref().to_path_buf(), source }
    }
}
