use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// Directory, relative to the project root, holding feature definition files.
pub const FEATURES_DIR: &str = "feature-group-definitions";
/// Style configuration file, relative to the project root.
pub const STYLE_CONFIG: &str = ".prettierrc";
/// Extension of feature definition files.
pub const FEATURE_EXTENSION: &str = "yml";

/// Returns the root directory of the project.
///
/// The root is the parent of this crate's manifest directory, baked in at
/// compile time, so it does not depend on the caller's working directory.
///
/// # Errors
/// Returns an error if the manifest directory does not have a parent.
pub fn get_project_root() -> Result<PathBuf> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().map(Path::to_path_buf).ok_or_else(|| ScaffoldError::Layout {
        message: format!("Could not find project root from {}", manifest_dir.display()).into(),
    })
}

/// Well-known locations inside a project checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Creates a layout anchored at an explicit project root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a layout anchored at the root this program was built from.
    ///
    /// # Errors
    /// See [`get_project_root`].
    pub fn discover() -> Result<Self> {
        get_project_root().map(Self::new)
    }

    #[must_use]
    pub fn features_dir(&self) -> PathBuf {
        self.root.join(FEATURES_DIR)
    }

    #[must_use]
    pub fn style_config(&self) -> PathBuf {
        self.root.join(STYLE_CONFIG)
    }

    /// Maps a feature identifier to its definition file.
    ///
    /// The identifier is used verbatim as the file stem.
    #[must_use]
    pub fn feature_path(&self, identifier: &str) -> PathBuf {
        self.features_dir().join(format!("{identifier}.{FEATURE_EXTENSION}"))
    }
}
