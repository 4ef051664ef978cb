//! # Style Configuration
//!
//! Loads the project's `.prettierrc` and resolves the formatting options that
//! apply to a given destination file.
//!
//! The file is a JSON or YAML mapping. Base options sit at the top level and an
//! ordered `overrides` list layers extra options onto files matching a glob:
//!
//! ```yaml
//! tabWidth: 2
//! overrides:
//!   - files: "*.yml"
//!     options:
//!       singleQuote: true
//! ```

use crate::error::{Result, ScaffoldError};
use config::{Config, File, FileFormat};
use glob::{MatchOptions, Pattern};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_TAB_WIDTH: usize = 2;

/// Line terminator written at the end of every output line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    #[default]
    Lf,
    Crlf,
    Cr,
    /// Keeps existing endings; freshly generated text has none, so this is `\n`.
    Auto,
}

impl EndOfLine {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf | Self::Auto => "\n",
            Self::Crlf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

/// Fully resolved formatting options for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOptions {
    pub tab_width: usize,
    pub single_quote: bool,
    pub bracket_spacing: bool,
    pub end_of_line: EndOfLine,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            single_quote: false,
            bracket_spacing: true,
            end_of_line: EndOfLine::Lf,
        }
    }
}

impl StyleOptions {
    fn apply(&mut self, patch: &OptionsPatch) {
        if let Some(tab_width) = patch.tab_width {
            self.tab_width = tab_width;
        }
        if let Some(single_quote) = patch.single_quote {
            self.single_quote = single_quote;
        }
        if let Some(bracket_spacing) = patch.bracket_spacing {
            self.bracket_spacing = bracket_spacing;
        }
        if let Some(end_of_line) = patch.end_of_line {
            self.end_of_line = end_of_line;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsPatch {
    tab_width: Option<usize>,
    single_quote: Option<bool>,
    bracket_spacing: Option<bool>,
    end_of_line: Option<EndOfLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    fn compile(&self) -> Result<Vec<Pattern>> {
        let raw = match self {
            Self::One(pattern) => std::slice::from_ref(pattern),
            Self::Many(patterns) => patterns.as_slice(),
        };
        raw.iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ScaffoldError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOverride {
    files: Patterns,
    #[serde(default)]
    exclude_files: Option<Patterns>,
    #[serde(default)]
    options: OptionsPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStyle {
    tab_width: Option<usize>,
    single_quote: Option<bool>,
    bracket_spacing: Option<bool>,
    end_of_line: Option<EndOfLine>,
    #[serde(default)]
    overrides: Vec<RawOverride>,
}

#[derive(Debug, Clone)]
struct Override {
    files: Vec<Pattern>,
    exclude_files: Vec<Pattern>,
    options: OptionsPatch,
}

impl Override {
    fn matches(&self, relative: &Path) -> bool {
        matches_any(&self.files, relative) && !matches_any(&self.exclude_files, relative)
    }
}

/// A loaded style configuration, ready to resolve options per file.
#[derive(Debug, Clone)]
pub struct StyleConfig {
    root: PathBuf,
    base: OptionsPatch,
    overrides: Vec<Override>,
}

impl StyleConfig {
    /// Loads the style configuration file at `path`.
    ///
    /// Override patterns are resolved relative to the directory holding `path`.
    ///
    /// # Errors
    /// Returns [`ScaffoldError::Config`] if the file is missing or malformed, and
    /// [`ScaffoldError::InvalidPattern`] if an override glob cannot be compiled.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading style config from {}", path.display());

        let raw = Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml).required(true))
            .build()
            .and_then(|settings| settings.try_deserialize::<RawStyle>())
            .map_err(|e| ScaffoldError::config(path, e))?;

        let base = OptionsPatch {
            tab_width: raw.tab_width,
            single_quote: raw.single_quote,
            bracket_spacing: raw.bracket_spacing,
            end_of_line: raw.end_of_line,
        };
        validate_patch(path, &base)?;

        let overrides = raw
            .overrides
            .iter()
            .map(|o| {
                validate_patch(path, &o.options)?;
                Ok(Override {
                    files: o.files.compile()?,
                    exclude_files: o
                        .exclude_files
                        .as_ref()
                        .map_or_else(|| Ok(Vec::new()), Patterns::compile)?,
                    options: o.options,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(Self { root, base, overrides })
    }

    /// Resolves the options for `file`, layering every matching override in order.
    #[must_use]
    pub fn resolve(&self, file: &Path) -> StyleOptions {
        let relative = file.strip_prefix(&self.root).unwrap_or(file);

        let mut options = StyleOptions::default();
        options.apply(&self.base);
        for o in self.overrides.iter().filter(|o| o.matches(relative)) {
            options.apply(&o.options);
        }

        debug!(?options, file = %file.display(), "Resolved style options");
        options
    }
}

fn validate_patch(path: &Path, patch: &OptionsPatch) -> Result<()> {
    if patch.tab_width == Some(0) {
        return Err(ScaffoldError::config(
            path,
            config::ConfigError::Message("tabWidth must be greater than zero".to_owned()),
        ));
    }
    Ok(())
}

/// Patterns without a separator match the file name, others the relative path.
fn matches_any(patterns: &[Pattern], relative: &Path) -> bool {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let file_name = relative.file_name().map(Path::new);

    patterns.iter().any(|pattern| {
        if pattern.as_str().contains('/') {
            pattern.matches_path_with(relative, options)
        } else {
            file_name.is_some_and(|name| pattern.matches_path_with(name, options))
        }
    })
}
