use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::diff::split_lines;
use crate::error::{SpliceError, SpliceResult};

/// On-disk form of a patch recipe
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeFile {
    /// File to patch
    pub target: Option<PathBuf>,

    /// Substring identifying the first line of the function
    pub marker: Option<String>,

    /// Inline replacement text
    pub replacement: Option<String>,

    /// File holding the replacement text
    pub replacement_file: Option<PathBuf>,

    /// Drop one trailing newline from the replacement text
    #[serde(default = "default_trim")]
    pub trim_trailing_newline: bool,
}

fn default_trim() -> bool {
    true
}

impl RecipeFile {
    /// Parse a recipe from TOML text
    pub fn from_toml(content: &str, path: impl Into<PathBuf>) -> SpliceResult<Self> {
        toml::from_str(content).map_err(|e| SpliceError::recipe_parse(e.to_string(), path))
    }

    /// Read and parse a recipe file
    pub fn load(path: &Path) -> SpliceResult<Self> {
        debug!("Loading recipe: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| SpliceError::io_error(e, Some(path)))?;
        Self::from_toml(&content, path)
    }

    /// Resolve relative paths against `base`
    pub fn rebase(mut self, base: &Path) -> Self {
        self.target = self.target.map(|p| resolve(base, p));
        self.replacement_file = self.replacement_file.map(|p| resolve(base, p));
        self
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}

/// Where the replacement text comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementSource {
    Inline(String),
    File(PathBuf),
}

/// A fully specified patch: one marker, one target, one replacement block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchRecipe {
    pub target: PathBuf,
    pub marker: String,
    pub replacement: ReplacementSource,
    pub trim_trailing_newline: bool,
}

impl PatchRecipe {
    /// Build a recipe with inline replacement text
    pub fn inline(
        target: impl Into<PathBuf>,
        marker: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            marker: marker.into(),
            replacement: ReplacementSource::Inline(replacement.into()),
            trim_trailing_newline: true,
        }
    }

    /// Validate a parsed recipe file and turn it into a recipe
    pub fn from_file(file: RecipeFile) -> SpliceResult<Self> {
        let target = file
            .target
            .ok_or_else(|| SpliceError::invalid_recipe("missing 'target'"))?;
        let marker = file
            .marker
            .ok_or_else(|| SpliceError::invalid_recipe("missing 'marker'"))?;

        let replacement = match (file.replacement, file.replacement_file) {
            (Some(text), None) => ReplacementSource::Inline(text),
            (None, Some(path)) => ReplacementSource::File(path),
            (Some(_), Some(_)) => {
                return Err(SpliceError::invalid_recipe(
                    "set only one of 'replacement' and 'replacement_file'",
                ))
            }
            (None, None) => {
                return Err(SpliceError::invalid_recipe(
                    "missing 'replacement' or 'replacement_file'",
                ))
            }
        };

        let recipe = Self {
            target,
            marker,
            replacement,
            trim_trailing_newline: file.trim_trailing_newline,
        };
        recipe.validate()?;
        Ok(recipe)
    }

    /// Check invariants that do not need the filesystem
    pub fn validate(&self) -> SpliceResult<()> {
        if self.marker.is_empty() {
            return Err(SpliceError::invalid_recipe("'marker' must not be empty"));
        }
        if self.target.as_os_str().is_empty() {
            return Err(SpliceError::invalid_recipe("'target' must not be empty"));
        }
        Ok(())
    }

    /// Load the replacement text and split it into the replacement block
    pub fn replacement_lines(&self) -> SpliceResult<Vec<String>> {
        let text = match &self.replacement {
            ReplacementSource::Inline(text) => text.clone(),
            ReplacementSource::File(path) => {
                debug!("Reading replacement from {}", path.display());
                let bytes = fs::read(path).map_err(|e| SpliceError::io_error(e, Some(path)))?;
                String::from_utf8(bytes).map_err(|_| SpliceError::invalid_encoding(path))?
            }
        };

        let text = if self.trim_trailing_newline {
            text.strip_suffix('\n').unwrap_or(&text)
        } else {
            &text
        };

        Ok(split_lines(text))
    }
}
