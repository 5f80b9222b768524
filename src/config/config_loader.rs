use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::recipe::{PatchRecipe, RecipeFile};
use crate::error::{SpliceError, SpliceResult};

/// Values given on the command line that take precedence over the recipe file
#[derive(Debug, Clone, Default)]
pub struct RecipeOverrides {
    pub target: Option<PathBuf>,
    pub marker: Option<String>,
    pub replacement_file: Option<PathBuf>,
}

impl RecipeOverrides {
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.marker.is_none() && self.replacement_file.is_none()
    }
}

/// Builds a patch recipe from an optional recipe file plus overrides
pub struct RecipeLoader {
    recipe_path: Option<PathBuf>,
    overrides: RecipeOverrides,
}

impl RecipeLoader {
    /// Create a loader with no recipe file
    pub fn new() -> Self {
        Self {
            recipe_path: None,
            overrides: RecipeOverrides::default(),
        }
    }

    /// Set the recipe file path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.recipe_path = Some(path.into());
        self
    }

    /// Set command-line overrides
    pub fn with_overrides(mut self, overrides: RecipeOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load the recipe file (if any), apply overrides and validate
    pub fn load(&self) -> SpliceResult<PatchRecipe> {
        let mut file = match &self.recipe_path {
            Some(path) => {
                let base = recipe_dir(path);
                RecipeFile::load(path)?.rebase(&base)
            }
            None => {
                if self.overrides.is_empty() {
                    return Err(SpliceError::invalid_recipe(
                        "no recipe file given and no --target/--marker/--replacement-file",
                    ));
                }
                RecipeFile {
                    trim_trailing_newline: true,
                    ..Default::default()
                }
            }
        };

        let RecipeOverrides {
            target,
            marker,
            replacement_file,
        } = self.overrides.clone();

        if let Some(target) = target {
            debug!("Overriding target with {}", target.display());
            file.target = Some(target);
        }
        if let Some(marker) = marker {
            debug!("Overriding marker with '{}'", marker);
            file.marker = Some(marker);
        }
        if let Some(path) = replacement_file {
            debug!("Overriding replacement file with {}", path.display());
            file.replacement = None;
            file.replacement_file = Some(path);
        }

        let recipe = PatchRecipe::from_file(file)?;
        info!(
            "Recipe: patch '{}' in {}",
            recipe.marker,
            recipe.target.display()
        );
        Ok(recipe)
    }
}

impl Default for RecipeLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn recipe_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
