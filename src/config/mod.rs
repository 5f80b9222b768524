// Patch recipes: what to patch, where, and with which replacement text

pub mod config_loader;
pub mod recipe;

pub use config_loader::{RecipeLoader, RecipeOverrides};
pub use recipe::{PatchRecipe, RecipeFile, ReplacementSource};
