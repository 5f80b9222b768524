// fnsplice - replace a function in a source file by brace matching
// Finds the first line containing a marker, follows braces to the end of
// the function body and splices a replacement block over it.

pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod utils;

pub use commands::{PatchOptions, PatchOutcome, PatchReport, Patcher};
pub use config::{PatchRecipe, RecipeLoader, RecipeOverrides};
pub use diff::{find_span, splice_lines, ScanError, Span};
pub use error::{SpliceError, SpliceResult};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
