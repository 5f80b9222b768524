use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use fnsplice::{
    commands::{PatchOptions, Patcher},
    config::{RecipeLoader, RecipeOverrides},
    logging::init_logging,
};

#[derive(Parser)]
#[command(name = "fnsplice", version, about = "Replace a function in a source file by brace matching")]
struct Cli {
    /// Patch recipe (TOML) describing target, marker and replacement
    recipe: Option<PathBuf>,

    /// File to patch (overrides the recipe)
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Substring identifying the function's first line (overrides the recipe)
    #[arg(short, long)]
    marker: Option<String>,

    /// File holding the replacement text (overrides the recipe)
    #[arg(short, long)]
    replacement_file: Option<PathBuf>,

    /// Show what would change without writing the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print a unified diff of the change
    #[arg(short, long)]
    diff: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("fnsplice v{}", fnsplice::version());

    let mut loader = RecipeLoader::new().with_overrides(RecipeOverrides {
        target: cli.target,
        marker: cli.marker,
        replacement_file: cli.replacement_file,
    });
    if let Some(path) = &cli.recipe {
        loader = loader.with_path(path);
    }
    let recipe = loader.load().context("Failed to load patch recipe")?;

    let patcher = Patcher::new(PatchOptions {
        dry_run: cli.dry_run,
        with_diff: cli.diff,
    });
    let report = patcher
        .apply(&recipe)
        .with_context(|| format!("Failed to patch {}", recipe.target.display()))?;

    print!("{}", report.render(cli.verbose, cli.json)?);

    info!("Done");
    Ok(())
}
