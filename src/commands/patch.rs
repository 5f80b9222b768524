use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::PatchRecipe;
use crate::diff::{diff_stats, replace_function, unified_diff, Document, ScanError, Span};
use crate::error::SpliceResult;
use crate::utils::fs::{read_text, write_text_atomic};

/// Options controlling how a recipe is applied
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Compute everything but leave the file untouched
    pub dry_run: bool,
    /// Attach a unified diff to the report
    pub with_diff: bool,
}

/// How a patch run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    Replaced,
    Unchanged,
    NotFound,
}

/// Result of applying one recipe
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    pub target: PathBuf,
    pub marker: String,
    pub outcome: PatchOutcome,
    /// 1-based first line of the replaced function
    pub start_line: Option<usize>,
    /// 1-based last line of the replaced function
    pub end_line: Option<usize>,
    pub lines_removed: usize,
    pub lines_inserted: usize,
    pub dry_run: bool,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl PatchReport {
    fn new(recipe: &PatchRecipe, outcome: PatchOutcome, dry_run: bool) -> Self {
        Self {
            target: recipe.target.clone(),
            marker: recipe.marker.clone(),
            outcome,
            start_line: None,
            end_line: None,
            lines_removed: 0,
            lines_inserted: 0,
            dry_run,
            written: false,
            reason: None,
            diff: None,
        }
    }

    fn not_found(recipe: &PatchRecipe, err: &ScanError, dry_run: bool) -> Self {
        let mut report = Self::new(recipe, PatchOutcome::NotFound, dry_run);
        report.start_line = err.start().map(|s| s + 1);
        report.reason = Some(err.to_string());
        report
    }

    fn with_span(mut self, span: Span) -> Self {
        self.start_line = Some(span.first_line());
        self.end_line = Some(span.last_line());
        self
    }

    pub fn is_found(&self) -> bool {
        self.outcome != PatchOutcome::NotFound
    }

    /// Text printed on stdout for this report.
    ///
    /// JSON replaces the summary lines entirely. Otherwise the summary comes
    /// first, then the not-found reason when `verbose`, then any diff.
    pub fn render(&self, verbose: bool, json: bool) -> serde_json::Result<String> {
        if json {
            return serde_json::to_string_pretty(self).map(|s| s + "\n");
        }

        let mut out = format!("{}\n", self);
        if let Some(reason) = self.reason.as_ref().filter(|_| verbose) {
            out.push_str(reason);
            out.push('\n');
        }
        if let Some(diff) = &self.diff {
            out.push_str(diff);
        }
        Ok(out)
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = (self.start_line.unwrap_or(0), self.end_line.unwrap_or(0));
        match self.outcome {
            PatchOutcome::NotFound => write!(f, "Function not found"),
            PatchOutcome::Unchanged => write!(
                f,
                "Function already up to date (lines {} to {})",
                start, end
            ),
            PatchOutcome::Replaced if self.dry_run => write!(
                f,
                "Would replace function from line {} to {}",
                start, end
            ),
            PatchOutcome::Replaced => {
                write!(f, "Replaced function from line {} to {}", start, end)
            }
        }
    }
}

/// Applies patch recipes to files
#[derive(Debug, Clone, Default)]
pub struct Patcher {
    options: PatchOptions,
}

impl Patcher {
    pub fn new(options: PatchOptions) -> Self {
        Self { options }
    }

    /// Read the target, replace the marked function and write the result back.
    ///
    /// A missing function is reported through [`PatchOutcome::NotFound`] and
    /// leaves the file untouched. I/O and recipe problems are errors.
    pub fn apply(&self, recipe: &PatchRecipe) -> SpliceResult<PatchReport> {
        recipe.validate()?;
        let block = recipe.replacement_lines()?;
        let original = read_text(&recipe.target)?;
        self.apply_to_text(recipe, &original, &block)
            .and_then(|(report, patched)| self.persist(recipe, report, patched))
    }

    /// Pure part of [`Patcher::apply`]: compute the report and the new text
    pub fn apply_to_text(
        &self,
        recipe: &PatchRecipe,
        original: &str,
        block: &[String],
    ) -> SpliceResult<(PatchReport, Option<String>)> {
        let document = Document::from_text(original);
        debug!(
            "Scanning {} lines of {} for '{}'",
            document.len(),
            recipe.target.display(),
            recipe.marker
        );

        let (span, lines) = match replace_function(document.lines(), &recipe.marker, block) {
            Ok(found) => found,
            Err(err) => {
                warn!("{}: {}", recipe.target.display(), err);
                return Ok((PatchReport::not_found(recipe, &err, self.options.dry_run), None));
            }
        };

        let patched = Document::from_lines(lines).to_text();
        if patched == original {
            info!("{} already matches the replacement", span);
            let report = PatchReport::new(recipe, PatchOutcome::Unchanged, self.options.dry_run)
                .with_span(span);
            return Ok((report, None));
        }

        let mut report = PatchReport::new(recipe, PatchOutcome::Replaced, self.options.dry_run)
            .with_span(span);
        report.lines_removed = span.len();
        report.lines_inserted = block.len();
        if self.options.with_diff {
            let label = recipe.target.to_string_lossy();
            report.diff = Some(unified_diff(original, &patched, &label));
        }
        debug!("Change summary: {}", diff_stats(original, &patched));

        Ok((report, Some(patched)))
    }

    fn persist(
        &self,
        recipe: &PatchRecipe,
        mut report: PatchReport,
        patched: Option<String>,
    ) -> SpliceResult<PatchReport> {
        let Some(patched) = patched else {
            return Ok(report);
        };

        if self.options.dry_run {
            info!("Dry run: not writing {}", recipe.target.display());
            return Ok(report);
        }

        write_text_atomic(&recipe.target, &patched)?;
        report.written = true;
        info!(
            "Replaced {} lines with {} in {}",
            report.lines_removed,
            report.lines_inserted,
            recipe.target.display()
        );
        Ok(report)
    }
}
