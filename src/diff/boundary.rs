// Brace-counting boundary scanner
// Locates a function by a marker substring and finds where its body closes.
// Counting is purely character based: braces inside strings or comments count too.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Inclusive, zero-based line range of a located function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Line containing the marker
    pub start: usize,
    /// Line on which the brace balance returned to zero
    pub end: usize,
}

impl Span {
    /// Number of lines covered by the span; zero if `end` precedes `start`
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    /// 1-based start line, as shown to operators
    pub fn first_line(&self) -> usize {
        self.start + 1
    }

    /// 1-based end line, as shown to operators
    pub fn last_line(&self) -> usize {
        self.end + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lines {}-{}", self.first_line(), self.last_line())
    }
}

/// Reasons the scanner could not produce a span
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("marker '{marker}' does not occur in the document")]
    MarkerNotFound { marker: String },

    #[error("braces opened at line {} never balance (open count {} at end of document)", .start + 1, .balance)]
    Unbalanced { start: usize, balance: i64 },
}

impl ScanError {
    /// Line where the marker was found, when the scan got that far
    pub fn start(&self) -> Option<usize> {
        match self {
            ScanError::MarkerNotFound { .. } => None,
            ScanError::Unbalanced { start, .. } => Some(*start),
        }
    }
}

/// Net brace count of a line: `{` minus `}`
pub fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

/// Index of the first line containing `marker`
pub fn find_marker<S: AsRef<str>>(lines: &[S], marker: &str) -> Option<usize> {
    lines.iter().position(|line| line.as_ref().contains(marker))
}

/// Find the span of the function introduced by the first line containing `marker`.
///
/// The balance starts at the marker line's own net brace count. Scanning then
/// begins on the following line and stops at the first line where the running
/// balance is exactly zero, so a function whose braces already balance on the
/// marker line still consumes at least one more line.
pub fn find_span<S: AsRef<str>>(lines: &[S], marker: &str) -> Result<Span, ScanError> {
    let start = find_marker(lines, marker).ok_or_else(|| ScanError::MarkerNotFound {
        marker: marker.to_string(),
    })?;

    let mut balance = brace_delta(lines[start].as_ref());
    debug!("Marker found at line {}, initial balance {}", start + 1, balance);

    for (offset, line) in lines[start + 1..].iter().enumerate() {
        balance += brace_delta(line.as_ref());
        if balance == 0 {
            let span = Span {
                start,
                end: start + 1 + offset,
            };
            debug!("Function body closes at {}", span);
            return Ok(span);
        }
    }

    debug!("Reached end of document with balance {}", balance);
    Err(ScanError::Unbalanced { start, balance })
}
