use tracing::debug;

use super::boundary::{find_span, ScanError, Span};

/// Replace the lines covered by `span` with `block`.
///
/// Lines before `span.start` and after `span.end` are kept in order; the span's
/// own lines are dropped. The input slice is not modified.
///
/// `span` must lie within `lines` with `start <= end`, as any span returned by
/// [`find_span`] over the same lines does. Panics otherwise.
pub fn splice_lines<S: AsRef<str>, B: AsRef<str>>(lines: &[S], span: Span, block: &[B]) -> Vec<String> {
    assert!(
        span.start <= span.end && span.end < lines.len(),
        "{} is outside a document of {} lines",
        span,
        lines.len()
    );
    debug!(
        "Splicing {} replacement lines over {} ({} lines)",
        block.len(),
        span,
        span.len()
    );

    let mut result = Vec::with_capacity(lines.len() - span.len() + block.len());
    result.extend(lines[..span.start].iter().map(|l| l.as_ref().to_string()));
    result.extend(block.iter().map(|l| l.as_ref().to_string()));
    result.extend(lines[span.end + 1..].iter().map(|l| l.as_ref().to_string()));
    result
}

/// Locate the function marked by `marker` and splice `block` over it.
///
/// Returns the span that was replaced together with the new lines.
pub fn replace_function<S: AsRef<str>, B: AsRef<str>>(
    lines: &[S],
    marker: &str,
    block: &[B],
) -> Result<(Span, Vec<String>), ScanError> {
    let span = find_span(lines, marker)?;
    Ok((span, splice_lines(lines, span, block)))
}
