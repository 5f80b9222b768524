// Line-level editing primitives: document splitting, the brace scanner,
// splicing and diff rendering.

pub mod boundary;
pub mod document;
pub mod operations;
pub mod splice;

pub use boundary::{brace_delta, find_marker, find_span, ScanError, Span};
pub use document::{split_lines, Document};
pub use operations::{diff_stats, unified_diff, DiffStats};
pub use splice::{replace_function, splice_lines};
