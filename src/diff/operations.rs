use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::fmt;

/// Line counts of a change between two texts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}", self.inserted, self.deleted)
    }
}

/// Count inserted, deleted and unchanged lines between two texts
pub fn diff_stats(old: &str, new: &str) -> DiffStats {
    let diff = TextDiff::from_lines(old, new);
    let mut stats = DiffStats::default();

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => stats.deleted += 1,
            ChangeTag::Insert => stats.inserted += 1,
            ChangeTag::Equal => stats.unchanged += 1,
        }
    }

    stats
}

/// Render a unified diff with three lines of context
pub fn unified_diff(old: &str, new: &str, label: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let old_header = format!("a/{}", label);
    let new_header = format!("b/{}", label);
    diff.unified_diff()
        .context_radius(3)
        .header(&old_header, &new_header)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_stats_replace() {
        let old = "a\nfunction foo() {\n  return 1;\n}\nb\n";
        let new = "a\nfunction foo() { return 2; }\nb\n";
        let stats = diff_stats(old, new);

        assert_eq!(stats.deleted, 3);
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.unchanged, 2);
        assert_eq!(stats.to_string(), "+1 -3");
    }

    #[test]
    fn test_diff_stats_identical() {
        let stats = diff_stats("same\n", "same\n");
        assert!(stats.is_empty());
        assert_eq!(stats.unchanged, 1);
    }

    #[test]
    fn test_unified_diff_headers_and_hunks() {
        let old = "a\nfunction foo() {\n  return 1;\n}\nb\n";
        let new = "a\nfunction foo() { return 2; }\nb\n";
        let rendered = unified_diff(old, new, "game.ts");

        assert!(rendered.starts_with("--- a/game.ts\n+++ b/game.ts\n"));
        assert!(rendered.contains("@@"));
        assert!(rendered.contains("-  return 1;\n"));
        assert!(rendered.contains("+function foo() { return 2; }\n"));
        assert!(rendered.contains(" a\n"));
    }

    #[test]
    fn test_unified_diff_empty_when_equal() {
        assert!(!unified_diff("x\n", "x\n", "f").contains("@@"));
    }
}
