//! Diff report produced by the comparator.

use std::collections::BTreeSet;

use serde::Serialize;

/// Aggregate counts for one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    /// Nodes in the left tree.
    pub total_left: usize,
    /// Nodes in the right tree.
    pub total_right: usize,
    /// Paths in both trees with equal content.
    pub matched: usize,
    /// Paths only in the left tree.
    pub left_only: usize,
    /// Paths only in the right tree.
    pub right_only: usize,
    /// Paths in both trees with differing content.
    pub different: usize,
}

/// Classification of every path across two trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    matched: BTreeSet<String>,
    left_only: BTreeSet<String>,
    right_only: BTreeSet<String>,
    different: BTreeSet<String>,
    stats: DiffStats,
}

impl DiffReport {
    /// Assembles a report from its four path sets.
    ///
    /// Category counts are taken from the sets; node totals are supplied.
    pub fn new(
        matched: BTreeSet<String>,
        left_only: BTreeSet<String>,
        right_only: BTreeSet<String>,
        different: BTreeSet<String>,
        total_left: usize,
        total_right: usize,
    ) -> Self {
        let stats = DiffStats {
            total_left,
            total_right,
            matched: matched.len(),
            left_only: left_only.len(),
            right_only: right_only.len(),
            different: different.len(),
        };
        DiffReport {
            matched,
            left_only,
            right_only,
            different,
            stats,
        }
    }

    /// Paths present in both trees with equal text and attributes.
    pub fn matched(&self) -> &BTreeSet<String> {
        &self.matched
    }

    /// Paths present only in the left tree.
    pub fn left_only(&self) -> &BTreeSet<String> {
        &self.left_only
    }

    /// Paths present only in the right tree.
    pub fn right_only(&self) -> &BTreeSet<String> {
        &self.right_only
    }

    /// Paths present in both trees whose text or attributes differ.
    pub fn different(&self) -> &BTreeSet<String> {
        &self.different
    }

    /// Returns the aggregate counts.
    pub fn stats(&self) -> &DiffStats {
        &self.stats
    }

    /// Returns true if nothing differs and no path is one-sided.
    pub fn is_identical(&self) -> bool {
        self.left_only.is_empty() && self.right_only.is_empty() && self.different.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_stats_follow_sets() {
        let report = DiffReport::new(
            set(&["/r"]),
            set(&["/r/a", "/r/b"]),
            set(&[]),
            set(&["/r/c"]),
            4,
            2,
        );
        assert_eq!(
            *report.stats(),
            DiffStats {
                total_left: 4,
                total_right: 2,
                matched: 1,
                left_only: 2,
                right_only: 0,
                different: 1,
            }
        );
        assert!(!report.is_identical());
    }

    #[test]
    fn test_serialized_shape() {
        let report = DiffReport::new(set(&["/r"]), set(&[]), set(&["/r/x"]), set(&[]), 1, 2);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["matched"], serde_json::json!(["/r"]));
        assert_eq!(json["rightOnly"], serde_json::json!(["/r/x"]));
        assert_eq!(json["stats"]["totalRight"], 2);
        assert_eq!(json["stats"]["leftOnly"], 0);
    }
}
