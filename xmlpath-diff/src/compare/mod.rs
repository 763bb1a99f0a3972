//! Path-identity comparison of two built trees.
//!
//! Nodes are aligned by exact path string. A path on both sides is matched
//! when the two nodes carry the same text and attributes, and different
//! otherwise; descendants are classified on their own. There is no move or
//! reorder detection.

mod report;
mod status;

pub use report::{DiffReport, DiffStats};
pub use status::{resolve_status, DiffStatus, Side};

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, instrument, warn};

use crate::node::TreeNode;

/// Maps every path in a tree to its node, parents first.
///
/// If a path occurs twice the later node wins.
pub fn flatten(tree: &TreeNode) -> HashMap<&str, &TreeNode> {
    let mut map = HashMap::new();
    for node in tree.iter() {
        if map.insert(node.path(), node).is_some() {
            warn!(path = node.path(), "duplicate path, keeping the later node");
        }
    }
    map
}

/// Compares two trees and classifies every path.
#[instrument(level = "debug", skip_all, fields(left = left.path(), right = right.path()))]
pub fn compare(left: &TreeNode, right: &TreeNode) -> DiffReport {
    let left_map = flatten(left);
    let right_map = flatten(right);

    let mut matched = BTreeSet::new();
    let mut different = BTreeSet::new();
    let mut left_only = BTreeSet::new();

    for (&path, left_node) in &left_map {
        match right_map.get(path) {
            Some(right_node) if left_node.content_equals(right_node) => {
                matched.insert(path.to_string());
            }
            Some(_) => {
                different.insert(path.to_string());
            }
            None => {
                left_only.insert(path.to_string());
            }
        }
    }

    let right_only: BTreeSet<String> = right_map
        .keys()
        .filter(|path| !left_map.contains_key(*path))
        .map(|path| path.to_string())
        .collect();

    let report = DiffReport::new(
        matched,
        left_only,
        right_only,
        different,
        left_map.len(),
        right_map.len(),
    );

    let stats = report.stats();
    debug!(
        matched = stats.matched,
        different = stats.different,
        left_only = stats.left_only,
        right_only = stats.right_only,
        "compared trees"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::tests::node;

    #[test]
    fn test_flatten_last_writer_wins() {
        let tree = node(
            "/r",
            "",
            &[],
            vec![node("/r/a", "first", &[], vec![]), node("/r/a", "second", &[], vec![])],
        );
        let map = flatten(&tree);
        assert_eq!(map.len(), 2);
        assert_eq!(map["/r/a"].text_content(), "second");
    }

    #[test]
    fn test_identical_trees() {
        let tree = node("/r", "x", &[("id", "1")], vec![node("/r/a", "", &[], vec![])]);
        let report = compare(&tree, &tree.clone());
        assert!(report.is_identical());
        assert_eq!(report.matched().len(), 2);
        assert_eq!(report.stats().total_left, 2);
        assert_eq!(report.stats().total_right, 2);
    }

    #[test]
    fn test_classification() {
        let left = node(
            "/r",
            "",
            &[],
            vec![node("/r/a", "1", &[], vec![]), node("/r/b", "", &[], vec![])],
        );
        let right = node(
            "/r",
            "",
            &[],
            vec![node("/r/a", "2", &[], vec![]), node("/r/c", "", &[], vec![])],
        );
        let report = compare(&left, &right);
        assert_eq!(report.matched().iter().collect::<Vec<_>>(), vec!["/r"]);
        assert_eq!(report.different().iter().collect::<Vec<_>>(), vec!["/r/a"]);
        assert_eq!(report.left_only().iter().collect::<Vec<_>>(), vec!["/r/b"]);
        assert_eq!(report.right_only().iter().collect::<Vec<_>>(), vec!["/r/c"]);
    }

    #[test]
    fn test_parent_matches_despite_child_change() {
        let left = node("/r", "t", &[], vec![node("/r/a", "old", &[], vec![])]);
        let right = node("/r", "t", &[], vec![node("/r/a", "new", &[], vec![])]);
        let report = compare(&left, &right);
        assert!(report.matched().contains("/r"));
        assert!(report.different().contains("/r/a"));
    }

    #[test]
    fn test_disjoint_roots() {
        let left = node("/a", "", &[], vec![]);
        let right = node("/b", "", &[], vec![]);
        let report = compare(&left, &right);
        assert!(report.matched().is_empty());
        assert!(report.left_only().contains("/a"));
        assert!(report.right_only().contains("/b"));
    }
}
