//! Depth-first traversal of a built tree.

use super::TreeNode;

/// Iterator for traversing a tree in depth-first order, parents before
/// children, siblings in document order.
///
/// Uses an explicit stack so deep documents do not recurse.
pub struct DfsTreeIterator<'a> {
    /// Nodes still to visit; the next one is on top.
    stack: Vec<&'a TreeNode>,
}

impl<'a> DfsTreeIterator<'a> {
    /// Creates a new DFS iterator starting at the given root.
    pub fn new(root: &'a TreeNode) -> Self {
        DfsTreeIterator { stack: vec![root] }
    }
}

impl<'a> Iterator for DfsTreeIterator<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is popped next
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::node::tests::node;

    #[test]
    fn test_dfs_iterator_single_node() {
        let root = node("/root", "", &[], vec![]);
        let paths: Vec<&str> = root.iter().map(|n| n.path()).collect();
        assert_eq!(paths, vec!["/root"]);
    }

    #[test]
    fn test_dfs_iterator_tree() {
        // Build tree:
        //       root
        //      /    \
        //     a      b
        //    / \
        //   c   d
        let root = node(
            "/root",
            "",
            &[],
            vec![
                node(
                    "/root/a",
                    "",
                    &[],
                    vec![
                        node("/root/a/c", "", &[], vec![]),
                        node("/root/a/d", "", &[], vec![]),
                    ],
                ),
                node("/root/b", "", &[], vec![]),
            ],
        );

        let names: Vec<&str> = root.iter().map(|n| n.tag_name()).collect();
        assert_eq!(names, vec!["root", "a", "c", "d", "b"]);
    }
}
