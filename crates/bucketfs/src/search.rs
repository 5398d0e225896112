// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::node::TreeNode;

/// Case-insensitive substring search over node names.
///
/// Walks the tree pre-order and returns a detached copy (no children) of
/// every node whose name contains `query`. Descendants of a match are still
/// visited. The source tree is left untouched.
pub fn search(node: &TreeNode, query: &str) -> Vec<TreeNode> {
    let needle = query.to_lowercase();
    node.walk()
        .filter(|n| n.name.to_lowercase().contains(&needle))
        .map(TreeNode::detached)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_tree;
    use crate::layout::Layout;

    fn tree(keys: &[&str]) -> TreeNode {
        build_tree(Layout::raw(), "", keys.iter().map(|k| (*k, 1))).unwrap()
    }

    #[test]
    fn test_case_insensitive_match() {
        let root = tree(&["Reports/", "archive/report_final.pdf", "notes.txt"]);
        let results = search(&root, "report");
        let names: Vec<&str> = results.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Reports", "report_final.pdf"]);
        assert!(results.iter().all(|n| n.children.is_empty()));
        assert!(results[0].is_directory);
        assert_eq!(results[1].file_extension, ".pdf");
    }

    #[test]
    fn test_descendants_of_match_are_searched() {
        let root = tree(&["data/data.csv", "data/raw/data.bin"]);
        let results = search(&root, "DATA");
        let paths: Vec<&str> = results.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["data/", "data/data.csv", "data/raw/data.bin"]);
    }

    #[test]
    fn test_source_tree_unchanged() {
        let root = tree(&["a/b/c.txt"]);
        let before = root.clone();
        let results = search(&root, "b");
        assert_eq!(results.len(), 1);
        assert_eq!(root, before);
        assert_eq!(root.children[0].children[0].children.len(), 1);
    }

    #[test]
    fn test_non_ascii_names() {
        let root = tree(&["Übersicht/ÄRGER.md"]);
        let results = search(&root, "ärger");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "ÄRGER.md");
    }

    #[test]
    fn test_no_match() {
        let root = tree(&["a/b.txt"]);
        assert!(search(&root, "zzz").is_empty());
    }
}
