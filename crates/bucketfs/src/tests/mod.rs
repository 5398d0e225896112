// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

mod listing;
mod moves;

use crate::node::TreeNode;

/// Order-independent view of a tree: every node's location and attributes,
/// sorted by path.
pub(crate) fn flatten(root: &TreeNode) -> Vec<(String, bool, String, String, Option<u64>)> {
    let mut rows: Vec<_> = root
        .walk()
        .map(|n| {
            (
                n.path.clone(),
                n.is_directory,
                n.bread_crumbs.clone(),
                n.file_extension.clone(),
                n.size,
            )
        })
        .collect();
    rows.sort();
    rows
}

/// Child names of the node at `names`, in tree order
pub(crate) fn child_names<'a>(root: &'a TreeNode, names: &[&str]) -> Vec<&'a str> {
    root.lookup(names.iter().copied())
        .map(|n| n.children.iter().map(|c| c.name.as_str()).collect())
        .unwrap_or_default()
}
