// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Box-drawing rendering of a [`TreeNode`] for terminals.
//!
//! ```
//! use bucketfs::{Layout, build_tree, tree_format::format_tree};
//!
//! let objects = [("docs/a.txt", 3), ("docs/sub/b.txt", 5)];
//! let root = build_tree(Layout::raw(), "", objects).unwrap();
//!
//! // Produces:
//! // /
//! // └─┬ docs/
//! //   ├── a.txt (3 B)
//! //   └─┬ sub/
//! //     └── b.txt (5 B)
//! print!("{}", format_tree(&root));
//! ```

use crate::node::TreeNode;
use std::fmt;

/// Renders `root` and every descendant, one node per line
pub fn format_tree(root: &TreeNode) -> String {
    let mut output = String::new();
    output.push_str(&root_label(root));
    output.push('\n');
    format_children(&mut output, &root.children, "");
    output
}

fn root_label(root: &TreeNode) -> String {
    if root.is_root() {
        if root.path.is_empty() {
            "/".to_string()
        } else {
            root.path.clone()
        }
    } else {
        label(root)
    }
}

fn label(node: &TreeNode) -> String {
    match (node.is_directory, node.size) {
        (true, _) => format!("{}/", node.name),
        (false, Some(size)) => format!("{} ({size} B)", node.name),
        (false, None) => node.name.clone(),
    }
}

fn format_children(output: &mut String, children: &[TreeNode], prefix: &str) {
    let count = children.len();

    for (index, child) in children.iter().enumerate() {
        let is_last = index + 1 == count;

        // Nodes with children get a tee so their subtree hangs below them
        let (connector, continuation) = match (child.children.is_empty(), is_last) {
            (true, true) => ("└──", ' '),
            (true, false) => ("├──", '│'),
            (false, true) => ("└─┬", ' '),
            (false, false) => ("├─┬", '│'),
        };

        output.push_str(prefix);
        output.push_str(connector);
        output.push(' ');
        output.push_str(&label(child));
        output.push('\n');

        if !child.children.is_empty() {
            let nested = format!("{prefix}{continuation} ");
            format_children(output, &child.children, &nested);
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tree(self))
    }
}
