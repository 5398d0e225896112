// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// One entry of the synthesized directory tree.
///
/// Trees are built by [`crate::TreeBuilder`] and are not mutated afterwards.
/// Search results are detached copies with no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Last path segment; empty only for the synthetic root
    pub name: String,
    pub is_directory: bool,
    /// Full URL or raw key, depending on the configured layout
    pub path: String,
    /// Empty for directories
    pub file_extension: String,
    /// Directory key without the store root or trailing separator; empty for files and the root
    pub bread_crumbs: String,
    /// Object size for files listed from the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// First-seen order; names are unique among siblings
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// The synthetic root: nameless directory
    pub fn root(path: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            is_directory: true,
            path: path.into(),
            file_extension: String::new(),
            bread_crumbs: String::new(),
            size: None,
            children: Vec::new(),
        }
    }

    /// Wraps search results in a synthetic directory root, the single-node
    /// shape callers use to return a result list.
    pub fn search_root(results: Vec<TreeNode>) -> Self {
        Self {
            children: results,
            ..Self::root("")
        }
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Child with the given name
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Descendant reached by following `names` from this node
    pub fn lookup<'a, I>(&self, names: I) -> Option<&TreeNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .try_fold(self, |node, name| node.child(name))
    }

    /// Copy of this node without its subtree
    pub fn detached(&self) -> Self {
        Self {
            name: self.name.clone(),
            is_directory: self.is_directory,
            path: self.path.clone(),
            file_extension: self.file_extension.clone(),
            bread_crumbs: self.bread_crumbs.clone(),
            size: self.size,
            children: Vec::new(),
        }
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Pre-order walk over this node and every descendant
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`TreeNode::walk`]
pub struct Walk<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
