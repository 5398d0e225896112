// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Folds flat object keys into a directory tree.
//!
//! Nodes live in an arena while keys are inserted, each directory keeping a
//! name index next to its ordered child list. [`TreeBuilder::finish`] turns
//! the arena into an owned [`TreeNode`].

use crate::error::Result;
use crate::key::{self, Segment};
use crate::layout::Layout;
use crate::node::TreeNode;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeID(usize);

const ROOT: NodeID = NodeID(0);

struct Slot {
    node: TreeNode,
    children: Vec<NodeID>,
    index: HashMap<String, NodeID>,
}

pub struct TreeBuilder {
    layout: Layout,
    prefix: String,
    slots: Vec<Slot>,
}

impl TreeBuilder {
    /// Starts an empty tree for keys listed under `prefix`
    pub fn new(layout: Layout, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let root = TreeNode::root(layout.location(&prefix));
        Self {
            layout,
            prefix,
            slots: vec![Slot {
                node: root,
                children: Vec::new(),
                index: HashMap::new(),
            }],
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.len() == 1
    }

    /// Walks the segments of `key`, creating the nodes that are missing.
    ///
    /// Every segment but the last is a directory; the last one is a directory
    /// only when the key is a directory marker. Inserting a key twice is a
    /// no-op, and the resulting shape does not depend on insertion order.
    pub fn insert(&mut self, object_key: &str, size: u64) -> Result<()> {
        let segments = key::segments(object_key, &self.prefix)?;
        let marker = key::is_directory_marker(object_key);
        let last = segments.len().saturating_sub(1);

        let mut current = ROOT;
        for (i, segment) in segments.iter().enumerate() {
            let is_directory = i < last || marker;
            let found = self.slots[current.0].index.get(segment.name).copied();
            current = match found {
                Some(existing) => {
                    if is_directory {
                        self.promote(existing, segment);
                    }
                    existing
                }
                None => {
                    let node = self.new_node(object_key, segment, is_directory, size);
                    self.add_child(current, node)
                }
            };
        }
        Ok(())
    }

    /// Inserts every `(key, size)` pair
    pub fn extend<'a, I>(&mut self, objects: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        for (object_key, size) in objects {
            self.insert(object_key, size)?;
        }
        Ok(())
    }

    fn new_node(&self, object_key: &str, segment: &Segment<'_>, is_directory: bool, size: u64) -> TreeNode {
        if is_directory {
            let path = self.layout.directory_location(segment.through);
            TreeNode {
                name: segment.name.to_string(),
                is_directory: true,
                bread_crumbs: self.layout.bread_crumbs(&path),
                path,
                file_extension: String::new(),
                size: None,
                children: Vec::new(),
            }
        } else {
            TreeNode {
                name: segment.name.to_string(),
                is_directory: false,
                path: self.layout.location(object_key),
                file_extension: key::file_extension(segment.name),
                bread_crumbs: String::new(),
                size: Some(size),
                children: Vec::new(),
            }
        }
    }

    fn add_child(&mut self, parent: NodeID, node: TreeNode) -> NodeID {
        let id = NodeID(self.slots.len());
        let name = node.name.clone();
        self.slots.push(Slot {
            node,
            children: Vec::new(),
            index: HashMap::new(),
        });
        let parent = &mut self.slots[parent.0];
        parent.children.push(id);
        _ = parent.index.insert(name, id);
        id
    }

    /// A key `a` listed before `a/b` leaves a file node where a directory is
    /// needed. Directories never turn back into files.
    fn promote(&mut self, id: NodeID, segment: &Segment<'_>) {
        let slot = &mut self.slots[id.0];
        if slot.node.is_directory {
            return;
        }
        diagnostics::debug!(
            "file node {name} also has descendants, treating it as a directory",
            name: segment.name
        );
        let path = self.layout.directory_location(segment.through);
        slot.node.is_directory = true;
        slot.node.bread_crumbs = self.layout.bread_crumbs(&path);
        slot.node.path = path;
        slot.node.file_extension.clear();
        slot.node.size = None;
    }

    /// Consumes the arena and returns the root
    pub fn finish(self) -> TreeNode {
        let count = self.slots.len();
        let mut done: Vec<Option<TreeNode>> = (0..count).map(|_| None).collect();

        // Children always have larger ids than their parent.
        for (id, slot) in self.slots.into_iter().enumerate().rev() {
            let Slot {
                mut node, children, ..
            } = slot;
            node.children = children
                .into_iter()
                .filter_map(|child| done[child.0].take())
                .collect();
            done[id] = Some(node);
        }

        done.into_iter()
            .next()
            .flatten()
            .unwrap_or_else(|| TreeNode::root(""))
    }
}

/// Builds a tree from `(key, size)` pairs in one call
pub fn build_tree<'a, I>(layout: Layout, prefix: &str, objects: I) -> Result<TreeNode>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut builder = TreeBuilder::new(layout, prefix);
    builder.extend(objects)?;
    Ok(builder.finish())
}
