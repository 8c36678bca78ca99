//! Flat-array binary trees, the format the JavaScript side hands over.
//!
//! Node `i` has children `left[i]` and `right[i]`, where a negative value
//! means "no child". Unlike a Rust caller's tree, this input is untrusted, so
//! construction checks that the arrays describe a tree: every child index is
//! in range, no node has two parents and the root has none. That is enough to
//! make the part reachable from the root finite and acyclic.

use super::node::BinaryNode;
use crate::error::{DrawingError, Result};

/// A binary tree stored as parallel child-index arrays.
#[derive(Debug, Clone, Default)]
pub struct IndexedTree {
    left: Vec<Option<u32>>,
    right: Vec<Option<u32>>,
    labels: Vec<String>,
    root: Option<u32>,
}

impl IndexedTree {
    /// Validate and build a tree.
    ///
    /// # Arguments
    ///
    /// * `left` / `right` - Child index per node, negative for none
    /// * `root` - Root index, negative for the empty tree
    /// * `labels` - Optional label per node
    pub fn new(left: &[i32], right: &[i32], root: i32, labels: Option<Vec<String>>) -> Result<Self> {
        let len = left.len();
        if right.len() != len {
            return Err(DrawingError::LengthMismatch {
                left: len,
                right: right.len(),
            });
        }

        let labels = labels.unwrap_or_default();
        if !labels.is_empty() && labels.len() != len {
            return Err(DrawingError::LabelCountMismatch {
                labels: labels.len(),
                nodes: len,
            });
        }

        let root = if root < 0 {
            None
        } else if (root as usize) < len {
            Some(root as u32)
        } else {
            return Err(DrawingError::RootOutOfRange { root, len });
        };

        let to_child = |parent: usize, raw: i32| -> Result<Option<u32>> {
            if raw < 0 {
                Ok(None)
            } else if (raw as usize) < len {
                Ok(Some(raw as u32))
            } else {
                Err(DrawingError::ChildOutOfRange {
                    parent,
                    child: raw,
                    len,
                })
            }
        };

        let mut has_parent = vec![false; len];
        let mut lefts = Vec::with_capacity(len);
        let mut rights = Vec::with_capacity(len);

        for parent in 0..len {
            let l = to_child(parent, left[parent])?;
            let r = to_child(parent, right[parent])?;

            for child in l.into_iter().chain(r) {
                let child = child as usize;
                if has_parent[child] {
                    return Err(DrawingError::MultipleParents { child });
                }
                has_parent[child] = true;
            }

            lefts.push(l);
            rights.push(r);
        }

        if let Some(root) = root {
            if has_parent[root as usize] {
                return Err(DrawingError::RootHasParent {
                    root: root as usize,
                });
            }
        }

        Ok(Self {
            left: lefts,
            right: rights,
            labels,
            root,
        })
    }

    /// Number of node slots, reachable or not.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn root_node(&self) -> Option<IndexedNode<'_>> {
        self.root.map(|index| IndexedNode { tree: self, index })
    }

    /// Label of slot `index`, empty when no labels were given.
    pub fn label(&self, index: u32) -> &str {
        self.labels.get(index as usize).map_or("", String::as_str)
    }

    /// Slots reachable from the root in preorder, left subtree first.
    ///
    /// This is the order in which a snapshot numbers the nodes, so entry `k`
    /// is the slot of `NodeId(k)`.
    pub fn preorder(&self) -> Vec<u32> {
        let mut order = Vec::new();
        let mut stack: Vec<u32> = self.root.into_iter().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            let slot = index as usize;
            stack.extend(self.right[slot]);
            stack.extend(self.left[slot]);
        }
        order
    }
}

/// Handle to one slot of an [`IndexedTree`].
#[derive(Debug, Clone, Copy)]
pub struct IndexedNode<'a> {
    tree: &'a IndexedTree,
    index: u32,
}

impl<'a> IndexedNode<'a> {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn label(&self) -> &'a str {
        self.tree.label(self.index)
    }
}

impl BinaryNode for IndexedNode<'_> {
    fn left(&self) -> Option<Self> {
        self.tree.left[self.index as usize].map(|index| IndexedNode {
            tree: self.tree,
            index,
        })
    }

    fn right(&self) -> Option<Self> {
        self.tree.right[self.index as usize].map(|index| IndexedNode {
            tree: self.tree,
            index,
        })
    }
}
