//! Hull-threaded layout of binary trees.
//!
//! Each subtree is laid out relative to its own root, then two sibling
//! subtrees are pushed apart just far enough that their facing hulls keep the
//! minimum separation on every shared level. Parents sit midway between their
//! children.
//!
//! # Algorithm Overview
//!
//! 1. **Bottom-up pass:** Visit nodes children-first. Leaves become one-node
//!    layouts, single children hang straight below their parent, and two
//!    children are merged.
//! 2. **Merge:** Walk the right hull of the left subtree and the left hull of
//!    the right subtree together, level by level. The shift applied to the
//!    right subtree is the largest shift any level requires.
//! 3. **Threading:** When one subtree is shallower, the bottom of its outer
//!    hull is linked to the next hull node of the deeper subtree. Later merges
//!    then walk hulls only, keeping the total work linear in the node count.
//!
//! Threaded nodes live in an arena indexed like the snapshot, and hull links
//! are arena indices. The arena is dropped once placement has read it.

use log::trace;

use crate::tree::{NodeId, TreeSnapshot};

/// Intermediate node of the layout.
#[derive(Debug, Clone)]
pub(crate) struct ThreadedNode {
    pub left_child: Option<usize>,
    pub right_child: Option<usize>,
    /// Next node on the left hull, one level down. For a node with children
    /// this is its leftmost child; for a leaf it is a thread, if any.
    pub left_hull: Option<usize>,
    /// Next node on the right hull, one level down.
    pub right_hull: Option<usize>,
    /// Signed horizontal offset from this node to `left_hull`.
    pub left_hull_distance: f64,
    /// Signed horizontal offset from this node to `right_hull`.
    pub right_hull_distance: f64,
}

impl ThreadedNode {
    fn new(left_child: Option<usize>, right_child: Option<usize>, min_separation: f64) -> Self {
        Self {
            left_child,
            right_child,
            left_hull: None,
            right_hull: None,
            left_hull_distance: -min_separation / 2.0,
            right_hull_distance: min_separation / 2.0,
        }
    }
}

/// Layout of one subtree: its root and the bottom ends of both hulls.
///
/// Offsets are relative to `root`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ThreadedLayout {
    pub root: usize,
    pub extreme_left: usize,
    pub extreme_left_offset: f64,
    pub extreme_right: usize,
    pub extreme_right_offset: f64,
}

impl ThreadedLayout {
    fn leaf(root: usize) -> Self {
        Self {
            root,
            extreme_left: root,
            extreme_left_offset: 0.0,
            extreme_right: root,
            extreme_right_offset: 0.0,
        }
    }
}

/// Result of laying out a whole tree.
#[derive(Debug, Clone)]
pub struct ThreadedTree {
    nodes: Vec<ThreadedNode>,
    layout: Option<ThreadedLayout>,
    merges: usize,
}

impl ThreadedTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of two-child merges performed.
    pub fn merge_count(&self) -> usize {
        self.merges
    }

    /// Horizontal extent of the tree relative to the root, `(left, right)`.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let layout = self.layout?;
        let mut left = 0.0f64;
        let mut right = 0.0f64;

        // The extremes are the bottoms of the hulls, not necessarily the
        // widest points, so walk both hulls.
        let mut cursor = layout.root;
        let mut offset = 0.0;
        while let Some(next) = self.nodes[cursor].left_hull {
            offset += self.nodes[cursor].left_hull_distance;
            left = left.min(offset);
            cursor = next;
        }

        let mut cursor = layout.root;
        let mut offset = 0.0;
        while let Some(next) = self.nodes[cursor].right_hull {
            offset += self.nodes[cursor].right_hull_distance;
            right = right.max(offset);
            cursor = next;
        }

        Some((left, right))
    }

    /// Offset of each present child relative to `id`, `(left, right)`.
    pub fn child_offsets(&self, id: NodeId) -> (Option<(NodeId, f64)>, Option<(NodeId, f64)>) {
        let node = &self.nodes[id.index()];
        (
            node.left_child
                .map(|child| (NodeId::from_index(child), node.left_hull_distance)),
            node.right_child
                .map(|child| (NodeId::from_index(child), node.right_hull_distance)),
        )
    }

    pub(crate) fn layout(&self) -> Option<&ThreadedLayout> {
        self.layout.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn node(&self, index: usize) -> &ThreadedNode {
        &self.nodes[index]
    }
}

/// The layout engine.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    min_separation: f64,
}

impl LayoutEngine {
    /// Create an engine keeping `min_separation` between nodes on a level.
    pub fn new(min_separation: f64) -> Self {
        Self { min_separation }
    }

    pub fn min_separation(&self) -> f64 {
        self.min_separation
    }

    /// Lay out every node of `snapshot` relative to its parent.
    pub fn lay_out_tree(&self, snapshot: &TreeSnapshot<'_>) -> ThreadedTree {
        let mut nodes: Vec<ThreadedNode> = snapshot
            .nodes()
            .iter()
            .map(|node| {
                ThreadedNode::new(
                    node.left().map(NodeId::index),
                    node.right().map(NodeId::index),
                    self.min_separation,
                )
            })
            .collect();

        // Snapshot ids are preorder, so walking them backwards finishes every
        // child before its parent.
        let mut layouts: Vec<Option<ThreadedLayout>> = vec![None; nodes.len()];
        let mut merges = 0;

        for index in (0..nodes.len()).rev() {
            let left = nodes[index].left_child.and_then(|child| layouts[child].take());
            let right = nodes[index].right_child.and_then(|child| layouts[child].take());

            layouts[index] = Some(match (left, right) {
                (None, None) => ThreadedLayout::leaf(index),
                (Some(only), None) | (None, Some(only)) => Self::adopt(&mut nodes, index, only),
                (Some(left), Some(right)) => {
                    merges += 1;
                    self.merge(&mut nodes, index, left, right)
                }
            });
        }

        let layout = layouts.first_mut().and_then(Option::take);

        ThreadedTree {
            nodes,
            layout,
            merges,
        }
    }

    /// Hang a single child directly below `parent`. Both hulls run straight
    /// down into the child.
    fn adopt(nodes: &mut [ThreadedNode], parent: usize, child: ThreadedLayout) -> ThreadedLayout {
        let node = &mut nodes[parent];
        node.left_hull = Some(child.root);
        node.left_hull_distance = 0.0;
        node.right_hull = Some(child.root);
        node.right_hull_distance = 0.0;

        ThreadedLayout {
            root: parent,
            ..child
        }
    }

    /// Merge two sibling subtrees under `parent`.
    fn merge(
        &self,
        nodes: &mut [ThreadedNode],
        parent: usize,
        left: ThreadedLayout,
        right: ThreadedLayout,
    ) -> ThreadedLayout {
        // Walk the facing hulls. Offsets are relative to each subtree's root,
        // with both roots placed at the same x.
        let mut inner_left = left.root;
        let mut inner_right = right.root;
        let mut inner_left_offset = 0.0;
        let mut inner_right_offset = 0.0;
        let mut shift = 0.0f64;

        loop {
            shift = shift.max(inner_left_offset - inner_right_offset + self.min_separation);

            let (Some(next_left), Some(next_right)) =
                (nodes[inner_left].right_hull, nodes[inner_right].left_hull)
            else {
                break;
            };

            inner_left_offset += nodes[inner_left].right_hull_distance;
            inner_right_offset += nodes[inner_right].left_hull_distance;
            inner_left = next_left;
            inner_right = next_right;
        }

        let half = shift / 2.0;

        let node = &mut nodes[parent];
        node.left_hull = Some(left.root);
        node.left_hull_distance = -half;
        node.right_hull = Some(right.root);
        node.right_hull_distance = half;

        if let Some(next) = nodes[inner_left].right_hull {
            // Left subtree is deeper: continue the right subtree's right hull
            // into the rest of the left subtree's right hull.
            let next_offset = -half + inner_left_offset + nodes[inner_left].right_hull_distance;
            let bottom_offset = half + right.extreme_right_offset;
            let bottom = &mut nodes[right.extreme_right];
            bottom.right_hull = Some(next);
            bottom.right_hull_distance = next_offset - bottom_offset;

            trace!(
                "merge at {parent}: shift {shift}, threaded right hull {} -> {next}",
                right.extreme_right
            );

            ThreadedLayout {
                root: parent,
                extreme_left: left.extreme_left,
                extreme_left_offset: left.extreme_left_offset - half,
                extreme_right: left.extreme_right,
                extreme_right_offset: left.extreme_right_offset - half,
            }
        } else if let Some(next) = nodes[inner_right].left_hull {
            // Right subtree is deeper: continue the left subtree's left hull
            // into the rest of the right subtree's left hull.
            let next_offset = half + inner_right_offset + nodes[inner_right].left_hull_distance;
            let bottom_offset = -half + left.extreme_left_offset;
            let bottom = &mut nodes[left.extreme_left];
            bottom.left_hull = Some(next);
            bottom.left_hull_distance = next_offset - bottom_offset;

            trace!(
                "merge at {parent}: shift {shift}, threaded left hull {} -> {next}",
                left.extreme_left
            );

            ThreadedLayout {
                root: parent,
                extreme_left: right.extreme_left,
                extreme_left_offset: right.extreme_left_offset + half,
                extreme_right: right.extreme_right,
                extreme_right_offset: right.extreme_right_offset + half,
            }
        } else {
            trace!("merge at {parent}: shift {shift}, equal depth");

            ThreadedLayout {
                root: parent,
                extreme_left: left.extreme_left,
                extreme_left_offset: left.extreme_left_offset - half,
                extreme_right: right.extreme_right,
                extreme_right_offset: right.extreme_right_offset + half,
            }
        }
    }
}
