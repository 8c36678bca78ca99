//! Immutable shadow copy of a caller's tree.
//!
//! The snapshot decouples the layout from the caller's node representation.
//! Nodes live in a contiguous arena in preorder, left subtree first. Each node
//! keeps a deferred label producer holding the caller's node handle, plus a
//! position cell filled once by the placement pass.
//!
//! The caller's tree must stay valid and unmodified for as long as the
//! snapshot lives. For reference handles the `'t` lifetime enforces this; for
//! other handle types (indices into a caller arena, for example) it is the
//! caller's responsibility.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use super::node::{BinaryNode, NodeId, Side};
use crate::geometry::Point;

/// A label that is produced on first use and cached afterwards.
pub struct Label<'t> {
    produce: Box<dyn Fn() -> String + 't>,
    text: OnceCell<String>,
}

impl<'t> Label<'t> {
    pub fn deferred(produce: impl Fn() -> String + 't) -> Self {
        Self {
            produce: Box::new(produce),
            text: OnceCell::new(),
        }
    }

    /// The label text, invoking the producer on first access only.
    pub fn get(&self) -> &str {
        self.text.get_or_init(|| (self.produce)())
    }

    /// Whether the producer has run.
    pub fn is_evaluated(&self) -> bool {
        self.text.get().is_some()
    }
}

impl fmt::Debug for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text.get() {
            Some(text) => f.debug_tuple("Label").field(text).finish(),
            None => f.write_str("Label(<deferred>)"),
        }
    }
}

/// One node of a [`TreeSnapshot`].
#[derive(Debug)]
pub struct SnapshotNode<'t> {
    left: Option<NodeId>,
    right: Option<NodeId>,
    label: Label<'t>,
    position: OnceCell<Point>,
}

impl<'t> SnapshotNode<'t> {
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn label(&self) -> &str {
        self.label.get()
    }

    pub fn label_cell(&self) -> &Label<'t> {
        &self.label
    }

    /// Absolute position, `None` until the placement pass has run.
    #[inline]
    pub fn position(&self) -> Option<Point> {
        self.position.get().copied()
    }

    /// Store the absolute position. Returns false if one was already set.
    pub(crate) fn set_position(&self, point: Point) -> bool {
        self.position.set(point).is_ok()
    }
}

/// Arena-backed copy of a caller's binary tree.
#[derive(Debug, Default)]
pub struct TreeSnapshot<'t> {
    nodes: Vec<SnapshotNode<'t>>,
}

impl<'t> TreeSnapshot<'t> {
    /// Snapshot of the empty tree.
    pub fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Build a snapshot of the tree rooted at `root`.
    ///
    /// `labeler` is not called here; each node's label producer calls it the
    /// first time that node's label is read.
    pub fn convert<N, L>(root: Option<N>, labeler: L) -> Self
    where
        N: BinaryNode + 't,
        L: Fn(&N) -> String + 't,
    {
        let labeler: Rc<dyn Fn(&N) -> String + 't> = Rc::new(labeler);
        let mut nodes: Vec<SnapshotNode<'t>> = Vec::new();

        // Explicit stack so tall trees don't exhaust the call stack. Right is
        // pushed before left so the left subtree is numbered first.
        let mut stack: Vec<(N, Option<(NodeId, Side)>)> = Vec::new();
        if let Some(root) = root {
            stack.push((root, None));
        }

        while let Some((node, parent)) = stack.pop() {
            let id = NodeId::from_index(nodes.len());
            if let Some((parent, side)) = parent {
                let slot = &mut nodes[parent.index()];
                match side {
                    Side::Left => slot.left = Some(id),
                    Side::Right => slot.right = Some(id),
                }
            }

            if let Some(right) = node.right() {
                stack.push((right, Some((id, Side::Right))));
            }
            if let Some(left) = node.left() {
                stack.push((left, Some((id, Side::Left))));
            }

            let labeler = Rc::clone(&labeler);
            nodes.push(SnapshotNode {
                left: None,
                right: None,
                label: Label::deferred(move || labeler(&node)),
                position: OnceCell::new(),
            });
        }

        Self { nodes }
    }

    /// Root id, `None` for the empty tree.
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId::ROOT)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&SnapshotNode<'t>> {
        self.nodes.get(id.index())
    }

    /// All nodes in preorder.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SnapshotNode<'t>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from_index(index), node))
    }

    /// Parent→child pairs, in preorder of the parent, left child first.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.iter().flat_map(|(id, node)| {
            node.left
                .into_iter()
                .chain(node.right)
                .map(move |child| (id, child))
        })
    }

    pub(crate) fn nodes(&self) -> &[SnapshotNode<'t>] {
        &self.nodes
    }
}
