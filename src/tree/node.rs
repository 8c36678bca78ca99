//! Node identifiers and the input contract for caller trees.

use std::fmt;

/// Identifier of a node inside a [`TreeSnapshot`](super::TreeSnapshot).
///
/// Ids are preorder positions with the left subtree visited before the right
/// one, so the root is always `NodeId(0)` and every parent precedes its
/// children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Position in the snapshot arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A handle to a node of a caller-owned binary tree.
///
/// Implement this for a cheap copyable handle such as `&MyNode`. `None`
/// marks a missing child. The structure must be finite and acyclic; this is
/// not checked.
pub trait BinaryNode: Clone {
    fn left(&self) -> Option<Self>;
    fn right(&self) -> Option<Self>;

    fn child(&self, side: Side) -> Option<Self> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_conversions() {
        let id = NodeId::from(7u32);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.index(), 7);
        assert_eq!(u32::from(id), 7);
        assert_eq!(NodeId::from_index(3), NodeId::new(3));
        assert_eq!(id.to_string(), "Node(7)");
    }
}
