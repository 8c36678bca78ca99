//! Small owned trees for unit tests.

use super::node::BinaryNode;

#[derive(Debug, Clone)]
pub struct TestNode {
    pub name: String,
    pub left: Option<Box<TestNode>>,
    pub right: Option<Box<TestNode>>,
}

impl<'a> BinaryNode for &'a TestNode {
    fn left(&self) -> Option<Self> {
        let node: &'a TestNode = *self;
        node.left.as_deref()
    }

    fn right(&self) -> Option<Self> {
        let node: &'a TestNode = *self;
        node.right.as_deref()
    }
}

pub fn leaf(name: &str) -> TestNode {
    node(name, None, None)
}

pub fn node(name: &str, left: Option<TestNode>, right: Option<TestNode>) -> TestNode {
    TestNode {
        name: name.to_owned(),
        left: left.map(Box::new),
        right: right.map(Box::new),
    }
}

/// A chain of `len` nodes where every node hangs off its parent's left slot.
pub fn left_chain(len: usize) -> Option<TestNode> {
    (0..len).rev().fold(None, |child, depth| {
        Some(node(&depth.to_string(), child, None))
    })
}

/// Complete tree with `levels` levels.
pub fn complete(levels: u32) -> Option<TestNode> {
    if levels == 0 {
        return None;
    }
    Some(node(
        &levels.to_string(),
        complete(levels - 1),
        complete(levels - 1),
    ))
}

/// Structural mirror image.
pub fn mirror(tree: &TestNode) -> TestNode {
    TestNode {
        name: tree.name.clone(),
        left: tree.right.as_deref().map(|n| Box::new(mirror(n))),
        right: tree.left.as_deref().map(|n| Box::new(mirror(n))),
    }
}
