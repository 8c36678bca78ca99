//! Tree input and the snapshot the layout runs on.
//!
//! Callers hand over any binary tree through the [`BinaryNode`] trait (or, from
//! JavaScript, as an [`IndexedTree`]). The tree is copied once into a
//! [`TreeSnapshot`], which owns the structure, the deferred labels and the
//! computed positions.

#[cfg(test)]
pub(crate) mod fixtures;
mod indexed;
mod node;
mod snapshot;

pub use indexed::{IndexedNode, IndexedTree};
pub use node::{BinaryNode, NodeId, Side};
pub use snapshot::{Label, SnapshotNode, TreeSnapshot};
