//! Layout of binary trees.
//!
//! The layout runs in three passes over a [`TreeSnapshot`](crate::tree::TreeSnapshot):
//! the hull-threaded engine computes each node's offset from its parent,
//! placement turns those offsets into absolute positions stored in the
//! snapshot, and the bounds pass measures the result for scale-to-fit
//! rendering.

pub mod bounds;
pub mod placement;
pub mod threaded;

pub use bounds::bounds_for;
pub use placement::place_nodes;
pub use threaded::{LayoutEngine, ThreadedTree};
