//! Spatial indexing of placed nodes.
//!
//! This module provides an R-tree based spatial index so a renderer can ask
//! which nodes fall inside its visible region.

mod rtree;

pub use rtree::SpatialIndex;
