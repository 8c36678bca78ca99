//! R-tree over placed node centers, using the rstar crate.
//!
//! Lets a renderer cull to a viewport without scanning every node:
//! - Rectangle intersection
//! - Nearest node
//! - Point-in-radius

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::geometry::{Point, Rect};
use crate::tree::NodeId;

/// A placed node center with its id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl NodePoint {
    pub fn new(id: NodeId, point: Point) -> Self {
        Self {
            id,
            x: point.x,
            y: point.y,
        }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the node centers of one drawing.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Bulk-load the index from `(id, center)` pairs.
    pub fn build(points: impl IntoIterator<Item = (NodeId, Point)>) -> Self {
        let node_points: Vec<_> = points
            .into_iter()
            .map(|(id, point)| NodePoint::new(id, point))
            .collect();

        Self {
            tree: RTree::bulk_load(node_points),
        }
    }

    /// Nodes whose center lies inside `rect`.
    pub fn in_rect(&self, rect: Rect) -> Vec<NodeId> {
        let envelope = AABB::from_corners([rect.x, rect.y], [rect.max_x(), rect.max_y()]);
        let mut ids: Vec<NodeId> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|point| point.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Nodes whose circle of `node_radius` touches `rect`.
    pub fn touching_rect(&self, rect: Rect, node_radius: f64) -> Vec<NodeId> {
        self.in_rect(Rect::new(
            rect.x - node_radius,
            rect.y - node_radius,
            rect.width + 2.0 * node_radius,
            rect.height + 2.0 * node_radius,
        ))
    }

    /// The node closest to `point`.
    pub fn nearest(&self, point: Point) -> Option<NodeId> {
        self.tree
            .nearest_neighbor(&[point.x, point.y])
            .map(|node| node.id)
    }

    /// Nodes within `radius` of `point`.
    pub fn in_radius(&self, point: Point, radius: f64) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .tree
            .locate_within_distance([point.x, point.y], radius * radius)
            .map(|node| node.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
