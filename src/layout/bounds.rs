//! Bounding rectangle of a placed tree.

use crate::geometry::Rect;
use crate::tree::TreeSnapshot;

/// Smallest rectangle containing every placed node's circle.
///
/// Nodes without a position are skipped. The empty tree gets [`Rect::ZERO`].
pub fn bounds_for(snapshot: &TreeSnapshot<'_>, node_radius: f64) -> Rect {
    let mut positions = snapshot.nodes().iter().filter_map(|node| node.position());

    let Some(first) = positions.next() else {
        return Rect::ZERO;
    };

    let (min_x, min_y, max_x, max_y) = positions.fold(
        (first.x, first.y, first.x, first.y),
        |(min_x, min_y, max_x, max_y), p| (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)),
    );

    Rect::from_corners(
        min_x - node_radius,
        min_y - node_radius,
        max_x + node_radius,
        max_y + node_radius,
    )
}
