//! Placement pass: relative offsets to absolute coordinates.

use log::warn;

use super::threaded::ThreadedTree;
use crate::geometry::Point;
use crate::tree::{NodeId, TreeSnapshot};

/// Walk the snapshot and the threaded layout together, writing an absolute
/// position into every snapshot node.
///
/// The root lands on the origin. X accumulates the child offsets from the
/// root down; each level sits `vertical_spacing` below its parent.
///
/// Returns the number of nodes placed.
pub fn place_nodes(snapshot: &TreeSnapshot<'_>, threaded: &ThreadedTree, vertical_spacing: f64) -> usize {
    debug_assert_eq!(snapshot.len(), threaded.len());

    let Some(root) = snapshot.root() else {
        return 0;
    };

    let mut placed = 0;
    let mut stack: Vec<(NodeId, Point)> = vec![(root, Point::ORIGIN)];

    while let Some((id, point)) = stack.pop() {
        let Some(node) = snapshot.node(id) else {
            continue;
        };

        if node.set_position(point) {
            placed += 1;
        } else {
            warn!("{id} was already placed, keeping its first position");
        }

        let child_y = point.y + vertical_spacing;
        let (left, right) = threaded.child_offsets(id);
        for (child, offset) in right.into_iter().chain(left) {
            stack.push((child, Point::new(point.x + offset, child_y)));
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::tree::fixtures::{TestNode, leaf, left_chain, node};

    fn placed(tree: Option<&TestNode>) -> Vec<(String, Point)> {
        let snapshot = TreeSnapshot::convert(tree, |n| n.name.clone());
        let threaded = LayoutEngine::new(2.0).lay_out_tree(&snapshot);
        assert_eq!(place_nodes(&snapshot, &threaded, 3.0), snapshot.len());

        snapshot
            .iter()
            .map(|(_, n)| (n.label().to_owned(), n.position().unwrap()))
            .collect()
    }

    #[test]
    fn test_empty_tree_places_nothing() {
        assert!(placed(None).is_empty());
    }

    #[test]
    fn test_root_at_origin() {
        let tree = leaf("a");
        assert_eq!(placed(Some(&tree)), [("a".to_owned(), Point::ORIGIN)]);
    }

    #[test]
    fn test_two_children() {
        let tree = node("a", Some(leaf("b")), Some(leaf("c")));
        let positions = placed(Some(&tree));
        assert_eq!(positions[0].1, Point::new(0.0, 0.0));
        assert_eq!(positions[1].1, Point::new(-1.0, 3.0));
        assert_eq!(positions[2].1, Point::new(1.0, 3.0));
    }

    #[test]
    fn test_chain_is_vertical() {
        let tree = left_chain(5).unwrap();
        for (depth, (_, point)) in placed(Some(&tree)).into_iter().enumerate() {
            assert_eq!(point, Point::new(0.0, depth as f64 * 3.0));
        }
    }

    #[test]
    fn test_offsets_accumulate() {
        //        a
        //       / \
        //      b   c
        //     / \
        //    d   e
        let tree = node(
            "a",
            Some(node("b", Some(leaf("d")), Some(leaf("e")))),
            Some(leaf("c")),
        );
        let positions = placed(Some(&tree));
        // Level 1 needs 2, level 2 has nothing on the right: b at -1, c at +1.
        let b = positions[1].1;
        let d = positions[2].1;
        let e = positions[3].1;
        assert_eq!(b, Point::new(-1.0, 3.0));
        assert_eq!(d, Point::new(-2.0, 6.0));
        assert_eq!(e, Point::new(0.0, 6.0));
    }

    #[test]
    fn test_second_placement_keeps_first_positions() {
        let tree = node("a", Some(leaf("b")), None);
        let snapshot = TreeSnapshot::convert(Some(&tree), |n| n.name.clone());
        let threaded = LayoutEngine::new(2.0).lay_out_tree(&snapshot);

        assert_eq!(place_nodes(&snapshot, &threaded, 1.0), 2);
        assert_eq!(place_nodes(&snapshot, &threaded, 5.0), 0);
        assert_eq!(
            snapshot.node(NodeId(1)).and_then(|n| n.position()),
            Some(Point::new(0.0, 1.0))
        );
    }
}
