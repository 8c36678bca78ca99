//! Property tests for the tree layout over random binary search trees.

#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use tree_drawing_wasm::{DrawingConfig, TreeDrawingWasm};

const EPS: f64 = 1e-9;

/// Flat child arrays of the BST obtained by inserting `keys` in order.
/// Duplicate keys are dropped.
#[derive(Debug, Clone)]
struct ArrayTree {
    left: Vec<i32>,
    right: Vec<i32>,
    root: i32,
}

fn bst(keys: &[u32]) -> ArrayTree {
    let mut tree = ArrayTree {
        left: Vec::new(),
        right: Vec::new(),
        root: -1,
    };
    let mut stored: Vec<u32> = Vec::new();

    for &key in keys {
        if stored.contains(&key) {
            continue;
        }
        let slot = stored.len() as i32;
        stored.push(key);
        tree.left.push(-1);
        tree.right.push(-1);

        if tree.root < 0 {
            tree.root = slot;
            continue;
        }
        let mut at = tree.root as usize;
        loop {
            let next = if key < stored[at] {
                &mut tree.left[at]
            } else {
                &mut tree.right[at]
            };
            if *next < 0 {
                *next = slot;
                break;
            }
            at = *next as usize;
        }
    }
    tree
}

fn mirror(tree: &ArrayTree) -> ArrayTree {
    ArrayTree {
        left: tree.right.clone(),
        right: tree.left.clone(),
        root: tree.root,
    }
}

fn lay_out(tree: &ArrayTree, config: DrawingConfig) -> TreeDrawingWasm {
    TreeDrawingWasm::from_arrays(&tree.left, &tree.right, tree.root, None, config).unwrap()
}

fn config_strategy() -> impl Strategy<Value = DrawingConfig> {
    (0.1f64..2.0, 1.0f64..3.0, 0.5f64..5.0).prop_map(|(radius, factor, vertical)| {
        DrawingConfig::default()
            .with_node_radius(radius)
            .with_min_separation(2.0 * radius * factor)
            .with_vertical_spacing(vertical)
    })
}

proptest! {
    #[test]
    fn every_node_is_placed(keys in proptest::collection::vec(0u32..1000, 0..64)) {
        let tree = bst(&keys);
        let drawing = lay_out(&tree, DrawingConfig::default());

        prop_assert_eq!(drawing.node_count() as usize, tree.left.len());
        prop_assert!(drawing.positions().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn nodes_on_a_level_keep_their_distance(
        keys in proptest::collection::vec(0u32..1000, 0..64),
        config in config_strategy(),
    ) {
        let drawing = lay_out(&bst(&keys), config);
        let positions = drawing.positions();

        let mut points: Vec<(f64, f64)> = positions.chunks(2).map(|p| (p[1], p[0])).collect();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in points.windows(2) {
            let ((y0, x0), (y1, x1)) = (pair[0], pair[1]);
            if y0 == y1 {
                prop_assert!(
                    x1 - x0 >= config.min_separation - EPS,
                    "nodes at y={} only {} apart", y0, x1 - x0
                );
            }
        }
    }

    #[test]
    fn children_sit_one_level_below_parents(
        keys in proptest::collection::vec(0u32..1000, 1..64),
        config in config_strategy(),
    ) {
        let drawing = lay_out(&bst(&keys), config);
        let positions = drawing.positions();

        for pair in drawing.get_edges().chunks(2) {
            let (parent, child) = (pair[0] as usize, pair[1] as usize);
            prop_assert_eq!(
                positions[child * 2 + 1],
                positions[parent * 2 + 1] + config.vertical_spacing
            );
        }
    }

    #[test]
    fn bounds_contain_every_circle(
        keys in proptest::collection::vec(0u32..1000, 1..64),
        config in config_strategy(),
    ) {
        let drawing = lay_out(&bst(&keys), config);
        let bounds = drawing.get_bounds();
        let (x, y, width, height) = (bounds[0], bounds[1], bounds[2], bounds[3]);
        let r = config.node_radius;

        let mut touches_left = false;
        let mut touches_right = false;
        for p in drawing.positions().chunks(2) {
            prop_assert!(p[0] - r >= x - EPS && p[0] + r <= x + width + EPS);
            prop_assert!(p[1] - r >= y - EPS && p[1] + r <= y + height + EPS);
            touches_left |= (p[0] - r - x).abs() < EPS;
            touches_right |= (p[0] + r - (x + width)).abs() < EPS;
        }
        prop_assert!(touches_left && touches_right);
        prop_assert!((y + r).abs() < EPS);
    }

    #[test]
    fn layout_is_deterministic(keys in proptest::collection::vec(0u32..1000, 0..64)) {
        let tree = bst(&keys);
        let first = lay_out(&tree, DrawingConfig::default());
        let second = lay_out(&tree, DrawingConfig::default());

        let bits = |d: &TreeDrawingWasm| d.positions().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&first), bits(&second));
        prop_assert_eq!(first.get_bounds(), second.get_bounds());
    }

    #[test]
    fn mirrored_tree_is_mirrored_drawing(keys in proptest::collection::vec(0u32..1000, 0..64)) {
        let tree = bst(&keys);
        let drawing = lay_out(&tree, DrawingConfig::default());
        let mirrored = lay_out(&mirror(&tree), DrawingConfig::default());

        for (p, q) in drawing.positions().chunks(2).zip(mirrored.positions().chunks(2)) {
            prop_assert!((p[0] + q[0]).abs() < EPS, "x {} vs mirrored {}", p[0], q[0]);
            prop_assert_eq!(p[1], q[1]);
        }
    }
}

#[test]
fn empty_tree_has_zero_bounds() {
    let drawing = lay_out(&bst(&[]), DrawingConfig::default());
    assert_eq!(drawing.node_count(), 0);
    assert_eq!(drawing.get_bounds(), [0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn sorted_keys_make_a_straight_chain() {
    let keys: Vec<u32> = (0..50).collect();
    let drawing = lay_out(&bst(&keys), DrawingConfig::default());

    // Every node is a right child placed directly below its parent.
    for (depth, p) in drawing.positions().chunks(2).enumerate() {
        assert_eq!(p[0], 0.0);
        assert_eq!(p[1], depth as f64 * 2.0);
    }
}
