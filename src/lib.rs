//! Tree Drawing - WASM Module
//!
//! Computes compact, non-overlapping drawings of binary trees. The layout is
//! a hull-threaded merge that runs in time linear in the number of nodes.
//! Rendering is not done here: the result is a set of node centers with a
//! shared radius and labels, plus one bounding rectangle, for a renderer to
//! scale into its own drawing area.
//!
//! # Architecture
//!
//! - `tree`: input contract, flat-array trees and the arena snapshot
//! - `layout`: hull-threaded layout, placement and bounds passes
//! - `drawing`: the drawing object and the renderer seam
//! - `spatial`: R-tree over placed nodes for viewport queries
//!
//! The wasm-bindgen API below takes a tree as flat child-index arrays and
//! exposes the drawing to JavaScript.

use js_sys::Float64Array;
use log::LevelFilter;
use wasm_bindgen::prelude::*;

pub mod config;
mod console;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod spatial;
pub mod tree;

pub use config::DrawingConfig;
pub use drawing::{DrawingOutput, DrawingSink, PlacedNode, RenderNode, TreeDrawing};
pub use error::{DrawingError, Result};
pub use geometry::{Point, Rect};
pub use spatial::SpatialIndex;
pub use tree::{BinaryNode, IndexedNode, IndexedTree, NodeId, TreeSnapshot};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::install(LevelFilter::Warn);
}

/// Set the console log level ("off", "error", "warn", "info", "debug", "trace").
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> std::result::Result<(), JsValue> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| DrawingError::Js(format!("unknown log level: {level}")))?;
    console::install(filter);
    Ok(())
}

/// A laid-out tree exposed to JavaScript.
///
/// Node references on this API are slots of the input arrays.
#[wasm_bindgen]
pub struct TreeDrawingWasm {
    /// Drawing data with ids rewritten to input slots.
    output: DrawingOutput,
    /// Interleaved `[x0, y0, x1, y1, ...]` per slot, NaN when unreachable.
    positions: Vec<f64>,
    /// Index into `output.nodes` per slot.
    node_of_slot: Vec<Option<usize>>,
    /// Snapshot id → slot.
    slots: Vec<u32>,
    spatial: SpatialIndex,
}

#[wasm_bindgen]
impl TreeDrawingWasm {
    /// Lay out a tree given as flat arrays.
    ///
    /// # Arguments
    ///
    /// * `left` / `right` - Child slot per node, -1 for none
    /// * `root` - Root slot, -1 for the empty tree
    /// * `labels` - Array of strings, one per slot, or undefined
    /// * `config` - `{ nodeRadius, minSeparation, verticalSpacing }`, any key
    ///   may be omitted, or undefined for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(
        left: &[i32],
        right: &[i32],
        root: i32,
        labels: JsValue,
        config: JsValue,
    ) -> std::result::Result<TreeDrawingWasm, JsValue> {
        let labels: Option<Vec<String>> =
            serde_wasm_bindgen::from_value(labels).map_err(DrawingError::from)?;
        let config: Option<DrawingConfig> =
            serde_wasm_bindgen::from_value(config).map_err(DrawingError::from)?;

        Ok(Self::from_arrays(
            left,
            right,
            root,
            labels,
            config.unwrap_or_default(),
        )?)
    }

    /// Number of nodes reachable from the root.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.output.nodes.len() as u32
    }

    /// Radius shared by every node.
    #[wasm_bindgen(js_name = nodeRadius)]
    pub fn node_radius(&self) -> f64 {
        self.output.node_radius
    }

    /// Bounding rectangle as `[x, y, width, height]`.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Vec<f64> {
        let bounds = self.output.bounds;
        vec![bounds.x, bounds.y, bounds.width, bounds.height]
    }

    /// Node centers as `[x0, y0, x1, y1, ...]`, one pair per input slot.
    /// Slots not reachable from the root are NaN.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float64Array {
        Float64Array::from(&self.positions[..])
    }

    /// Label of a slot, or undefined if the slot is not drawn.
    #[wasm_bindgen(js_name = getLabel)]
    pub fn get_label(&self, slot: u32) -> Option<String> {
        self.node(slot).map(|node| node.label.clone())
    }

    /// Parent→child pairs as `[parent0, child0, parent1, child1, ...]`.
    #[wasm_bindgen(js_name = getEdges)]
    pub fn get_edges(&self) -> Vec<u32> {
        self.output.edges.iter().flatten().copied().collect()
    }

    /// Slots whose circle may intersect the given rectangle.
    #[wasm_bindgen(js_name = findNodesInRect)]
    pub fn find_nodes_in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<u32> {
        let rect = Rect::from_corners(min_x, min_y, max_x, max_y);
        self.nodes_touching(rect)
    }

    /// The whole drawing as a plain object
    /// `{ nodeRadius, bounds, nodes: [{ id, x, y, label }], edges }`.
    #[wasm_bindgen(js_name = toJs)]
    pub fn to_js(&self) -> std::result::Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.output).map_err(DrawingError::from)?)
    }
}

impl TreeDrawingWasm {
    /// Build from Rust values. Used by the constructor and by native tests.
    pub fn from_arrays(
        left: &[i32],
        right: &[i32],
        root: i32,
        labels: Option<Vec<String>>,
        config: DrawingConfig,
    ) -> Result<Self> {
        let tree = IndexedTree::new(left, right, root, labels)?;
        let drawing = TreeDrawing::with_config(tree.root_node(), |node| node.label().to_owned(), config)?;

        // Snapshot ids are preorder positions; this maps them back to slots.
        let slots = tree.preorder();

        let mut positions = vec![f64::NAN; tree.len() * 2];
        for node in drawing.nodes() {
            let slot = slots[node.id.index()] as usize;
            positions[slot * 2] = node.center.x;
            positions[slot * 2 + 1] = node.center.y;
        }

        let spatial = drawing.spatial_index();
        let output = drawing.output().map_ids(|id| slots[id as usize]);

        let mut node_of_slot = vec![None; tree.len()];
        for (index, node) in output.nodes.iter().enumerate() {
            node_of_slot[node.id as usize] = Some(index);
        }

        Ok(Self {
            output,
            positions,
            node_of_slot,
            slots,
            spatial,
        })
    }

    pub fn output(&self) -> &DrawingOutput {
        &self.output
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    fn node(&self, slot: u32) -> Option<&RenderNode> {
        let index = (*self.node_of_slot.get(slot as usize)?)?;
        self.output.nodes.get(index)
    }

    /// Slots of the nodes whose circle may touch `rect`, ascending.
    pub fn nodes_touching(&self, rect: Rect) -> Vec<u32> {
        let mut slots: Vec<u32> = self
            .spatial
            .touching_rect(rect, self.output.node_radius)
            .into_iter()
            .map(|id| self.slots[id.index()])
            .collect();
        slots.sort_unstable();
        slots
    }
}
