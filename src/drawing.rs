//! The drawing object: a laid-out tree ready for a renderer.
//!
//! A [`TreeDrawing`] snapshots the caller's tree, runs the layout once and
//! keeps the snapshot with its positions and bounds. Rendering is left to a
//! [`DrawingSink`], which receives the bounds, the edges and the nodes and
//! does its own scaling into device space.

use log::debug;
use serde::Serialize;

use crate::config::DrawingConfig;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::layout::{LayoutEngine, bounds_for, place_nodes};
use crate::spatial::SpatialIndex;
use crate::tree::{BinaryNode, NodeId, SnapshotNode, TreeSnapshot};

/// Receiver of a drawing, implemented by the rendering side.
pub trait DrawingSink {
    /// Called once before anything else with the drawing's bounds.
    fn begin(&mut self, _bounds: Rect, _node_radius: f64) {}

    /// A parent→child connection between two node centers.
    fn edge(&mut self, from: Point, to: Point);

    /// A node circle with its label.
    fn node(&mut self, center: Point, radius: f64, label: &str);
}

/// A node as handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct PlacedNode<'d, 't> {
    pub id: NodeId,
    pub center: Point,
    pub radius: f64,
    node: &'d SnapshotNode<'t>,
}

impl<'d> PlacedNode<'d, '_> {
    /// The node's label, produced on first access.
    pub fn label(&self) -> &'d str {
        self.node.label()
    }
}

/// Owned, serializable form of a drawing with every label evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingOutput {
    pub node_radius: f64,
    pub bounds: Rect,
    pub nodes: Vec<RenderNode>,
    /// `[parent, child]` id pairs.
    pub edges: Vec<[u32; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl DrawingOutput {
    /// Rewrite every node id through `map`.
    pub fn map_ids(mut self, map: impl Fn(u32) -> u32) -> Self {
        for node in &mut self.nodes {
            node.id = map(node.id);
        }
        for edge in &mut self.edges {
            *edge = [map(edge[0]), map(edge[1])];
        }
        self
    }
}

/// A laid-out binary tree.
#[derive(Debug)]
pub struct TreeDrawing<'t> {
    snapshot: TreeSnapshot<'t>,
    config: DrawingConfig,
    bounds: Rect,
}

impl Default for TreeDrawing<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'t> TreeDrawing<'t> {
    /// A drawing with nothing in it.
    pub fn empty() -> Self {
        Self {
            snapshot: TreeSnapshot::empty(),
            config: DrawingConfig::default(),
            bounds: Rect::ZERO,
        }
    }

    /// Draw `root` with empty labels and the default config.
    pub fn new<N>(root: Option<N>) -> Self
    where
        N: BinaryNode + 't,
    {
        Self::with_labeler(root, |_: &N| String::new())
    }

    /// Draw `root`, labelling each node with `labeler`.
    pub fn with_labeler<N, L>(root: Option<N>, labeler: L) -> Self
    where
        N: BinaryNode + 't,
        L: Fn(&N) -> String + 't,
    {
        Self::build(root, labeler, DrawingConfig::default())
    }

    /// Draw `root` with a custom config.
    pub fn with_config<N, L>(root: Option<N>, labeler: L, config: DrawingConfig) -> Result<Self>
    where
        N: BinaryNode + 't,
        L: Fn(&N) -> String + 't,
    {
        config.validate()?;
        Ok(Self::build(root, labeler, config))
    }

    fn build<N, L>(root: Option<N>, labeler: L, config: DrawingConfig) -> Self
    where
        N: BinaryNode + 't,
        L: Fn(&N) -> String + 't,
    {
        let snapshot = TreeSnapshot::convert(root, labeler);
        let bounds = Self::perform_layout(&snapshot, &config);
        Self {
            snapshot,
            config,
            bounds,
        }
    }

    fn perform_layout(snapshot: &TreeSnapshot<'t>, config: &DrawingConfig) -> Rect {
        let threaded = LayoutEngine::new(config.min_separation).lay_out_tree(snapshot);
        let placed = place_nodes(snapshot, &threaded, config.vertical_spacing);
        let bounds = bounds_for(snapshot, config.node_radius);

        debug!(
            "laid out {placed} nodes with {} merges, bounds {}x{}",
            threaded.merge_count(),
            bounds.width,
            bounds.height
        );

        bounds
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    pub fn node_radius(&self) -> f64 {
        self.config.node_radius
    }

    /// Smallest rectangle containing every node circle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn snapshot(&self) -> &TreeSnapshot<'t> {
        &self.snapshot
    }

    pub fn position_of(&self, id: NodeId) -> Option<Point> {
        self.snapshot.node(id).and_then(SnapshotNode::position)
    }

    /// Every node in preorder.
    pub fn nodes(&self) -> impl Iterator<Item = PlacedNode<'_, 't>> {
        let radius = self.config.node_radius;
        self.snapshot.iter().filter_map(move |(id, node)| {
            Some(PlacedNode {
                id,
                center: node.position()?,
                radius,
                node,
            })
        })
    }

    /// Every parent→child pair as node centers.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.snapshot
            .edges()
            .filter_map(|(parent, child)| Some((self.position_of(parent)?, self.position_of(child)?)))
    }

    /// Hand the drawing to a renderer: bounds, then edges, then nodes so
    /// circles are painted over the lines.
    pub fn draw<S: DrawingSink + ?Sized>(&self, sink: &mut S) {
        sink.begin(self.bounds, self.config.node_radius);
        for (from, to) in self.edges() {
            sink.edge(from, to);
        }
        for node in self.nodes() {
            sink.node(node.center, node.radius, node.label());
        }
    }

    /// Spatial index over node centers.
    pub fn spatial_index(&self) -> SpatialIndex {
        SpatialIndex::build(self.nodes().map(|node| (node.id, node.center)))
    }

    /// Owned copy with labels evaluated, for serialization.
    pub fn output(&self) -> DrawingOutput {
        DrawingOutput {
            node_radius: self.config.node_radius,
            bounds: self.bounds,
            nodes: self
                .nodes()
                .map(|node| RenderNode {
                    id: node.id.raw(),
                    x: node.center.x,
                    y: node.center.y,
                    label: node.label().to_owned(),
                })
                .collect(),
            edges: self
                .snapshot
                .edges()
                .map(|(parent, child)| [parent.raw(), child.raw()])
                .collect(),
        }
    }
}
