//! Error types for the boundaries of the drawing pipeline.
//!
//! The layout itself cannot fail. Errors only come from validating a
//! caller-supplied configuration or a flat-array tree handed over from
//! JavaScript.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawingError {
    #[error("{field} must be finite and positive, got {value}")]
    InvalidSpacing { field: &'static str, value: f64 },

    #[error("minimum separation {separation} is smaller than the node diameter {diameter}")]
    SeparationTooSmall { separation: f64, diameter: f64 },

    #[error("left and right arrays differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("label array has {labels} entries but the tree has {nodes} nodes")]
    LabelCountMismatch { labels: usize, nodes: usize },

    #[error("node {parent} references child {child}, outside 0..{len}")]
    ChildOutOfRange { parent: usize, child: i32, len: usize },

    #[error("root index {root} is outside 0..{len}")]
    RootOutOfRange { root: i32, len: usize },

    #[error("node {child} has more than one parent")]
    MultipleParents { child: usize },

    #[error("root {root} is referenced as a child")]
    RootHasParent { root: usize },

    #[error("invalid value from JavaScript: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, DrawingError>;

impl From<serde_wasm_bindgen::Error> for DrawingError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        DrawingError::Js(err.to_string())
    }
}

impl From<DrawingError> for wasm_bindgen::JsValue {
    fn from(err: DrawingError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
