//! Document model: the canvas, its ordered layers and the geometry they use.
//!
//! ## Module Structure
//!
//! - [`geometry`] - Document/view coordinate conversion and rotation-aware containment
//! - [`layer`] - Layer sum type (image or text), colors, alignment, labels
//! - [`store`] - The ordered layer store and canvas size

pub mod geometry;
mod layer;
mod store;

pub use geometry::LayerRect;
pub use layer::{ImageLayer, Layer, LayerKind, Rgb, TextAlignment, TextLayer};
pub use store::{selection_after_remove, CanvasSize, Document};
