//! Tileview is an inspector for vector tile services. Given a TileJSON descriptor it styles every
//! vector layer with its own color, builds a legend to toggle the layers, and lets the user
//! inspect the features under the pointer.
//!
//! # Main components
//!
//! * [`Viewer`] ties everything together. It is created from a [`TileJson`](tilejson::TileJson)
//!   descriptor, a [`RenderingEngine`](engine::RenderingEngine) and an
//!   [`InfoPanel`](info_panel::InfoPanel).
//! * [`style`] generates six style layers per vector layer: polygon fills, lines, point circles and
//!   name labels for each geometry family.
//! * [`selection`] decides which features are selected: features of the highest priority geometry
//!   family (points, then lines, then polygons) ordered by geodesic distance to the pointer. The
//!   hover/pin behavior is a pure state machine,
//!   [`InteractionState`](selection::InteractionState).
//! * [`control`] converts raw input into user events, detects clicks and runs the
//!   [`FeatureInspector`](control::FeatureInspector), which applies the selection to the engine and
//!   the info panel.
//! * [`legend`] and [`zoom`] keep the state of the legend checkboxes and the zoom indicator.
//!
//! The crate does not render anything itself. [`MemoryEngine`](engine::MemoryEngine) is a headless
//! engine that can be used in tests and command line tools.

pub mod catalog;
pub mod color;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod feature;
pub mod info_panel;
pub mod legend;
pub mod selection;
pub mod style;
pub mod tilejson;
pub mod viewer;
pub mod zoom;

#[cfg(test)]
mod tests;

pub use catalog::LayerCatalog;
pub use color::Color;
pub use config::{LabelConfig, ViewerConfig};
pub use error::TileviewError;
pub use feature::{ExternalRef, FeatureKey, RenderedFeature};
pub use viewer::Viewer;

pub use tileview_types;
