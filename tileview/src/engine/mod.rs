//! Interface of the map rendering engine the viewer is built on.
//!
//! The viewer does not draw anything itself. It asks the engine which features are rendered
//! under the pointer, stores highlight state on features, and switches layers on and off. Any
//! renderer that can do these things can back a [`Viewer`](crate::viewer::Viewer) by implementing
//! [`RenderingEngine`]. [`MemoryEngine`] is a headless implementation.

use geo_types::Point;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::TileviewError;
use crate::feature::{FeatureKey, RenderedFeature};
use crate::style::StyleLayer;

mod memory;
mod view;

pub use memory::MemoryEngine;
pub use view::MapView;

/// Pointer affordance shown over the map surface.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    /// Platform default cursor.
    #[default]
    Default,
    /// Hand cursor, shown while hovering over a selectable feature.
    Pointer,
}

/// Per-feature state the engine uses in style expressions.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureState {
    /// The feature is highlighted (hovered or pinned).
    pub hover: bool,
}

impl FeatureState {
    /// State of a highlighted feature.
    pub const HIGHLIGHTED: FeatureState = FeatureState { hover: true };
    /// State of a feature that is not highlighted.
    pub const CLEARED: FeatureState = FeatureState { hover: false };
}

/// Axis aligned rectangle in screen pixels, from the top-left corner of the map surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelBox {
    /// Top-left corner.
    pub min: Point2<f64>,
    /// Bottom-right corner.
    pub max: Point2<f64>,
}

impl PixelBox {
    /// Creates a new box from two opposite corners.
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Square box of `2 * tolerance` pixels centered at `center`.
    pub fn around(center: Point2<f64>, tolerance: f64) -> Self {
        Self {
            min: Point2::new(center.x - tolerance, center.y - tolerance),
            max: Point2::new(center.x + tolerance, center.y + tolerance),
        }
    }

    /// Returns true if the point is inside the box or on its border.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Map rendering engine used by the viewer.
pub trait RenderingEngine {
    /// Features rendered in the given screen area by any of the listed style layers.
    ///
    /// Layers that do not exist or are hidden are ignored. The order of the returned features is
    /// engine specific, but must be deterministic: it is used to order features at equal distance
    /// from the cursor.
    fn query_features_near(&self, area: &PixelBox, layer_ids: &[String]) -> Vec<RenderedFeature>;

    /// Sets the state of a feature.
    fn set_feature_state(&mut self, key: &FeatureKey, state: FeatureState);

    /// Current state of a feature. Features that never had their state set have the default one.
    fn feature_state(&self, key: &FeatureKey) -> FeatureState;

    /// Adds a style layer on top of the existing ones.
    fn add_layer(&mut self, layer: StyleLayer) -> Result<(), TileviewError>;

    /// Ids of all style layers in rendering order.
    fn layer_ids(&self) -> Vec<String>;

    /// Returns true if a layer with the given id exists.
    fn has_layer(&self, layer_id: &str) -> bool {
        self.layer_ids().iter().any(|id| id == layer_id)
    }

    /// Shows or hides a style layer.
    fn set_layer_visibility(&mut self, layer_id: &str, visible: bool) -> Result<(), TileviewError>;

    /// Returns true if the layer exists and is visible.
    fn is_layer_visible(&self, layer_id: &str) -> bool;

    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Geographic position of a screen pixel, if the pixel shows a part of the map.
    fn screen_to_lonlat(&self, position: Point2<f64>) -> Option<Point<f64>>;

    /// Changes the pointer affordance over the map surface.
    fn set_cursor(&mut self, cursor: CursorStyle);
}
