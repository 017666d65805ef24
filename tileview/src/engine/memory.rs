use std::collections::HashMap;

use geo::Intersects;
use geo_types::Point;
use nalgebra::Point2;

use super::{CursorStyle, FeatureState, MapView, PixelBox, RenderingEngine};
use crate::error::TileviewError;
use crate::feature::{FeatureKey, RenderedFeature};
use crate::style::StyleLayer;

#[derive(Debug, Clone)]
struct LayerEntry {
    layer: StyleLayer,
    visible: bool,
}

/// Headless [`RenderingEngine`] keeping all features in memory.
///
/// A feature is rendered by every style layer whose source, source layer and filter match it.
/// Queries return features of the topmost layers first, and inside one layer in the order the
/// features were added.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    view: MapView,
    layers: Vec<LayerEntry>,
    features: Vec<RenderedFeature>,
    states: HashMap<FeatureKey, FeatureState>,
    cursor: CursorStyle,
}

impl MemoryEngine {
    /// Creates an empty engine with the given view.
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    /// Current view.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Changes the view.
    pub fn set_view(&mut self, view: MapView) {
        self.view = view;
    }

    /// Adds a feature to the data the engine renders.
    pub fn add_feature(&mut self, feature: RenderedFeature) {
        self.features.push(feature);
    }

    /// Adds features to the data the engine renders.
    pub fn add_features(&mut self, features: impl IntoIterator<Item = RenderedFeature>) {
        self.features.extend(features);
    }

    /// Returns the engine with the features added.
    pub fn with_features(mut self, features: impl IntoIterator<Item = RenderedFeature>) -> Self {
        self.add_features(features);
        self
    }

    /// Style layer by id.
    pub fn layer(&self, layer_id: &str) -> Option<&StyleLayer> {
        self.entry(layer_id).map(|entry| &entry.layer)
    }

    /// Current pointer affordance.
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Keys of all features that are currently highlighted.
    pub fn highlighted(&self) -> Vec<FeatureKey> {
        let mut keys: Vec<FeatureKey> = self
            .states
            .iter()
            .filter(|(_, state)| state.hover)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    fn entry(&self, layer_id: &str) -> Option<&LayerEntry> {
        self.layers.iter().find(|entry| entry.layer.id == layer_id)
    }
}

impl RenderingEngine for MemoryEngine {
    fn query_features_near(&self, area: &PixelBox, layer_ids: &[String]) -> Vec<RenderedFeature> {
        let Some(rect) = self.view.screen_box_to_rect(area) else {
            return vec![];
        };

        let mut found = vec![];
        for entry in self.layers.iter().rev() {
            if !entry.visible || !layer_ids.contains(&entry.layer.id) {
                continue;
            }

            found.extend(
                self.features
                    .iter()
                    .filter(|feature| entry.layer.draws(feature))
                    .filter(|feature| feature.geometry.intersects(&rect))
                    .cloned(),
            );
        }

        found
    }

    fn set_feature_state(&mut self, key: &FeatureKey, state: FeatureState) {
        if state == FeatureState::default() {
            self.states.remove(key);
        } else {
            self.states.insert(key.clone(), state);
        }
    }

    fn feature_state(&self, key: &FeatureKey) -> FeatureState {
        self.states.get(key).copied().unwrap_or_default()
    }

    fn add_layer(&mut self, layer: StyleLayer) -> Result<(), TileviewError> {
        if self.has_layer(&layer.id) {
            return Err(TileviewError::LayerExists(layer.id));
        }

        self.layers.push(LayerEntry {
            layer,
            visible: true,
        });
        Ok(())
    }

    fn layer_ids(&self) -> Vec<String> {
        self.layers.iter().map(|entry| entry.layer.id.clone()).collect()
    }

    fn has_layer(&self, layer_id: &str) -> bool {
        self.entry(layer_id).is_some()
    }

    fn set_layer_visibility(&mut self, layer_id: &str, visible: bool) -> Result<(), TileviewError> {
        let entry = self
            .layers
            .iter_mut()
            .find(|entry| entry.layer.id == layer_id)
            .ok_or_else(|| TileviewError::LayerNotFound(layer_id.to_string()))?;
        entry.visible = visible;
        Ok(())
    }

    fn is_layer_visible(&self, layer_id: &str) -> bool {
        self.entry(layer_id).is_some_and(|entry| entry.visible)
    }

    fn zoom(&self) -> f64 {
        self.view.zoom()
    }

    fn screen_to_lonlat(&self, position: Point2<f64>) -> Option<Point<f64>> {
        self.view.screen_to_lonlat(position)
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use geo_types::line_string;
    use tileview_types::lonlat;

    use super::*;
    use crate::catalog::LayerCatalog;
    use crate::config::ViewerConfig;
    use crate::style::build_style_layers;

    fn engine() -> MemoryEngine {
        let mut engine =
            MemoryEngine::new(MapView::new(lonlat!(0.0, 0.0), 10.0).with_size(800.0, 600.0));
        let catalog = LayerCatalog::new(["roads", "pois"]);
        for layer in build_style_layers(&catalog, &ViewerConfig::default()) {
            engine.add_layer(layer).unwrap();
        }

        engine.with_features([
            RenderedFeature::new(
                line_string![(x: -1.0, y: 0.0), (x: 1.0, y: 0.0)],
                "sourdough",
                "roads",
            )
            .with_id(12),
            RenderedFeature::new(lonlat!(0.0, 0.0), "sourdough", "pois").with_id(21),
            RenderedFeature::new(lonlat!(0.5, 0.5), "sourdough", "pois").with_id(31),
        ])
    }

    fn all_queryable() -> Vec<String> {
        ["roads", "pois"]
            .iter()
            .flat_map(|layer| {
                ["polygons", "lines", "points"]
                    .iter()
                    .map(move |suffix| format!("sourdough_{layer}_{suffix}"))
            })
            .collect()
    }

    #[test]
    fn query_returns_features_near_pointer() {
        let engine = engine();
        let area = PixelBox::around(Point2::new(400.0, 300.0), 5.0);
        let features = engine.query_features_near(&area, &all_queryable());

        let ids: Vec<_> = features.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![Some(21), Some(12)]);
    }

    #[test]
    fn query_ignores_hidden_and_unlisted_layers() {
        let mut engine = engine();
        let area = PixelBox::around(Point2::new(400.0, 300.0), 5.0);

        engine
            .set_layer_visibility("sourdough_pois_points", false)
            .unwrap();
        let features = engine.query_features_near(&area, &all_queryable());
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].id, Some(12));

        let features = engine.query_features_near(&area, &["sourdough_pois_lines".to_string()]);
        assert!(features.is_empty());
    }

    #[test]
    fn feature_state_store() {
        let mut engine = engine();
        let key = FeatureKey {
            source: "sourdough".into(),
            source_layer: "pois".into(),
            id: 21,
        };

        assert_eq!(engine.feature_state(&key), FeatureState::CLEARED);
        engine.set_feature_state(&key, FeatureState::HIGHLIGHTED);
        assert_eq!(engine.feature_state(&key), FeatureState::HIGHLIGHTED);
        assert_eq!(engine.highlighted(), vec![key.clone()]);

        engine.set_feature_state(&key, FeatureState::CLEARED);
        assert!(engine.highlighted().is_empty());
    }

    #[test]
    fn layer_errors() {
        let mut engine = engine();
        let layer = engine.layer("sourdough_roads_lines").unwrap().clone();

        assert_matches!(engine.add_layer(layer), Err(TileviewError::LayerExists(_)));
        assert_matches!(
            engine.set_layer_visibility("nope", false),
            Err(TileviewError::LayerNotFound(_))
        );
        assert!(!engine.is_layer_visible("nope"));
    }
}
