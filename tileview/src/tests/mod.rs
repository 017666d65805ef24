//! Test doubles shared by the unit tests of the crate.

use std::cell::Cell;
use std::sync::Arc;

use geo_types::Point;
use nalgebra::Point2;
use parking_lot::Mutex;

use crate::engine::{CursorStyle, FeatureState, MemoryEngine, PixelBox, RenderingEngine};
use crate::error::TileviewError;
use crate::feature::{FeatureKey, RenderedFeature};
use crate::info_panel::{InfoPanel, PanelContent};
use crate::style::StyleLayer;

/// Engine recording the calls made to a [`MemoryEngine`].
pub(crate) struct RecordingEngine {
    inner: MemoryEngine,
    state_calls: Vec<(FeatureKey, FeatureState)>,
    queries: Cell<usize>,
}

impl RecordingEngine {
    pub(crate) fn new(inner: MemoryEngine) -> Self {
        Self {
            inner,
            state_calls: vec![],
            queries: Cell::new(0),
        }
    }

    pub(crate) fn inner(&self) -> &MemoryEngine {
        &self.inner
    }

    pub(crate) fn state_calls(&self) -> &[(FeatureKey, FeatureState)] {
        &self.state_calls
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.get()
    }
}

impl RenderingEngine for RecordingEngine {
    fn query_features_near(&self, area: &PixelBox, layer_ids: &[String]) -> Vec<RenderedFeature> {
        self.queries.set(self.queries.get() + 1);
        self.inner.query_features_near(area, layer_ids)
    }

    fn set_feature_state(&mut self, key: &FeatureKey, state: FeatureState) {
        self.state_calls.push((key.clone(), state));
        self.inner.set_feature_state(key, state);
    }

    fn feature_state(&self, key: &FeatureKey) -> FeatureState {
        self.inner.feature_state(key)
    }

    fn add_layer(&mut self, layer: StyleLayer) -> Result<(), TileviewError> {
        self.inner.add_layer(layer)
    }

    fn layer_ids(&self) -> Vec<String> {
        self.inner.layer_ids()
    }

    fn set_layer_visibility(&mut self, layer_id: &str, visible: bool) -> Result<(), TileviewError> {
        self.inner.set_layer_visibility(layer_id, visible)
    }

    fn is_layer_visible(&self, layer_id: &str) -> bool {
        self.inner.is_layer_visible(layer_id)
    }

    fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    fn screen_to_lonlat(&self, position: Point2<f64>) -> Option<Point<f64>> {
        self.inner.screen_to_lonlat(position)
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.inner.set_cursor(cursor);
    }
}

#[derive(Debug, Default)]
struct PanelLog {
    content: Option<PanelContent>,
    last_shown: Option<PanelContent>,
    shows: usize,
    hides: usize,
}

/// Info panel sharing its state between clones, so a test can inspect a panel owned by the
/// code under test.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingPanel {
    log: Arc<Mutex<PanelLog>>,
}

impl RecordingPanel {
    pub(crate) fn is_visible(&self) -> bool {
        self.log.lock().content.is_some()
    }

    pub(crate) fn last_content(&self) -> Option<PanelContent> {
        self.log.lock().last_shown.clone()
    }

    pub(crate) fn show_count(&self) -> usize {
        self.log.lock().shows
    }

    pub(crate) fn hide_count(&self) -> usize {
        self.log.lock().hides
    }
}

impl InfoPanel for RecordingPanel {
    fn show(&mut self, content: PanelContent) {
        let mut log = self.log.lock();
        log.shows += 1;
        log.last_shown = Some(content.clone());
        log.content = Some(content);
    }

    fn hide(&mut self) {
        let mut log = self.log.lock();
        log.hides += 1;
        log.content = None;
    }
}
