//! See [`Viewer`].

use std::sync::Arc;

use crate::catalog::LayerCatalog;
use crate::config::ViewerConfig;
use crate::control::{
    EventDispatcher, FeatureInspector, HandlerId, RawUserEvent, UserEvent, UserEventHandler,
};
use crate::engine::RenderingEngine;
use crate::error::TileviewError;
use crate::info_panel::InfoPanel;
use crate::legend::Legend;
use crate::style::{build_style_layers, StyleDocument};
use crate::tilejson::{TileJson, TileJsonLoader};
use crate::zoom::ZoomIndicator;

/// Vector tile viewer: style layers for every vector layer of a tile source, a legend toggling
/// their visibility, a zoom indicator and the feature inspector.
///
/// ```no_run
/// use tileview::control::{MouseButton, RawUserEvent};
/// use tileview::engine::MemoryEngine;
/// use tileview::info_panel::TextPanel;
/// use tileview::tilejson::FileTileJsonLoader;
/// use tileview::{Viewer, ViewerConfig};
///
/// # async fn run() -> Result<(), tileview::TileviewError> {
/// let mut viewer = Viewer::load(
///     &FileTileJsonLoader::new("tiles.json"),
///     MemoryEngine::default(),
///     TextPanel::new(),
///     ViewerConfig::default(),
/// )
/// .await?;
///
/// viewer.handle_event(RawUserEvent::ButtonPressed(MouseButton::Left));
/// viewer.handle_event(RawUserEvent::ButtonReleased(MouseButton::Left));
/// # Ok(())
/// # }
/// ```
pub struct Viewer<E: RenderingEngine> {
    engine: E,
    tilejson: TileJson,
    catalog: LayerCatalog,
    config: ViewerConfig,
    legend: Legend,
    zoom: ZoomIndicator,
    inspector: Arc<FeatureInspector>,
    dispatcher: EventDispatcher,
}

impl<E: RenderingEngine> std::fmt::Debug for Viewer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("catalog", &self.catalog)
            .field("legend", &self.legend)
            .field("zoom", &self.zoom)
            .field("inspector", &self.inspector)
            .finish()
    }
}

impl<E: RenderingEngine> Viewer<E> {
    /// Creates a viewer for the tile source described by `tilejson`.
    ///
    /// Style layers of all vector layers are added to the engine. Fails if the engine already
    /// has a layer with one of the generated ids.
    pub fn new(
        tilejson: TileJson,
        mut engine: E,
        panel: impl InfoPanel + 'static,
        config: ViewerConfig,
    ) -> Result<Self, TileviewError> {
        let catalog = LayerCatalog::from_tilejson(&tilejson);
        if catalog.is_empty() {
            log::warn!("Tile descriptor has no vector layers");
        }

        for layer in build_style_layers(&catalog, &config) {
            engine.add_layer(layer)?;
        }

        let legend = Legend::new(&catalog, &config);
        let mut zoom = ZoomIndicator::default();
        zoom.update(&engine);

        let inspector = Arc::new(FeatureInspector::new(
            panel,
            catalog.clone(),
            config.clone(),
        ));

        let mut dispatcher = EventDispatcher::default();
        let handler = inspector.clone();
        dispatcher.add_handler(move |event: &UserEvent, engine: &mut dyn RenderingEngine| {
            handler.handle(event, engine)
        });

        log::info!("Viewer created with {} vector layers", catalog.len());

        Ok(Self {
            engine,
            tilejson,
            catalog,
            config,
            legend,
            zoom,
            inspector,
            dispatcher,
        })
    }

    /// Loads the tile descriptor and creates a viewer for it.
    pub async fn load(
        loader: &(impl TileJsonLoader + ?Sized),
        engine: E,
        panel: impl InfoPanel + 'static,
        config: ViewerConfig,
    ) -> Result<Self, TileviewError> {
        let tilejson = loader.load().await?;
        Self::new(tilejson, engine, panel, config)
    }

    /// Processes a user input event.
    pub fn handle_event(&mut self, event: RawUserEvent) {
        self.dispatcher.handle(event, &mut self.engine);
    }

    /// Adds an event handler called after the handlers added before it.
    pub fn add_handler(&mut self, handler: impl UserEventHandler + 'static) -> HandlerId {
        self.dispatcher.add_handler(handler)
    }

    /// Removes an event handler.
    pub fn remove_handler(&mut self, id: HandlerId) -> bool {
        self.dispatcher.remove_handler(id)
    }

    /// Closes the pinned feature selection.
    pub fn close_panel(&mut self) {
        self.inspector.close(&mut self.engine);
    }

    /// Legend state.
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Applies a change of a legend checkbox. See [`Legend::toggle`].
    pub fn toggle_layer(
        &mut self,
        index: usize,
        checked: bool,
        shift: bool,
    ) -> Result<(), TileviewError> {
        self.legend.toggle(index, checked, shift, &mut self.engine)
    }

    /// Applies a change of the "All" legend checkbox.
    pub fn set_all_layers(&mut self, checked: bool) -> Result<(), TileviewError> {
        self.legend.set_all(checked, &mut self.engine)
    }

    /// Updates the zoom indicator. Must be called when the engine view changes.
    pub fn update_zoom(&mut self) -> &str {
        self.zoom.update(&self.engine)
    }

    /// Text of the zoom indicator.
    pub fn zoom_label(&self) -> &str {
        self.zoom.text()
    }

    /// Map style document with the source pointing to `tilejson_url`.
    pub fn style(&self, tilejson_url: &str) -> StyleDocument {
        StyleDocument::new(&self.catalog, &self.config, tilejson_url)
    }

    /// Feature inspector.
    pub fn inspector(&self) -> &FeatureInspector {
        &self.inspector
    }

    /// Layer catalog.
    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    /// Tile descriptor.
    pub fn tilejson(&self) -> &TileJson {
        &self.tilejson
    }

    /// Configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Rendering engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Rendering engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Removes all event handlers, clears the highlight of the current selection and returns the
    /// engine.
    pub fn dispose(mut self) -> E {
        self.dispatcher.clear();
        self.inspector.reset(&mut self.engine);

        log::debug!("Viewer disposed");
        self.engine
    }
}
