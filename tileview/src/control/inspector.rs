use nalgebra::Point2;
use parking_lot::Mutex;

use crate::catalog::LayerCatalog;
use crate::config::ViewerConfig;
use crate::control::{EventPropagation, MouseButton, MouseEvent, UserEvent, UserEventHandler};
use crate::engine::{FeatureState, PixelBox, RenderingEngine};
use crate::feature::{FeatureKey, RenderedFeature};
use crate::info_panel::{self, InfoPanel};
use crate::selection::{Effect, InteractionEvent, InteractionState};
use crate::style::query_layer_ids;

struct InspectorState {
    interaction: InteractionState,
    panel: Box<dyn InfoPanel>,
}

/// Event handler that highlights features under the pointer and shows them in the info panel.
///
/// Moving the pointer previews the features under it. A left click pins the selection: the panel
/// stays open with a close control and pointer movement is ignored until the panel is closed with
/// [`UserEvent::PanelCloseRequested`] or another click replaces the selection.
pub struct FeatureInspector {
    state: Mutex<InspectorState>,
    catalog: LayerCatalog,
    config: ViewerConfig,
}

impl std::fmt::Debug for FeatureInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureInspector")
            .field("interaction", &self.state.lock().interaction)
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl FeatureInspector {
    /// Creates a new inspector showing selections in the panel.
    pub fn new(panel: impl InfoPanel + 'static, catalog: LayerCatalog, config: ViewerConfig) -> Self {
        Self {
            state: Mutex::new(InspectorState {
                interaction: InteractionState::Idle,
                panel: Box::new(panel),
            }),
            catalog,
            config,
        }
    }

    /// Current selection state.
    pub fn state(&self) -> InteractionState {
        self.state.lock().interaction.clone()
    }

    /// Returns true if a selection is pinned.
    pub fn is_pinned(&self) -> bool {
        self.state.lock().interaction.is_pinned()
    }

    /// Closes a pinned selection. Does nothing if the selection is not pinned.
    pub fn close(&self, engine: &mut dyn RenderingEngine) {
        self.apply(InteractionEvent::CloseRequested, engine);
    }

    /// Clears the highlight of the current selection, hides the panel and returns to the idle
    /// state.
    pub fn reset(&self, engine: &mut dyn RenderingEngine) {
        let mut state = self.state.lock();
        set_state(engine, &state.interaction.highlighted_keys(), FeatureState::CLEARED);
        state.panel.hide();
        state.interaction = InteractionState::Idle;
    }

    fn query(&self, engine: &dyn RenderingEngine, position: Point2<f64>) -> Vec<RenderedFeature> {
        let layers = query_layer_ids(&self.catalog, &self.config, engine);
        if layers.is_empty() {
            return vec![];
        }

        let area = PixelBox::around(position, self.config.query_tolerance());
        engine.query_features_near(&area, &layers)
    }

    fn pointer_event(
        &self,
        mouse_event: &MouseEvent,
        engine: &dyn RenderingEngine,
        clicked: bool,
    ) -> InteractionEvent {
        let Some(cursor) = mouse_event.lonlat else {
            return InteractionEvent::PointerLeft;
        };

        let candidates = self.query(engine, mouse_event.screen_pointer_position);
        if clicked {
            InteractionEvent::Clicked { candidates, cursor }
        } else {
            InteractionEvent::PointerMoved { candidates, cursor }
        }
    }

    fn apply(&self, event: InteractionEvent, engine: &mut dyn RenderingEngine) {
        let mut state = self.state.lock();
        let current = std::mem::take(&mut state.interaction);
        let (next, effects) = current.transition(event);

        log::debug!(
            "Selection state: {}, {} features",
            state_name(&next),
            next.selection().len()
        );

        for effect in effects {
            log::trace!("Applying {effect:?}");
            match effect {
                Effect::ClearHighlight(keys) => set_state(engine, &keys, FeatureState::CLEARED),
                Effect::SetHighlight(keys) => set_state(engine, &keys, FeatureState::HIGHLIGHTED),
                Effect::ShowPanel {
                    selection,
                    closable,
                } => info_panel::render(&selection, state.panel.as_mut(), &self.catalog, closable),
                Effect::HidePanel => state.panel.hide(),
                Effect::SetCursor(cursor) => engine.set_cursor(cursor),
            }
        }

        state.interaction = next;
    }
}

fn set_state(engine: &mut dyn RenderingEngine, keys: &[FeatureKey], feature_state: FeatureState) {
    for key in keys {
        engine.set_feature_state(key, feature_state);
    }
}

fn state_name(state: &InteractionState) -> &'static str {
    match state {
        InteractionState::Idle => "idle",
        InteractionState::Hovering(_) => "hovering",
        InteractionState::Pinned(_) => "pinned",
    }
}

impl UserEventHandler for FeatureInspector {
    fn handle(&self, event: &UserEvent, engine: &mut dyn RenderingEngine) -> EventPropagation {
        let interaction_event = match event {
            UserEvent::PointerMoved(mouse_event) => {
                if self.is_pinned() {
                    return EventPropagation::Propagate;
                }

                self.pointer_event(mouse_event, engine, false)
            }
            UserEvent::Click(MouseButton::Left, mouse_event) => {
                self.pointer_event(mouse_event, engine, true)
            }
            UserEvent::PointerLeft => InteractionEvent::PointerLeft,
            UserEvent::PanelCloseRequested => {
                self.close(engine);
                return EventPropagation::Stop;
            }
            _ => return EventPropagation::Propagate,
        };

        self.apply(interaction_event, engine);
        EventPropagation::Propagate
    }
}
