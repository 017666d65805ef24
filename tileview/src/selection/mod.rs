//! Selection of features under the pointer.
//!
//! [`InteractionState`] is a pure state machine: it receives pointer events with the features the
//! engine found near the pointer and returns the new state together with the list of [`Effect`]s
//! the caller must apply to the engine and the info panel. It never touches the engine itself,
//! so all selection behavior can be tested without a renderer.

use geo_types::Point;

use crate::engine::CursorStyle;
use crate::feature::{FeatureKey, RenderedFeature};

mod prioritize;
mod rank;

pub use prioritize::prioritize;
pub use rank::{rank, rank_by, SelectionSet};

/// Selection state of the viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    /// Nothing is selected.
    #[default]
    Idle,
    /// Features under the pointer are highlighted and previewed.
    Hovering(SelectionSet),
    /// A clicked selection is shown until closed or replaced by another click.
    Pinned(SelectionSet),
}

/// Pointer input for the selection state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// Pointer moved over the map.
    PointerMoved {
        /// Features rendered near the pointer.
        candidates: Vec<RenderedFeature>,
        /// Geographic position of the pointer.
        cursor: Point<f64>,
    },
    /// Map was clicked.
    Clicked {
        /// Features rendered near the click position.
        candidates: Vec<RenderedFeature>,
        /// Geographic position of the click.
        cursor: Point<f64>,
    },
    /// Pointer left the map surface.
    PointerLeft,
    /// Close control of a pinned panel was activated.
    CloseRequested,
}

/// Side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Remove the highlight state from the features.
    ClearHighlight(Vec<FeatureKey>),
    /// Set the highlight state on the features.
    SetHighlight(Vec<FeatureKey>),
    /// Show the info panel for the selection.
    ShowPanel {
        /// Features to show.
        selection: SelectionSet,
        /// Whether the panel has a close control.
        closable: bool,
    },
    /// Hide the info panel.
    HidePanel,
    /// Change the pointer affordance.
    SetCursor(CursorStyle),
}

impl InteractionState {
    /// Currently selected features. Empty when idle.
    pub fn selection(&self) -> &[RenderedFeature] {
        match self {
            Self::Idle => &[],
            Self::Hovering(selection) | Self::Pinned(selection) => selection,
        }
    }

    /// Returns true if a clicked selection is shown.
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned(_))
    }

    /// Keys of the features that currently carry the highlight state.
    pub fn highlighted_keys(&self) -> Vec<FeatureKey> {
        match self {
            Self::Idle => vec![],
            Self::Hovering(selection) | Self::Pinned(selection) => selection.keys(),
        }
    }

    /// Applies the event, returning the next state and the effects to perform in order.
    pub fn transition(self, event: InteractionEvent) -> (InteractionState, Vec<Effect>) {
        match event {
            InteractionEvent::PointerMoved { candidates, cursor } => {
                self.on_pointer_moved(candidates, &cursor)
            }
            InteractionEvent::Clicked { candidates, cursor } => self.on_click(candidates, &cursor),
            InteractionEvent::PointerLeft => self.on_pointer_left(),
            InteractionEvent::CloseRequested => self.on_close(),
        }
    }

    fn on_pointer_moved(
        self,
        candidates: Vec<RenderedFeature>,
        cursor: &Point<f64>,
    ) -> (InteractionState, Vec<Effect>) {
        if self.is_pinned() {
            return (self, vec![]);
        }

        let mut effects = vec![];
        push_clear(&mut effects, self.highlighted_keys());

        let selection = rank(candidates, cursor);
        if selection.is_empty() {
            effects.push(Effect::HidePanel);
            effects.push(Effect::SetCursor(CursorStyle::Default));
            return (Self::Idle, effects);
        }

        effects.push(Effect::SetHighlight(selection.keys()));
        effects.push(Effect::ShowPanel {
            selection: selection.clone(),
            closable: false,
        });
        effects.push(Effect::SetCursor(CursorStyle::Pointer));

        (Self::Hovering(selection), effects)
    }

    fn on_click(
        self,
        candidates: Vec<RenderedFeature>,
        cursor: &Point<f64>,
    ) -> (InteractionState, Vec<Effect>) {
        let selection = rank(candidates, cursor);
        if selection.is_empty() {
            return match self {
                Self::Pinned(pinned) => {
                    let mut effects = vec![];
                    push_clear(&mut effects, pinned.keys());
                    effects.push(Effect::HidePanel);
                    (Self::Idle, effects)
                }
                state => (state, vec![]),
            };
        }

        let mut effects = vec![];
        push_clear(&mut effects, self.highlighted_keys());
        effects.push(Effect::SetHighlight(selection.keys()));
        effects.push(Effect::ShowPanel {
            selection: selection.clone(),
            closable: true,
        });

        (Self::Pinned(selection), effects)
    }

    fn on_pointer_left(self) -> (InteractionState, Vec<Effect>) {
        match self {
            Self::Pinned(_) => (self, vec![Effect::SetCursor(CursorStyle::Default)]),
            state => {
                let mut effects = vec![];
                push_clear(&mut effects, state.highlighted_keys());
                effects.push(Effect::HidePanel);
                effects.push(Effect::SetCursor(CursorStyle::Default));
                (Self::Idle, effects)
            }
        }
    }

    fn on_close(self) -> (InteractionState, Vec<Effect>) {
        match self {
            Self::Pinned(pinned) => {
                let mut effects = vec![];
                push_clear(&mut effects, pinned.keys());
                effects.push(Effect::HidePanel);
                (Self::Idle, effects)
            }
            state => (state, vec![]),
        }
    }
}

fn push_clear(effects: &mut Vec<Effect>, keys: Vec<FeatureKey>) {
    if !keys.is_empty() {
        effects.push(Effect::ClearHighlight(keys));
    }
}
