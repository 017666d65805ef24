//! This module contains traits and structs that make the viewer interactive.
//!
//! User interaction handling is done in several steps:
//! 1. Platform event is converted to a common [`RawUserEvent`] enum.
//! 2. `RawUserEvent` is given to the [`EventDispatcher`], that converts it into a [`UserEvent`]. The dispatcher
//!    keeps track of the pointer position and mouse buttons, detects clicks and resolves the geographic position of
//!    the pointer.
//! 3. `EventDispatcher` has a list of [`UserEventHandler`]s, which react to the events. [`FeatureInspector`] is the
//!    handler that selects features under the pointer and shows them in the info panel.

use geo_types::Point;
use maybe_sync::{MaybeSend, MaybeSync};
use nalgebra::Point2;

use crate::engine::RenderingEngine;

mod event_dispatcher;
mod inspector;

pub use event_dispatcher::{EventDispatcher, HandlerId};
pub use inspector::FeatureInspector;

/// User input handler.
pub trait UserEventHandler {
    /// Handle the event.
    fn handle(&self, event: &UserEvent, engine: &mut dyn RenderingEngine) -> EventPropagation;
}

impl<T: Fn(&UserEvent, &mut dyn RenderingEngine) -> EventPropagation> UserEventHandler for T
where
    T: MaybeSync + MaybeSend,
{
    fn handle(&self, event: &UserEvent, engine: &mut dyn RenderingEngine) -> EventPropagation {
        self(event, engine)
    }
}

/// Raw user interaction event, as reported by the platform. Input state is tracked by the
/// [`EventDispatcher`], which combines it with the raw events into [`UserEvent`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum RawUserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton),
    /// A mouse button was released.
    ButtonReleased(MouseButton),
    /// Mouse pointer was moved to the given screen pixel position.
    PointerMoved(Point2<f64>),
    /// Mouse pointer left the map surface.
    PointerLeft,
    /// Close control of the info panel was activated.
    PanelCloseRequested,
}

/// User interaction event given to the [`UserEventHandler`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton, MouseEvent),
    /// A mouse button was released.
    ButtonReleased(MouseButton, MouseEvent),
    /// A mouse button was clicked. This event is fired right after the [`UserEvent::ButtonReleased`] event if the
    /// release was shortly after the press and the pointer did not travel far in between.
    Click(MouseButton, MouseEvent),
    /// Mouse pointer moved.
    PointerMoved(MouseEvent),
    /// Mouse pointer left the map surface.
    PointerLeft,
    /// Close control of the info panel was activated.
    PanelCloseRequested,
}

/// Value returned by an [`UserEventHandler`] to indicate the status of the event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
}

/// Mouse button enum.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
    /// Any other button.
    Other,
}

/// State of the mouse at the moment of the event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseEvent {
    /// Pointer position on the screen in pixels from the top-left corner.
    pub screen_pointer_position: Point2<f64>,
    /// Longitude/latitude under the pointer, if the pointer is over the map.
    pub lonlat: Option<Point<f64>>,
    /// State of the mouse buttons.
    pub buttons: MouseButtonsState,
}

/// State of a mouse button.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum MouseButtonState {
    /// Button is pressed.
    Pressed,
    /// Button is not pressed.
    #[default]
    Released,
}

/// State of all mouse buttons.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MouseButtonsState {
    /// State of the left mouse button.
    pub left: MouseButtonState,
    /// State of the middle mouse button.
    pub middle: MouseButtonState,
    /// State of the right mouse button.
    pub right: MouseButtonState,
}

impl MouseButtonsState {
    pub(crate) fn set_pressed(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Pressed);
    }

    pub(crate) fn set_released(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Released);
    }

    fn set_state(&mut self, button: MouseButton, state: MouseButtonState) {
        match button {
            MouseButton::Left => self.left = state,
            MouseButton::Middle => self.middle = state,
            MouseButton::Right => self.right = state,
            MouseButton::Other => {}
        }
    }

    /// Returns true if no tracked button is pressed.
    pub fn none_pressed(&self) -> bool {
        self.left == MouseButtonState::Released
            && self.middle == MouseButtonState::Released
            && self.right == MouseButtonState::Released
    }
}
