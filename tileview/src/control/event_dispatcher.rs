use std::time::Duration;

use nalgebra::Point2;
use web_time::SystemTime;

use crate::control::{
    EventPropagation, MouseButtonsState, MouseEvent, RawUserEvent, UserEvent, UserEventHandler,
};
use crate::engine::RenderingEngine;

const DRAG_THRESHOLD: f64 = 3.0;
const CLICK_TIMEOUT: Duration = Duration::from_millis(200);

/// Id of a handler registered in an [`EventDispatcher`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Converts [`RawUserEvent`]s into [`UserEvent`]s and runs the registered handlers on them.
///
/// Handlers are called in the order they were added, until one of them returns
/// [`EventPropagation::Stop`].
pub struct EventDispatcher {
    handlers: Vec<(HandlerId, Box<dyn UserEventHandler>)>,
    next_id: u64,
    pointer_position: Point2<f64>,
    pointer_pressed_position: Point2<f64>,
    buttons_state: MouseButtonsState,
    last_pressed_time: SystemTime,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self {
            handlers: vec![],
            next_id: 0,
            pointer_position: Point2::origin(),
            pointer_pressed_position: Point2::origin(),
            buttons_state: Default::default(),
            last_pressed_time: SystemTime::UNIX_EPOCH,
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .field("pointer_position", &self.pointer_position)
            .field("buttons_state", &self.buttons_state)
            .finish()
    }
}

impl EventDispatcher {
    /// Adds a handler to the end of the handler list.
    pub fn add_handler(&mut self, handler: impl UserEventHandler + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));

        id
    }

    /// Removes a handler. Returns false if there is no handler with this id.
    pub fn remove_handler(&mut self, id: HandlerId) -> bool {
        let count = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);

        self.handlers.len() != count
    }

    /// Removes all handlers.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Last known pointer position.
    pub fn pointer_position(&self) -> Point2<f64> {
        self.pointer_position
    }

    /// Processes the event and runs the handlers on the resulting user events.
    pub fn handle(&mut self, event: RawUserEvent, engine: &mut dyn RenderingEngine) {
        self.handle_at(event, engine, SystemTime::now());
    }

    fn handle_at(
        &mut self,
        event: RawUserEvent,
        engine: &mut dyn RenderingEngine,
        now: SystemTime,
    ) {
        for user_event in self.process(event, engine, now) {
            for (_, handler) in &self.handlers {
                match handler.handle(&user_event, engine) {
                    EventPropagation::Propagate => {}
                    EventPropagation::Stop => break,
                }
            }
        }
    }

    fn process(
        &mut self,
        event: RawUserEvent,
        engine: &dyn RenderingEngine,
        now: SystemTime,
    ) -> Vec<UserEvent> {
        match event {
            RawUserEvent::ButtonPressed(button) => {
                self.buttons_state.set_pressed(button);
                self.last_pressed_time = now;
                self.pointer_pressed_position = self.pointer_position;

                vec![UserEvent::ButtonPressed(
                    button,
                    self.get_mouse_event(engine),
                )]
            }
            RawUserEvent::ButtonReleased(button) => {
                self.buttons_state.set_released(button);
                let mouse_event = self.get_mouse_event(engine);
                let mut events = vec![UserEvent::ButtonReleased(button, mouse_event)];

                let quick = now
                    .duration_since(self.last_pressed_time)
                    .unwrap_or_default()
                    < CLICK_TIMEOUT;
                let still = taxicab_distance(self.pointer_position, self.pointer_pressed_position)
                    <= DRAG_THRESHOLD;
                if quick && still {
                    events.push(UserEvent::Click(button, mouse_event));
                }

                events
            }
            RawUserEvent::PointerMoved(position) => {
                self.pointer_position = position;
                vec![UserEvent::PointerMoved(self.get_mouse_event(engine))]
            }
            RawUserEvent::PointerLeft => vec![UserEvent::PointerLeft],
            RawUserEvent::PanelCloseRequested => vec![UserEvent::PanelCloseRequested],
        }
    }

    fn get_mouse_event(&self, engine: &dyn RenderingEngine) -> MouseEvent {
        MouseEvent {
            screen_pointer_position: self.pointer_position,
            lonlat: engine.screen_to_lonlat(self.pointer_position),
            buttons: self.buttons_state,
        }
    }
}

fn taxicab_distance(a: Point2<f64>, b: Point2<f64>) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use parking_lot::Mutex;
    use tileview_types::lonlat;

    use super::*;
    use crate::control::MouseButton;
    use crate::engine::{MapView, MemoryEngine};

    type Log = Arc<Mutex<Vec<UserEvent>>>;

    fn engine() -> MemoryEngine {
        MemoryEngine::new(MapView::new(lonlat!(0.0, 0.0), 2.0).with_size(200.0, 100.0))
    }

    fn recorder(log: &Log, propagation: EventPropagation) -> impl UserEventHandler {
        let log = log.clone();
        move |event: &UserEvent, _: &mut dyn RenderingEngine| {
            log.lock().push(event.clone());
            propagation
        }
    }

    fn clicks(log: &Log) -> usize {
        log.lock()
            .iter()
            .filter(|event| matches!(event, UserEvent::Click(..)))
            .count()
    }

    #[test]
    fn quick_release_is_click() {
        let log = Log::default();
        let mut dispatcher = EventDispatcher::default();
        dispatcher.add_handler(recorder(&log, EventPropagation::Propagate));
        let mut engine = engine();

        let t0 = SystemTime::now();
        let moved = RawUserEvent::PointerMoved(Point2::new(100.0, 50.0));
        dispatcher.handle_at(moved, &mut engine, t0);
        dispatcher.handle_at(RawUserEvent::ButtonPressed(MouseButton::Left), &mut engine, t0);
        dispatcher.handle_at(
            RawUserEvent::ButtonReleased(MouseButton::Left),
            &mut engine,
            t0 + Duration::from_millis(100),
        );

        assert_eq!(clicks(&log), 1);
        let events = log.lock();
        assert_matches!(
            events.last(),
            Some(UserEvent::Click(MouseButton::Left, MouseEvent { lonlat: Some(_), .. }))
        );
    }

    #[test]
    fn slow_release_is_not_click() {
        let log = Log::default();
        let mut dispatcher = EventDispatcher::default();
        dispatcher.add_handler(recorder(&log, EventPropagation::Propagate));
        let mut engine = engine();

        let t0 = SystemTime::now();
        dispatcher.handle_at(RawUserEvent::ButtonPressed(MouseButton::Left), &mut engine, t0);
        dispatcher.handle_at(
            RawUserEvent::ButtonReleased(MouseButton::Left),
            &mut engine,
            t0 + Duration::from_millis(300),
        );

        assert_eq!(clicks(&log), 0);
    }

    #[test]
    fn drag_is_not_click() {
        let log = Log::default();
        let mut dispatcher = EventDispatcher::default();
        dispatcher.add_handler(recorder(&log, EventPropagation::Propagate));
        let mut engine = engine();

        let t0 = SystemTime::now();
        dispatcher.handle_at(RawUserEvent::ButtonPressed(MouseButton::Left), &mut engine, t0);
        dispatcher.handle_at(RawUserEvent::PointerMoved(Point2::new(2.0, 2.0)), &mut engine, t0);
        dispatcher.handle_at(RawUserEvent::ButtonReleased(MouseButton::Left), &mut engine, t0);
        assert_eq!(clicks(&log), 0);

        dispatcher.handle_at(RawUserEvent::ButtonPressed(MouseButton::Left), &mut engine, t0);
        dispatcher.handle_at(RawUserEvent::PointerMoved(Point2::new(4.0, 3.0)), &mut engine, t0);
        dispatcher.handle_at(RawUserEvent::ButtonReleased(MouseButton::Left), &mut engine, t0);
        assert_eq!(clicks(&log), 1);
    }

    #[test]
    fn stop_prevents_next_handlers() {
        let first = Log::default();
        let second = Log::default();
        let mut dispatcher = EventDispatcher::default();
        dispatcher.add_handler(recorder(&first, EventPropagation::Stop));
        dispatcher.add_handler(recorder(&second, EventPropagation::Propagate));

        dispatcher.handle(RawUserEvent::PointerLeft, &mut engine());

        assert_eq!(first.lock().len(), 1);
        assert!(second.lock().is_empty());
    }

    #[test]
    fn remove_handlers() {
        let log = Log::default();
        let mut dispatcher = EventDispatcher::default();
        let id = dispatcher.add_handler(recorder(&log, EventPropagation::Propagate));
        dispatcher.add_handler(recorder(&log, EventPropagation::Propagate));

        assert!(dispatcher.remove_handler(id));
        assert!(!dispatcher.remove_handler(id));
        assert_eq!(dispatcher.handler_count(), 1);

        dispatcher.clear();
        dispatcher.handle(RawUserEvent::PanelCloseRequested, &mut engine());
        assert!(log.lock().is_empty());
    }
}
