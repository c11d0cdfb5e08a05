//! Viewer events for the host UI
//!
//! The overlay panels (painting metadata, HUD) live in the host; the core
//! only reports the transitions they care about. Handlers return `true` to
//! consume an event and stop forwarding; events nobody consumed stay queued
//! and can be drained manually once per frame.

use crate::scene::PaintingInfo;

/// Events emitted by the viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Presentation mode started; carries the focused painting's metadata
    /// for the overlay panel
    PresentationEntered(PaintingInfo),
    /// Presentation mode ended; the overlay should hide
    PresentationExited,
}

/// Event handler trait
///
/// Return `true` if the event was consumed (stops forwarding), `false` to
/// allow forwarding to other handlers.
pub trait ViewerEventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &ViewerEvent) -> bool;
}

/// Event queue with registration-based dispatch
pub struct EventQueue {
    queue: Vec<ViewerEvent>,
    handlers: Vec<Box<dyn ViewerEventHandler>>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Register a handler; handlers run in registration order
    pub fn register_handler(&mut self, handler: Box<dyn ViewerEventHandler>) {
        self.handlers.push(handler);
    }

    /// Queue an event for this frame
    pub fn send(&mut self, event: ViewerEvent) {
        log::debug!("viewer event queued: {:?}", event);
        self.queue.push(event);
    }

    /// Number of pending events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch all pending events to registered handlers
    ///
    /// Forwarding stops at the first handler that consumes an event.
    pub fn dispatch(&mut self) {
        let pending = std::mem::take(&mut self.queue);
        for event in &pending {
            for handler in &mut self.handlers {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }

    /// Drain pending events without dispatching to handlers
    pub fn drain(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.queue)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingHandler {
        seen: Rc<RefCell<Vec<ViewerEvent>>>,
        consume: bool,
    }

    impl ViewerEventHandler for RecordingHandler {
        fn on_event(&mut self, event: &ViewerEvent) -> bool {
            self.seen.borrow_mut().push(event.clone());
            self.consume
        }
    }

    #[test]
    fn test_send_and_drain() {
        let mut queue = EventQueue::new();
        queue.send(ViewerEvent::PresentationExited);

        assert_eq!(queue.pending(), 1);
        let drained = queue.drain();
        assert_eq!(drained, vec![ViewerEvent::PresentationExited]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_dispatch_clears_queue() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut queue = EventQueue::new();
        queue.register_handler(Box::new(RecordingHandler {
            seen: Rc::clone(&seen),
            consume: false,
        }));

        queue.send(ViewerEvent::PresentationExited);
        queue.dispatch();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_consumed_event_stops_forwarding() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let mut queue = EventQueue::new();
        queue.register_handler(Box::new(RecordingHandler {
            seen: Rc::clone(&first),
            consume: true,
        }));
        queue.register_handler(Box::new(RecordingHandler {
            seen: Rc::clone(&second),
            consume: false,
        }));

        queue.send(ViewerEvent::PresentationExited);
        queue.dispatch();

        assert_eq!(first.borrow().len(), 1);
        assert!(second.borrow().is_empty());
    }
}
