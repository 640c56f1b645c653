//! Decoupled event bus for observing the controller.
//!
//! The controller emits via [`EventBus::emit`]; the REPL (or a test)
//! subscribes via [`EventBus::subscribe`]. Built on
//! [`tokio::sync::broadcast`] so multiple listeners can react independently.

use tokio::sync::broadcast;

use crate::error::AppError;

/// Events that flow out of a load cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A load was started (first attempt or retry).
    LoadStarted,
    /// A load succeeded and the current answer was replaced.
    AnswerChanged { answer: String, forced: bool },
    /// A load failed and an alert is being shown.
    LoadFailed { error: AppError },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
