//! State-change notifications for whatever renders the form.
//!
//! The orchestrator emits via [`EventBus::emit`]; renderers subscribe via
//! [`EventBus::subscribe`]. Built on [`tokio::sync::broadcast`] so several
//! views can follow the same form.

use tokio::sync::broadcast;

/// A visible state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The status line was overwritten (may be empty).
    StatusChanged { message: String },
    /// Both form fields were emptied.
    FormCleared,
    /// A solution arrived.
    SolutionReady { solution: String },
}

#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Returns the number of receivers that will see the event.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Future events only; past ones are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(32)
    }
}
