//! Change notification.
//!
//! Subscribers receive one [`StoreEvent`] per aggregate an action touched and
//! then pull the current state from the store. Events carry no payload.

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::Serialize;

/// Which part of the state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreEvent {
    /// Layers, positions or connections.
    LayersChanged,
    /// `current_architecture`.
    ArchitectureChanged,
    TrainingChanged,
    ConfigChanged,
    VisualizationChanged,
    UiChanged,
}

/// Fan-out of events to every live subscriber.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<StoreEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `events` in order to every subscriber, dropping those whose
    /// receiver is gone.
    pub fn publish(&mut self, events: &[StoreEvent]) {
        if events.is_empty() {
            return;
        }
        self.subscribers.retain(|tx| {
            events
                .iter()
                .all(|event| tx.send(*event).is_ok())
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
