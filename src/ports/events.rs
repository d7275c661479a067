//! Event sink port.
//!
//! Notification delivery is someone else's job; the engine only hands
//! [`ShiftEvent`]s to a sink.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::models::ShiftEvent;

/// Destination for domain events.
pub trait EventSink: Send + Sync {
    /// Publishes one event. Publishing never fails from the engine's view.
    fn publish(&self, event: ShiftEvent);
}

/// Sink that writes every event to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: ShiftEvent) {
        let shift = event.shift();
        info!(
            event = event.name(),
            shift_id = %shift.id,
            employee_id = %shift.employee_id,
            "Shift event published"
        );
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<Vec<ShiftEvent>>>,
}

impl InMemoryEventSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far, oldest first.
    pub fn events(&self) -> Vec<ShiftEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of all events published so far.
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(ShiftEvent::name)
            .collect()
    }
}

impl EventSink for InMemoryEventSink {
    fn publish(&self, event: ShiftEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
