//! Shared telemetry helpers: event id generation.

use uuid::Uuid;

/// Source of unique event identifiers.
///
/// Any `Fn() -> String` closure is an `IdProvider`, which is how tests pin ids.
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> String;
}

impl<F> IdProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Default provider: random UUID v4 per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&self) -> String {
        new_event_id()
    }
}

/// Generate a unique event id.
pub fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}
