//! Telemetry domain: step registry, event schema, sinks, and emission.

mod types;

pub mod emission;
pub mod events;
pub mod registry;
pub mod sinks;

pub use emission::Emitter;
pub use events::{
    build_envelope, merge_context, Event, EventData, EventIdentity, EventKind,
    CONTENT_TYPE_JSON, SPEC_VERSION,
};
pub use registry::{Step, StepPosition, StepRegistry};
pub use sinks::{EventLog, MemorySink, OutputSink, SinkGuard};
pub use types::{new_event_id, IdProvider, UuidIdProvider};
