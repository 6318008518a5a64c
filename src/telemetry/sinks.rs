//! Event sinks: the primary output stream, in-memory capture, and the event log tee.

pub mod event_log;
pub mod memory;
pub mod output;

pub use event_log::EventLog;
pub use memory::MemorySink;
pub use output::{OutputSink, SinkGuard};
