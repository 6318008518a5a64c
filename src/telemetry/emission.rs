//! Emitters: turn steps, messages, warnings and errors into events on the sink.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::EventError;
use crate::telemetry::events::{
    build_envelope, download_data, download_progress_data, merge_context, message_data,
    step_data, EventData, EventIdentity, EventKind,
};
use crate::telemetry::registry::StepRegistry;
use crate::telemetry::sinks::{EventLog, OutputSink};
use crate::telemetry::types::{IdProvider, UuidIdProvider};

/// Event emitter. Cheap to clone; clones share the registry, sink and id provider.
///
/// Configure the id provider and sink before emitting from several threads.
#[derive(Clone)]
pub struct Emitter {
    identity: EventIdentity,
    registry: Arc<StepRegistry>,
    ids: Arc<dyn IdProvider>,
    sink: Arc<OutputSink>,
    event_log: Option<Arc<EventLog>>,
}

impl Emitter {
    /// Emitter writing to stdout with UUID ids and the default identity.
    pub fn new(registry: Arc<StepRegistry>) -> Self {
        Self {
            identity: EventIdentity::default(),
            registry,
            ids: Arc::new(UuidIdProvider),
            sink: Arc::new(OutputSink::stdout()),
            event_log: None,
        }
    }

    pub fn with_identity(mut self, identity: EventIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_id_provider<P>(mut self, ids: P) -> Self
    where
        P: IdProvider + 'static,
    {
        self.ids = Arc::new(ids);
        self
    }

    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn with_event_log(mut self, event_log: EventLog) -> Self {
        self.event_log = Some(Arc::new(event_log));
        self
    }

    pub fn identity(&self) -> &EventIdentity {
        &self.identity
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// The primary sink, e.g. to [`OutputSink::redirect`] it for a scope.
    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    pub fn set_step(&self, name: &str) -> Result<(), EventError> {
        self.registry.set_step(name)
    }

    /// Emit a step event for the current cursor position.
    ///
    /// Before any `set_step` the event still goes out, with empty `currentstep`
    /// and `name`.
    pub fn print_step(&self, message: &str) -> Result<(), EventError> {
        let position = self.registry.position();
        if position.index.is_none() {
            warn!(message = %message, "step event emitted before any step was set");
        }
        self.emit(EventKind::Step, step_data(&position, message))
    }

    /// Move to step `name` and emit its step event.
    ///
    /// The cursor move and the position read share one registry lock, so the event
    /// always describes the step this call selected. Unknown names emit nothing.
    pub fn print_step_at(&self, name: &str, message: &str) -> Result<(), EventError> {
        let position = self.registry.set_step_position(name)?;
        self.emit(EventKind::Step, step_data(&position, message))
    }

    pub fn print_info(&self, message: &str) -> Result<(), EventError> {
        self.emit(EventKind::Info, message_data(message))
    }

    pub fn print_warning(&self, message: &str) -> Result<(), EventError> {
        self.emit(EventKind::Warning, message_data(message))
    }

    /// Error event carrying only `message`.
    pub fn print_error(&self, message: &str) -> Result<(), EventError> {
        self.emit(EventKind::Error, message_data(message))
    }

    /// Error event with an exit code and caller context.
    ///
    /// The code is not range-checked. Context maps merge in order and cannot
    /// overwrite `message` or `exitcode`. Exiting the process is left to the caller.
    pub fn print_error_exit_code<'a, I>(
        &self,
        message: &str,
        exit_code: i32,
        contexts: I,
    ) -> Result<(), EventError>
    where
        I: IntoIterator<Item = &'a HashMap<String, String>>,
    {
        self.emit(EventKind::Error, merge_context(message, exit_code, contexts))
    }

    /// Announce an artifact download within the current step.
    pub fn print_download(&self, artifact: &str) -> Result<(), EventError> {
        let position = self.registry.position();
        let message = format!("Downloading {}", artifact);
        self.emit(
            EventKind::Download,
            download_data(&position, artifact, &message),
        )
    }

    pub fn print_download_progress(&self, artifact: &str, percent: u8) -> Result<(), EventError> {
        let position = self.registry.position();
        let message = format!("Downloading {}: {}%", artifact, percent.min(100));
        self.emit(
            EventKind::DownloadProgress,
            download_progress_data(&position, artifact, percent, &message),
        )
    }

    /// Build, serialize and write one event.
    pub fn emit(&self, kind: EventKind, data: EventData) -> Result<(), EventError> {
        let event = build_envelope(&self.identity, self.ids.as_ref(), kind, data);
        let line = event.to_line()?;
        self.sink.write_line(&line)?;
        if let Some(event_log) = &self.event_log {
            event_log.append_best_effort(&line);
        }
        debug!(event_type = %event.event_type, event_id = %event.id, "emitted event");
        Ok(())
    }
}
