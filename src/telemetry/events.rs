//! Event schema and envelope construction.
//!
//! Every emitted event carries the same fixed metadata plus a string-valued `data`
//! map. Numbers placed into `data` are always rendered as base-10 strings.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::telemetry::registry::StepPosition;
use crate::telemetry::types::IdProvider;

pub const SPEC_VERSION: &str = "1.0";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const DEFAULT_SOURCE: &str = "https://minikube.sigs.k8s.io/";
pub const DEFAULT_NAMESPACE: &str = "io.k8s.sigs.minikube";

/// Reserved `data` keys that caller context can never overwrite.
pub const KEY_MESSAGE: &str = "message";
pub const KEY_EXIT_CODE: &str = "exitcode";

pub const KEY_CURRENT_STEP: &str = "currentstep";
pub const KEY_TOTAL_STEPS: &str = "totalsteps";
pub const KEY_NAME: &str = "name";
pub const KEY_ARTIFACT: &str = "artifact";
pub const KEY_PROGRESS: &str = "progress";

/// String-valued event payload.
pub type EventData = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Step,
    Info,
    Error,
    Warning,
    Download,
    DownloadProgress,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Step => "step",
            EventKind::Info => "info",
            EventKind::Error => "error",
            EventKind::Warning => "warning",
            EventKind::Download => "download",
            EventKind::DownloadProgress => "download.progress",
        }
    }

    /// Fully qualified event type, e.g. `io.k8s.sigs.minikube.step`.
    pub fn qualified(&self, namespace: &str) -> String {
        format!("{}.{}", namespace, self.as_str())
    }
}

/// Process-scoped identity stamped on every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventIdentity {
    pub source: String,
    pub namespace: String,
}

impl EventIdentity {
    pub fn new(source: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            namespace: namespace.into(),
        }
    }
}

impl Default for EventIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_NAMESPACE)
    }
}

/// One emitted event. Field order matches the wire form; consumers must not rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub data: EventData,
    pub datacontenttype: String,
    pub id: String,
    pub source: String,
    pub specversion: String,
    #[serde(rename = "type")]
    pub event_type: String,
}

impl Event {
    /// Serialize to a single JSON line (without the trailing newline).
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn message(&self) -> Option<&str> {
        self.data.get(KEY_MESSAGE).map(String::as_str)
    }
}

/// Stamp fixed metadata and a fresh id around an already assembled payload.
pub fn build_envelope(
    identity: &EventIdentity,
    ids: &dyn IdProvider,
    kind: EventKind,
    data: EventData,
) -> Event {
    Event {
        data,
        datacontenttype: CONTENT_TYPE_JSON.to_string(),
        id: ids.next_id(),
        source: identity.source.clone(),
        specversion: SPEC_VERSION.to_string(),
        event_type: kind.qualified(&identity.namespace),
    }
}

/// Payload holding only `message`.
pub fn message_data(message: &str) -> EventData {
    let mut data = EventData::new();
    data.insert(KEY_MESSAGE.to_string(), message.to_string());
    data
}

/// Payload for a step event.
///
/// An unset cursor yields empty `currentstep` and `name`; `totalsteps` is always the
/// catalog length.
pub fn step_data(position: &StepPosition, message: &str) -> EventData {
    let mut data = message_data(message);
    data.insert(
        KEY_CURRENT_STEP.to_string(),
        position.index.map(|i| i.to_string()).unwrap_or_default(),
    );
    data.insert(KEY_TOTAL_STEPS.to_string(), position.total.to_string());
    data.insert(KEY_NAME.to_string(), position.name.clone().unwrap_or_default());
    data
}

/// Payload for a download event: the step position plus the artifact.
pub fn download_data(position: &StepPosition, artifact: &str, message: &str) -> EventData {
    let mut data = step_data(position, message);
    data.insert(KEY_ARTIFACT.to_string(), artifact.to_string());
    data
}

/// Payload for a download progress event. `percent` is clamped to 0..=100.
pub fn download_progress_data(
    position: &StepPosition,
    artifact: &str,
    percent: u8,
    message: &str,
) -> EventData {
    let mut data = download_data(position, artifact, message);
    data.insert(KEY_PROGRESS.to_string(), percent.min(100).to_string());
    data
}

/// Merge caller context into an error payload.
///
/// Maps are applied in order, so later maps overwrite earlier keys. `message` and
/// `exitcode` are written last and always win.
pub fn merge_context<'a, I>(message: &str, exit_code: i32, contexts: I) -> EventData
where
    I: IntoIterator<Item = &'a HashMap<String, String>>,
{
    let mut data = EventData::new();
    for context in contexts {
        for (key, value) in context {
            data.insert(key.clone(), value.clone());
        }
    }
    data.insert(KEY_MESSAGE.to_string(), message.to_string());
    data.insert(KEY_EXIT_CODE.to_string(), exit_code.to_string());
    data
}
