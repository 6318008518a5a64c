//! Configuration System
//!
//! Layered configuration for event identity, the step catalog, the event log tee and
//! logging. Later layers override earlier ones: built-in defaults, the global file,
//! an explicit file, then `STEPCAST__SECTION__KEY` environment variables.

use crate::catalog;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::telemetry::events::{DEFAULT_NAMESPACE, DEFAULT_SOURCE};
use crate::telemetry::{Emitter, EventIdentity, EventLog, Step, StepRegistry};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepcastConfig {
    /// Event identity, catalog and tee settings
    #[serde(default)]
    pub events: EventsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Event emission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// URL identifying the emitting tool (`source` on every event)
    #[serde(default = "default_source")]
    pub source: String,

    /// Dotted prefix of every event `type`
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Optional file receiving a copy of every event line
    #[serde(default)]
    pub event_log: Option<PathBuf>,

    /// Built-in catalog to use when `steps` is empty
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Explicit ordered step names; overrides `catalog` when non-empty
    #[serde(default)]
    pub steps: Vec<String>,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_catalog() -> String {
    "start".to_string()
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            namespace: default_namespace(),
            event_log: None,
            catalog: default_catalog(),
            steps: Vec::new(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Events(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Events(msg) => write!(f, "Events: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EventsConfig {
    /// Validate event settings
    pub fn validate(&self) -> Result<(), String> {
        if !(self.source.starts_with("https://") || self.source.starts_with("http://")) {
            return Err(format!("source must be an http(s) URL, got '{}'", self.source));
        }
        if self.namespace.is_empty() || self.namespace.split('.').any(str::is_empty) {
            return Err(format!(
                "namespace must be a non-empty dotted name, got '{}'",
                self.namespace
            ));
        }
        if self.steps.is_empty() {
            if catalog::catalog_for(&self.catalog).is_none() {
                return Err(format!("unknown step catalog '{}'", self.catalog));
            }
        } else {
            let mut seen = HashSet::new();
            for name in &self.steps {
                if name.is_empty() {
                    return Err("step names cannot be empty".to_string());
                }
                if !seen.insert(name.as_str()) {
                    return Err(format!("duplicate step name '{}'", name));
                }
            }
        }
        Ok(())
    }

    pub fn identity(&self) -> EventIdentity {
        EventIdentity::new(self.source.clone(), self.namespace.clone())
    }

    /// Ordered step catalog: explicit `steps`, else the named built-in catalog.
    pub fn resolve_steps(&self) -> Result<Vec<Step>, ApiError> {
        if !self.steps.is_empty() {
            return Ok(self.steps.iter().cloned().map(Step::from).collect());
        }
        catalog::catalog_for(&self.catalog)
            .ok_or_else(|| ApiError::ConfigError(format!("unknown step catalog '{}'", self.catalog)))
    }

    /// Stdout emitter with this identity, catalog and optional event log.
    pub fn build_emitter(&self) -> Result<Emitter, ApiError> {
        let registry = Arc::new(StepRegistry::with_steps(self.resolve_steps()?));
        let mut emitter = Emitter::new(registry).with_identity(self.identity());
        if let Some(ref path) = self.event_log {
            let event_log = EventLog::open(path).map_err(|e| {
                ApiError::ConfigError(format!("Failed to open event log {:?}: {}", path, e))
            })?;
            emitter = emitter.with_event_log(event_log);
        }
        Ok(emitter)
    }
}

impl StepcastConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.events.validate() {
            errors.push(ValidationError::Events(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// `STEPCAST__SECTION__KEY` overrides. `events.steps` takes a comma-separated list.
fn environment() -> Environment {
    Environment::with_prefix("STEPCAST")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("events.steps")
}

/// Loads [`StepcastConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global file (if present), then `explicit`, then the environment.
    pub fn load(explicit: Option<&Path>) -> Result<StepcastConfig, ApiError> {
        Self::load_layers(global_config_path().as_deref(), explicit)
    }

    /// Load from a single file plus environment overrides, skipping the global file.
    pub fn load_from_file(path: &Path) -> Result<StepcastConfig, ApiError> {
        Self::load_layers(None, Some(path))
    }

    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<StepcastConfig, ApiError> {
        Self::load_layers_with_env(global, explicit, environment())
    }

    fn load_layers_with_env(
        global: Option<&Path>,
        explicit: Option<&Path>,
        environment: Environment,
    ) -> Result<StepcastConfig, ApiError> {
        let mut builder = Config::builder();
        if let Some(global) = global {
            builder = sources::global_file::add_to_builder(builder, global)?;
        }
        if let Some(explicit) = explicit {
            builder = sources::explicit_file::add_to_builder(builder, explicit)?;
        }
        builder = builder.add_source(environment);

        let config: StepcastConfig = builder.build()?.try_deserialize()?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(config)
    }
}
